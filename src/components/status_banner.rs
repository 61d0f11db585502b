use yew::prelude::*;

use crate::upload::UploadError;

#[derive(Properties, PartialEq)]
pub struct StatusBannerProps {
    pub uploading: bool,
    #[prop_or_default]
    pub error: Option<UploadError>,
    /// What the server said about the last successful upload.
    #[prop_or_default]
    pub notice: Option<AttrValue>,
    pub on_cancel: Callback<()>,
    pub on_dismiss: Callback<()>,
}

/// In-flight notice with a cancel control, or the outcome of the last upload.
#[function_component(StatusBanner)]
pub fn status_banner(props: &StatusBannerProps) -> Html {
    if props.uploading {
        let onclick = {
            let on_cancel = props.on_cancel.clone();
            Callback::from(move |_| on_cancel.emit(()))
        };
        return html! {
            <div class="upload-status uploading">
                <span>{ "Uploading video..." }</span>
                <button class="cancel-button" onclick={onclick}>{ "Cancel" }</button>
            </div>
        };
    }

    match (&props.error, &props.notice) {
        (Some(error), _) => {
            let onclick = {
                let on_dismiss = props.on_dismiss.clone();
                Callback::from(move |_| on_dismiss.emit(()))
            };
            html! {
                <div class="upload-status error" role="alert">
                    <span>{ error.to_string() }</span>
                    <button class="dismiss-button" onclick={onclick}>{ "Dismiss" }</button>
                </div>
            }
        }
        (None, Some(notice)) => html! {
            <div class="upload-status done">{ notice.clone() }</div>
        },
        (None, None) => html! {},
    }
}
