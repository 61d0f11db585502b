use crate::components::{
    file_input::FileInput,
    remove_button::RemoveButton,
    status_banner::StatusBanner,
    video_preview::VideoPreview,
};
use crate::config::WidgetConfig;
use crate::state::{PanelState, PanelView, UploadTicket};
use crate::upload::{self, UploadClientHandle, UploadError, UploadReceipt};
use web_sys::File;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub client: UploadClientHandle,
    #[prop_or_default]
    pub config: WidgetConfig,
    /// Video to show on mount instead of the picker.
    #[prop_or_default]
    pub initial_video_url: Option<AttrValue>,
}

/// Side panel that uploads a picked video and previews it.
pub struct App {
    state: PanelState,
}

pub enum Msg {
    FileChosen(Option<File>),
    UploadFinished(UploadTicket, Result<UploadReceipt, UploadError>),
    CancelUpload,
    RemoveVideo,
    DismissError,
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let state = match &ctx.props().initial_video_url {
            Some(url) => PanelState::with_video_url(url.as_str()),
            None => PanelState::default(),
        };

        Self { state }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileChosen(file) => {
                let Some(pending) = self.state.select_file(file) else {
                    log::debug!("file dialog closed without a selection");
                    return false;
                };

                let client = ctx.props().client.clone();
                let url = ctx.props().config.upload_url();
                let link = ctx.link().clone();
                log::info!(
                    "uploading {} ({} bytes) to {}",
                    pending.file.name(),
                    pending.file.size(),
                    url
                );

                wasm_bindgen_futures::spawn_local(async move {
                    let result = upload::upload_video(&*client, &url, &pending.file).await;
                    link.send_message(Msg::UploadFinished(pending.ticket, result));
                });

                true
            },
            Msg::UploadFinished(ticket, result) => {
                match &result {
                    Ok(receipt) => log::info!(
                        "video uploaded, server path: {}",
                        receipt.video_path.as_deref().unwrap_or("<none>")
                    ),
                    Err(e) => log::error!("Error in video uploading: {}", e),
                }

                let config = &ctx.props().config;
                let applied = self
                    .state
                    .finish_upload(ticket, result, |receipt| config.preview_url(receipt));
                if !applied {
                    log::debug!("dropping result of superseded upload {:?}", ticket);
                }
                applied
            },
            Msg::CancelUpload => {
                log::info!("upload cancelled, a late response will be ignored");
                self.state.cancel_upload()
            },
            Msg::RemoveVideo => {
                self.state.remove_video();
                true
            },
            Msg::DismissError => self.state.dismiss_error(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let body = match self.state.view() {
            PanelView::Empty => html! {
                <FileInput
                    on_file_selected={ctx.link().callback(Msg::FileChosen)}
                    accept={ctx.props().config.accept.clone()}
                    disabled={self.state.is_uploading()}
                />
            },
            PanelView::HasVideo(url) => html! {
                <>
                    <VideoPreview src={url.to_string()} />
                    <RemoveButton on_remove={ctx.link().callback(|_| Msg::RemoveVideo)} />
                </>
            },
        };

        html! {
            <aside class="video-upload-panel fixed right-0 top-0 h-full w-96 border-l border-gray-200 shadow-lg p-6 z-30">
                <StatusBanner
                    uploading={self.state.is_uploading()}
                    error={self.state.error().cloned()}
                    notice={self.state.last_receipt().and_then(|receipt| receipt.message.clone()).map(AttrValue::from)}
                    on_cancel={ctx.link().callback(|_| Msg::CancelUpload)}
                    on_dismiss={ctx.link().callback(|_| Msg::DismissError)}
                />
                { body }
            </aside>
        }
    }
}
