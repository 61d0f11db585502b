use web_sys::{Event, File, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FileInputProps {
    /// Fires on every change; `None` when the dialog closed without a file.
    pub on_file_selected: Callback<Option<File>>,
    #[prop_or(AttrValue::Static("video/*"))]
    pub accept: AttrValue,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(FileInput)]
pub fn file_input(props: &FileInputProps) -> Html {
    let on_change = {
        let on_file_selected = props.on_file_selected.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let file = input.files().and_then(|files| files.get(0));
            // Clear so picking the same file again still fires a change.
            input.set_value("");
            on_file_selected.emit(file);
        })
    };

    html! {
        <div class="file-input">
            <label for="video-upload" class="file-label">
                { "Select Video File" }
            </label>
            <input
                id="video-upload"
                type="file"
                accept={props.accept.clone()}
                onchange={on_change}
                disabled={props.disabled}
            />
        </div>
    }
}
