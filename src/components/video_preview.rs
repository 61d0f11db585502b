use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct VideoPreviewProps {
    pub src: AttrValue,
}

#[function_component(VideoPreview)]
pub fn video_preview(props: &VideoPreviewProps) -> Html {
    html! {
        <video
            class="video-preview border-2 border-white"
            src={props.src.clone()}
            controls={true}
            height="400"
            width="400"
        />
    }
}
