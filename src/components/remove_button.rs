use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RemoveButtonProps {
    pub on_remove: Callback<()>,
}

#[function_component(RemoveButton)]
pub fn remove_button(props: &RemoveButtonProps) -> Html {
    let onclick = {
        let callback = props.on_remove.clone();
        Callback::from(move |_| {
            callback.emit(());
        })
    };

    html! {
        <button
            onclick={onclick}
            class="remove-button border-2 border-white mt-20"
        >
            { "Remove Video" }
        </button>
    }
}
