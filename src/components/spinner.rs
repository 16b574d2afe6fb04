use dioxus::prelude::*;
use signed_url_uploader::view::Palette;

use crate::components::cancel_icon::CancelIcon;

#[component]
pub fn Spinner(text: &'static str, palette: Palette, oncancel: EventHandler<()>) -> Element {
    let style = format!(
        "margin-top: 10px; color: {}; display: flex; align-items: center; gap: 8px;",
        palette.text
    );

    rsx! {
        div { style,
            {text}
            span {
                title: "Cancel this upload",
                style: "cursor: pointer; display: inline-flex;",
                onclick: move |_| oncancel.call(()),

                CancelIcon {}
            }
        }
    }
}
