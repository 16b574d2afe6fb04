use dioxus::prelude::*;
use signed_url_uploader::view::Palette;

use crate::components::button_style;

#[component]
pub fn UploadButton(
    label: &'static str,
    disabled: bool,
    palette: Palette,
    onclick: EventHandler<()>,
) -> Element {
    let style = button_style(palette, disabled);

    rsx! {
        button {
            style,
            disabled,
            onclick: move |_| onclick.call(()),

            {label}
        }
    }
}
