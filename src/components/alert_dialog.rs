// NOTE: The `#[component]` macro is deriving `PartialEq`, but not `Eq`, and clippy is complaining about that. This
// needs to be a module-level `#![expect(...)]` since I can't actually place an `#[expect(...)]` inside of the
// `#[component]` macro
#![expect(clippy::derive_partial_eq_without_eq)]

use dioxus::prelude::*;
use signed_url_uploader::view::Palette;

use crate::{components::button_style, desktop_host::ALERT_DIALOG_ID};

#[component]
pub fn AlertDialog(message: Signal<Option<String>>, palette: Palette) -> Element {
    let mut message = message;
    let dialog_style = format!(
        "border: 1px solid {}; border-radius: 5px; padding: 20px; color: {}; background-color: {};",
        palette.border, palette.text, palette.background
    );

    let mut close_dialog = move || {
        document::eval(&format!("{ALERT_DIALOG_ID}.close()"));
        message.set(None);
    };

    rsx! {
        dialog { id: ALERT_DIALOG_ID, style: dialog_style,
            div { style: "display: flex; flex-direction: column; align-items: center; gap: 16px;",
                p { {message().unwrap_or_default()} }

                button {
                    style: button_style(palette, false),
                    r#type: "button",
                    onclick: move |_| close_dialog(),
                    "OK"
                }
            }
        }
    }
}
