// NOTE: The `#[component]` macro is deriving `PartialEq`, but not `Eq`, and clippy is complaining about that. This
// needs to be a module-level `#![expect(...)]` since I can't actually place an `#[expect(...)]` inside of the
// `#[component]` macro
#![expect(clippy::derive_partial_eq_without_eq)]

use dioxus::prelude::*;
use signed_url_uploader::view::Palette;

#[component]
pub fn ProgressBar(percent: u8, palette: Palette) -> Element {
    let track_style = format!(
        "width: 100%; height: 10px; background-color: {}; border-radius: 5px; overflow: hidden; margin-top: 10px;",
        palette.progress_track
    );
    let fill_style = format!(
        "width: {percent}%; height: 100%; background-color: {}; transition: width 0.2s ease-in-out;",
        palette.progress_fill
    );

    rsx! {
        div {
            style: track_style,
            role: "progressbar",
            "aria-valuenow": "{percent}",
            "aria-valuemin": "0",
            "aria-valuemax": "100",

            div { style: fill_style }
        }
    }
}
