use dioxus::prelude::*;
use signed_url_uploader::{file::LocalFile, view::Palette};
use tracing::warn;

use crate::components::control_style;

#[component]
pub fn FileInput(disabled: bool, palette: Palette, onselect: EventHandler<Option<LocalFile>>) -> Element {
    let style = control_style(palette, disabled, "transparent");

    rsx! {
        input {
            r#type: "file",
            style,
            disabled,
            onchange: move |event| {
                // NOTE: Only the first file is ever looked at, since the input doesn't set `multiple`
                let path = event.files().and_then(|files| files.files().into_iter().next());
                let file = path.and_then(|path| match LocalFile::new(&path) {
                    Ok(file) => Some(file),
                    Err(report) => {
                        warn!(%report, "couldn't read the selected file's metadata");
                        None
                    }
                });

                onselect.call(file);
            },
        }
    }
}
