mod alert_dialog;
mod cancel_icon;
mod file_input;
mod progress_bar;
mod spinner;
mod upload_button;
mod uploader_widget;

use signed_url_uploader::view::Palette;

pub use uploader_widget::SignedUrlUploader;

/// Shared by every clickable control, which dims and refuses the pointer whilst an upload is running
fn button_style(palette: Palette, disabled: bool) -> String {
    control_style(palette, disabled, palette.background)
}

fn control_style(palette: Palette, disabled: bool, background: &str) -> String {
    let cursor = if disabled { "not-allowed" } else { "pointer" };
    let opacity = if disabled { "0.7" } else { "1" };

    format!(
        "border: 1px solid {border}; outline: 1px solid {border}; background-color: {background}; color: {text}; \
         padding: 10px 15px; border-radius: 5px; cursor: {cursor}; opacity: {opacity};",
        border = palette.border,
        text = palette.text,
    )
}
