use std::rc::Rc;

use dioxus::prelude::*;
use signed_url_uploader::{transfer::HttpTransport, uploader::Uploader, view};

use crate::{
    cli::Settings,
    components::{
        alert_dialog::AlertDialog, file_input::FileInput, progress_bar::ProgressBar, spinner::Spinner,
        upload_button::UploadButton,
    },
    desktop_host::DesktopHost,
};

const PREFERS_DARK: &str =
    r#"return Boolean(window.matchMedia && window.matchMedia("(prefers-color-scheme: dark)").matches);"#;

#[component]
pub fn SignedUrlUploader() -> Element {
    let settings = use_context::<Settings>();
    let alert = use_signal(|| None);

    let uploader: Rc<Uploader<HttpTransport, DesktopHost>> = use_hook(|| {
        let host = DesktopHost::new(settings.arguments.clone(), alert);
        let uploader = Uploader::new(settings.transport.clone(), host, settings.config.clone());
        uploader.set_on_update(schedule_update());
        Rc::new(uploader)
    });

    let system_prefers_dark = use_resource(|| async {
        document::eval(PREFERS_DARK).join::<bool>().await.unwrap_or(false)
    });

    let view = view::render(
        &uploader.state(),
        settings.config.show_progress,
        settings.arguments.theme.as_ref(),
        system_prefers_dark.read().unwrap_or(false),
    );
    let palette = view.palette;

    let select = {
        let uploader = Rc::clone(&uploader);
        move |file| {
            let uploader = Rc::clone(&uploader);
            spawn(async move {
                uploader.handle_file_selected(file).await;
            });
        }
    };
    let confirm = {
        let uploader = Rc::clone(&uploader);
        move |()| {
            uploader.confirm_upload();
        }
    };
    let cancel = move |()| {
        uploader.cancel();
    };

    rsx! {
        div { style: "padding: 20px; text-align: center;",
            div { style: "display: flex; align-items: center; gap: 20px; flex-direction: column;",
                FileInput { disabled: view.controls_disabled, palette, onselect: select }
                UploadButton {
                    label: view.button_label,
                    disabled: view.controls_disabled,
                    palette,
                    onclick: confirm,
                }

                if let Some(text) = view.spinner {
                    Spinner { text, palette, oncancel: cancel }
                }

                if let Some(percent) = view.progress_bar {
                    ProgressBar { percent, palette }
                }
            }

            AlertDialog { message: alert, palette }
        }
    }
}
