mod cli;
mod components;
mod desktop_host;

use clap::Parser;
use color_eyre::Result;
use dioxus::{
    desktop::{self, WindowBuilder},
    prelude::*,
};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use components::SignedUrlUploader;

const DEFAULT_LOG_FILTER: &str = "signed_url_uploader=info";

#[component]
fn App() -> Element {
    rsx! {
        main { SignedUrlUploader {} }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    // NOTE: Logs go to stderr, since stdout is reserved for the confirmed upload results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Cli::parse().into_settings()?;

    dioxus::LaunchBuilder::new()
        .with_cfg(
            desktop::Config::default()
                .with_menu(None)
                .with_window(WindowBuilder::new().with_title("Signed URL Uploader")),
        )
        .with_context(settings)
        .launch(App);

    Ok(())
}
