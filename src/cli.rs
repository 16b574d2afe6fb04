// Standard Library Imports
use std::{fs, path::PathBuf, time::Duration};

// External Crate Imports
use clap::{Parser, ValueEnum};
use color_eyre::{Result, eyre::WrapErr};
use signed_url_uploader::{
    host::{HostArguments, Theme},
    transfer::HttpTransport,
    uploader::UploaderConfig,
};

// Public API ==========================================================================================================

/// Upload a single file straight to storage through a pre-signed URL
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// The URL the file will be `PUT` to
    #[arg(long, env = "SIGNED_URL", hide_env_values = true)]
    signed_url: Option<String>,

    /// A JSON file holding the host's argument object, e.g. `{"signed_url": "...", "theme": {"base": "dark"}}`
    #[arg(long, value_name = "FILE")]
    args: Option<PathBuf>,

    /// Overrides the theme from `--args`; without either, the system's preference is used
    #[arg(long, value_enum)]
    theme: Option<ThemeBase>,

    /// Give up on an upload after this many seconds (0 waits forever)
    #[arg(long, default_value_t = 600)]
    timeout_secs: u64,

    /// Hide the spinner and progress bar
    #[arg(long)]
    minimal: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ThemeBase {
    Dark,
    Light,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub arguments: HostArguments,
    pub config: UploaderConfig,
    pub transport: HttpTransport,
}

impl Cli {
    pub fn into_settings(self) -> Result<Settings> {
        let mut arguments = match &self.args {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .wrap_err_with(|| format!("couldn't read the host arguments from {}", path.display()))?;
                HostArguments::from_json(&json)
                    .wrap_err_with(|| format!("{} isn't a valid host argument object", path.display()))?
            }
            None => HostArguments::default(),
        };

        if let Some(signed_url) = self.signed_url {
            arguments.signed_url = Some(signed_url);
        }

        if let Some(theme) = self.theme {
            arguments.theme = Some(match theme {
                ThemeBase::Dark => Theme::dark(),
                ThemeBase::Light => Theme::light(),
            });
        }

        let timeout = (self.timeout_secs != 0).then(|| Duration::from_secs(self.timeout_secs));
        let config = UploaderConfig {
            show_progress: !self.minimal,
            timeout,
        };
        let transport = HttpTransport::new(config.timeout)?;

        Ok(Settings {
            arguments,
            config,
            transport,
        })
    }
}

// Unit Tests ==========================================================================================================
