// Standard Library Imports
use std::io::{self, Write};

// External Crate Imports
use dioxus::prelude::*;
use signed_url_uploader::{
    file::SelectedFile,
    host::{Alerts, HostArguments, HostBridge},
};
use tracing::error;

// Public API ==========================================================================================================

pub const ALERT_DIALOG_ID: &str = "alert_dialog";

/// Plays the part of the notebook runtime: the argument object comes from the command line, confirmed results are
/// written to stdout as one JSON object per line, and alerts are shown in a modal `<dialog>`
#[derive(Clone)]
pub struct DesktopHost {
    arguments: HostArguments,
    alert: Signal<Option<String>>,
}

impl DesktopHost {
    pub const fn new(arguments: HostArguments, alert: Signal<Option<String>>) -> Self {
        Self { arguments, alert }
    }
}

impl HostBridge for DesktopHost {
    fn arguments(&self) -> HostArguments {
        self.arguments.clone()
    }

    fn emit_result(&self, value: &SelectedFile) {
        if let Err(emit_error) = emit_to(io::stdout().lock(), value) {
            error!(%emit_error, "couldn't write the upload result to stdout");
        }
    }
}

impl Alerts for DesktopHost {
    fn alert(&self, message: &str) {
        let mut alert = self.alert;
        alert.set(Some(message.to_owned()));
        document::eval(&format!("{ALERT_DIALOG_ID}.showModal()"));
    }
}

// Private Helper Code =================================================================================================

/// Writes `value` as a single line of JSON, flushing so that whatever is reading the other end sees it straight away
fn emit_to(mut writer: impl Write, value: &SelectedFile) -> io::Result<()> {
    serde_json::to_writer(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()
}

// Unit Tests ==========================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn emitted(values: &[SelectedFile]) -> String {
        let mut stdout = Vec::new();
        for value in values {
            emit_to(&mut stdout, value).unwrap();
        }
        String::from_utf8(stdout).unwrap()
    }

    #[test]
    fn one_json_line_per_result() {
        let report = SelectedFile {
            filename: "report.pdf".to_owned(),
            content_type: "application/pdf".to_owned(),
        };
        assert_eq!(
            emitted(&[report]),
            "{\"filename\":\"report.pdf\",\"content_type\":\"application/pdf\"}\n"
        );

        // Unknown types are emitted as empty strings, and every result gets its own line
        let unknown = SelectedFile {
            filename: "notes".to_owned(),
            content_type: String::new(),
        };
        let lines = emitted(&[unknown.clone(), unknown]);
        assert_eq!(
            lines.lines().collect::<Vec<_>>(),
            [r#"{"filename":"notes","content_type":""}"#; 2]
        );
        assert!(lines.ends_with('\n'));
    }
}
