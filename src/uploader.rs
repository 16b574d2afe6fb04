// Standard Library Imports
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

// External Crate Imports
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

// Local Crate Imports
use crate::{
    file::{LocalFile, SelectedFile},
    host::{Alerts, HostBridge},
    on_update::{OnUpdate, OnUpdateCallback},
    transfer::{ProgressCallback, TransferError, Transport},
};

// Public API ==========================================================================================================

pub const CONFIRM_WITHOUT_UPLOAD: &str = "Please upload a new file before clicking upload.";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UploaderConfig {
    /// Report progress while uploading and show the spinner and progress bar. With this off, the widget behaves like
    /// the minimal variant: no progress ticks, and the percentage is left where it was once the upload finishes
    pub show_progress: bool,
    pub timeout: Option<Duration>,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            timeout: Some(Duration::from_secs(10 * 60)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct UploadState {
    pub in_progress: bool,
    pub progress_percent: u8,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    Completed,
    Failed,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WidgetState {
    pub selected_file: SelectedFile,
    pub upload: UploadState,
    pub phase: Phase,
}

/// How a call to `Uploader::handle_file_selected()` played out
#[derive(Debug)]
pub enum Outcome {
    MissingFile,
    MissingSignedUrl,
    Busy,
    /// The file matched `IGNORED_SUFFIX`, so nothing was sent, but its metadata is still waiting to be confirmed
    Skipped,
    Uploaded,
    Failed(TransferError),
}

pub struct Uploader<T, H> {
    transport: T,
    host: H,
    config: UploaderConfig,
    state: Arc<Mutex<WidgetState>>,
    in_flight: Mutex<Option<CancellationToken>>,
    on_update: OnUpdate,
}

impl<T: Transport, H: HostBridge + Alerts> Uploader<T, H> {
    #[must_use]
    pub fn new(transport: T, host: H, config: UploaderConfig) -> Self {
        Self {
            transport,
            host,
            config,
            state: Arc::default(),
            in_flight: Mutex::default(),
            on_update: OnUpdate::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> WidgetState {
        self.state.lock().unwrap().clone()
    }

    #[must_use]
    pub const fn config(&self) -> &UploaderConfig {
        &self.config
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn set_on_update(&self, on_update: OnUpdateCallback) {
        self.on_update.set(on_update);
    }

    pub async fn handle_file_selected(&self, file: Option<LocalFile>) -> Outcome {
        let Some(file) = file else {
            warn!("no file was selected");
            return Outcome::MissingFile;
        };

        let arguments = self.host.arguments();
        let Some(signed_url) = arguments.signed_url() else {
            warn!(filename = file.name(), "no signed URL was supplied by the host");
            return Outcome::MissingSignedUrl;
        };

        let Some(cancel) = self.begin_attempt() else {
            warn!(filename = file.name(), "an upload is already in progress");
            return Outcome::Busy;
        };

        self.update(|state| {
            state.upload = UploadState {
                in_progress: true,
                progress_percent: 0,
            };
            state.selected_file = SelectedFile::from(&file);
            state.phase = Phase::Uploading;
        });

        let result = if file.is_ignored() {
            debug!(filename = file.name(), "skipping the upload of an ignored file");
            Ok(false)
        } else {
            info!(filename = file.name(), size = file.size(), "uploading");
            self.transport
                .upload(&file, signed_url, self.progress_callback(), cancel)
                .await
                .map(|()| true)
        };

        *self.in_flight.lock().unwrap() = None;

        // NOTE: A failed upload leaves `selected_file` as it is, with no rollback to whatever was selected before
        // this attempt
        let (outcome, phase) = match result {
            Ok(true) => {
                info!(filename = file.name(), "upload complete");
                (Outcome::Uploaded, Phase::Completed)
            }
            Ok(false) => (Outcome::Skipped, Phase::Completed),
            Err(transfer_error) => {
                error!(filename = file.name(), %transfer_error, "upload failed");
                self.host
                    .alert(&format!("Error uploading file {}: {transfer_error}", file.name()));
                (Outcome::Failed(transfer_error), Phase::Failed)
            }
        };

        let show_progress = self.config.show_progress;
        self.update(|state| {
            state.upload.in_progress = false;
            if show_progress {
                state.upload.progress_percent = 100;
            }
            state.phase = phase;
        });

        outcome
    }

    /// Hands the uploaded file's metadata to the host, returning `true` if anything was emitted
    pub fn confirm_upload(&self) -> bool {
        let WidgetState {
            selected_file,
            upload,
            ..
        } = self.state();

        if upload.in_progress {
            warn!("can't confirm whilst an upload is still in progress");
            return false;
        }

        if selected_file.is_empty() {
            self.host.alert(CONFIRM_WITHOUT_UPLOAD);
            return false;
        }

        self.host.emit_result(&selected_file);
        info!(filename = selected_file.filename.as_str(), "upload confirmed");

        self.update(|state| {
            state.selected_file = SelectedFile::default();
            state.upload.progress_percent = 0;
            state.phase = Phase::Idle;
        });

        true
    }

    /// Cancels the upload that's currently in flight, returning `false` if there wasn't one
    pub fn cancel(&self) -> bool {
        if let Some(cancel) = &*self.in_flight.lock().unwrap() {
            cancel.cancel();
            true
        } else {
            false
        }
    }
}

// Private Helper Code =================================================================================================

impl<T, H> Uploader<T, H> {
    fn begin_attempt(&self) -> Option<CancellationToken> {
        let mut in_flight = self.in_flight.lock().unwrap();
        if in_flight.is_some() {
            return None;
        }

        let cancel = CancellationToken::new();
        *in_flight = Some(cancel.clone());

        Some(cancel)
    }

    fn update(&self, change: impl FnOnce(&mut WidgetState)) {
        change(&mut self.state.lock().unwrap());
        self.on_update.call();
    }

    fn progress_callback(&self) -> Option<ProgressCallback> {
        if !self.config.show_progress {
            return None;
        }

        let state = Arc::clone(&self.state);
        let on_update = self.on_update.clone();

        Some(Arc::new(move |percent: u8| {
            {
                let mut state = state.lock().unwrap();
                let upload = &mut state.upload;
                upload.progress_percent = upload.progress_percent.max(percent.min(100));
            }
            on_update.call();
        }))
    }
}

// Unit Tests ==========================================================================================================
