// Standard Library Imports
use std::{future::Future, io, sync::Arc, time::Duration};

// External Crate Imports
use futures::TryStreamExt;
use reqwest::{
    Body, Client,
    header::{CONTENT_LENGTH, CONTENT_TYPE},
};
use thiserror::Error;
use tokio::{fs::File, time};
use tokio_util::{io::ReaderStream, sync::CancellationToken};
use tracing::debug;

// Local Crate Imports
use crate::file::LocalFile;

// Public API ==========================================================================================================

/// Receives the upload progress as a whole percentage in `0..=100`
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Upload failed with status: {0}")]
    Status(u16),
    #[error("Network error occurred during file upload: {0}")]
    Network(#[source] reqwest::Error),
    #[error("the file couldn't be read: {0}")]
    Io(#[from] io::Error),
    #[error("the upload timed out after {0:?}")]
    TimedOut(Duration),
    #[error("the upload was cancelled")]
    Cancelled,
}

/// Moves the bytes of a single file to a URL that has already been authorised to receive them
pub trait Transport {
    fn upload(
        &self,
        file: &LocalFile,
        target_url: &str,
        on_progress: Option<ProgressCallback>,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<(), TransferError>>;
}

/// A `Transport` that streams the file from disk as the body of an HTTP `PUT`
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub const OCTET_STREAM: &str = "application/octet-stream";

    /// A `timeout` of `None` leaves the upload to run for as long as the server keeps the connection alive
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransferError> {
        let client = Client::builder().build().map_err(TransferError::Network)?;
        Ok(Self::with_client(client, timeout))
    }

    #[must_use]
    pub const fn with_client(client: Client, timeout: Option<Duration>) -> Self {
        Self { client, timeout }
    }
}

impl Transport for HttpTransport {
    async fn upload(
        &self,
        file: &LocalFile,
        target_url: &str,
        on_progress: Option<ProgressCallback>,
        cancel: CancellationToken,
    ) -> Result<(), TransferError> {
        let put = async {
            match self.timeout {
                Some(timeout) => time::timeout(timeout, self.put(file, target_url, on_progress))
                    .await
                    .unwrap_or_else(|_| Err(TransferError::TimedOut(timeout))),
                None => self.put(file, target_url, on_progress).await,
            }
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(TransferError::Cancelled),
            result = put => result,
        }
    }
}

/// Rounds `sent / total` to the nearest whole percent, rounding halves up and capping the result at 100
#[must_use]
pub fn percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }

    let sent = u128::from(sent.min(total));
    let total = u128::from(total);
    let percent = (sent * 200 + total) / (total * 2);

    u8::try_from(percent).unwrap_or(100)
}

// Private Helper Code =================================================================================================

impl HttpTransport {
    async fn put(
        &self,
        file: &LocalFile,
        target_url: &str,
        on_progress: Option<ProgressCallback>,
    ) -> Result<(), TransferError> {
        let handle = File::open(file.path()).await?;
        // NOTE: The file may have changed since it was selected, so the length is taken from the open handle that the
        // body is actually streamed from
        let size = handle.metadata().await.ok().map(|metadata| metadata.len());
        let mut tracker = ProgressTracker::new(size, on_progress);
        let body = ReaderStream::new(handle).inspect_ok(move |chunk| tracker.advance(chunk.len()));

        let mut request = self.client.put(target_url).header(CONTENT_TYPE, Self::OCTET_STREAM);
        // NOTE: Without an explicit length, a streamed body is sent with chunked transfer-encoding, which most
        // signed-URL endpoints refuse
        if let Some(size) = size {
            request = request.header(CONTENT_LENGTH, size);
        }

        // NOTE: The URL carries the signature, so it's stripped from any error before that error can be displayed
        let response = request
            .body(Body::wrap_stream(body))
            .send()
            .await
            .map_err(|error| TransferError::Network(error.without_url()))?;

        let status = response.status();
        debug!(filename = file.name(), %status, "storage endpoint responded");

        if status.is_success() {
            Ok(())
        } else {
            Err(TransferError::Status(status.as_u16()))
        }
    }
}

struct ProgressTracker {
    sent: u64,
    total: Option<u64>,
    reported: u8,
    on_progress: Option<ProgressCallback>,
}

impl ProgressTracker {
    const fn new(total: Option<u64>, on_progress: Option<ProgressCallback>) -> Self {
        Self {
            sent: 0,
            total,
            reported: 0,
            on_progress,
        }
    }

    fn advance(&mut self, bytes: usize) {
        self.sent = self.sent.saturating_add(bytes as u64);

        let Some(on_progress) = &self.on_progress else {
            return;
        };
        // Ticks are skipped entirely when there's no meaningful total to measure against
        let Some(total) = self.total.filter(|&total| total != 0) else {
            return;
        };

        self.reported = self.reported.max(percent(self.sent, total));
        on_progress(self.reported);
    }
}

// Unit Tests ==========================================================================================================

#[cfg(test)]
mod tests {
    use std::{fs, sync::Mutex};

    use tempfile::{TempDir, tempdir};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_bytes, header, method, path},
    };

    use super::*;

    const CONTENTS: &[u8] = b"%PDF-1.7 pretend this is a quarterly report";

    fn report_file() -> (TempDir, LocalFile) {
        let directory = tempdir().unwrap();
        let path = directory.path().join("report.pdf");
        fs::write(&path, CONTENTS).unwrap();
        let file = LocalFile::new(path).unwrap();

        (directory, file)
    }

    fn recording_callback() -> (Arc<Mutex<Vec<u8>>>, ProgressCallback) {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let callback = {
            let ticks = Arc::clone(&ticks);
            Arc::new(move |percent: u8| ticks.lock().unwrap().push(percent))
        };

        (ticks, callback)
    }

    #[test]
    fn percentages() {
        assert_eq!(percent(0, 1_000_000), 0);
        assert_eq!(percent(500_000, 1_000_000), 50);
        assert_eq!(percent(1_000_000, 1_000_000), 100);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        // Halves round up
        assert_eq!(percent(1, 200), 1);
        assert_eq!(percent(1, 201), 0);
        // Overshooting and empty totals never escape the `0..=100` range
        assert_eq!(percent(7, 5), 100);
        assert_eq!(percent(0, 0), 100);
        assert_eq!(percent(u64::MAX, u64::MAX), 100);
        assert_eq!(percent(u64::MAX / 2, u64::MAX), 50);
    }

    #[test]
    fn progress_tracker() {
        let (ticks, callback) = recording_callback();
        let mut tracker = ProgressTracker::new(Some(1_000_000), Some(callback));
        tracker.advance(500_000);
        tracker.advance(500_000);
        assert_eq!(ticks.lock().unwrap()[..], [50, 100]);

        // Unknown or empty totals don't produce any ticks
        let (ticks, callback) = recording_callback();
        let mut tracker = ProgressTracker::new(None, Some(Arc::clone(&callback)));
        tracker.advance(4096);
        let mut tracker = ProgressTracker::new(Some(0), Some(callback));
        tracker.advance(4096);
        assert!(ticks.lock().unwrap().is_empty());

        // A file that grows mid-upload is capped rather than reporting more than 100%
        let (ticks, callback) = recording_callback();
        let mut tracker = ProgressTracker::new(Some(10), Some(callback));
        tracker.advance(8);
        tracker.advance(8);
        tracker.advance(8);
        assert_eq!(ticks.lock().unwrap()[..], [80, 100, 100]);

        // And no callback at all is fine too
        let mut tracker = ProgressTracker::new(Some(10), None);
        tracker.advance(10);
        assert_eq!(tracker.sent, 10);
    }

    #[tokio::test]
    async fn upload() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/bucket/report.pdf"))
            .and(header("content-type", HttpTransport::OCTET_STREAM))
            .and(header("content-length", CONTENTS.len().to_string().as_str()))
            .and(body_bytes(CONTENTS))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (_directory, file) = report_file();
        let (ticks, callback) = recording_callback();
        let transport = HttpTransport::new(None).unwrap();
        let url = format!("{}/bucket/report.pdf", server.uri());

        transport
            .upload(&file, &url, Some(callback), CancellationToken::new())
            .await
            .unwrap();

        let ticks = ticks.lock().unwrap();
        assert_eq!(ticks.last(), Some(&100));
        assert!(ticks.is_sorted());
    }

    #[tokio::test]
    async fn file_changed_after_selection() {
        const REVISED: &[u8] = b"%PDF-1.7 the revised quarterly report, now with an appendix";

        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/bucket/report.pdf"))
            .and(header("content-length", REVISED.len().to_string().as_str()))
            .and(body_bytes(REVISED))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (_directory, file) = report_file();
        assert_eq!(file.size(), Some(CONTENTS.len() as u64));
        fs::write(file.path(), REVISED).unwrap();

        let (ticks, callback) = recording_callback();
        let transport = HttpTransport::new(None).unwrap();
        let url = format!("{}/bucket/report.pdf", server.uri());

        transport
            .upload(&file, &url, Some(callback), CancellationToken::new())
            .await
            .unwrap();

        // Progress is measured against the file that was actually sent
        assert_eq!(ticks.lock().unwrap().last(), Some(&100));
    }

    #[tokio::test]
    async fn upload_without_progress() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let (_directory, file) = report_file();
        let transport = HttpTransport::new(Some(Duration::from_secs(5))).unwrap();

        let result = transport
            .upload(&file, &server.uri(), None, CancellationToken::new())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejected_upload() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403).set_body_string("<Error>SignatureDoesNotMatch</Error>"))
            .mount(&server)
            .await;

        let (_directory, file) = report_file();
        let transport = HttpTransport::new(None).unwrap();

        let error = transport
            .upload(&file, &server.uri(), None, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(error, TransferError::Status(403)));
        assert_eq!(error.to_string(), "Upload failed with status: 403");

        // Redirects that aren't followed are failures too
        server.reset().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(304))
            .mount(&server)
            .await;
        let error = transport
            .upload(&file, &server.uri(), None, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(error, TransferError::Status(304)));
    }

    #[tokio::test]
    async fn network_error() {
        let (_directory, file) = report_file();
        let transport = HttpTransport::new(None).unwrap();

        // NOTE: Nothing should ever be listening on port 1
        let error = transport
            .upload(
                &file,
                "http://127.0.0.1:1/bucket/report.pdf?signature=secret",
                None,
                CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(error, TransferError::Network(_)));
        assert!(!error.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn unreadable_file() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let directory = tempdir().unwrap();
        let file = LocalFile::new(directory.path().join("vanished.pdf")).unwrap();
        let transport = HttpTransport::new(None).unwrap();

        let error = transport
            .upload(&file, &server.uri(), None, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(error, TransferError::Io(_)));
    }

    #[tokio::test]
    async fn timed_out() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let (_directory, file) = report_file();
        let transport = HttpTransport::new(Some(Duration::from_millis(50))).unwrap();

        let error = transport
            .upload(&file, &server.uri(), None, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(error, TransferError::TimedOut(timeout) if timeout == Duration::from_millis(50)));
        assert_eq!(error.to_string(), "the upload timed out after 50ms");
    }

    #[tokio::test]
    async fn cancelled() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let (_directory, file) = report_file();
        let transport = HttpTransport::new(None).unwrap();
        let cancel = CancellationToken::new();

        let canceller = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                time::sleep(Duration::from_millis(20)).await;
                cancel.cancel();
            })
        };

        let error = transport
            .upload(&file, &server.uri(), None, cancel)
            .await
            .unwrap_err();
        assert!(matches!(error, TransferError::Cancelled));
        canceller.await.unwrap();
    }
}
