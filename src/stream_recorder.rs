use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::constants::MAX_READ_BUFFER;
use crate::error::RecordingError;
use crate::request::RecordingRequest;
use crate::stream_source::StreamSource;
use crate::utils::list_saved_streams;

/// Why the read loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    DurationElapsed,
    /// The stream ended before the duration elapsed.
    StreamEnded,
    Cancelled,
}

/// Outcome of a successful recording.
#[derive(Debug, Clone)]
pub struct RecordingResult {
    pub output_path: PathBuf,
    pub bytes_written: u64,
    pub elapsed_seconds: f64,
    pub started_at: DateTime<Local>,
    pub stop_reason: StopReason,
    /// Snapshot of `*.mp3` files next to the recording. Advisory only.
    pub saved_streams: Vec<String>,
}

/// The main struct responsible for a bounded capture.
///
/// It takes an implementation of the StreamSource trait, copies bytes
/// from it into the output file block by block, and stops when the
/// duration elapses, the stream ends, or the cancel flag is raised.
pub struct StreamRecorder<S: StreamSource> {
    pub source: S,
    cancel: Arc<AtomicBool>,
    listing_dir: PathBuf,
}

impl<S: StreamSource> StreamRecorder<S> {
    pub fn new(source: S) -> Self {
        StreamRecorder {
            source,
            cancel: Arc::new(AtomicBool::new(false)),
            listing_dir: PathBuf::from("."),
        }
    }

    /// Share a flag that aborts the recording once set.
    ///
    /// The flag is checked between reads, so an in-flight read still completes.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Directory scanned for the saved-streams listing.
    pub fn with_listing_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.listing_dir = dir.into();
        self
    }

    pub fn get_source(&self) -> &S {
        &self.source
    }

    /// Record one stream slice end to end.
    ///
    /// Validation happens before any I/O. The stream is opened before the
    /// output file is created, so a stream that cannot be opened leaves any
    /// existing file at the output path untouched. Both handles are dropped
    /// on every exit path.
    pub fn record(&self, request: &RecordingRequest) -> Result<RecordingResult, RecordingError> {
        let request = request.validate()?;

        let buffer_len = request.block_size.min(MAX_READ_BUFFER);
        if buffer_len < request.block_size {
            warn!(
                "Block size {} is capped at {} bytes per read",
                request.block_size, buffer_len
            );
        }
        let mut buffer = vec![0u8; buffer_len];

        info!(
            "Recording {} into {} for {}s (block size {} bytes)",
            request.url,
            request.output_path.display(),
            request.duration.as_secs(),
            request.block_size
        );

        let started_at = Local::now();
        let start = Instant::now();

        let mut stream = self.source.open(&request)?;
        let mut file = File::create(&request.output_path)?;

        let mut bytes_written: u64 = 0;
        let stop_reason = loop {
            if start.elapsed() >= request.duration {
                break StopReason::DurationElapsed;
            }
            if self.cancel.load(Ordering::SeqCst) {
                warn!("Recording cancelled after {:.1}s", start.elapsed().as_secs_f64());
                break StopReason::Cancelled;
            }

            let n = match stream.read(&mut buffer) {
                Ok(0) => {
                    info!("Stream ended after {:.1}s", start.elapsed().as_secs_f64());
                    break StopReason::StreamEnded;
                }
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if is_timeout(&e) && start.elapsed() >= request.duration => {
                    debug!("Final read timed out past the recording window: {}", e);
                    break StopReason::DurationElapsed;
                }
                Err(e) => return Err(RecordingError::StreamRead(e)),
            };

            file.write_all(&buffer[..n])?;
            bytes_written += n as u64;
        };

        file.flush()?;
        drop(file);
        drop(stream);

        let elapsed_seconds = start.elapsed().as_secs_f64();
        debug!(
            "Wrote {} bytes to {} in {:.2}s ({:?})",
            bytes_written,
            request.output_path.display(),
            elapsed_seconds,
            stop_reason
        );

        Ok(RecordingResult {
            output_path: request.output_path,
            bytes_written,
            elapsed_seconds,
            started_at,
            stop_reason,
            saved_streams: list_saved_streams(&self.listing_dir),
        })
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}
