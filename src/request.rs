use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{HTTP_PREFIX, HTTPS_PREFIX, MP3_EXTENSION};
use crate::error::RecordingError;

/// Caller-supplied parameters for a single recording.
///
/// Values are taken as given; nothing is checked or normalized until
/// [`RecordingRequest::validate`] runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingRequest {
    pub streaming_url: String,
    pub filename: String,
    pub duration_seconds: i64,
    pub block_size_bytes: i64,
}

/// A request that passed validation, with URL and filename normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub url: String,
    pub output_path: PathBuf,
    pub duration: Duration,
    pub block_size: usize,
}

impl RecordingRequest {
    pub fn new(
        streaming_url: impl Into<String>,
        filename: impl Into<String>,
        duration_seconds: i64,
        block_size_bytes: i64,
    ) -> Self {
        RecordingRequest {
            streaming_url: streaming_url.into(),
            filename: filename.into(),
            duration_seconds,
            block_size_bytes,
        }
    }

    /// Check the numeric parameters and normalize the URL and filename.
    ///
    /// Duration is checked before block size. No network or file I/O happens here.
    pub fn validate(&self) -> Result<ValidatedRequest, RecordingError> {
        let duration_secs = u64::try_from(self.duration_seconds)
            .ok()
            .filter(|&d| d > 0)
            .ok_or(RecordingError::InvalidParameter("duration"))?;

        let block_size = usize::try_from(self.block_size_bytes)
            .ok()
            .filter(|&b| b > 0)
            .ok_or(RecordingError::InvalidParameter("blocksize"))?;

        Ok(ValidatedRequest {
            url: normalize_url(&self.streaming_url),
            output_path: PathBuf::from(normalize_filename(&self.filename)),
            duration: Duration::from_secs(duration_secs),
            block_size,
        })
    }
}

/// Prepend `http://` unless the URL already starts with `http://` or `https://`.
///
/// The prefix match is case-sensitive and the rest of the URL is not inspected.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with(HTTP_PREFIX) || url.starts_with(HTTPS_PREFIX) {
        url.to_string()
    } else {
        format!("{HTTP_PREFIX}{url}")
    }
}

/// Append `.mp3` unless the name already ends with it.
pub fn normalize_filename(filename: &str) -> String {
    if filename.ends_with(MP3_EXTENSION) {
        filename.to_string()
    } else {
        format!("{filename}{MP3_EXTENSION}")
    }
}
