/// Custom error type for the stream recorder.
#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    #[error("Invalid parameter: {0} must be a positive integer")]
    InvalidParameter(&'static str),

    #[error("Stream unavailable: {url}: {reason}")]
    StreamUnavailable { url: String, reason: String },

    #[error("Stream read error: {0}")]
    StreamRead(std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
