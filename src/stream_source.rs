/// The StreamSource trait defines where recorded bytes come from.
///
/// Implementations open the byte stream for a validated request. The
/// recorder only ever reads the returned handle sequentially.
use std::io::Read;

use crate::error::RecordingError;
use crate::request::ValidatedRequest;

pub trait StreamSource {
    type Reader: Read;

    /// Open the stream for `request`.
    ///
    /// Any failure to reach the stream must be reported as
    /// [`RecordingError::StreamUnavailable`].
    fn open(&self, request: &ValidatedRequest) -> Result<Self::Reader, RecordingError>;
}
