use std::io::{self, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use crate::error::RecordingError;
use crate::request::ValidatedRequest;
use crate::stream_source::StreamSource;

/// What the mock stream does once opened.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Yield these bytes, then end.
    Finite(Vec<u8>),
    /// Never end; each read sleeps for the given delay and fills the buffer with `0xAA`.
    Endless { delay: Duration },
    /// Yield `bytes_before_error` bytes, then fail every read.
    FailAfter { bytes_before_error: usize },
    /// Fail the first read with `Interrupted`, then yield these bytes and end.
    InterruptedOnce(Vec<u8>),
    /// Yield `bytes_before_timeout` bytes, then sleep `delay` and fail each read with `TimedOut`.
    TimeoutAfter {
        bytes_before_timeout: usize,
        delay: Duration,
    },
    /// Fail at open time.
    Unavailable,
}

/// MockStreamSource simulates a network stream for testing purposes
/// without opening any socket.
#[derive(Debug, Clone)]
pub struct MockStreamSource {
    pub behavior: MockBehavior,
    /// Upper bound on bytes returned per read, regardless of buffer size.
    pub max_chunk: Option<usize>,
    pub opens: Arc<AtomicUsize>,
}

impl MockStreamSource {
    pub fn new(behavior: MockBehavior) -> Self {
        MockStreamSource {
            behavior,
            max_chunk: None,
            opens: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_max_chunk(mut self, max_chunk: usize) -> Self {
        self.max_chunk = Some(max_chunk);
        self
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

pub struct MockStream {
    behavior: MockBehavior,
    max_chunk: Option<usize>,
    position: usize,
    interrupted: bool,
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let limit = self.max_chunk.map_or(buf.len(), |m| m.min(buf.len()));
        match &self.behavior {
            MockBehavior::Finite(data) => {
                let n = limit.min(data.len() - self.position);
                buf[..n].copy_from_slice(&data[self.position..self.position + n]);
                self.position += n;
                Ok(n)
            }
            MockBehavior::Endless { delay } => {
                thread::sleep(*delay);
                buf[..limit].fill(0xAA);
                Ok(limit)
            }
            MockBehavior::FailAfter { bytes_before_error } => {
                let remaining = bytes_before_error - self.position;
                if remaining == 0 {
                    return Err(io::Error::new(
                        io::ErrorKind::ConnectionReset,
                        "simulated connection reset",
                    ));
                }
                let n = limit.min(remaining);
                buf[..n].fill(0x55);
                self.position += n;
                Ok(n)
            }
            MockBehavior::InterruptedOnce(data) => {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(io::Error::from(io::ErrorKind::Interrupted));
                }
                let n = limit.min(data.len() - self.position);
                buf[..n].copy_from_slice(&data[self.position..self.position + n]);
                self.position += n;
                Ok(n)
            }
            MockBehavior::TimeoutAfter {
                bytes_before_timeout,
                delay,
            } => {
                let remaining = bytes_before_timeout - self.position;
                if remaining == 0 {
                    thread::sleep(*delay);
                    return Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        "simulated receive timeout",
                    ));
                }
                let n = limit.min(remaining);
                buf[..n].fill(0x33);
                self.position += n;
                Ok(n)
            }
            MockBehavior::Unavailable => Ok(0),
        }
    }
}

impl StreamSource for MockStreamSource {
    type Reader = MockStream;

    fn open(&self, request: &ValidatedRequest) -> Result<Self::Reader, RecordingError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        if matches!(self.behavior, MockBehavior::Unavailable) {
            return Err(RecordingError::StreamUnavailable {
                url: request.url.clone(),
                reason: "simulated transport error".to_string(),
            });
        }
        Ok(MockStream {
            behavior: self.behavior.clone(),
            max_chunk: self.max_chunk,
            position: 0,
            interrupted: false,
        })
    }
}
