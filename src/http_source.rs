use std::io::{self, Read};
use std::time::Duration;

use log::{debug, error};
use ureq::Agent;
use ureq::BodyReader;

use crate::config::AppConfig;
use crate::error::RecordingError;
use crate::request::ValidatedRequest;
use crate::stream_source::StreamSource;

/// Opens streams with a blocking HTTP GET.
///
/// Non-2xx statuses, DNS failures, refused connections, TLS errors and
/// timeouts all surface as `StreamUnavailable`.
#[derive(Debug, Clone)]
pub struct HttpStreamSource {
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    use_env_proxy: bool,
}

impl HttpStreamSource {
    /// Timeouts of `0` seconds are disabled.
    pub fn new(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let non_zero = |secs: u64| (secs > 0).then(|| Duration::from_secs(secs));
        HttpStreamSource {
            connect_timeout: non_zero(connect_timeout_secs),
            read_timeout: non_zero(read_timeout_secs),
            use_env_proxy: true,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.get_connect_timeout(), config.get_read_timeout())
    }

    /// Ignore `HTTP_PROXY`/`HTTPS_PROXY` and connect directly.
    pub fn without_proxy(mut self) -> Self {
        self.use_env_proxy = false;
        self
    }

    /// Deadline for receiving the body: the recording window plus the read grace.
    pub fn body_deadline(&self, recording: Duration) -> Option<Duration> {
        self.read_timeout.map(|grace| recording + grace)
    }

    fn agent(&self, request: &ValidatedRequest) -> Agent {
        let mut builder = Agent::config_builder()
            .timeout_connect(self.connect_timeout)
            .timeout_recv_response(self.connect_timeout)
            .timeout_recv_body(self.body_deadline(request.duration));
        if !self.use_env_proxy {
            builder = builder.proxy(None);
        }
        Agent::new_with_config(builder.build())
    }
}

/// Response body of an opened stream.
///
/// ureq reports its own deadlines as `ErrorKind::Other` wrapping
/// `ureq::Error::Timeout`; those are re-raised as `ErrorKind::TimedOut`.
pub struct HttpStream {
    body: BodyReader<'static>,
}

impl Read for HttpStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.body.read(buf).map_err(normalize_timeout)
    }
}

fn normalize_timeout(e: io::Error) -> io::Error {
    let is_ureq_timeout = e
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<ureq::Error>())
        .is_some_and(|inner| matches!(inner, ureq::Error::Timeout(_)));
    if is_ureq_timeout {
        io::Error::new(io::ErrorKind::TimedOut, e.to_string())
    } else {
        e
    }
}

impl StreamSource for HttpStreamSource {
    type Reader = HttpStream;

    fn open(&self, request: &ValidatedRequest) -> Result<Self::Reader, RecordingError> {
        let response = self.agent(request).get(&request.url).call().map_err(|e| {
            error!("Failed to open stream {}: {}", request.url, e);
            RecordingError::StreamUnavailable {
                url: request.url.clone(),
                reason: e.to_string(),
            }
        })?;

        debug!(
            "Connected to {} (status {}, content-type {:?})",
            request.url,
            response.status(),
            response.headers().get("content-type")
        );

        Ok(HttpStream {
            body: response.into_body().into_reader(),
        })
    }
}
