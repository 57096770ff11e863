// streamrec: record a time-bounded slice of an internet radio stream
// Copyright (C) 2023, David Fisher
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

// Modular organization of code
mod config;
mod constants;
mod error;
mod http_source;
mod logging;
mod request;
mod stream_recorder;
mod stream_source;
mod utils;

// Only include the mock source and test suites in test builds
#[cfg(test)]
mod mock_source;
#[cfg(test)]
mod test_utils;

// Re-exports for public API
pub use config::AppConfig;
pub use constants::*;
pub use error::RecordingError;
pub use http_source::HttpStreamSource;
pub use logging::{apply_debug_flag, init_logging};
pub use request::{RecordingRequest, ValidatedRequest, normalize_filename, normalize_url};
pub use stream_recorder::{RecordingResult, StopReason, StreamRecorder};
pub use stream_source::StreamSource;
pub use utils::*;

#[cfg(test)]
pub use mock_source::{MockBehavior, MockStreamSource};
