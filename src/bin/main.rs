#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use log::warn;

use streamrec::{
    AppConfig, HttpStreamSource, RecordingError, RecordingRequest, RecordingResult, StopReason,
    StreamRecorder, apply_debug_flag, format_bytes, init_logging,
};

/// Record an internet radio stream into an mp3 file for a fixed duration.
///
/// An overview of radio streams is available at
/// https://wiki.ubuntuusers.de/Internetradio/Stationen/
#[derive(Parser)]
#[command(name = "streamrec", version)]
struct Cli {
    /// URL of the audio stream ("http://" is added if no scheme is given)
    #[arg(required_unless_present = "write_config")]
    streaming_url: Option<String>,

    /// Name of the mp3 file [default: myRadio]
    #[arg(long)]
    filename: Option<String>,

    /// Duration of the recording in seconds [default: 30] [min: 1]
    #[arg(long, allow_negative_numbers = true)]
    duration: Option<i64>,

    /// Block size in bytes for each read/write [default: 64] [min: 1]
    #[arg(long, allow_negative_numbers = true)]
    blocksize: Option<i64>,

    /// Write a sample configuration file to PATH and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();
    let config = AppConfig::load();
    apply_debug_flag(&config);

    if let Some(path) = cli.write_config {
        return match AppConfig::create_config_file(&path) {
            Ok(()) => {
                println!("Sample configuration written to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    // clap guarantees the URL when --write-config is absent
    let Some(streaming_url) = cli.streaming_url else {
        return ExitCode::FAILURE;
    };

    let request = RecordingRequest::new(
        streaming_url,
        cli.filename.unwrap_or_else(|| config.get_filename()),
        cli.duration.unwrap_or_else(|| config.get_duration()),
        cli.blocksize.unwrap_or_else(|| config.get_blocksize()),
    );

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        if !flag.swap(true, Ordering::SeqCst) {
            println!("Stopping recording...");
        }
    }) {
        warn!("Could not install Ctrl-C handler: {}", e);
    }

    let recorder =
        StreamRecorder::new(HttpStreamSource::from_config(&config)).with_cancel_flag(cancel);

    match recorder.record(&request) {
        Ok(result) => {
            report_success(&result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", user_message(&e));
            ExitCode::from(exit_code(&e))
        }
    }
}

fn report_success(result: &RecordingResult) {
    println!(
        "Audio stream successfully saved in {}",
        result.output_path.display()
    );
    println!(
        "Recorded {} in {:.1}s (started {})",
        format_bytes(result.bytes_written),
        result.elapsed_seconds,
        result.started_at.format("%Y-%m-%d %H:%M:%S")
    );
    match result.stop_reason {
        StopReason::DurationElapsed => {}
        StopReason::StreamEnded => println!("The stream ended before the requested duration."),
        StopReason::Cancelled => println!("Recording was stopped early."),
    }
    println!("Currently saved audio streams: {:?}", result.saved_streams);
}

fn user_message(error: &RecordingError) -> String {
    match error {
        RecordingError::InvalidParameter("duration") => {
            "Duration must be at least 1 second!".to_string()
        }
        RecordingError::InvalidParameter("blocksize") => {
            "Blocksize must be at least 1 byte!".to_string()
        }
        RecordingError::StreamUnavailable { .. } => {
            "Requested URL could not be accessed. Please try a different internet radio!"
                .to_string()
        }
        other => other.to_string(),
    }
}

fn exit_code(error: &RecordingError) -> u8 {
    match error {
        RecordingError::InvalidParameter(_) => 2,
        RecordingError::StreamUnavailable { .. } => 3,
        _ => 1,
    }
}
