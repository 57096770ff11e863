use std::fs;
use std::path::Path;

use log::warn;

use crate::constants::MP3_EXTENSION;

/// List the `*.mp3` files in `dir`, in the order the filesystem enumerates them.
///
/// Hidden files (leading `.`) are skipped, matching shell glob behaviour.
/// This is informational only: any enumeration error yields an empty list
/// rather than failing the caller.
pub fn list_saved_streams(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Could not list saved streams in {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    entries
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(MP3_EXTENSION) && !name.starts_with('.'))
        .collect()
}

/// Format a byte count for display, e.g. `1.5 KiB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
