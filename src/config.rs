use log::{error, info};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_BLOCKSIZE, DEFAULT_CONNECT_TIMEOUT, DEFAULT_DEBUG, DEFAULT_DURATION,
    DEFAULT_FILENAME, DEFAULT_READ_TIMEOUT, ENV_BLOCKSIZE, ENV_CONFIG, ENV_CONNECT_TIMEOUT,
    ENV_DEBUG, ENV_DURATION, ENV_FILENAME, ENV_READ_TIMEOUT,
};
use crate::error::RecordingError;

/// Settings for the stream recorder.
///
/// Values are resolved with environment variables having the highest
/// precedence, followed by the config file, and then defaults. Command-line
/// flags are applied on top by the binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base name of the output file
    pub filename: Option<String>,
    /// Recording duration in seconds
    pub duration: Option<i64>,
    /// Bytes requested per read
    pub blocksize: Option<i64>,
    /// Seconds to wait for the connection and response headers (0 disables)
    pub connect_timeout: Option<u64>,
    /// Seconds a read may run past the recording duration (0 disables)
    pub read_timeout: Option<u64>,
    /// Enable debug logging
    pub debug: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            filename: Some(DEFAULT_FILENAME.to_string()),
            duration: Some(DEFAULT_DURATION),
            blocksize: Some(DEFAULT_BLOCKSIZE),
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            read_timeout: Some(DEFAULT_READ_TIMEOUT),
            debug: Some(DEFAULT_DEBUG),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        AppConfig::default()
    }

    /// Find the configuration file path
    fn find_config_file() -> Option<PathBuf> {
        if let Ok(config_path) = env::var(ENV_CONFIG) {
            let path = Path::new(&config_path);
            if path.exists() {
                return Some(path.to_path_buf());
            }
        }

        let current_dir = Path::new(CONFIG_FILE_NAME);
        if current_dir.exists() {
            return Some(current_dir.to_path_buf());
        }

        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            let xdg_config_path = Path::new(&xdg_config).join("streamrec/config.toml");
            if xdg_config_path.exists() {
                return Some(xdg_config_path);
            }
        }

        if let Ok(home) = env::var("HOME") {
            let home_config = Path::new(&home).join(".config/streamrec/config.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        let system_config = Path::new("/etc/streamrec/config.toml");
        if system_config.exists() {
            return Some(system_config.to_path_buf());
        }

        None
    }

    /// Load configuration from file, if available, then apply environment overrides.
    ///
    /// A config file that cannot be read or parsed is logged and skipped.
    pub fn load() -> Self {
        let mut config = AppConfig::default();

        if let Some(config_path) = Self::find_config_file() {
            match fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(file_config) => {
                        info!("Loaded configuration from {}", config_path.display());
                        config.merge(file_config);
                    }
                    Err(e) => {
                        error!("Error parsing config file: {}", e);
                    }
                },
                Err(e) => {
                    error!("Error reading config file: {}", e);
                }
            }
        }

        config.apply_env_vars();

        config
    }

    /// Merge another configuration into this one, only taking values that are Some
    pub fn merge(&mut self, other: AppConfig) {
        if other.filename.is_some() {
            self.filename = other.filename;
        }
        if other.duration.is_some() {
            self.duration = other.duration;
        }
        if other.blocksize.is_some() {
            self.blocksize = other.blocksize;
        }
        if other.connect_timeout.is_some() {
            self.connect_timeout = other.connect_timeout;
        }
        if other.read_timeout.is_some() {
            self.read_timeout = other.read_timeout;
        }
        if other.debug.is_some() {
            self.debug = other.debug;
        }
    }

    fn parse_bool(val: &str) -> Option<bool> {
        match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        }
    }

    fn apply_env_vars(&mut self) {
        if let Ok(val) = env::var(ENV_FILENAME) {
            self.filename = Some(val);
        }
        if let Some(val) = env::var(ENV_DURATION).ok().and_then(|s| s.parse().ok()) {
            self.duration = Some(val);
        }
        if let Some(val) = env::var(ENV_BLOCKSIZE).ok().and_then(|s| s.parse().ok()) {
            self.blocksize = Some(val);
        }
        if let Some(val) = env::var(ENV_CONNECT_TIMEOUT)
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.connect_timeout = Some(val);
        }
        if let Some(val) = env::var(ENV_READ_TIMEOUT).ok().and_then(|s| s.parse().ok()) {
            self.read_timeout = Some(val);
        }
        if let Some(val) = env::var(ENV_DEBUG).ok().and_then(|s| Self::parse_bool(&s)) {
            self.debug = Some(val);
        }
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample_config() -> String {
        let default_config = AppConfig::default();

        format!(
            r#"# Stream recorder configuration
# Values set here are overridden by STREAMREC_* environment variables
# and by command-line flags.

# Output file name; ".mp3" is appended if missing
# Default: {}
filename = "{}"

# Recording duration in seconds (must be > 0)
# Default: {}
duration = {}

# Bytes requested per read/write cycle (must be > 0)
# Default: {}
blocksize = {}

# Seconds to wait for the connection and response headers (0 disables)
# Default: {}
connect_timeout = {}

# Seconds a stalled read may run past the recording duration (0 disables)
# Default: {}
read_timeout = {}

# Enable debug logging (true/false)
# Default: {}
debug = {}
"#,
            DEFAULT_FILENAME,
            default_config.get_filename(),
            DEFAULT_DURATION,
            default_config.get_duration(),
            DEFAULT_BLOCKSIZE,
            default_config.get_blocksize(),
            DEFAULT_CONNECT_TIMEOUT,
            default_config.get_connect_timeout(),
            DEFAULT_READ_TIMEOUT,
            default_config.get_read_timeout(),
            DEFAULT_DEBUG,
            default_config.get_debug(),
        )
    }

    /// Write the sample configuration to `path`, creating parent directories.
    pub fn create_config_file(path: &Path) -> Result<(), RecordingError> {
        let config_content = Self::generate_sample_config();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                RecordingError::Config(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        fs::write(path, config_content)
            .map_err(|e| RecordingError::Config(format!("cannot write {}: {}", path.display(), e)))
    }

    pub fn get_filename(&self) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
    }

    pub fn get_duration(&self) -> i64 {
        self.duration.unwrap_or(DEFAULT_DURATION)
    }

    pub fn get_blocksize(&self) -> i64 {
        self.blocksize.unwrap_or(DEFAULT_BLOCKSIZE)
    }

    pub fn get_connect_timeout(&self) -> u64 {
        self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn get_read_timeout(&self) -> u64 {
        self.read_timeout.unwrap_or(DEFAULT_READ_TIMEOUT)
    }

    pub fn get_debug(&self) -> bool {
        self.debug.unwrap_or(DEFAULT_DEBUG)
    }
}
