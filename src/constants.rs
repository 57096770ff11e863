pub const DEFAULT_FILENAME: &str = "myRadio";
pub const DEFAULT_DURATION: i64 = 30;
pub const DEFAULT_BLOCKSIZE: i64 = 64;
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;
pub const DEFAULT_READ_TIMEOUT: u64 = 10; // grace on top of the recording duration
pub const DEFAULT_DEBUG: bool = false;

// Larger block sizes are accepted but each read requests at most this many bytes
pub const MAX_READ_BUFFER: usize = 16 * 1024 * 1024;

pub const MP3_EXTENSION: &str = ".mp3";
pub const HTTP_PREFIX: &str = "http://";
pub const HTTPS_PREFIX: &str = "https://";

pub const CONFIG_FILE_NAME: &str = "streamrec.toml";

// Environment variable names
pub const ENV_CONFIG: &str = "STREAMREC_CONFIG";
pub const ENV_FILENAME: &str = "STREAMREC_FILENAME";
pub const ENV_DURATION: &str = "STREAMREC_DURATION";
pub const ENV_BLOCKSIZE: &str = "STREAMREC_BLOCKSIZE";
pub const ENV_CONNECT_TIMEOUT: &str = "STREAMREC_CONNECT_TIMEOUT";
pub const ENV_READ_TIMEOUT: &str = "STREAMREC_READ_TIMEOUT";
pub const ENV_DEBUG: &str = "STREAMREC_DEBUG";
