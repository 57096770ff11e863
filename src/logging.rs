use std::env;

use log::LevelFilter;

use crate::config::AppConfig;

/// Install env_logger. Call before loading the configuration so config
/// errors are not lost.
///
/// When `RUST_LOG` is set it decides everything. Otherwise this crate's
/// debug records pass the logger and the global ceiling starts at `info`,
/// to be lifted by [`apply_debug_flag`] once the config is known.
pub fn init_logging() {
    let mut builder = env_logger::Builder::new();
    if rust_log_set() {
        builder.parse_default_env();
    } else {
        builder
            .filter_level(LevelFilter::Info)
            .filter_module("streamrec", LevelFilter::Debug);
    }
    builder.init();

    if !rust_log_set() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// Raise the ceiling to `debug` when the config asks for it and `RUST_LOG` does not override.
pub fn apply_debug_flag(config: &AppConfig) {
    if let Some(level) = max_level_for(config.get_debug(), rust_log_set()) {
        log::set_max_level(level);
    }
}

fn rust_log_set() -> bool {
    env::var_os("RUST_LOG").is_some()
}

fn max_level_for(debug: bool, rust_log_set: bool) -> Option<LevelFilter> {
    (debug && !rust_log_set).then_some(LevelFilter::Debug)
}
