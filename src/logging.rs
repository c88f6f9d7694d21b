use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Send logs to the log file next to the store. The terminal belongs to the
/// TUI, so nothing is written to stdout/stderr. If the file cannot be opened,
/// logging is left off.
pub(crate) fn init(config: &Config) {
    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
    {
        Ok(f) => f,
        Err(_) => return,
    };

    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
