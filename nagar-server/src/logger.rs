//! Logging setup
//!
//! `RUST_LOG` drives the filter (default `nagar_server=info,tower_http=info`).
//! `LOG_FORMAT=json` switches to structured lines, and `LOG_DIR` sends
//! output to a daily rolling file instead of stdout.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

const DEFAULT_FILTER: &str = "nagar_server=info,tower_http=info";

/// Initialize the global subscriber
pub fn init_logger(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let json = config.log_format.eq_ignore_ascii_case("json");

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false);

    let file_appender = config.log_dir.as_deref().and_then(|dir| {
        let log_path = Path::new(dir);
        if let Err(e) = std::fs::create_dir_all(log_path) {
            eprintln!("Log directory {dir} unavailable, logging to stdout: {e}");
            return None;
        }
        Some(tracing_appender::rolling::daily(log_path, "nagar-server"))
    });

    match (file_appender, json) {
        (Some(appender), true) => subscriber.json().with_writer(appender).init(),
        (Some(appender), false) => subscriber.with_ansi(false).with_writer(appender).init(),
        (None, true) => subscriber.json().init(),
        (None, false) => subscriber.init(),
    }
}
