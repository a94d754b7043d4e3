#![deny(missing_docs)]
//! Shared logging utilities for the stage_scribe workspace.
//!
//! This crate provides the `scribe_*` logging macros used across the codebase,
//! helpers for keeping log lines short and free of secrets, and a minimal test
//! initializer for the global logger.

/// Marker appended to log text that was cut short.
pub const TRUNCATED_MARKER: &str = "…[truncated]";

/// Default number of bytes of free-form text (model output, API bodies) kept in a log line.
pub const MAX_LOGGED_TEXT: usize = 256;

/// Shortens `text` to at most `max_bytes` bytes (on a char boundary) for logging.
///
/// Newlines are flattened so a single record stays on one line.
pub fn truncate_for_log(text: &str, max_bytes: usize) -> String {
    let flattened = text.replace(['\r', '\n'], " ");
    if flattened.len() <= max_bytes {
        return flattened;
    }
    let mut end = max_bytes;
    while end > 0 && !flattened.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{TRUNCATED_MARKER}", &flattened[..end])
}

/// Masks a credential, keeping only its length visible.
pub fn redact_secret(secret: &str) -> String {
    if secret.is_empty() {
        "<unset>".to_string()
    } else {
        format!("<redacted:{} chars>", secret.chars().count())
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! scribe_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! scribe_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! scribe_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! scribe_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! scribe_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
