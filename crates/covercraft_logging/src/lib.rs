#![deny(missing_docs)]
//! Shared logging utilities for the CoverCraft workspace.
//!
//! This crate provides the `craft_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger.

// Re-exported so the macros resolve `log` from any calling crate.
#[doc(hidden)]
pub use log as __log;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! craft_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! craft_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! craft_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! craft_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! craft_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!($($arg)*);
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

#[cfg(test)]
mod tests {
    #[test]
    fn macros_expand_without_a_logger() {
        crate::craft_trace!("trace {}", 1);
        crate::craft_debug!("debug {}", 2);
        crate::craft_info!("info {}", 3);
        crate::craft_warn!("warn {}", 4);
        crate::craft_error!("error {}", 5);
    }

    #[test]
    fn test_initializer_is_idempotent() {
        super::initialize_for_tests();
        super::initialize_for_tests();
        log::info!("logger initialised twice without panicking");
    }
}
