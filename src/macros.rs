// Formatting macros for the Logger facade
//
// Each expands at the call site, so the recorded caller location is the
// macro invocation rather than this file.

/// Write a formatted line at Debug: `log_debug!(logger, "x = {}", x)`
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug_fmt(::std::format_args!($($arg)+))
    };
}

/// Write a formatted line at Info: `log_info!(logger, "x = {}", x)`
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info_fmt(::std::format_args!($($arg)+))
    };
}

/// Write a formatted line at Error: `log_error!(logger, "x = {}", x)`
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error_fmt(::std::format_args!($($arg)+))
    };
}
