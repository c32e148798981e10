//! Formatting front-ends for [`LogHandle`](crate::LogHandle).
//!
//! Both macros format eagerly and evaluate to the enqueue future, which the
//! caller awaits.

/// Format a message and submit it as an informational record.
#[macro_export]
macro_rules! log_info {
    ($handle:expr, $($arg:tt)+) => {
        $handle.info(::std::format!($($arg)+))
    };
}

/// Format a message and submit it as an error record attributed to the
/// macro's invocation site.
#[macro_export]
macro_rules! log_error {
    ($handle:expr, $($arg:tt)+) => {
        $handle.error(::std::format!($($arg)+))
    };
}
