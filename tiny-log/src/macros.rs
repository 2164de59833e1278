//! Logging macros
//!
//! All macros take the logger first: `debug!(logger, "pulled {} bytes", n)`.

#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)*)
    };
}

/// Level check first, formatting only when enabled
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)*) => {{
        if $logger.is_enabled($level) {
            let message = ::std::format!($($arg)*);
            $logger.log($level, ::std::module_path!(), message);
        }
    }};
}
