//! Logging of non-fatal errors.
//!
//! SVG wants broken attribute values ignored, not reported, so the only way to
//! see them is this opt-in log.  Set the `MINISVG_LOG` environment variable to
//! turn it on.

use once_cell::sync::Lazy;

/// Logs a message if the session has logging turned on.
#[doc(hidden)]
#[macro_export]
macro_rules! svg_log {
    ($session:expr, $($arg:tt)+) => {
        if $session.log_enabled() {
            println!("{}", format_args!($($arg)+));
        }
    };
}

/// Whether `MINISVG_LOG` is set in the environment; checked once per process.
pub fn log_enabled() -> bool {
    static ENABLED: Lazy<bool> = Lazy::new(|| std::env::var_os("MINISVG_LOG").is_some());

    *ENABLED
}
