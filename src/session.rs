//! Per-session state threaded through loading and rendering.

use crate::log;

/// State for one load/render session.
///
/// A `Session` is created at the public API boundary (e.g.
/// [`SvgImage::load_from_str`]) and handed down through loading and rendering,
/// so that code deep inside the library can reach per-session settings without
/// globals.  Currently that is only whether logging is on.
///
/// [`SvgImage::load_from_str`]: crate::SvgImage::load_from_str
#[derive(Clone)]
pub struct Session {
    log_enabled: bool,
}

impl Session {
    pub fn new() -> Self {
        Session {
            log_enabled: log::log_enabled(),
        }
    }

    pub fn log_enabled(&self) -> bool {
        self.log_enabled
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}
