//! Browser logging: `log` records go to the devtools console through
//! `console_log`.

use log::{Level, SetLoggerError};

/// Debug builds log gameplay detail; release builds keep to round start/end.
pub fn default_level() -> Level {
    if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    }
}

/// Install the console logger. Call once at startup; a second call returns the
/// `SetLoggerError`.
pub fn init() -> Result<(), SetLoggerError> {
    console_log::init_with_level(default_level())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_follows_build_profile() {
        let expected = if cfg!(debug_assertions) {
            Level::Debug
        } else {
            Level::Info
        };
        assert_eq!(default_level(), expected);
        assert!(default_level() >= Level::Info);
    }
}
