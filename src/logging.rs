//! Console Logging
//!
//! `log` records go to the browser console through `console_log`.

use log::LevelFilter;

/// Install the console logger. Later calls only adjust the level.
pub fn init(level: LevelFilter) {
    match level.to_level() {
        Some(level) => {
            if console_log::init_with_level(level).is_err() {
                log::set_max_level(level.to_level_filter());
            }
        }
        None => log::set_max_level(LevelFilter::Off),
    }
}

