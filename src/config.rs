//! Application-wide constants. There are no config files or flags; the only
//! runtime knob is `RUST_LOG`, which overrides [`default_log_filter`].

use std::time::Duration;

/// Title shown in the tab bar.
pub const APP_TITLE: &str = "Medicine Management";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// How long the event loop waits for input before redrawing.
pub const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Log filter used when `RUST_LOG` is unset. Logging is off by default because
/// stderr shares the terminal with the alternate screen; run with
/// `RUST_LOG=debug 2>medicine-manager.log` to capture events.
pub fn default_log_filter() -> &'static str {
    "off"
}
