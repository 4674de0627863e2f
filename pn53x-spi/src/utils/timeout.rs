//! Timeout helpers used across the crate.
//!
//! Timeouts travel through the API as plain milliseconds (`u64`), the
//! unit of the upward transport contract; these helpers convert at the
//! edges.

use std::time::Duration;

/// Budget of the firmware-version probe run at open.
pub const HANDSHAKE_TIMEOUT_MS: u64 = 1000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
