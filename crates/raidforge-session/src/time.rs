//! Wall-clock helper.
//!
//! Session and archive timestamps are unix seconds because they outlive
//! the process (they end up in archive rows), so `Instant` is the wrong
//! tool here.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current time as unix seconds.
///
/// Falls back to 0 if the system clock reads before the epoch, which
/// only happens on badly misconfigured hosts; a zero timestamp is
/// harmless here (it reads as "unknown" in archived rows).
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
