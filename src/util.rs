//! Small utility helpers used across modules.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current unix time in milliseconds. Clamped to 0 if the clock reads
/// before the epoch.
pub fn now_ms() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_millis() as u64)
    .unwrap_or(0)
}

/// Format seconds as mm:ss for the countdown display.
pub fn format_mmss(seconds: u64) -> String {
  format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
