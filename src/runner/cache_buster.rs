// file: src/runner/cache_buster.rs
// version: 1.0.0
// guid: f07d3b62-85c9-4e1a-a243-9b6d0e7c5f81

//! Time-of-call marker that keeps runs from being served from cache

use chrono::{SecondsFormat, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Environment variable carrying the marker
pub const CACHE_BUSTER_VAR: &str = "CACHE_BUSTER";

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Fresh marker value: the current UTC time, plus a process-wide sequence
/// number so two calls in the same clock tick still differ
pub fn marker() -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!(
        "{}#{}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
        seq
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_markers_differ() {
        let first = marker();
        let second = marker();
        assert_ne!(first, second);
    }

    #[test]
    fn test_marker_is_timestamp() {
        let value = marker();
        let (timestamp, _seq) = value.split_once('#').unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }
}
