//! # Wave Record
//!
//! One message stored by the wave portal contract. Records are immutable
//! once created; the contract reports timestamps as unix seconds and the
//! frontend keeps them as points in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One wave: who sent it, when, and what it said.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wave {
    /// Sender wallet address, 0x-prefixed hex.
    pub address: String,
    /// Block timestamp of the wave.
    pub timestamp: DateTime<Utc>,
    /// The message text carried by the wave.
    pub message: String,
}

impl Wave {
    /// Build a wave from the raw contract tuple.
    ///
    /// The contract reports timestamps as unix seconds; they are converted
    /// to a point-in-time here. Seconds outside the representable range are
    /// clamped instead of failing the whole fetch.
    ///
    /// ```rust
    /// use shared::Wave;
    ///
    /// let wave = Wave::from_contract("0xabc".into(), 1_700_000_000, "gm".into());
    /// assert_eq!(wave.timestamp.timestamp_millis(), 1_700_000_000_000);
    /// ```
    pub fn from_contract(address: String, unix_seconds: i64, message: String) -> Self {
        let timestamp = DateTime::<Utc>::from_timestamp(unix_seconds, 0).unwrap_or(if unix_seconds < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        });
        Self {
            address,
            timestamp,
            message,
        }
    }
}

/// Sort waves newest-first for display.
///
/// The sort is stable: waves sharing a timestamp keep their insertion
/// order, so storage order (fetch order or event-arrival order) stays
/// untouched underneath.
pub fn sort_newest_first(waves: &mut [Wave]) {
    waves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(seconds: i64, message: &str) -> Wave {
        Wave::from_contract("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".to_string(), seconds, message.to_string())
    }

    #[test]
    fn test_from_contract_converts_seconds() {
        let wave = wave(1_700_000_000, "gm");
        assert_eq!(wave.timestamp.timestamp(), 1_700_000_000);
        assert_eq!(wave.timestamp.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_from_contract_clamps_out_of_range() {
        // chrono cannot represent i64::MAX seconds; the record must still exist
        let future = wave(i64::MAX, "distant future");
        assert_eq!(future.timestamp, DateTime::<Utc>::MAX_UTC);
        let past = wave(i64::MIN, "distant past");
        assert_eq!(past.timestamp, DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut waves = vec![wave(10, "oldest"), wave(30, "newest"), wave(20, "middle")];
        sort_newest_first(&mut waves);
        let messages: Vec<&str> = waves.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(messages, vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_sort_newest_first_is_stable_for_ties() {
        let mut waves = vec![wave(20, "first"), wave(10, "older"), wave(20, "second")];
        sort_newest_first(&mut waves);
        let messages: Vec<&str> = waves.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "older"]);
    }

    #[test]
    fn test_sort_is_non_increasing_regardless_of_insertion_order() {
        let mut waves = vec![wave(5, "a"), wave(50, "b"), wave(1, "c"), wave(50, "d"), wave(7, "e")];
        sort_newest_first(&mut waves);
        for pair in waves.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }
}
