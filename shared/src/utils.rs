//! # Shared Utility Functions
//!
//! Display helpers used by the wave-web frontend.
//!
//! ## Address Formatting
//!
//! Functions for formatting Ethereum wallet addresses for display:
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - Alias for `format_address` with default parameters
//!
//! ## Relative Time
//!
//! [`time_ago`] renders a timestamp relative to a reference instant
//! ("just now", "3 minutes ago", "2 days ago") for the wave list.

use chrono::{DateTime, Utc};

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
/// assert_eq!(format_address(addr, 6, 4), "0xd8dA...6045");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    // Return early if the address is too short to truncate meaningfully.
    // 0x addresses are ASCII hex, so byte indexing below is safe.
    if address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
    {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format a wallet address with the default 6-character prefix (keeping the
/// `0x` visible) and 4-character suffix.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// let addr = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
/// assert_eq!(truncate_address(addr), "0xd8dA...6045");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Render `then` relative to `now` ("just now", "5 minutes ago", ...).
///
/// Instants less than a minute in the past, and anything in the future
/// (clock skew between block time and the local clock), render as
/// "just now". Months are approximated as 30 days and years as 365.
///
/// # Examples
///
/// ```rust
/// use chrono::DateTime;
/// use shared::utils::time_ago;
///
/// let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
/// let then = DateTime::from_timestamp(1_700_000_000 - 300, 0).unwrap();
/// assert_eq!(time_ago(then, now), "5 minutes ago");
/// ```
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(then).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return count_ago(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return count_ago(hours, "hour");
    }

    let days = hours / 24;
    if days < 30 {
        return count_ago(days, "day");
    }

    let months = days / 30;
    if months < 12 {
        return count_ago(months, "month");
    }

    // 360..365 days lands here with days / 365 == 0; still render a year
    count_ago((days / 365).max(1), "year")
}

fn count_ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(seconds, 0).unwrap()
    }

    #[test]
    fn test_format_address() {
        let addr = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
        assert_eq!(format_address(addr, 6, 4), "0xd8dA...6045");
        assert_eq!(format_address(addr, 4, 4), "0xd8...6045");
        assert_eq!(format_address(addr, 2, 2), "0x...45");
    }

    #[test]
    fn test_format_address_short() {
        assert_eq!(format_address("short", 4, 4), "short");
        assert_eq!(format_address("abc", 4, 4), "abc");
    }

    #[test]
    fn test_truncate_address() {
        let addr = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
        assert_eq!(truncate_address(addr), "0xd8dA...6045");
    }

    #[test]
    fn test_time_ago_just_now() {
        let now = at(1_000_000);
        assert_eq!(time_ago(at(1_000_000), now), "just now");
        assert_eq!(time_ago(at(999_950), now), "just now");
        // future timestamps clamp rather than reading "in 2 minutes"
        assert_eq!(time_ago(at(1_000_120), now), "just now");
    }

    #[test]
    fn test_time_ago_units() {
        let now = at(10_000_000);
        assert_eq!(time_ago(at(10_000_000 - 60), now), "1 minute ago");
        assert_eq!(time_ago(at(10_000_000 - 300), now), "5 minutes ago");
        assert_eq!(time_ago(at(10_000_000 - 3_600), now), "1 hour ago");
        assert_eq!(time_ago(at(10_000_000 - 7_200), now), "2 hours ago");
        assert_eq!(time_ago(at(10_000_000 - 86_400), now), "1 day ago");
        assert_eq!(time_ago(at(10_000_000 - 86_400 * 29), now), "29 days ago");
        assert_eq!(time_ago(at(10_000_000 - 86_400 * 45), now), "1 month ago");
        assert_eq!(time_ago(at(10_000_000 - 86_400 * 400), now), "1 year ago");
    }
}
