//! Utility functions: nonce and timestamp generation for auth messages.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

/// Exclusive upper bound of the auth nonce.
///
/// The server expects a 4-digit decimal nonce, which leaves only 10,000
/// values. Replay protection therefore leans on the timestamp window.
pub const NONCE_UPPER_BOUND: u16 = 10_000;

/// Generate a nonce uniformly distributed over `0..NONCE_UPPER_BOUND`.
pub fn random_nonce() -> u16 {
    random_nonce_with(&mut rand::thread_rng())
}

/// Generate a nonce from the given random source.
pub fn random_nonce_with<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    rng.gen_range(0..NONCE_UPPER_BOUND)
}

/// Current time in whole Unix seconds.
pub fn unix_time() -> u64 {
    unix_time_at(SystemTime::now())
}

/// Whole Unix seconds at `instant`, truncated. Instants before the epoch map to 0.
pub fn unix_time_at(instant: SystemTime) -> u64 {
    instant
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_unix_time_truncates() {
        let instant = UNIX_EPOCH + Duration::from_millis(1_000_999);
        assert_eq!(unix_time_at(instant), 1000);
    }

    #[test]
    fn test_unix_time_before_epoch() {
        let instant = UNIX_EPOCH - Duration::from_secs(5);
        assert_eq!(unix_time_at(instant), 0);
    }

    #[test]
    fn test_unix_time_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(unix_time() > 1_577_836_800);
    }
}
