//! Time abstractions

use serde::{Deserialize, Serialize};
use std::fmt;

const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;

/// A point in wall-clock time
///
/// Stored as nanoseconds since the Unix epoch. Components never read the
/// system clock directly; a timestamp is always handed to them, which keeps
/// every operation reproducible under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    nanos: u64,
}

impl Timestamp {
    /// The Unix epoch
    pub const EPOCH: Timestamp = Timestamp { nanos: 0 };

    /// Creates a timestamp from nanoseconds since the epoch
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Creates a timestamp from milliseconds since the epoch
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            nanos: millis * NANOS_PER_MILLI,
        }
    }

    /// Creates a timestamp from seconds since the epoch
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            nanos: secs * NANOS_PER_SEC,
        }
    }

    /// Returns nanoseconds since the epoch
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Returns whole milliseconds since the epoch
    pub const fn as_millis(&self) -> u64 {
        self.nanos / NANOS_PER_MILLI
    }

    /// Returns whole seconds since the epoch
    pub const fn as_secs(&self) -> u64 {
        self.nanos / NANOS_PER_SEC
    }

    /// Returns the sub-second part in nanoseconds
    pub const fn subsec_nanos(&self) -> u32 {
        (self.nanos % NANOS_PER_SEC) as u32
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}s", self.as_secs(), self.subsec_nanos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_units_agree() {
        let a = Timestamp::from_secs(2);
        let b = Timestamp::from_millis(2_000);
        let c = Timestamp::from_nanos(2_000_000_000);

        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_timestamp_accessors() {
        let ts = Timestamp::from_nanos(1_500_000_123);
        assert_eq!(ts.as_secs(), 1);
        assert_eq!(ts.as_millis(), 1_500);
        assert_eq!(ts.subsec_nanos(), 500_000_123);
    }

    #[test]
    fn test_timestamp_ordering() {
        assert!(Timestamp::EPOCH < Timestamp::from_nanos(1));
    }

    #[test]
    fn test_timestamp_display() {
        let ts = Timestamp::from_millis(1_250);
        assert_eq!(format!("{}", ts), "1.250000000s");
    }
}
