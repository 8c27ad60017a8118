//! Profile identity.

use derive_more::{Display, From, Into};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Stable identity of a profile: its creation time in milliseconds since the
/// Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, From, Into, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(i64);

impl ProfileId {
    /// Creates an identity from a millisecond timestamp.
    #[inline]
    pub const fn new(millis: i64) -> Self {
        Self(millis)
    }

    /// Generates a fresh identity from the current time.
    pub fn now() -> Self {
        Self(Timestamp::now().as_millisecond())
    }

    /// Returns the creation time in milliseconds.
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Returns the creation time as a timestamp, if it is in range.
    pub fn timestamp(&self) -> Option<Timestamp> {
        Timestamp::from_millisecond(self.0).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_recent() {
        let before = Timestamp::now().as_millisecond();
        let id = ProfileId::now();
        assert!(id.as_millis() >= before);
        assert!(id.timestamp().is_some());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let id = ProfileId::new(1_700_000_000_000);
        assert_eq!(serde_json::to_string(&id).unwrap(), "1700000000000");
        assert_eq!(id.to_string(), "1700000000000");
    }
}
