use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Wall-clock milliseconds since the UNIX epoch.
///
/// Asset records carry their timestamp as a decimal string, so `Timestamp`
/// serializes to and from that string form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        Self(u64::try_from(millis).unwrap_or_default())
    }

    /// The current time, clamped so it never precedes `previous`.
    ///
    /// Used when an asset record is refreshed: a wall clock stepping
    /// backwards must not make the stored timestamp decrease.
    pub fn refreshed(previous: Self) -> Self {
        Self::now().max(previous)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl FromStr for Timestamp {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| TypeError::InvalidTimestamp(s.to_string()))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.0.to_string()
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}ms)", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
