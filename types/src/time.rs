//! Timestamps used by fee schedules.
//!
//! Timestamps are Unix epoch seconds (UTC). Validity windows of exchange
//! records may be open-ended, which [`AbsoluteTime::Never`] represents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// A point in time that may be "never".
///
/// `Never` orders after every finite timestamp, so a window ending at
/// `Never` is open-ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbsoluteTime {
    At(Timestamp),
    Never,
}

impl AbsoluteTime {
    pub fn from_secs(secs: u64) -> Self {
        Self::At(Timestamp::new(secs))
    }
}

impl From<Timestamp> for AbsoluteTime {
    fn from(t: Timestamp) -> Self {
        Self::At(t)
    }
}

impl fmt::Display for AbsoluteTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(t) => t.fmt(f),
            Self::Never => write!(f, "never"),
        }
    }
}
