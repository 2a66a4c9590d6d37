//! Timeline-specific errors.

use ecash_types::{AbsoluteTime, AmountError};
use thiserror::Error;

/// Failure of a timeline build.
///
/// Every variant except [`TimelineError::Amount`] means the records or
/// intervals handed in broke a precondition: the producer of that data has a
/// bug, and nothing is emitted for the call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TimelineError {
    #[error("record {id} has an empty or inverted validity window")]
    InvalidValidity { id: String },

    #[error("record id {id} is shared by records that differ")]
    ConflictingId { id: String },

    #[error("end of record {id} seen without a matching start")]
    UnmatchedEnd { id: String },

    #[error("group {group} ends on a start event")]
    TrailingStart { group: String },

    #[error("group {group} still has {count} active record(s) after its last event")]
    UnclosedRecords { group: String, count: usize },

    #[error("intervals of group {group} are not sorted by group")]
    Unsorted { group: String },

    #[error("interval of group {group} starting at {from} is empty")]
    EmptyInterval { group: String, from: AbsoluteTime },

    #[error("intervals of group {group} are not contiguous: expected boundary {expected}, found {found}")]
    NonContiguous {
        group: String,
        expected: AbsoluteTime,
        found: AbsoluteTime,
    },

    #[error(transparent)]
    Amount(#[from] AmountError),
}

impl TimelineError {
    /// Whether the input data itself was malformed.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, Self::Amount(_))
    }
}
