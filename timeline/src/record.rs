//! Records fed into the builders and the intervals they produce.

use ecash_types::{AbsoluteTime, Amount};
use serde::{Deserialize, Serialize};

/// A fee-bearing record valid during `[valid_from, valid_until)`.
///
/// Created by the store from an exchange schedule; read-only here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenominationRecord<G> {
    /// Unique across one build call.
    pub id: String,
    pub group: G,
    pub valid_from: AbsoluteTime,
    pub valid_until: AbsoluteTime,
    pub fee: Amount,
}

/// "During `[from, until)` the best fee for `group` is `fee`."
///
/// `fee == None` is a gap: no record of the group is active.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeInterval<G> {
    pub group: G,
    pub from: AbsoluteTime,
    pub until: AbsoluteTime,
    pub fee: Option<Amount>,
}

impl<G> FeeInterval<G> {
    pub fn is_gap(&self) -> bool {
        self.fee.is_none()
    }

    pub fn contains(&self, t: AbsoluteTime) -> bool {
        self.from <= t && t < self.until
    }
}

/// One window of two aligned timelines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeIntervalPair<G> {
    pub group: G,
    pub from: AbsoluteTime,
    pub until: AbsoluteTime,
    pub left: Option<Amount>,
    pub right: Option<Amount>,
}

impl<G> FeeIntervalPair<G> {
    pub fn contains(&self, t: AbsoluteTime) -> bool {
        self.from <= t && t < self.until
    }
}
