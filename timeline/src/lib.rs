//! Fee timelines for exchange fee schedules.
//!
//! Exchanges publish fee-bearing records with validity windows, and records
//! of the same kind may overlap. This crate handles:
//! - Compressing the records of each group into contiguous best-fee intervals
//! - Aligning two such timelines into pairs for side-by-side comparison
//!
//! Both builders are pure functions over borrowed inputs.

pub mod error;
pub mod group;
pub mod pair;
pub mod record;
pub mod sweep;

pub use error::TimelineError;
pub use group::{DenominationValue, WireMethod};
pub use pair::build_pair_timeline;
pub use record::{DenominationRecord, FeeInterval, FeeIntervalPair};
pub use sweep::{build_timeline, select_best};
