//! Errors raised by amount arithmetic.

use thiserror::Error;

/// Failure of an [`Amount`](crate::Amount) operation.
///
/// These are expected outcomes (e.g. "balance too small"), so callers match
/// on them rather than treating them as bugs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },

    #[error("amount overflow")]
    Overflow,

    #[error("amount underflow")]
    Underflow,
}
