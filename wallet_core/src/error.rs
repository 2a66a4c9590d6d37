use ecash_timeline::TimelineError;
use ecash_types::{AmountError, CoinPublicKey};
use thiserror::Error;

use crate::selection::SelectionError;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("coin selection failed: {0}")]
    Selection(#[from] SelectionError),

    #[error("fee timeline error: {0}")]
    Timeline(#[from] TimelineError),

    #[error("amount error: {0}")]
    Amount(#[from] AmountError),

    #[error("coin store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl WalletError {
    /// True when the wallet simply lacks the funds; every other variant is a
    /// fault of the input or a collaborator.
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::Selection(e) if e.is_insufficient_funds())
    }
}

/// Errors reported by a [`CoinSource`](crate::source::CoinSource).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("coin not found: {0}")]
    NotFound(CoinPublicKey),

    #[error("coin already spent: {0}")]
    AlreadySpent(CoinPublicKey),

    #[error("store backend error: {0}")]
    Backend(String),
}
