//! Collaborators the wallet core reads from.
//!
//! Implemented by the wallet's database layer in production and by
//! `ecash-nullables` in tests.

use ecash_types::CoinPublicKey;

use crate::coin::SpendableCoin;
use crate::error::StoreError;
use crate::schedule::{DenominationInfo, WireFeeRecord};

/// The wallet's coin store.
pub trait CoinSource {
    /// Snapshot of the coins currently spendable in `currency`.
    fn spendable_coins(&self, currency: &str) -> Result<Vec<SpendableCoin>, StoreError>;

    /// Mark `coins` as spent. Either all are reserved or none is.
    fn reserve_coins(&self, coins: &[CoinPublicKey]) -> Result<(), StoreError>;
}

/// Fee schedules the wallet has downloaded from exchanges.
pub trait DenominationSource {
    fn denominations(&self, exchange_base_url: &str) -> Result<Vec<DenominationInfo>, StoreError>;

    fn wire_fees(&self, exchange_base_url: &str) -> Result<Vec<WireFeeRecord>, StoreError>;
}
