//! Coins as the selector sees them, and the selection it hands back.

use std::collections::BTreeMap;

use ecash_types::{Amount, AmountError, CoinPrivateKey, CoinPublicKey, DenomPubHash};
use serde::{Deserialize, Serialize};

/// A coin the store considers spendable right now.
///
/// Owned by the coin store; selection only reads it.
#[derive(Clone, Debug)]
pub struct SpendableCoin {
    pub exchange_base_url: String,
    pub coin_pub: CoinPublicKey,
    pub coin_priv: CoinPrivateKey,
    /// Value of the coin's denomination.
    pub value: Amount,
    /// Fee the exchange charges to deposit this coin.
    pub deposit_fee: Amount,
    pub denom_pub_hash: DenomPubHash,
}

/// One coin of a [`CoinSelection`] and how much of it is spent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedCoin {
    pub coin_pub: CoinPublicKey,
    pub coin_priv: CoinPrivateKey,
    /// Amount taken from the coin, deposit fee included.
    pub contribution: Amount,
    pub denom_pub_hash: DenomPubHash,
}

/// Coins chosen to cover an instructed amount at one exchange.
///
/// Immutable once returned; the caller reserves the coins with the store and
/// builds its deposit request from this value exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoinSelection {
    pub exchange_base_url: String,
    pub coins: Vec<SelectedCoin>,
    pub total_deposit_fees: Amount,
}

impl CoinSelection {
    /// Sum of all contributions (fees included).
    pub fn total_contribution(&self) -> Result<Amount, AmountError> {
        Amount::sum(
            self.total_deposit_fees.currency(),
            self.coins.iter().map(|c| &c.contribution),
        )
    }

    pub fn coin_pubs(&self) -> impl Iterator<Item = &CoinPublicKey> {
        self.coins.iter().map(|c| &c.coin_pub)
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}

/// Why a selection could not cover the instructed amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsufficientBalanceDetails {
    pub amount_requested: Amount,
    /// Gross value of every eligible coin, all exchanges together.
    pub balance_available: Amount,
    /// Largest amount any single exchange could cover after fees.
    pub max_effective_per_exchange: Amount,
    /// Amount each exchange's coins could cover after fees.
    pub per_exchange: BTreeMap<String, Amount>,
}
