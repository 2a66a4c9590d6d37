//! Nullable coin store: thread-safe in-memory coin pool for testing.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use ecash_types::CoinPublicKey;
use ecash_wallet_core::{CoinSource, SpendableCoin, StoreError};

#[derive(Default)]
struct Pool {
    coins: BTreeMap<CoinPublicKey, SpendableCoin>,
    spent: BTreeSet<CoinPublicKey>,
}

/// An in-memory coin pool with spent tracking.
#[derive(Default)]
pub struct NullCoinSource {
    pool: Mutex<Pool>,
    /// When set, every reservation fails with this message.
    fail_reservations: Mutex<Option<String>>,
}

impl NullCoinSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coins(coins: impl IntoIterator<Item = SpendableCoin>) -> Self {
        let source = Self::new();
        for coin in coins {
            source.add_coin(coin);
        }
        source
    }

    /// Add a coin; replaces any coin with the same public key.
    pub fn add_coin(&self, coin: SpendableCoin) {
        let mut pool = self.pool();
        pool.spent.remove(&coin.coin_pub);
        pool.coins.insert(coin.coin_pub, coin);
    }

    pub fn is_spent(&self, coin: &CoinPublicKey) -> bool {
        self.pool().spent.contains(coin)
    }

    pub fn spent_count(&self) -> usize {
        self.pool().spent.len()
    }

    /// Make subsequent reservations fail with a backend error.
    pub fn fail_reservations_with(&self, message: impl Into<String>) {
        *self.lock_failure() = Some(message.into());
    }

    fn pool(&self) -> MutexGuard<'_, Pool> {
        self.pool.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_failure(&self) -> MutexGuard<'_, Option<String>> {
        self.fail_reservations.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CoinSource for NullCoinSource {
    fn spendable_coins(&self, currency: &str) -> Result<Vec<SpendableCoin>, StoreError> {
        let pool = self.pool();
        Ok(pool
            .coins
            .values()
            .filter(|c| c.value.currency() == currency && !pool.spent.contains(&c.coin_pub))
            .cloned()
            .collect())
    }

    fn reserve_coins(&self, coins: &[CoinPublicKey]) -> Result<(), StoreError> {
        if let Some(message) = self.lock_failure().clone() {
            return Err(StoreError::Backend(message));
        }
        let mut pool = self.pool();
        for coin in coins {
            if !pool.coins.contains_key(coin) {
                return Err(StoreError::NotFound(*coin));
            }
            if pool.spent.contains(coin) {
                return Err(StoreError::AlreadySpent(*coin));
            }
        }
        pool.spent.extend(coins.iter().copied());
        Ok(())
    }
}
