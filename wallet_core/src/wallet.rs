//! Core wallet struct tying configuration to its stores.

use ecash_types::Amount;

use crate::coin::CoinSelection;
use crate::config::WalletCoreConfig;
use crate::error::WalletError;
use crate::fee_summary::{compare_exchanges, ExchangeFeeComparison, ExchangeFeeSummary};
use crate::selection::CoinSelector;
use crate::source::{CoinSource, DenominationSource};

/// Select coins from `source` covering `amount` and reserve them.
///
/// Nothing is returned unless the reservation succeeded, so a selection
/// handed back is always backed by coins the store has marked spent.
pub fn select_and_reserve<C: CoinSource + ?Sized>(
    selector: &CoinSelector,
    source: &C,
    amount: &Amount,
) -> Result<CoinSelection, WalletError> {
    let pool = source.spendable_coins(amount.currency())?;
    let selection = selector.select(amount, &pool)?;
    if selection.is_empty() {
        return Ok(selection);
    }

    let coins: Vec<_> = selection.coin_pubs().copied().collect();
    if let Err(e) = source.reserve_coins(&coins) {
        tracing::warn!(
            exchange = %selection.exchange_base_url,
            coins = coins.len(),
            error = %e,
            "failed to reserve selected coins"
        );
        return Err(e.into());
    }
    Ok(selection)
}

/// A wallet instance over a coin store and a fee schedule store.
pub struct Wallet<C, D> {
    config: WalletCoreConfig,
    selector: CoinSelector,
    coins: C,
    denominations: D,
}

impl<C: CoinSource, D: DenominationSource> Wallet<C, D> {
    pub fn new(config: WalletCoreConfig, coins: C, denominations: D) -> Result<Self, WalletError> {
        config.validate()?;
        let selector = CoinSelector::new(&config.selection);
        Ok(Self {
            config,
            selector,
            coins,
            denominations,
        })
    }

    pub fn config(&self) -> &WalletCoreConfig {
        &self.config
    }

    pub fn coins(&self) -> &C {
        &self.coins
    }

    /// Select and reserve coins to pay `amount`.
    pub fn pay(&self, amount: &Amount) -> Result<CoinSelection, WalletError> {
        select_and_reserve(&self.selector, &self.coins, amount)
    }

    /// Fee timelines of one exchange for the configured fee kinds.
    pub fn exchange_fee_summary(&self, exchange_base_url: &str) -> Result<ExchangeFeeSummary, WalletError> {
        let denoms = self.denominations.denominations(exchange_base_url)?;
        let wire_fees = self.denominations.wire_fees(exchange_base_url)?;
        Ok(ExchangeFeeSummary::build(
            exchange_base_url,
            &denoms,
            &wire_fees,
            &self.config.fees.denomination_fee_kinds,
        )?)
    }

    pub fn compare_exchange_fees(&self, left: &str, right: &str) -> Result<ExchangeFeeComparison, WalletError> {
        let left = self.exchange_fee_summary(left)?;
        let right = self.exchange_fee_summary(right)?;
        Ok(compare_exchanges(&left, &right)?)
    }
}
