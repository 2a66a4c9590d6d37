//! Greedy coin selection.
//!
//! Coins are tried largest first. Each coin is asked for what is still
//! missing plus its own deposit fee; the coin gives that or its full value,
//! whichever is smaller. Selection stops as soon as the instructed amount is
//! covered, so dropping the last coin would leave it uncovered.
//!
//! The order is total (value descending, then denomination hash ascending,
//! then coin public key ascending), so the same pool always yields the same
//! selection regardless of the order the store returned it in.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use ecash_types::{Amount, AmountError};
use thiserror::Error;

use crate::coin::{CoinSelection, InsufficientBalanceDetails, SelectedCoin, SpendableCoin};
use crate::config::SelectionConfig;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error(
        "insufficient funds: requested {}, available {}",
        .0.amount_requested,
        .0.balance_available
    )]
    InsufficientFunds(InsufficientBalanceDetails),

    #[error(transparent)]
    Amount(#[from] AmountError),
}

impl SelectionError {
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::InsufficientFunds(_))
    }
}

/// Select coins from `pool` covering `instructed`, any exchange allowed.
pub fn select_coins(instructed: &Amount, pool: &[SpendableCoin]) -> Result<CoinSelection, SelectionError> {
    CoinSelector::default().select(instructed, pool)
}

/// Coin selector with an optional exchange restriction.
#[derive(Clone, Debug, Default)]
pub struct CoinSelector {
    /// `None` allows every exchange.
    allowed_exchanges: Option<BTreeSet<String>>,
}

impl CoinSelector {
    pub fn new(config: &SelectionConfig) -> Self {
        let allowed_exchanges = if config.allowed_exchanges.is_empty() {
            None
        } else {
            Some(config.allowed_exchanges.iter().cloned().collect())
        };
        Self { allowed_exchanges }
    }

    pub fn is_allowed(&self, exchange_base_url: &str) -> bool {
        self.allowed_exchanges
            .as_ref()
            .map_or(true, |allowed| allowed.contains(exchange_base_url))
    }

    /// Select coins of a single exchange covering `instructed`.
    ///
    /// Coins of other currencies or of disallowed exchanges are ignored.
    /// Exchanges are tried in ascending URL order and the first one able to
    /// cover the amount wins. Largest-first ordering applies within that
    /// exchange only: a larger coin at a later exchange is not preferred,
    /// and coins of two exchanges are never combined, so a pool whose total
    /// would cover the amount can still fail when no single exchange does.
    /// Nothing is selected on failure.
    pub fn select(&self, instructed: &Amount, pool: &[SpendableCoin]) -> Result<CoinSelection, SelectionError> {
        let mut by_exchange: BTreeMap<&str, Vec<&SpendableCoin>> = BTreeMap::new();
        for coin in pool {
            if coin.value.currency() != instructed.currency() || !self.is_allowed(&coin.exchange_base_url) {
                continue;
            }
            by_exchange
                .entry(coin.exchange_base_url.as_str())
                .or_default()
                .push(coin);
        }

        if instructed.is_zero() {
            return Ok(CoinSelection {
                exchange_base_url: String::new(),
                coins: Vec::new(),
                total_deposit_fees: Amount::zero(instructed.currency()),
            });
        }

        for (exchange, coins) in by_exchange.iter_mut() {
            sort_for_selection(coins);
            if let Some(selection) = select_greedy(instructed, exchange, coins)? {
                tracing::debug!(
                    exchange = %selection.exchange_base_url,
                    amount = %instructed,
                    coins = selection.coins.len(),
                    fees = %selection.total_deposit_fees,
                    "selected coins"
                );
                return Ok(selection);
            }
        }

        let details = insufficient_balance(instructed, &by_exchange)?;
        tracing::debug!(
            requested = %details.amount_requested,
            available = %details.balance_available,
            exchanges = details.per_exchange.len(),
            "insufficient funds for coin selection"
        );
        Err(SelectionError::InsufficientFunds(details))
    }
}

/// Value descending, then denomination hash ascending, then coin public key
/// ascending. All coins share one currency.
fn sort_for_selection(coins: &mut [&SpendableCoin]) {
    coins.sort_by(|a, b| {
        (b.value.value(), b.value.fraction())
            .cmp(&(a.value.value(), a.value.fraction()))
            .then_with(|| a.denom_pub_hash.cmp(&b.denom_pub_hash))
            .then_with(|| a.coin_pub.cmp(&b.coin_pub))
    });
}

/// Greedy pass over one exchange's sorted coins. `None` if they fall short.
fn select_greedy(
    instructed: &Amount,
    exchange: &str,
    coins: &[&SpendableCoin],
) -> Result<Option<CoinSelection>, AmountError> {
    let currency = instructed.currency();
    let mut accumulated = Amount::zero(currency);
    let mut fees = Amount::zero(currency);
    let mut selected = Vec::new();

    for coin in coins {
        if accumulated.cmp_amount(instructed)? != Ordering::Less {
            break;
        }
        let gap = instructed
            .checked_sub(&accumulated)?
            .checked_add(&coin.deposit_fee)?;
        let contribution = gap.min_amount(&coin.value)?;
        // A coin whose fee eats its whole contribution adds nothing but is
        // still spent, and its fee still counts.
        let net = contribution.saturating_sub(&coin.deposit_fee)?;
        accumulated = accumulated.checked_add(&net)?;
        fees = fees.checked_add(&coin.deposit_fee)?;
        selected.push(SelectedCoin {
            coin_pub: coin.coin_pub,
            coin_priv: coin.coin_priv.clone(),
            contribution,
            denom_pub_hash: coin.denom_pub_hash,
        });
    }

    if accumulated.cmp_amount(instructed)? == Ordering::Less {
        return Ok(None);
    }
    Ok(Some(CoinSelection {
        exchange_base_url: exchange.to_string(),
        coins: selected,
        total_deposit_fees: fees,
    }))
}

fn insufficient_balance(
    instructed: &Amount,
    by_exchange: &BTreeMap<&str, Vec<&SpendableCoin>>,
) -> Result<InsufficientBalanceDetails, AmountError> {
    let currency = instructed.currency();
    let mut balance_available = Amount::zero(currency);
    let mut max_effective = Amount::zero(currency);
    let mut per_exchange = BTreeMap::new();

    for (exchange, coins) in by_exchange {
        let mut effective = Amount::zero(currency);
        for coin in coins {
            balance_available = balance_available.checked_add(&coin.value)?;
            effective = effective.checked_add(&coin.value.saturating_sub(&coin.deposit_fee)?)?;
        }
        max_effective = max_effective.max_amount(&effective)?;
        per_exchange.insert(exchange.to_string(), effective);
    }

    Ok(InsufficientBalanceDetails {
        amount_requested: instructed.clone(),
        balance_available,
        max_effective_per_exchange: max_effective,
        per_exchange,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecash_types::{CoinPrivateKey, CoinPublicKey, DenomPubHash};

    const EXCHANGE: &str = "https://exchange.example.com/";

    fn kudos(value: u64) -> Amount {
        Amount::from_value("KUDOS", value).unwrap()
    }

    fn coin(id: u8, value: u64, fee: u64) -> SpendableCoin {
        coin_at(EXCHANGE, id, value, fee)
    }

    fn coin_at(exchange: &str, id: u8, value: u64, fee: u64) -> SpendableCoin {
        SpendableCoin {
            exchange_base_url: exchange.to_string(),
            coin_pub: CoinPublicKey([id; 32]),
            coin_priv: CoinPrivateKey([id.wrapping_add(100); 32]),
            value: kudos(value),
            deposit_fee: kudos(fee),
            denom_pub_hash: DenomPubHash::new([(value % 256) as u8; 64]),
        }
    }

    #[test]
    fn largest_coin_covers_amount_and_its_fee() {
        let pool = vec![coin(2, 3, 1), coin(1, 5, 1)];
        let selection = select_coins(&kudos(4), &pool).unwrap();
        assert_eq!(selection.coins.len(), 1);
        assert_eq!(selection.coins[0].coin_pub, CoinPublicKey([1; 32]));
        assert_eq!(selection.coins[0].contribution, kudos(5));
        assert_eq!(selection.total_deposit_fees, kudos(1));
        assert_eq!(selection.exchange_base_url, EXCHANGE);
    }

    #[test]
    fn last_coin_contributes_only_what_is_missing() {
        let pool = vec![coin(1, 5, 1), coin(2, 5, 1)];
        let selection = select_coins(&kudos(6), &pool).unwrap();
        let contributions: Vec<_> = selection.coins.iter().map(|c| c.contribution.clone()).collect();
        // 5 - 1 = 4 net from the first coin, then 2 missing + 1 fee.
        assert_eq!(contributions, vec![kudos(5), kudos(3)]);
        assert_eq!(selection.total_deposit_fees, kudos(2));
    }

    #[test]
    fn insufficient_funds_selects_nothing() {
        let pool = vec![coin(1, 4, 0), coin(2, 6, 0)];
        let err = select_coins(&kudos(100), &pool).unwrap_err();
        assert!(err.is_insufficient_funds());
        match err {
            SelectionError::InsufficientFunds(details) => {
                assert_eq!(details.amount_requested, kudos(100));
                assert_eq!(details.balance_available, kudos(10));
                assert_eq!(details.per_exchange.get(EXCHANGE), Some(&kudos(10)));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn fees_count_against_the_balance() {
        // Gross 10 but only 8 after fees.
        let pool = vec![coin(1, 5, 1), coin(2, 5, 1)];
        let err = select_coins(&kudos(9), &pool).unwrap_err();
        match err {
            SelectionError::InsufficientFunds(details) => {
                assert_eq!(details.max_effective_per_exchange, kudos(8));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn other_currencies_are_ignored() {
        let mut foreign = coin(9, 100, 0);
        foreign.value = Amount::from_value("EUR", 100).unwrap();
        foreign.deposit_fee = Amount::zero("EUR");
        let pool = vec![foreign, coin(1, 5, 0)];
        let selection = select_coins(&kudos(5), &pool).unwrap();
        assert_eq!(selection.coins.len(), 1);
        assert_eq!(selection.coins[0].coin_pub, CoinPublicKey([1; 32]));
    }

    #[test]
    fn coin_with_fee_above_value_is_spent_for_nothing() {
        let pool = vec![coin(1, 3, 0), coin(2, 1, 2)];
        let err = select_coins(&kudos(4), &pool).unwrap_err();
        assert!(err.is_insufficient_funds());

        let pool = vec![coin(1, 3, 0), coin(2, 1, 2), coin(3, 1, 0)];
        let selection = select_coins(&kudos(4), &pool).unwrap();
        assert_eq!(selection.coins.len(), 3);
        assert_eq!(selection.total_deposit_fees, kudos(2));
    }

    #[test]
    fn equal_values_break_ties_by_denomination_hash() {
        let mut a = coin(1, 5, 0);
        let mut b = coin(2, 5, 0);
        a.denom_pub_hash = DenomPubHash::new([9; 64]);
        b.denom_pub_hash = DenomPubHash::new([3; 64]);
        let selection = select_coins(&kudos(5), &[a, b]).unwrap();
        assert_eq!(selection.coins[0].coin_pub, CoinPublicKey([2; 32]));
    }

    #[test]
    fn single_exchange_is_used_per_selection() {
        let pool = vec![
            coin_at("https://a.example/", 1, 3, 0),
            coin_at("https://b.example/", 2, 3, 0),
            coin_at("https://b.example/", 3, 3, 0),
        ];
        let selection = select_coins(&kudos(5), &pool).unwrap();
        assert_eq!(selection.exchange_base_url, "https://b.example/");
        assert_eq!(selection.coins.len(), 2);
    }

    #[test]
    fn first_covering_exchange_wins_over_larger_coins_elsewhere() {
        let pool = vec![
            coin_at("https://a.example/", 1, 2, 0),
            coin_at("https://a.example/", 2, 2, 0),
            coin_at("https://b.example/", 3, 10, 0),
        ];
        let selection = select_coins(&kudos(2), &pool).unwrap();
        assert_eq!(selection.exchange_base_url, "https://a.example/");
        assert_eq!(selection.coins.len(), 1);
        assert_eq!(selection.coins[0].contribution, kudos(2));
    }

    #[test]
    fn exchanges_are_never_combined() {
        let pool = vec![
            coin_at("https://a.example/", 1, 3, 0),
            coin_at("https://b.example/", 2, 3, 0),
        ];
        match select_coins(&kudos(5), &pool).unwrap_err() {
            SelectionError::InsufficientFunds(details) => {
                assert_eq!(details.balance_available, kudos(6));
                assert_eq!(details.max_effective_per_exchange, kudos(3));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn allowed_exchanges_restrict_the_pool() {
        let pool = vec![
            coin_at("https://a.example/", 1, 10, 0),
            coin_at("https://b.example/", 2, 10, 0),
        ];
        let selector = CoinSelector::new(&SelectionConfig {
            allowed_exchanges: vec!["https://b.example/".to_string()],
        });
        let selection = selector.select(&kudos(5), &pool).unwrap();
        assert_eq!(selection.exchange_base_url, "https://b.example/");
        assert!(!selector.is_allowed("https://a.example/"));
    }

    #[test]
    fn zero_amount_selects_nothing() {
        let selection = select_coins(&Amount::zero("KUDOS"), &[coin(1, 5, 1)]).unwrap();
        assert!(selection.is_empty());
        assert!(selection.exchange_base_url.is_empty());
        assert!(selection.total_deposit_fees.is_zero());
    }

    #[test]
    fn total_contribution_includes_fees() {
        let pool = vec![coin(1, 5, 1), coin(2, 5, 1)];
        let selection = select_coins(&kudos(6), &pool).unwrap();
        assert_eq!(selection.total_contribution().unwrap(), kudos(8));
    }
}
