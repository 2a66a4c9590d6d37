//! Wallet flows against in-memory stores.

use ecash_nullables::{NullCoinSource, NullDenominationSource};
use ecash_timeline::WireMethod;
use ecash_types::{AbsoluteTime, Amount, CoinPrivateKey, CoinPublicKey, DenomPubHash};
use ecash_wallet_core::{
    select_and_reserve, CoinSelector, DenominationFeeKind, DenominationInfo, SelectionConfig,
    SpendableCoin, StoreError, Wallet, WalletCoreConfig, WalletError, WireFeeKind, WireFeeRecord,
};

const EXCHANGE_A: &str = "https://a.exchange.example/";
const EXCHANGE_B: &str = "https://b.exchange.example/";

fn eur(value: u64) -> Amount {
    Amount::from_value("EUR", value).unwrap()
}

fn coin(exchange: &str, id: u8, value: u64, fee: u64) -> SpendableCoin {
    SpendableCoin {
        exchange_base_url: exchange.to_string(),
        coin_pub: CoinPublicKey([id; 32]),
        coin_priv: CoinPrivateKey([id; 32]),
        value: eur(value),
        deposit_fee: eur(fee),
        denom_pub_hash: DenomPubHash::new([value as u8; 64]),
    }
}

fn denom(exchange: &str, id: u8, value: u64, start: u64, end: u64, deposit_fee: u64) -> DenominationInfo {
    DenominationInfo {
        exchange_base_url: exchange.to_string(),
        denom_pub_hash: DenomPubHash::new([id; 64]),
        value: eur(value),
        fee_withdraw: eur(0),
        fee_deposit: eur(deposit_fee),
        fee_refresh: eur(0),
        fee_refund: eur(0),
        stamp_start: AbsoluteTime::from_secs(start),
        stamp_expire_withdraw: AbsoluteTime::from_secs(end),
        stamp_expire_deposit: AbsoluteTime::from_secs(end),
    }
}

fn wallet(coins: NullCoinSource, denoms: NullDenominationSource) -> Wallet<NullCoinSource, NullDenominationSource> {
    Wallet::new(WalletCoreConfig::default(), coins, denoms).unwrap()
}

#[test]
fn paying_reserves_the_selected_coins() {
    let coins = NullCoinSource::with_coins([coin(EXCHANGE_A, 1, 5, 1), coin(EXCHANGE_A, 2, 3, 1)]);
    let wallet = wallet(coins, NullDenominationSource::new());

    let selection = wallet.pay(&eur(4)).unwrap();
    assert_eq!(selection.coins.len(), 1);
    assert!(wallet.coins().is_spent(&CoinPublicKey([1; 32])));
    assert!(!wallet.coins().is_spent(&CoinPublicKey([2; 32])));

    // Only the 3 EUR coin is left, worth 2 after fees.
    let err = wallet.pay(&eur(4)).unwrap_err();
    assert!(err.is_insufficient_funds());
    assert_eq!(wallet.coins().spent_count(), 1);
}

#[test]
fn failed_reservation_returns_no_selection() {
    let coins = NullCoinSource::with_coins([coin(EXCHANGE_A, 1, 10, 0)]);
    coins.fail_reservations_with("database locked");

    let err = select_and_reserve(&CoinSelector::default(), &coins, &eur(5)).unwrap_err();
    assert!(matches!(err, WalletError::Store(StoreError::Backend(_))));
    assert_eq!(coins.spent_count(), 0);
}

#[test]
fn insufficient_funds_details_serialize() {
    let coins = NullCoinSource::with_coins([coin(EXCHANGE_A, 1, 4, 1), coin(EXCHANGE_B, 2, 6, 1)]);
    let wallet = wallet(coins, NullDenominationSource::new());

    match wallet.pay(&eur(100)) {
        Err(WalletError::Selection(ecash_wallet_core::SelectionError::InsufficientFunds(details))) => {
            assert_eq!(details.balance_available, eur(10));
            assert_eq!(details.max_effective_per_exchange, eur(5));
            let json = serde_json::to_value(&details).unwrap();
            assert_eq!(json["per_exchange"].as_object().unwrap().len(), 2);
        }
        other => panic!("expected insufficient funds, got {other:?}"),
    }
    assert_eq!(wallet.coins().spent_count(), 0);
}

#[test]
fn allowed_exchanges_from_config_apply_to_payments() {
    let coins = NullCoinSource::with_coins([coin(EXCHANGE_A, 1, 10, 0), coin(EXCHANGE_B, 2, 10, 0)]);
    let config = WalletCoreConfig {
        selection: SelectionConfig {
            allowed_exchanges: vec![EXCHANGE_B.to_string()],
        },
        ..WalletCoreConfig::default()
    };
    let wallet = Wallet::new(config, coins, NullDenominationSource::new()).unwrap();

    let selection = wallet.pay(&eur(5)).unwrap();
    assert_eq!(selection.exchange_base_url, EXCHANGE_B);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = WalletCoreConfig::default();
    config.fees.denomination_fee_kinds.clear();
    let result = Wallet::new(config, NullCoinSource::new(), NullDenominationSource::new());
    assert!(matches!(result, Err(WalletError::Config(_))));
}

#[test]
fn fee_summary_and_comparison() {
    let denoms = NullDenominationSource::new()
        .with_denomination(denom(EXCHANGE_A, 1, 5, 0, 100, 2))
        .with_denomination(denom(EXCHANGE_A, 2, 5, 50, 150, 1))
        .with_denomination(denom(EXCHANGE_B, 3, 5, 0, 150, 3))
        .with_wire_fee(
            EXCHANGE_A,
            WireFeeRecord {
                wire_method: WireMethod::new("iban"),
                start_stamp: AbsoluteTime::from_secs(0),
                end_stamp: AbsoluteTime::Never,
                wire_fee: eur(1),
                closing_fee: eur(0),
            },
        );
    let wallet = wallet(NullCoinSource::new(), denoms);

    let summary = wallet.exchange_fee_summary(EXCHANGE_A).unwrap();
    let deposit = &summary.denomination_fees[&DenominationFeeKind::Deposit];
    let fees: Vec<_> = deposit.iter().map(|i| i.fee.clone()).collect();
    assert_eq!(fees, vec![Some(eur(2)), Some(eur(1))]);
    assert_eq!(deposit[1].from, AbsoluteTime::from_secs(50));
    assert_eq!(summary.wire_fees[&WireFeeKind::Wire][0].until, AbsoluteTime::Never);

    let cmp = wallet.compare_exchange_fees(EXCHANGE_A, EXCHANGE_B).unwrap();
    let pairs = &cmp.denomination_fees[&DenominationFeeKind::Deposit];
    assert_eq!(pairs.len(), 2);
    assert_eq!((pairs[0].left.clone(), pairs[0].right.clone()), (Some(eur(2)), Some(eur(3))));
    assert_eq!((pairs[1].left.clone(), pairs[1].right.clone()), (Some(eur(1)), Some(eur(3))));
    assert_eq!(cmp.wire_fees[&WireFeeKind::Wire][0].right, None);
}

#[test]
fn broken_schedule_surfaces_as_timeline_error() {
    let denoms = NullDenominationSource::new().with_denomination(denom(EXCHANGE_A, 1, 5, 10, 10, 1));
    let wallet = wallet(NullCoinSource::new(), denoms);
    let err = wallet.exchange_fee_summary(EXCHANGE_A).unwrap_err();
    assert!(matches!(err, WalletError::Timeline(e) if e.is_malformed_input()));
}
