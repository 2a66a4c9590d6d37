#![no_main]

use std::cmp::Ordering;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ecash_types::{Amount, CoinPrivateKey, CoinPublicKey, DenomPubHash};
use ecash_wallet_core::{select_coins, SpendableCoin};

#[derive(Arbitrary, Debug)]
struct RawCoin {
    exchange: u8,
    value: u32,
    fee: u32,
    denom: u8,
}

#[derive(Arbitrary, Debug)]
struct Input {
    amount: u32,
    coins: Vec<RawCoin>,
}

fn kudos(cents: u32) -> Amount {
    Amount::new("KUDOS", u64::from(cents / 100), (cents % 100) * 1_000_000)
        .unwrap_or_else(|_| Amount::zero("KUDOS"))
}

// Selection must never panic, and a successful selection must cover the
// instructed amount after fees.
fuzz_target!(|input: Input| {
    let pool: Vec<_> = input
        .coins
        .iter()
        .take(256)
        .enumerate()
        .map(|(i, c)| SpendableCoin {
            exchange_base_url: format!("https://ex{}.example/", c.exchange % 3),
            coin_pub: CoinPublicKey([i as u8; 32]),
            coin_priv: CoinPrivateKey([0; 32]),
            value: kudos(c.value),
            deposit_fee: kudos(c.fee),
            denom_pub_hash: DenomPubHash::new([c.denom; 64]),
        })
        .collect();
    let instructed = kudos(input.amount);

    if let Ok(selection) = select_coins(&instructed, &pool) {
        let mut net = Amount::zero("KUDOS");
        for selected in &selection.coins {
            let coin = pool.iter().find(|c| c.coin_pub == selected.coin_pub).unwrap();
            assert_ne!(selected.contribution.cmp_amount(&coin.value).unwrap(), Ordering::Greater);
            net = net
                .checked_add(&selected.contribution.saturating_sub(&coin.deposit_fee).unwrap())
                .unwrap();
        }
        assert_ne!(net.cmp_amount(&instructed).unwrap(), Ordering::Less);
    }
});
