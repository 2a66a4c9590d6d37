//! Wallet core library for an e-cash wallet.
//!
//! Provides the pieces of a wallet that do not talk to the network:
//! - Coin selection for payments (greedy, fee-aware, deterministic)
//! - Exchange fee summaries built from fee timelines
//! - Side-by-side fee comparison of two exchanges
//! - TOML configuration
//!
//! Coin and fee schedule storage is abstracted behind [`CoinSource`] and
//! [`DenominationSource`].

pub mod coin;
pub mod config;
pub mod error;
pub mod fee_summary;
pub mod schedule;
pub mod selection;
pub mod source;
pub mod wallet;

pub use coin::{CoinSelection, InsufficientBalanceDetails, SelectedCoin, SpendableCoin};
pub use config::{FeesConfig, SelectionConfig, WalletCoreConfig};
pub use error::{StoreError, WalletError};
pub use fee_summary::{compare_exchanges, ExchangeFeeComparison, ExchangeFeeSummary};
pub use schedule::{DenominationFeeKind, DenominationInfo, WireFeeKind, WireFeeRecord};
pub use selection::{select_coins, CoinSelector, SelectionError};
pub use source::{CoinSource, DenominationSource};
pub use wallet::{select_and_reserve, Wallet};
