//! Nullable infrastructure for deterministic testing.
//!
//! The wallet core reads coins and fee schedules through the traits in
//! `ecash_wallet_core::source`. This crate provides in-memory
//! implementations that:
//! - Return exactly what the test put in
//! - Can be inspected after the fact (which coins were spent)
//! - Never touch the filesystem or network
//!
//! Usage: swap real stores for nullables in tests.

pub mod coins;
pub mod denominations;

pub use coins::NullCoinSource;
pub use denominations::NullDenominationSource;
