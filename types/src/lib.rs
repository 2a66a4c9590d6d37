//! Fundamental types for the e-cash wallet core.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! currency amounts, timestamps, and the coin key material carried through
//! coin selection.

pub mod amount;
pub mod error;
pub mod hash;
pub mod keys;
pub mod time;

pub use amount::{Amount, FRACTIONAL_BASE, MAX_AMOUNT_VALUE};
pub use error::AmountError;
pub use hash::DenomPubHash;
pub use keys::{CoinPrivateKey, CoinPublicKey};
pub use time::{AbsoluteTime, Timestamp};
