//! Coin key material.
//!
//! The wallet core never performs cryptography on these keys; it only
//! carries them from the coin pool into a coin selection so the signing
//! service can use them.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::hash::hex;

/// A 32-byte coin public key. Ordered bytewise.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CoinPublicKey(pub [u8; 32]);

impl CoinPublicKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for CoinPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoinPublicKey({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for CoinPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

/// A 32-byte coin private key.
///
/// Does not implement `Serialize` and prints redacted. Key bytes are
/// zeroized on drop; clones are zeroized independently.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CoinPrivateKey(pub [u8; 32]);

impl CoinPrivateKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for CoinPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoinPrivateKey(..)")
    }
}
