//! Hash of a denomination public key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 64-byte denomination public key hash.
///
/// Ordered bytewise; coin selection uses this order to break ties between
/// coins of equal value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DenomPubHash([u8; 64]);

impl DenomPubHash {
    pub const ZERO: Self = Self([0u8; 64]);

    pub fn new(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 64]
    }
}

impl fmt::Debug for DenomPubHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DenomPubHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for DenomPubHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

// serde only derives arrays up to 32 elements.
impl Serialize for DenomPubHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for DenomPubHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HashVisitor;

        impl<'de> serde::de::Visitor<'de> for HashVisitor {
            type Value = DenomPubHash;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "64 bytes")
            }

            fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                let arr: [u8; 64] = v
                    .try_into()
                    .map_err(|_| E::invalid_length(v.len(), &self))?;
                Ok(DenomPubHash(arr))
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<Self::Value, A::Error> {
                let mut arr = [0u8; 64];
                for (i, byte) in arr.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(DenomPubHash(arr))
            }
        }

        deserializer.deserialize_bytes(HashVisitor)
    }
}

// Inline hex encoding to avoid adding the `hex` crate as a dependency of types.
pub(crate) mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_full_hex() {
        let mut bytes = [0u8; 64];
        bytes[0] = 0xab;
        let hash = DenomPubHash::new(bytes);
        let text = hash.to_string();
        assert_eq!(text.len(), 128);
        assert!(text.starts_with("ab00"));
    }

    #[test]
    fn json_roundtrip() {
        let hash = DenomPubHash::new([3u8; 64]);
        let json = serde_json::to_string(&hash).unwrap();
        let back: DenomPubHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }
}
