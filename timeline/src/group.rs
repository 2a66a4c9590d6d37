//! Typed group keys.
//!
//! Records are only ever compared against records of the same group, and
//! groups are emitted in the key's `Ord` order. Keys are structured values
//! rather than display strings so two distinct groups can never collide.

use ecash_types::{Amount, AmountError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A denomination value scoped to its currency.
///
/// Orders by currency, then by value, then by fraction.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DenominationValue {
    currency: String,
    value: u64,
    fraction: u32,
}

impl DenominationValue {
    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn to_amount(&self) -> Result<Amount, AmountError> {
        Amount::new(self.currency.clone(), self.value, self.fraction)
    }
}

impl From<&Amount> for DenominationValue {
    fn from(amount: &Amount) -> Self {
        Self {
            currency: amount.currency().to_string(),
            value: amount.value(),
            fraction: amount.fraction(),
        }
    }
}

impl fmt::Display for DenominationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_amount() {
            Ok(amount) => amount.fmt(f),
            Err(_) => write!(f, "{}:{}+{}", self.currency, self.value, self.fraction),
        }
    }
}

/// A wire transfer method (e.g. `iban`, `x-taler-bank`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WireMethod(pub String);

impl WireMethod {
    pub fn new(method: impl Into<String>) -> Self {
        Self(method.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WireMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
