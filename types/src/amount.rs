//! Currency amounts as exact decimal fractions.
//!
//! An amount is a whole `value` plus a `fraction` counted in units of
//! `1 / FRACTIONAL_BASE`, tagged with its currency. No floating point is
//! involved anywhere. Every arithmetic operation is checked: crossing
//! currencies, exceeding [`MAX_AMOUNT_VALUE`] or going below zero is
//! reported through [`AmountError`] instead of wrapping.

use crate::error::AmountError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Number of fractional units in one whole unit of currency.
pub const FRACTIONAL_BASE: u32 = 100_000_000;

/// Number of decimal digits represented by [`FRACTIONAL_BASE`].
pub const FRACTIONAL_DIGITS: usize = 8;

/// Largest representable whole value (2^52).
pub const MAX_AMOUNT_VALUE: u64 = 1 << 52;

/// An exact, non-negative amount of a single currency.
///
/// `fraction` is always normalized into `[0, FRACTIONAL_BASE)`.
/// `Amount` does not implement `Ord`: amounts of different currencies have
/// no order, so comparison goes through [`Amount::cmp_amount`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AmountRepr", into = "AmountRepr")]
pub struct Amount {
    currency: String,
    value: u64,
    fraction: u32,
}

impl Amount {
    /// Build an amount, carrying any fraction overflow into `value`.
    pub fn new(currency: impl Into<String>, value: u64, fraction: u32) -> Result<Self, AmountError> {
        let carry = u64::from(fraction / FRACTIONAL_BASE);
        let value = value.checked_add(carry).ok_or(AmountError::Overflow)?;
        if value > MAX_AMOUNT_VALUE {
            return Err(AmountError::Overflow);
        }
        Ok(Self {
            currency: currency.into(),
            value,
            fraction: fraction % FRACTIONAL_BASE,
        })
    }

    /// Zero of the given currency.
    pub fn zero(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            value: 0,
            fraction: 0,
        }
    }

    /// Whole units only.
    pub fn from_value(currency: impl Into<String>, value: u64) -> Result<Self, AmountError> {
        Self::new(currency, value, 0)
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn fraction(&self) -> u32 {
        self.fraction
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0 && self.fraction == 0
    }

    pub fn same_currency(&self, other: &Self) -> bool {
        self.currency == other.currency
    }

    fn check_currency(&self, other: &Self) -> Result<(), AmountError> {
        if self.same_currency(other) {
            Ok(())
        } else {
            Err(AmountError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            })
        }
    }

    /// Total order within one currency.
    pub fn cmp_amount(&self, other: &Self) -> Result<Ordering, AmountError> {
        self.check_currency(other)?;
        Ok((self.value, self.fraction).cmp(&(other.value, other.fraction)))
    }

    pub fn checked_add(&self, other: &Self) -> Result<Self, AmountError> {
        self.check_currency(other)?;
        let mut value = self.value.checked_add(other.value).ok_or(AmountError::Overflow)?;
        // Both fractions are below FRACTIONAL_BASE, so the sum fits in u32.
        let mut fraction = self.fraction + other.fraction;
        if fraction >= FRACTIONAL_BASE {
            fraction -= FRACTIONAL_BASE;
            value = value.checked_add(1).ok_or(AmountError::Overflow)?;
        }
        if value > MAX_AMOUNT_VALUE {
            return Err(AmountError::Overflow);
        }
        Ok(Self {
            currency: self.currency.clone(),
            value,
            fraction,
        })
    }

    pub fn checked_sub(&self, other: &Self) -> Result<Self, AmountError> {
        self.check_currency(other)?;
        let mut value = self.value;
        let mut fraction = self.fraction;
        if fraction < other.fraction {
            value = value.checked_sub(1).ok_or(AmountError::Underflow)?;
            fraction += FRACTIONAL_BASE;
        }
        let value = value.checked_sub(other.value).ok_or(AmountError::Underflow)?;
        Ok(Self {
            currency: self.currency.clone(),
            value,
            fraction: fraction - other.fraction,
        })
    }

    /// Subtract, flooring at zero. A currency mismatch is still an error.
    pub fn saturating_sub(&self, other: &Self) -> Result<Self, AmountError> {
        match self.checked_sub(other) {
            Err(AmountError::Underflow) => Ok(Self::zero(self.currency.clone())),
            result => result,
        }
    }

    /// Multiply by a whole factor.
    pub fn checked_mul(&self, factor: u64) -> Result<Self, AmountError> {
        let fraction_total = u128::from(self.fraction) * u128::from(factor);
        let carry = fraction_total / u128::from(FRACTIONAL_BASE);
        let value = u128::from(self.value) * u128::from(factor) + carry;
        if value > u128::from(MAX_AMOUNT_VALUE) {
            return Err(AmountError::Overflow);
        }
        Ok(Self {
            currency: self.currency.clone(),
            value: value as u64,
            fraction: (fraction_total % u128::from(FRACTIONAL_BASE)) as u32,
        })
    }

    /// The smaller of two amounts (`self` on a tie).
    pub fn min_amount(&self, other: &Self) -> Result<Self, AmountError> {
        Ok(match self.cmp_amount(other)? {
            Ordering::Greater => other.clone(),
            _ => self.clone(),
        })
    }

    /// The larger of two amounts (`self` on a tie).
    pub fn max_amount(&self, other: &Self) -> Result<Self, AmountError> {
        Ok(match self.cmp_amount(other)? {
            Ordering::Less => other.clone(),
            _ => self.clone(),
        })
    }

    /// Sum a sequence of amounts, starting from zero of `currency`.
    pub fn sum<'a, I>(currency: &str, amounts: I) -> Result<Self, AmountError>
    where
        I: IntoIterator<Item = &'a Amount>,
    {
        amounts
            .into_iter()
            .try_fold(Self::zero(currency), |acc, a| acc.checked_add(a))
    }
}

/// Wire shape of [`Amount`]; deserialization re-runs normalization.
#[derive(Serialize, Deserialize)]
struct AmountRepr {
    currency: String,
    value: u64,
    fraction: u32,
}

impl TryFrom<AmountRepr> for Amount {
    type Error = AmountError;

    fn try_from(repr: AmountRepr) -> Result<Self, Self::Error> {
        Amount::new(repr.currency, repr.value, repr.fraction)
    }
}

impl From<Amount> for AmountRepr {
    fn from(amount: Amount) -> Self {
        Self {
            currency: amount.currency,
            value: amount.value,
            fraction: amount.fraction,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fraction == 0 {
            return write!(f, "{}:{}", self.currency, self.value);
        }
        let digits = format!("{:0width$}", self.fraction, width = FRACTIONAL_DIGITS);
        write!(f, "{}:{}.{}", self.currency, self.value, digits.trim_end_matches('0'))
    }
}
