//! Nullable fee schedule store: fixed schedules per exchange.

use std::collections::HashMap;

use ecash_wallet_core::{DenominationInfo, DenominationSource, StoreError, WireFeeRecord};

/// Fee schedules keyed by exchange base URL. Unknown exchanges have empty
/// schedules.
#[derive(Default)]
pub struct NullDenominationSource {
    denominations: HashMap<String, Vec<DenominationInfo>>,
    wire_fees: HashMap<String, Vec<WireFeeRecord>>,
}

impl NullDenominationSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `denom` under its own exchange base URL.
    pub fn with_denomination(mut self, denom: DenominationInfo) -> Self {
        self.denominations
            .entry(denom.exchange_base_url.clone())
            .or_default()
            .push(denom);
        self
    }

    pub fn with_wire_fee(mut self, exchange_base_url: &str, fee: WireFeeRecord) -> Self {
        self.wire_fees
            .entry(exchange_base_url.to_string())
            .or_default()
            .push(fee);
        self
    }
}

impl DenominationSource for NullDenominationSource {
    fn denominations(&self, exchange_base_url: &str) -> Result<Vec<DenominationInfo>, StoreError> {
        Ok(self
            .denominations
            .get(exchange_base_url)
            .cloned()
            .unwrap_or_default())
    }

    fn wire_fees(&self, exchange_base_url: &str) -> Result<Vec<WireFeeRecord>, StoreError> {
        Ok(self.wire_fees.get(exchange_base_url).cloned().unwrap_or_default())
    }
}
