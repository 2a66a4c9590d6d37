//! Exchange fee schedules and their mapping to timeline records.

use ecash_timeline::{DenominationRecord, DenominationValue, WireMethod};
use ecash_types::{AbsoluteTime, Amount, DenomPubHash};
use serde::{Deserialize, Serialize};

/// The four fees an exchange charges per denomination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DenominationFeeKind {
    Withdraw,
    Deposit,
    Refresh,
    Refund,
}

impl DenominationFeeKind {
    pub const ALL: [Self; 4] = [Self::Withdraw, Self::Deposit, Self::Refresh, Self::Refund];
}

/// A denomination as announced by an exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenominationInfo {
    pub exchange_base_url: String,
    pub denom_pub_hash: DenomPubHash,
    pub value: Amount,
    pub fee_withdraw: Amount,
    pub fee_deposit: Amount,
    pub fee_refresh: Amount,
    pub fee_refund: Amount,
    pub stamp_start: AbsoluteTime,
    /// Coins can be withdrawn or refreshed until this time.
    pub stamp_expire_withdraw: AbsoluteTime,
    /// Coins can be deposited or refunded until this time.
    pub stamp_expire_deposit: AbsoluteTime,
}

impl DenominationInfo {
    pub fn fee(&self, kind: DenominationFeeKind) -> &Amount {
        match kind {
            DenominationFeeKind::Withdraw => &self.fee_withdraw,
            DenominationFeeKind::Deposit => &self.fee_deposit,
            DenominationFeeKind::Refresh => &self.fee_refresh,
            DenominationFeeKind::Refund => &self.fee_refund,
        }
    }

    /// End of the window in which `kind` can be charged.
    pub fn expiry(&self, kind: DenominationFeeKind) -> AbsoluteTime {
        match kind {
            DenominationFeeKind::Withdraw | DenominationFeeKind::Refresh => self.stamp_expire_withdraw,
            DenominationFeeKind::Deposit | DenominationFeeKind::Refund => self.stamp_expire_deposit,
        }
    }

    pub fn fee_record(&self, kind: DenominationFeeKind) -> DenominationRecord<DenominationValue> {
        DenominationRecord {
            id: self.denom_pub_hash.to_string(),
            group: DenominationValue::from(&self.value),
            valid_from: self.stamp_start,
            valid_until: self.expiry(kind),
            fee: self.fee(kind).clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFeeKind {
    Wire,
    Closing,
}

impl WireFeeKind {
    pub const ALL: [Self; 2] = [Self::Wire, Self::Closing];
}

/// Wire and closing fee of one wire method over `[start_stamp, end_stamp)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireFeeRecord {
    pub wire_method: WireMethod,
    pub start_stamp: AbsoluteTime,
    pub end_stamp: AbsoluteTime,
    pub wire_fee: Amount,
    pub closing_fee: Amount,
}

impl WireFeeRecord {
    pub fn fee(&self, kind: WireFeeKind) -> &Amount {
        match kind {
            WireFeeKind::Wire => &self.wire_fee,
            WireFeeKind::Closing => &self.closing_fee,
        }
    }

    pub fn fee_record(&self, kind: WireFeeKind) -> DenominationRecord<WireMethod> {
        DenominationRecord {
            id: format!("{}:{}", self.wire_method, self.start_stamp),
            group: self.wire_method.clone(),
            valid_from: self.start_stamp,
            valid_until: self.end_stamp,
            fee: self.fee(kind).clone(),
        }
    }
}
