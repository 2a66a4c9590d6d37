//! Per-exchange fee timelines and side-by-side comparison of two exchanges.

use std::collections::BTreeMap;

use ecash_timeline::{
    build_pair_timeline, build_timeline, DenominationValue, FeeInterval, FeeIntervalPair,
    TimelineError, WireMethod,
};
use serde::{Deserialize, Serialize};

use crate::schedule::{DenominationFeeKind, DenominationInfo, WireFeeKind, WireFeeRecord};

/// Best-fee timelines of one exchange, one per fee kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeFeeSummary {
    pub exchange_base_url: String,
    pub denomination_fees: BTreeMap<DenominationFeeKind, Vec<FeeInterval<DenominationValue>>>,
    pub wire_fees: BTreeMap<WireFeeKind, Vec<FeeInterval<WireMethod>>>,
}

impl ExchangeFeeSummary {
    /// Build timelines for the requested denomination fee kinds and for both
    /// wire fee kinds.
    ///
    /// Denominations of other exchanges are skipped. Fails with the first
    /// timeline error.
    pub fn build(
        exchange_base_url: &str,
        denoms: &[DenominationInfo],
        wire_fees: &[WireFeeRecord],
        kinds: &[DenominationFeeKind],
    ) -> Result<Self, TimelineError> {
        let own: Vec<&DenominationInfo> = denoms
            .iter()
            .filter(|d| d.exchange_base_url == exchange_base_url)
            .collect();

        let mut denomination_fees = BTreeMap::new();
        for &kind in kinds {
            let records: Vec<_> = own.iter().map(|d| d.fee_record(kind)).collect();
            denomination_fees.insert(kind, build_timeline(&records)?);
        }

        let mut wire = BTreeMap::new();
        for kind in WireFeeKind::ALL {
            let records: Vec<_> = wire_fees.iter().map(|w| w.fee_record(kind)).collect();
            wire.insert(kind, build_timeline(&records)?);
        }

        tracing::debug!(
            exchange = exchange_base_url,
            denominations = own.len(),
            wire_fees = wire_fees.len(),
            "built exchange fee summary"
        );
        Ok(Self {
            exchange_base_url: exchange_base_url.to_string(),
            denomination_fees,
            wire_fees: wire,
        })
    }
}

/// Two exchanges' fees aligned on common boundaries.
///
/// `left` fees belong to `left_exchange`, `right` fees to `right_exchange`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeFeeComparison {
    pub left_exchange: String,
    pub right_exchange: String,
    pub denomination_fees: BTreeMap<DenominationFeeKind, Vec<FeeIntervalPair<DenominationValue>>>,
    pub wire_fees: BTreeMap<WireFeeKind, Vec<FeeIntervalPair<WireMethod>>>,
}

/// Pair each fee kind's timelines of `left` and `right`.
///
/// A kind present in only one summary is paired against an empty timeline.
pub fn compare_exchanges(
    left: &ExchangeFeeSummary,
    right: &ExchangeFeeSummary,
) -> Result<ExchangeFeeComparison, TimelineError> {
    Ok(ExchangeFeeComparison {
        left_exchange: left.exchange_base_url.clone(),
        right_exchange: right.exchange_base_url.clone(),
        denomination_fees: pair_by_kind(&left.denomination_fees, &right.denomination_fees)?,
        wire_fees: pair_by_kind(&left.wire_fees, &right.wire_fees)?,
    })
}

fn pair_by_kind<K, G>(
    left: &BTreeMap<K, Vec<FeeInterval<G>>>,
    right: &BTreeMap<K, Vec<FeeInterval<G>>>,
) -> Result<BTreeMap<K, Vec<FeeIntervalPair<G>>>, TimelineError>
where
    K: Ord + Copy,
    G: Ord + Clone + std::fmt::Debug,
{
    let mut paired = BTreeMap::new();
    for kind in left.keys().chain(right.keys()) {
        if paired.contains_key(kind) {
            continue;
        }
        let l = left.get(kind).map(Vec::as_slice).unwrap_or_default();
        let r = right.get(kind).map(Vec::as_slice).unwrap_or_default();
        paired.insert(*kind, build_pair_timeline(l, r)?);
    }
    Ok(paired)
}
