//! Best-fee timeline construction.
//!
//! Each record contributes a start event at `valid_from` and an end event at
//! `valid_until`. Events are swept per group in time order while an explicit
//! active set tracks which records are live; between consecutive boundaries
//! the cheapest live record defines the fee of that window.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use ecash_types::{AbsoluteTime, Amount, AmountError};

use crate::error::TimelineError;
use crate::record::{DenominationRecord, FeeInterval};

/// End sorts before Start so records ending at an instant vacate before
/// records starting at that same instant become active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    End,
    Start,
}

struct Event<'a, G> {
    kind: EventKind,
    time: AbsoluteTime,
    record: &'a DenominationRecord<G>,
}

/// Live records of one group, keyed by id. The count absorbs identical
/// copies of a record.
type ActiveSet<'a, G> = BTreeMap<&'a str, (&'a DenominationRecord<G>, usize)>;

/// Build the best-fee timeline for `records`.
///
/// The result is sorted by group, then by time. Within a group intervals are
/// contiguous, span from the earliest `valid_from` to the latest
/// `valid_until`, and no two adjacent intervals carry the same fee. Windows
/// where nothing is active appear as gaps.
///
/// Identical copies of a record count once. Two records that share an id
/// but differ fail with [`TimelineError::ConflictingId`].
pub fn build_timeline<G>(records: &[DenominationRecord<G>]) -> Result<Vec<FeeInterval<G>>, TimelineError>
where
    G: Ord + Clone + fmt::Debug,
{
    let mut events = Vec::with_capacity(records.len() * 2);
    let mut by_id: BTreeMap<&str, &DenominationRecord<G>> = BTreeMap::new();
    for record in records {
        if let Some(existing) = by_id.insert(record.id.as_str(), record) {
            if existing != record {
                tracing::warn!(id = %record.id, "record id reused by a different record");
                return Err(TimelineError::ConflictingId {
                    id: record.id.clone(),
                });
            }
        }
        if record.valid_from >= record.valid_until {
            tracing::warn!(
                id = %record.id,
                from = %record.valid_from,
                until = %record.valid_until,
                "record has an empty validity window"
            );
            return Err(TimelineError::InvalidValidity {
                id: record.id.clone(),
            });
        }
        events.push(Event {
            kind: EventKind::Start,
            time: record.valid_from,
            record,
        });
        events.push(Event {
            kind: EventKind::End,
            time: record.valid_until,
            record,
        });
    }

    events.sort_by(|a, b| {
        a.record
            .group
            .cmp(&b.record.group)
            .then(a.time.cmp(&b.time))
            .then(a.kind.cmp(&b.kind))
            .then_with(|| a.record.id.cmp(&b.record.id))
    });

    let mut timeline = Vec::new();
    for group_events in events.chunk_by(|a, b| a.record.group == b.record.group) {
        sweep_group(group_events, &mut timeline)?;
    }

    tracing::debug!(
        records = records.len(),
        intervals = timeline.len(),
        "built fee timeline"
    );
    Ok(timeline)
}

/// Sweep the events of a single group. `events` is non-empty and sorted.
fn sweep_group<'a, G>(
    events: &[Event<'a, G>],
    timeline: &mut Vec<FeeInterval<G>>,
) -> Result<(), TimelineError>
where
    G: Ord + Clone + fmt::Debug,
{
    let group = &events[0].record.group;
    let mut active: ActiveSet<'a, G> = BTreeMap::new();
    let mut intervals: Vec<FeeInterval<G>> = Vec::new();
    // Start of the currently open window and the fee chosen for it.
    let mut open: Option<(AbsoluteTime, Option<Amount>)> = None;

    for batch in events.chunk_by(|a, b| a.time == b.time) {
        let boundary = batch[0].time;
        if let Some((from, fee)) = open.take() {
            push_merged(&mut intervals, group, from, boundary, fee);
        }

        for event in batch {
            let id = event.record.id.as_str();
            match event.kind {
                EventKind::Start => {
                    active
                        .entry(id)
                        .and_modify(|(_, count)| *count += 1)
                        .or_insert((event.record, 1));
                }
                EventKind::End => {
                    let remaining = match active.get_mut(id) {
                        Some((_, count)) => {
                            *count -= 1;
                            *count
                        }
                        None => {
                            tracing::warn!(id, group = ?group, "end event without matching start");
                            return Err(TimelineError::UnmatchedEnd { id: id.to_string() });
                        }
                    };
                    if remaining == 0 {
                        active.remove(id);
                    }
                }
            }
        }

        let best = select_best(active.values().map(|(record, _)| *record))?;
        open = Some((boundary, best.map(|record| record.fee.clone())));
    }

    if events.last().map(|e| e.kind) != Some(EventKind::End) {
        tracing::warn!(group = ?group, "timeline ends on a start event");
        return Err(TimelineError::TrailingStart {
            group: format!("{group:?}"),
        });
    }
    if !active.is_empty() {
        tracing::warn!(group = ?group, count = active.len(), "records left open");
        return Err(TimelineError::UnclosedRecords {
            group: format!("{group:?}"),
            count: active.len(),
        });
    }

    timeline.extend(intervals);
    Ok(())
}

/// Append `[from, until)`, extending the previous interval instead when it
/// ends at `from` with the same fee (gaps included).
fn push_merged<G: Clone>(
    intervals: &mut Vec<FeeInterval<G>>,
    group: &G,
    from: AbsoluteTime,
    until: AbsoluteTime,
    fee: Option<Amount>,
) {
    if from >= until {
        return;
    }
    if let Some(last) = intervals.last_mut() {
        if last.until == from && last.fee == fee {
            last.until = until;
            return;
        }
    }
    intervals.push(FeeInterval {
        group: group.clone(),
        from,
        until,
        fee,
    });
}

/// Pick the record with the smallest fee, ties broken by ascending id.
///
/// Returns `None` for an empty set. Fees in different currencies cannot be
/// ranked and fail with [`AmountError::CurrencyMismatch`].
pub fn select_best<'a, G, I>(active: I) -> Result<Option<&'a DenominationRecord<G>>, AmountError>
where
    G: 'a,
    I: IntoIterator<Item = &'a DenominationRecord<G>>,
{
    let mut best: Option<&'a DenominationRecord<G>> = None;
    for candidate in active {
        best = Some(match best {
            None => candidate,
            Some(current) => {
                let order = candidate
                    .fee
                    .cmp_amount(&current.fee)?
                    .then_with(|| candidate.id.cmp(&current.id));
                if order == Ordering::Less {
                    candidate
                } else {
                    current
                }
            }
        });
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee(value: u64) -> Amount {
        Amount::from_value("EUR", value).unwrap()
    }

    fn record(id: &str, group: u32, from: u64, until: u64, fee_value: u64) -> DenominationRecord<u32> {
        DenominationRecord {
            id: id.to_string(),
            group,
            valid_from: AbsoluteTime::from_secs(from),
            valid_until: AbsoluteTime::from_secs(until),
            fee: fee(fee_value),
        }
    }

    fn interval(group: u32, from: u64, until: u64, fee_value: Option<u64>) -> FeeInterval<u32> {
        FeeInterval {
            group,
            from: AbsoluteTime::from_secs(from),
            until: AbsoluteTime::from_secs(until),
            fee: fee_value.map(fee),
        }
    }

    #[test]
    fn overlapping_records_pick_lowest_fee() {
        let records = vec![record("A", 1, 1, 3, 2), record("B", 1, 2, 4, 1)];
        let timeline = build_timeline(&records).unwrap();
        assert_eq!(
            timeline,
            vec![interval(1, 1, 2, Some(2)), interval(1, 2, 4, Some(1))]
        );
    }

    #[test]
    fn worse_record_resurfaces_after_better_ends() {
        let records = vec![record("cheap", 1, 2, 4, 1), record("dear", 1, 0, 10, 5)];
        let timeline = build_timeline(&records).unwrap();
        assert_eq!(
            timeline,
            vec![
                interval(1, 0, 2, Some(5)),
                interval(1, 2, 4, Some(1)),
                interval(1, 4, 10, Some(5)),
            ]
        );
    }

    #[test]
    fn gap_is_inserted_between_disjoint_records() {
        let records = vec![record("a", 1, 0, 2, 3), record("b", 1, 5, 8, 3)];
        let timeline = build_timeline(&records).unwrap();
        assert_eq!(
            timeline,
            vec![
                interval(1, 0, 2, Some(3)),
                interval(1, 2, 5, None),
                interval(1, 5, 8, Some(3)),
            ]
        );
    }

    #[test]
    fn adjacent_records_with_equal_fee_merge() {
        let records = vec![record("a", 1, 0, 5, 2), record("b", 1, 5, 9, 2)];
        let timeline = build_timeline(&records).unwrap();
        assert_eq!(timeline, vec![interval(1, 0, 9, Some(2))]);
    }

    #[test]
    fn adjacent_records_with_different_fee_stay_apart() {
        let records = vec![record("a", 1, 0, 5, 2), record("b", 1, 5, 9, 3)];
        let timeline = build_timeline(&records).unwrap();
        assert_eq!(
            timeline,
            vec![interval(1, 0, 5, Some(2)), interval(1, 5, 9, Some(3))]
        );
    }

    #[test]
    fn same_start_instant_yields_no_zero_width_interval() {
        let records = vec![record("a", 1, 3, 6, 4), record("b", 1, 3, 5, 2)];
        let timeline = build_timeline(&records).unwrap();
        assert_eq!(
            timeline,
            vec![interval(1, 3, 5, Some(2)), interval(1, 5, 6, Some(4))]
        );
    }

    #[test]
    fn groups_are_partitioned_and_ordered() {
        let records = vec![
            record("x", 2, 0, 4, 1),
            record("y", 1, 0, 4, 9),
            record("z", 2, 2, 6, 0),
        ];
        let timeline = build_timeline(&records).unwrap();
        assert_eq!(
            timeline,
            vec![
                interval(1, 0, 4, Some(9)),
                interval(2, 0, 2, Some(1)),
                interval(2, 2, 6, Some(0)),
            ]
        );
    }

    #[test]
    fn duplicated_records_are_idempotent() {
        let records = vec![record("A", 1, 1, 3, 2), record("B", 1, 2, 4, 1)];
        let mut doubled = records.clone();
        doubled.extend(records.clone());
        assert_eq!(build_timeline(&doubled).unwrap(), build_timeline(&records).unwrap());
    }

    #[test]
    fn reused_id_with_different_record_is_malformed() {
        let records = vec![record("x", 1, 0, 10, 5), record("x", 1, 5, 8, 1)];
        let err = build_timeline(&records).unwrap_err();
        assert_eq!(err, TimelineError::ConflictingId { id: "x".into() });
        assert!(err.is_malformed_input());

        let later = vec![record("x", 1, 0, 2, 5), record("x", 1, 4, 8, 5)];
        assert!(matches!(
            build_timeline(&later),
            Err(TimelineError::ConflictingId { .. })
        ));
    }

    #[test]
    fn open_ended_record_runs_until_never() {
        let mut forever = record("f", 1, 10, 11, 3);
        forever.valid_until = AbsoluteTime::Never;
        let timeline = build_timeline(&[forever]).unwrap();
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].until, AbsoluteTime::Never);
    }

    #[test]
    fn empty_input_gives_empty_timeline() {
        let timeline = build_timeline::<u32>(&[]).unwrap();
        assert!(timeline.is_empty());
    }

    #[test]
    fn inverted_validity_is_malformed() {
        let err = build_timeline(&[record("bad", 1, 5, 5, 1)]).unwrap_err();
        assert_eq!(err, TimelineError::InvalidValidity { id: "bad".into() });
        assert!(err.is_malformed_input());
    }

    #[test]
    fn mixed_currencies_in_one_group_fail() {
        let mut chf = record("chf", 1, 0, 10, 1);
        chf.fee = Amount::from_value("CHF", 1).unwrap();
        let err = build_timeline(&[record("eur", 1, 0, 10, 1), chf]).unwrap_err();
        assert!(matches!(err, TimelineError::Amount(AmountError::CurrencyMismatch { .. })));
        assert!(!err.is_malformed_input());
    }

    #[test]
    fn select_best_breaks_ties_by_id() {
        let records = [record("b", 1, 0, 1, 2), record("a", 1, 0, 1, 2), record("c", 1, 0, 1, 3)];
        let best = select_best(records.iter()).unwrap().unwrap();
        assert_eq!(best.id, "a");
        assert!(select_best::<u32, _>(std::iter::empty()).unwrap().is_none());
    }
}
