//! Alignment of two fee timelines into one paired timeline.
//!
//! Both inputs are treated as read-only slices. Padding needed to make the
//! two sides start and end together is built in local buffers that borrow
//! the inputs' fees, so callers can reuse their timelines across calls.

use std::fmt;

use ecash_types::{AbsoluteTime, Amount};

use crate::error::TimelineError;
use crate::record::{FeeInterval, FeeIntervalPair};

/// A window of one side after padding.
#[derive(Clone, Copy)]
struct Segment<'a> {
    from: AbsoluteTime,
    until: AbsoluteTime,
    fee: Option<&'a Amount>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Align `left` and `right` into pairs sharing common boundaries.
///
/// Each input must be sorted by group and contiguous within each group, as
/// produced by [`build_timeline`](crate::build_timeline); either may be
/// empty. Groups are emitted in ascending key order. A group present on one
/// side only is emitted with the other side absent.
pub fn build_pair_timeline<G>(
    left: &[FeeInterval<G>],
    right: &[FeeInterval<G>],
) -> Result<Vec<FeeIntervalPair<G>>, TimelineError>
where
    G: Ord + Clone + fmt::Debug,
{
    let left_runs = split_groups(left)?;
    let right_runs = split_groups(right)?;

    let mut pairs = Vec::with_capacity(left.len() + right.len());
    let mut l = left_runs.into_iter().peekable();
    let mut r = right_runs.into_iter().peekable();

    loop {
        let order = match (l.peek(), r.peek()) {
            (None, None) => break,
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (Some(lr), Some(rr)) => lr[0].group.cmp(&rr[0].group),
        };
        match order {
            std::cmp::Ordering::Less => {
                if let Some(run) = l.next() {
                    emit_one_sided(run, Side::Left, &mut pairs);
                }
            }
            std::cmp::Ordering::Greater => {
                if let Some(run) = r.next() {
                    emit_one_sided(run, Side::Right, &mut pairs);
                }
            }
            std::cmp::Ordering::Equal => {
                if let (Some(lr), Some(rr)) = (l.next(), r.next()) {
                    pair_group(lr, rr, &mut pairs)?;
                }
            }
        }
    }

    tracing::debug!(
        left = left.len(),
        right = right.len(),
        pairs = pairs.len(),
        "built paired fee timeline"
    );
    Ok(pairs)
}

/// Split a timeline into per-group runs, checking sortedness and contiguity.
fn split_groups<G>(intervals: &[FeeInterval<G>]) -> Result<Vec<&[FeeInterval<G>]>, TimelineError>
where
    G: Ord + fmt::Debug,
{
    let runs: Vec<&[FeeInterval<G>]> = intervals.chunk_by(|a, b| a.group == b.group).collect();

    for (index, run) in runs.iter().enumerate() {
        let group = &run[0].group;
        if index > 0 && runs[index - 1][0].group >= *group {
            tracing::warn!(group = ?group, "timeline groups out of order");
            return Err(TimelineError::Unsorted {
                group: format!("{group:?}"),
            });
        }
        for interval in run.iter() {
            if interval.from >= interval.until {
                tracing::warn!(group = ?group, from = %interval.from, "empty interval");
                return Err(TimelineError::EmptyInterval {
                    group: format!("{group:?}"),
                    from: interval.from,
                });
            }
        }
        for window in run.windows(2) {
            if window[0].until != window[1].from {
                tracing::warn!(
                    group = ?group,
                    expected = %window[0].until,
                    found = %window[1].from,
                    "timeline not contiguous"
                );
                return Err(TimelineError::NonContiguous {
                    group: format!("{group:?}"),
                    expected: window[0].until,
                    found: window[1].from,
                });
            }
        }
    }
    Ok(runs)
}

fn emit_one_sided<G: Clone>(run: &[FeeInterval<G>], side: Side, pairs: &mut Vec<FeeIntervalPair<G>>) {
    pairs.extend(run.iter().map(|interval| {
        let (left, right) = match side {
            Side::Left => (interval.fee.clone(), None),
            Side::Right => (None, interval.fee.clone()),
        };
        FeeIntervalPair {
            group: interval.group.clone(),
            from: interval.from,
            until: interval.until,
            left,
            right,
        }
    }));
}

/// Pad `run` with gaps so it spans exactly `[start, end)`.
fn padded<G>(run: &[FeeInterval<G>], start: AbsoluteTime, end: AbsoluteTime) -> Vec<Segment<'_>> {
    let mut segments = Vec::with_capacity(run.len() + 2);
    let first = run[0].from;
    let last = run[run.len() - 1].until;
    if start < first {
        segments.push(Segment {
            from: start,
            until: first,
            fee: None,
        });
    }
    segments.extend(run.iter().map(|interval| Segment {
        from: interval.from,
        until: interval.until,
        fee: interval.fee.as_ref(),
    }));
    if last < end {
        segments.push(Segment {
            from: last,
            until: end,
            fee: None,
        });
    }
    segments
}

/// Align one group present on both sides. Both runs are non-empty.
fn pair_group<G>(
    left: &[FeeInterval<G>],
    right: &[FeeInterval<G>],
    pairs: &mut Vec<FeeIntervalPair<G>>,
) -> Result<(), TimelineError>
where
    G: Clone + fmt::Debug,
{
    let group = &left[0].group;
    let start = left[0].from.min(right[0].from);
    let end = left[left.len() - 1].until.max(right[right.len() - 1].until);
    let ls = padded(left, start, end);
    let rs = padded(right, start, end);

    let mut emitted = Vec::with_capacity(ls.len() + rs.len());
    let (mut i, mut j) = (0, 0);
    let mut cursor = start;
    while i < ls.len() && j < rs.len() {
        let (a, b) = (ls[i], rs[j]);
        let covers = |s: Segment<'_>| s.from <= cursor && cursor < s.until;
        if (a.from != cursor && b.from != cursor) || !covers(a) || !covers(b) {
            let found = if a.from != cursor { a.from } else { b.from };
            tracing::warn!(group = ?group, expected = %cursor, found = %found, "paired timeline lost its boundary");
            return Err(TimelineError::NonContiguous {
                group: format!("{group:?}"),
                expected: cursor,
                found,
            });
        }

        let until = a.until.min(b.until);
        emitted.push(FeeIntervalPair {
            group: group.clone(),
            from: cursor,
            until,
            left: a.fee.cloned(),
            right: b.fee.cloned(),
        });
        if a.until == until {
            i += 1;
        }
        if b.until == until {
            j += 1;
        }
        cursor = until;
    }

    if i < ls.len() || j < rs.len() {
        tracing::warn!(group = ?group, expected = %end, found = %cursor, "paired timeline ended early");
        return Err(TimelineError::NonContiguous {
            group: format!("{group:?}"),
            expected: end,
            found: cursor,
        });
    }

    pairs.extend(emitted);
    Ok(())
}
