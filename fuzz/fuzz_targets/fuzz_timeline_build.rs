#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ecash_timeline::{build_timeline, DenominationRecord};
use ecash_types::{AbsoluteTime, Amount};

#[derive(Arbitrary, Debug)]
struct RawRecord {
    id: u8,
    group: u8,
    from: u16,
    len: u16,
    open_ended: bool,
    fee: u32,
}

// Arbitrary records (including empty windows and duplicate ids) must yield
// either an error or a contiguous timeline per group.
fuzz_target!(|raw: Vec<RawRecord>| {
    let records: Vec<_> = raw
        .iter()
        .map(|r| DenominationRecord {
            id: format!("r{}", r.id),
            group: r.group % 4,
            valid_from: AbsoluteTime::from_secs(u64::from(r.from)),
            valid_until: if r.open_ended {
                AbsoluteTime::Never
            } else {
                AbsoluteTime::from_secs(u64::from(r.from) + u64::from(r.len))
            },
            fee: Amount::new("KUDOS", 0, r.fee % 100_000_000).unwrap_or_else(|_| Amount::zero("KUDOS")),
        })
        .collect();

    if let Ok(timeline) = build_timeline(&records) {
        for w in timeline.windows(2) {
            assert!(w[0].from < w[0].until);
            if w[0].group == w[1].group {
                assert_eq!(w[0].until, w[1].from);
                assert_ne!(w[0].fee, w[1].fee);
            }
        }
    }
});
