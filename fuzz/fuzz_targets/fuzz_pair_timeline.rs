#![no_main]

use libfuzzer_sys::fuzz_target;

use ecash_timeline::{build_pair_timeline, FeeInterval};
use ecash_types::{AbsoluteTime, Amount};

fn intervals(data: &[u8]) -> Vec<FeeInterval<u8>> {
    let mut out = Vec::new();
    let mut time = 0u64;
    for chunk in data.chunks_exact(3) {
        // Mostly contiguous, occasionally broken to exercise validation.
        let from = if chunk[2] == 0xff { time + 1 } else { time };
        let until = from + u64::from(chunk[1] % 16);
        out.push(FeeInterval {
            group: chunk[0] % 3,
            from: AbsoluteTime::from_secs(from),
            until: AbsoluteTime::from_secs(until),
            fee: (chunk[2] % 2 == 0).then(|| Amount::zero("KUDOS")),
        });
        time = until;
    }
    out
}

// Pairing must never panic on malformed input, and must cover every
// boundary when it succeeds.
fuzz_target!(|data: &[u8]| {
    let mid = data.len() / 2;
    let left = intervals(&data[..mid]);
    let right = intervals(&data[mid..]);

    if let Ok(pairs) = build_pair_timeline(&left, &right) {
        for p in &pairs {
            assert!(p.from < p.until);
        }
        for w in pairs.windows(2) {
            if w[0].group == w[1].group {
                assert_eq!(w[0].until, w[1].from);
            }
        }
    }
});
