#![no_main]

use arbitrary::Arbitrary;
use fxtree::source::{StringSource, symbols_from_bytes};
use fxtree::tree::Ukkonen;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    text: &'a [u8],
    query: &'a [u8],
}

fuzz_target!(|input: Input| {
    let tree = Ukkonen::build(StringSource::from_bytes(input.text)).unwrap();
    let found = tree.search(&symbols_from_bytes(input.query));

    // Every reported offset is a real occurrence, and none is missed
    let haystack = input.text;
    let expected: Vec<i64> = if input.query.is_empty() {
        (0..=haystack.len() as i64).collect()
    } else {
        haystack
            .windows(input.query.len())
            .enumerate()
            .filter(|(_, w)| *w == input.query)
            .map(|(i, _)| i as i64)
            .collect()
    };
    assert_eq!(found, expected);
});
