#![no_main]

use fxtree::source::StringSource;
use fxtree::tree::{Ukkonen, verify, verify_finished};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every prefix must leave a valid implicit tree
    let mut engine = Ukkonen::new(StringSource::from_bytes(data));
    while engine.extend().unwrap() {
        verify(engine.tree()).unwrap();
    }
    engine.finish().unwrap();

    // One leaf per suffix, whatever bytes the input holds
    verify_finished(engine.tree()).unwrap();
});
