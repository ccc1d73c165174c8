//! Fuzz target: `StoredStatus::parse`
//!
//! Feeds arbitrary text as device custom data.  Parsing must never panic,
//! every record written must read back, and reading and re-writing a
//! written record must be byte-identical.
//!
//! cargo fuzz run fuzz_stored_status

#![no_main]

use airlock::airlock::StoredStatus;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    if let Some(record) = StoredStatus::parse(text) {
        let canonical = record.format();
        let reread = StoredStatus::parse(&canonical).expect("written record must parse");
        assert_eq!(reread.format(), canonical, "canonical record must be stable");
    }
});
