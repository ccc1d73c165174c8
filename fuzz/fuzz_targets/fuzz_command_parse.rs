//! Fuzz target: `parse_command`
//!
//! Drives arbitrary operator arguments through the command parser.  It
//! must never panic and must only ever accept airlocks that exist.
//!
//! cargo fuzz run fuzz_command_parse

#![no_main]

use airlock::app::commands::parse_command;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    if let Ok((_, number)) = parse_command(&text, |n| n % 2 == 0) {
        assert_eq!(number % 2, 0, "parser accepted an unknown airlock");
    }
});
