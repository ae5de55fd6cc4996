#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Cleaning must never panic and must be idempotent
        let once = nbpost::doctor(content);
        assert_eq!(nbpost::doctor(&once), once);
    }
});
