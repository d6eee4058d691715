#![no_main]

use libfuzzer_sys::fuzz_target;
use liftlog_types::Kilograms;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(weight) = text.parse::<Kilograms>() {
        // Display output must parse back to the same value.
        let shown = weight.to_string();
        assert_eq!(shown.parse::<Kilograms>(), Ok(weight), "{text:?} -> {shown:?}");
        let _ = weight.times(i64::MAX);
    }
});
