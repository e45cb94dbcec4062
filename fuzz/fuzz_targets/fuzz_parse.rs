#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let Ok(manifest) = customize_validity::parse(&s) else {
        return;
    };
    let _ = customize_validity::check(&manifest);
});
