#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let manifest = match customize_validity::parse(&s) {
        Ok(m) => m,
        Err(_) => return,
    };

    let yaml = match customize_validity::serialize(&manifest) {
        Ok(y) => y,
        Err(_) => return,
    };

    // If we can serialize a parsed manifest, we must be able to parse it back.
    if let Err(e) = customize_validity::parse(&yaml) {
        panic!(
            "Roundtrip failure: serialize produced YAML that cannot be re-parsed: {e}\n\
             Input (lossy): {:?}\n\
             Serialized YAML:\n{}",
            s.get(..200).unwrap_or(&s),
            yaml.get(..500).unwrap_or(&yaml),
        );
    }
});
