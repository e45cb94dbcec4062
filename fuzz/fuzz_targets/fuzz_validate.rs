#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use customize_validity::{Control, FailureKind, validate};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

const KINDS: &[&str] = &[
    "text",
    "number",
    "email",
    "url",
    "tel",
    "date",
    "month",
    "week",
    "time",
    "datetime-local",
    "color",
];

const ATTRS: &[&str] = &["required", "min", "max", "step", "maxlength", "minlength", "pattern"];

/// Generate a control with an arbitrary kind and attribute bag.
fn arbitrary_control(u: &mut Unstructured<'_>) -> arbitrary::Result<Control> {
    let kind = *u.choose(KINDS)?;
    let mut control = Control::new("c", kind);
    for name in ATTRS {
        if bool::arbitrary(u)? {
            control = control.with_attr(*name, arbitrary_value(u)?);
        }
    }
    Ok(control)
}

/// Generate a simple arbitrary JSON value from fuzzer bytes.
fn arbitrary_value(u: &mut Unstructured<'_>) -> arbitrary::Result<Value> {
    match u.int_in_range(0..=3)? {
        0 => Ok(Value::Null),
        1 => Ok(Value::Bool(bool::arbitrary(u)?)),
        2 => {
            let n = f64::arbitrary(u)?;
            Ok(serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null))
        }
        _ => Ok(Value::String(String::arbitrary(u)?)),
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);

    let Ok(count) = u.int_in_range(0..=3) else {
        return;
    };
    let mut controls = Vec::with_capacity(count);
    for _ in 0..count {
        match arbitrary_control(&mut u) {
            Ok(c) => controls.push(c),
            Err(_) => return,
        }
    }
    let value = match arbitrary_value(&mut u) {
        Ok(v) => v,
        Err(_) => return,
    };

    let validity = validate(&value, &controls);

    // Valid results are empty; an empty value reports nothing but valueMissing.
    assert_eq!(validity.is_valid(), validity.is_empty());
    if value.as_str() == Some("") {
        assert!(validity.codes().iter().all(|c| *c == FailureKind::ValueMissing));
    }
});
