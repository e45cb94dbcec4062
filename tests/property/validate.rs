use customize_validity::*;
use proptest::prelude::*;
use serde_json::{Value, json};

fn arb_kind() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("text"),
        Just("number"),
        Just("email"),
        Just("url"),
        Just("tel"),
        Just("date"),
        Just("month"),
        Just("week"),
        Just("time"),
        Just("datetime-local"),
        Just("color"),
        Just("checkbox"),
    ]
}

/// Controls with an arbitrary kind and a random subset of attributes.
fn arb_control() -> impl Strategy<Value = Control> {
    (
        arb_kind(),
        proptest::option::of(-100i64..100),
        proptest::option::of(-100i64..100),
        proptest::option::of(1u32..10),
        proptest::option::of(0usize..20),
        proptest::option::of(0usize..20),
        proptest::option::of(Just("[a-z0-9]*")),
    )
        .prop_map(|(kind, min, max, step, maxlength, minlength, pattern)| {
            let mut control = Control::new("c", kind);
            if let Some(v) = min {
                control = control.with_attr("min", v.to_string());
            }
            if let Some(v) = max {
                control = control.with_attr("max", v.to_string());
            }
            if let Some(v) = step {
                control = control.with_attr("step", v.to_string());
            }
            if let Some(v) = maxlength {
                control = control.with_attr("maxlength", v.to_string());
            }
            if let Some(v) = minlength {
                control = control.with_attr("minlength", v.to_string());
            }
            if let Some(p) = pattern {
                control = control.with_attr("pattern", p);
            }
            control
        })
}

fn arb_non_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        prop::collection::vec(any::<i32>(), 0..4).prop_map(|v| json!(v)),
        "[a-z]{1,5}".prop_map(|k| json!({ k: 1 })),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn non_scalar_values_are_never_validated(
        value in arb_non_scalar(),
        control in arb_control(),
        required in any::<bool>(),
    ) {
        let control = control.with_attr("required", required);
        prop_assert!(validate(&value, [&control]).is_valid());
    }

    #[test]
    fn empty_value_is_missing_only_when_required(
        controls in prop::collection::vec(arb_control(), 1..4),
        required in any::<bool>(),
    ) {
        let mut controls = controls;
        if let Some(last) = controls.last_mut() {
            last.input_attrs.insert("required", required);
        }
        let result = validate(&json!(""), &controls);
        if required {
            prop_assert_eq!(result.codes(), vec![FailureKind::ValueMissing]);
        } else {
            prop_assert!(result.is_valid());
        }
    }

    #[test]
    fn half_steps_in_range_are_valid(k in 2u32..=8) {
        let control = Control::new("n", "number")
            .with_attr("min", "1")
            .with_attr("max", "4")
            .with_attr("step", "0.5");
        let value = format!("{}", f64::from(k) * 0.5);
        let result = validate(&json!(value), [&control]);
        prop_assert!(result.is_valid(), "{} -> {:?}", value, result.codes());
    }

    #[test]
    fn numbers_outside_range_report_range_failure(n in -1000i64..1000) {
        let control = Control::new("n", "number")
            .with_attr("min", "1")
            .with_attr("max", "4");
        let codes = validate(&json!(n.to_string()), [&control]).codes();
        let expected = if n < 1 {
            vec![FailureKind::RangeUnderflow]
        } else if n > 4 {
            vec![FailureKind::RangeOverflow]
        } else {
            vec![]
        };
        prop_assert_eq!(codes, expected);
    }

    #[test]
    fn each_failure_kind_at_most_once_for_single_control(
        control in arb_control(),
        value in "[ -~]{0,24}",
    ) {
        let codes = validate(&json!(value), [&control]).codes();
        for kind in FailureKind::ALL {
            prop_assert!(codes.iter().filter(|c| **c == kind).count() <= 1);
        }
    }

    #[test]
    fn validation_is_deterministic(
        controls in prop::collection::vec(arb_control(), 0..3),
        value in "[ -~]{0,24}",
    ) {
        let first = validate(&json!(value), &controls);
        let second = validate(&json!(value), &controls);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn digit_colors_pass_and_hex_letters_fail(digits in "[0-9]{6}", letter in "[A-Fa-f]", at in 0usize..6) {
        let control = Control::new("c", "color");
        let ok = format!("#{}", digits);
        prop_assert!(validate(&json!(ok), [&control]).is_valid());

        let mut bad = digits.clone();
        bad.replace_range(at..at + 1, &letter);
        let bad = format!("#{}", bad);
        prop_assert_eq!(
            validate(&json!(bad), [&control]).codes(),
            vec![FailureKind::TypeMismatch]
        );
    }

    #[test]
    fn three_digit_pattern(value in "[0-9a-z]{0,5}") {
        let control = Control::new("p", "text").with_attr("pattern", "[0-9]{3}");
        let matches = value.len() == 3 && value.bytes().all(|b| b.is_ascii_digit());
        let codes = validate(&json!(value), [&control]).codes();
        if value.is_empty() || matches {
            prop_assert!(codes.is_empty());
        } else {
            prop_assert_eq!(codes, vec![FailureKind::PatternMismatch]);
        }
    }
}
