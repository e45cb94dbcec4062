use customize_validity::primitives::*;
use serde_json::json;

// ─── Scalars ─────────────────────────────────────────────────────────────────

#[test]
fn stringify_scalars() {
    assert_eq!(stringify(&json!("abc")).as_deref(), Some("abc"));
    assert_eq!(stringify(&json!(true)).as_deref(), Some("1"));
    assert_eq!(stringify(&json!(false)).as_deref(), Some(""));
    assert_eq!(stringify(&json!(42)).as_deref(), Some("42"));
    assert_eq!(stringify(&json!(-7)).as_deref(), Some("-7"));
    assert_eq!(stringify(&json!(2.0)).as_deref(), Some("2"));
    assert_eq!(stringify(&json!(2.5)).as_deref(), Some("2.5"));
}

#[test]
fn stringify_rejects_non_scalars() {
    assert_eq!(stringify(&json!(null)), None);
    assert_eq!(stringify(&json!([1])), None);
    assert_eq!(stringify(&json!({"a": 1})), None);
}

#[test]
fn parse_number_follows_html_float_grammar() {
    assert_eq!(parse_number("1"), Some(1.0));
    assert_eq!(parse_number("-1.5"), Some(-1.5));
    assert_eq!(parse_number(".5"), Some(0.5));
    assert_eq!(parse_number("1e3"), Some(1000.0));
    assert_eq!(parse_number("2E-1"), Some(0.2));

    for bad in ["", "1.", "+1", " 1", "1 ", "abc", "inf", "NaN", "0x10", "1,5", "--1"] {
        assert_eq!(parse_number(bad), None, "{:?} should not parse", bad);
    }
}

#[test]
fn attr_number_tolerates_padding_and_json_numbers() {
    assert_eq!(attr_number(&json!(" 0.5 ")), Some(0.5));
    assert_eq!(attr_number(&json!(4)), Some(4.0));
    assert_eq!(attr_number(&json!("any")), None);
    assert_eq!(attr_number(&json!(true)), None);
}

#[test]
fn truthiness() {
    for v in [json!(true), json!("required"), json!("1"), json!(1), json!([0])] {
        assert!(is_truthy(&v), "{} should be truthy", v);
    }
    for v in [json!(false), json!(""), json!("0"), json!(0), json!(null), json!({})] {
        assert!(!is_truthy(&v), "{} should be falsy", v);
    }
}

#[test]
fn utf16_length() {
    assert_eq!(utf16_len(""), 0);
    assert_eq!(utf16_len("abc"), 3);
    assert_eq!(utf16_len("é"), 1);
    assert_eq!(utf16_len("😀"), 2);
}

#[test]
fn step_epsilon_absorbs_float_residue() {
    assert!(!step_mismatch(2.5, 0.5));
    assert!(step_mismatch(2.3, 0.5));
    assert!(!step_mismatch(1.0 + STEP_EPSILON / 2.0, 1.0));
    assert!(step_mismatch(1.0 + STEP_EPSILON * 10.0, 1.0));
}

// ─── Text-like kinds ─────────────────────────────────────────────────────────

#[test]
fn email_syntax() {
    assert!(is_valid_email("first.last+tag@sub.example.co"));
    assert!(!is_valid_email("@example.com"));
    assert!(!is_valid_email("user@-example.com"));
    assert!(!is_valid_email("user@example..com"));
    assert!(!is_valid_email("us er@example.com"));
}

#[test]
fn url_syntax() {
    assert!(is_valid_url("http://localhost:8080/"));
    assert!(is_valid_url("ftp://example.com/file.txt"));
    assert!(!is_valid_url("/relative/path"));
    assert!(!is_valid_url("not a url"));
}

#[test]
fn phone_requires_an_ascii_digit() {
    assert!(looks_like_phone("+1 (555) 010-9999"));
    assert!(looks_like_phone("x1"));
    assert!(!looks_like_phone("---"));
    // Arabic-Indic digit four is not an ASCII digit
    assert!(!looks_like_phone("\u{0664}"));
}

#[test]
fn color_accepts_decimal_digits_only() {
    assert!(is_valid_color("#000000"));
    assert!(!is_valid_color("#ffffff"));
    assert!(!is_valid_color("#1234567"));
    assert!(!is_valid_color("#\u{0661}23456"));
}

#[test]
fn pattern_is_anchored_and_reports_compile_errors() {
    assert_eq!(pattern_matches("[0-9]{3}", "123").ok(), Some(true));
    assert_eq!(pattern_matches("[0-9]{3}", "x123").ok(), Some(false));
    assert_eq!(pattern_matches("a|b", "ab").ok(), Some(false));
    assert!(pattern_matches("[", "x").is_err());
    assert!(pattern_matches("a)|(?:b", "zzz").is_err());
}

// ─── Dates and times ─────────────────────────────────────────────────────────

#[test]
fn date_timestamps_are_midnight_utc() {
    assert_eq!(date_timestamp("1970-01-01"), Some(0));
    assert_eq!(date_timestamp("1970-01-02"), Some(86_400));
    assert_eq!(date_timestamp("2021-02-28"), Some(1_614_470_400));
    assert_eq!(date_timestamp("2021-02-29"), None);
    assert_eq!(date_timestamp("2021-2-28"), None);
}

#[test]
fn month_timestamp_is_first_of_month() {
    assert_eq!(month_timestamp("1970-01"), Some(0));
    assert_eq!(month_timestamp("1970-02"), Some(31 * 86_400));
    assert_eq!(month_timestamp("1970-00"), None);
}

#[test]
fn match_month_defaults_day_to_one() {
    let fields = match_month("2024-02").unwrap();
    assert_eq!(fields.day, 1);
    assert!(fields.is_valid());
}

#[test]
fn calendar_validity() {
    assert!(DateFields { year: 2000, month: 2, day: 29 }.is_valid());
    assert!(!DateFields { year: 1900, month: 2, day: 29 }.is_valid());
    assert!(!DateFields { year: 2021, month: 4, day: 31 }.is_valid());
    assert!(!DateFields { year: 0, month: 1, day: 1 }.is_valid());
}

#[test]
fn time_fields_and_seconds() {
    assert_eq!(
        match_time("07:05:09.1"),
        Some(TimeFields { hours: 7, minutes: 5, seconds: Some(9) })
    );
    assert_eq!(match_time("07:05:09.1234"), None);
    assert_eq!(time_seconds("00:00:01"), Some(1));
    assert_eq!(time_seconds("23:59:59.999"), Some(86_399));
    assert_eq!(time_seconds("23:60"), None);
}

#[test]
fn datetime_local_timestamp_combines_parts() {
    assert_eq!(datetime_local_timestamp("1970-01-02T00:00"), Some(86_400));
    assert_eq!(datetime_local_timestamp("1970-01-01 01:00:30"), Some(3_630));
    assert_eq!(datetime_local_timestamp("1970-01-01X01:00"), None);
}

#[test]
fn week_range() {
    assert!(is_valid_week("2024-W01"));
    assert!(is_valid_week("2024-W52"));
    assert!(!is_valid_week("2024-W53"));
    assert!(!is_valid_week("2024W01"));
}
