//! Parsing and syntax checks behind each input kind.
//!
//! These mirror the value grammars HTML5 defines for `<input>` types, using
//! ASCII-only character classes so a Unicode digit never passes for `0`–`9`.

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Residue below which a candidate counts as an exact multiple of `step`.
pub const STEP_EPSILON: f64 = 0.0000001;

const DATE_PATTERN: &str = r"(?P<year>[0-9]{4})-(?P<month>[0-9]{2})-(?P<day>[0-9]{2})";
const TIME_PATTERN: &str =
    r"(?P<hours>[0-9]{2}):(?P<minutes>[0-9]{2})(?::(?P<seconds>[0-9]{2})(?:\.[0-9]{1,3})?)?";

// ─── Cached regexes ─────────────────────────────────────────────────────────

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap()
});

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{}$", DATE_PATTERN)).unwrap());

static MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<year>[0-9]{4})-(?P<month>[0-9]{2})$").unwrap());

static WEEK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-W(?P<week>[0-9]{2})$").unwrap());

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{}$", TIME_PATTERN)).unwrap());

static DATETIME_LOCAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{}[T ]{}$", DATE_PATTERN, TIME_PATTERN)).unwrap());

static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#[0-9]{6}$").unwrap());

// HTML5 "valid e-mail address" production.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

// ─── Scalars ────────────────────────────────────────────────────────────────

/// String form of a scalar value, or `None` for null, arrays and objects.
///
/// Booleans stringify as `"1"` and `""`; floats without a fractional part
/// lose their trailing `.0`.
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(format_float)
            }
        }
        Value::String(s) => Some(s.clone()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

/// Parses an HTML5 "valid floating-point number".
///
/// No surrounding whitespace, no leading `+`, no trailing `.`; `inf` and
/// `NaN` are rejected.
pub fn parse_number(s: &str) -> Option<f64> {
    if !NUMBER_RE.is_match(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Numeric value of a submitted scalar, as a `number` input would see it.
pub fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Numeric value of a declared attribute (`"1"`, `1`, `" 0.5 "`).
pub fn attr_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_number(s.trim()),
        _ => None,
    }
}

/// Loose truthiness of a declared attribute value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Length as the browser counts it, in UTF-16 code units.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Whether `candidate` leaves a residue above [`STEP_EPSILON`] when divided by `step`.
pub fn step_mismatch(candidate: f64, step: f64) -> bool {
    candidate % step > STEP_EPSILON
}

// ─── Text-like kinds ────────────────────────────────────────────────────────

pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// Absolute URL with a scheme; relative references fail.
pub fn is_valid_url(s: &str) -> bool {
    url::Url::parse(s).is_ok()
}

/// Any ASCII digit anywhere.
pub fn looks_like_phone(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
}

/// `#` followed by exactly six characters `0`–`9`.
pub fn is_valid_color(s: &str) -> bool {
    COLOR_RE.is_match(s)
}

/// Full-string match of `pattern`, compiled as `^(?:pattern)$`.
///
/// The bare pattern must compile on its own, so a pattern that closes the
/// wrapping group (`a)|(?:b`) is rejected rather than unanchored.
pub fn pattern_matches(pattern: &str, s: &str) -> Result<bool, regex::Error> {
    Regex::new(pattern)?;
    let re = Regex::new(&format!("^(?:{})$", pattern))?;
    Ok(re.is_match(s))
}

// ─── Dates and times ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateFields {
    /// Proleptic Gregorian validity; year zero does not exist.
    pub fn is_valid(&self) -> bool {
        self.year >= 1 && NaiveDate::from_ymd_opt(self.year, self.month, self.day).is_some()
    }

    fn to_naive(self) -> Option<NaiveDate> {
        if self.year < 1 {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeFields {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: Option<u32>,
}

impl TimeFields {
    pub fn is_valid(&self) -> bool {
        self.hours <= 23 && self.minutes <= 59 && self.seconds.is_none_or(|s| s <= 59)
    }

    fn seconds_since_midnight(&self) -> i64 {
        i64::from(self.hours) * 3600
            + i64::from(self.minutes) * 60
            + i64::from(self.seconds.unwrap_or(0))
    }
}

fn date_fields(caps: &regex::Captures<'_>) -> Option<DateFields> {
    Some(DateFields {
        year: caps.name("year")?.as_str().parse().ok()?,
        month: caps.name("month")?.as_str().parse().ok()?,
        day: caps.name("day")?.as_str().parse().ok()?,
    })
}

fn time_fields(caps: &regex::Captures<'_>) -> Option<TimeFields> {
    Some(TimeFields {
        hours: caps.name("hours")?.as_str().parse().ok()?,
        minutes: caps.name("minutes")?.as_str().parse().ok()?,
        seconds: match caps.name("seconds") {
            Some(m) => Some(m.as_str().parse().ok()?),
            None => None,
        },
    })
}

/// `YYYY-MM-DD`, syntax only.
pub fn match_date(s: &str) -> Option<DateFields> {
    DATE_RE.captures(s).as_ref().and_then(date_fields)
}

/// `YYYY-MM`, syntax only; the day is fixed to 1.
pub fn match_month(s: &str) -> Option<DateFields> {
    let caps = MONTH_RE.captures(s)?;
    Some(DateFields {
        year: caps.name("year")?.as_str().parse().ok()?,
        month: caps.name("month")?.as_str().parse().ok()?,
        day: 1,
    })
}

/// `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`, syntax only.
pub fn match_time(s: &str) -> Option<TimeFields> {
    TIME_RE.captures(s).as_ref().and_then(time_fields)
}

/// Date and time joined by `T` or a space, syntax only.
pub fn match_datetime_local(s: &str) -> Option<(DateFields, TimeFields)> {
    let caps = DATETIME_LOCAL_RE.captures(s)?;
    Some((date_fields(&caps)?, time_fields(&caps)?))
}

/// Unix timestamp of midnight UTC for a valid `date` value.
pub fn date_timestamp(s: &str) -> Option<i64> {
    midnight_utc(match_date(s)?)
}

/// Unix timestamp of the first of the month for a valid `month` value.
pub fn month_timestamp(s: &str) -> Option<i64> {
    midnight_utc(match_month(s)?)
}

/// Seconds since midnight for a valid `time` value, as if on 1970-01-01.
///
/// Fractional seconds are truncated.
pub fn time_seconds(s: &str) -> Option<i64> {
    let time = match_time(s)?;
    time.is_valid().then(|| time.seconds_since_midnight())
}

/// Unix timestamp (UTC) for a valid `datetime-local` value.
pub fn datetime_local_timestamp(s: &str) -> Option<i64> {
    let (date, time) = match_datetime_local(s)?;
    if !time.is_valid() {
        return None;
    }
    Some(midnight_utc(date)? + time.seconds_since_midnight())
}

/// `YYYY-Wnn` with `nn` in 1..=52.
pub fn is_valid_week(s: &str) -> bool {
    WEEK_RE
        .captures(s)
        .and_then(|caps| caps.name("week")?.as_str().parse::<u32>().ok())
        .is_some_and(|week| (1..=52).contains(&week))
}

fn midnight_utc(date: DateFields) -> Option<i64> {
    let dt = date.to_naive()?.and_hms_opt(0, 0, 0)?;
    Some(dt.and_utc().timestamp())
}
