//! Closed enumerations shared by the validator, the hooks and the live reporter.
//!
//! [`FailureKind`] is the wire vocabulary of the platform's error-reporting UI
//! and mirrors the HTML5 `ValidityState` property names exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single validity failure, named after its `ValidityState` flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    ValueMissing,
    TypeMismatch,
    RangeUnderflow,
    RangeOverflow,
    StepMismatch,
    TooLong,
    TooShort,
    PatternMismatch,
}

impl FailureKind {
    pub const ALL: [FailureKind; 8] = [
        FailureKind::ValueMissing,
        FailureKind::TypeMismatch,
        FailureKind::RangeUnderflow,
        FailureKind::RangeOverflow,
        FailureKind::StepMismatch,
        FailureKind::TooLong,
        FailureKind::TooShort,
        FailureKind::PatternMismatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ValueMissing => "valueMissing",
            FailureKind::TypeMismatch => "typeMismatch",
            FailureKind::RangeUnderflow => "rangeUnderflow",
            FailureKind::RangeOverflow => "rangeOverflow",
            FailureKind::StepMismatch => "stepMismatch",
            FailureKind::TooLong => "tooLong",
            FailureKind::TooShort => "tooShort",
            FailureKind::PatternMismatch => "patternMismatch",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `type` a control declares.
///
/// Kinds outside the HTML5 text-like set (checkbox, select, custom control
/// types) are kept verbatim in [`InputKind::Other`] and carry no type checks.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InputKind {
    #[default]
    Text,
    Number,
    Email,
    Url,
    Tel,
    Date,
    Month,
    Week,
    Time,
    DatetimeLocal,
    Color,
    Other(String),
}

impl InputKind {
    pub fn as_str(&self) -> &str {
        match self {
            InputKind::Text => "text",
            InputKind::Number => "number",
            InputKind::Email => "email",
            InputKind::Url => "url",
            InputKind::Tel => "tel",
            InputKind::Date => "date",
            InputKind::Month => "month",
            InputKind::Week => "week",
            InputKind::Time => "time",
            InputKind::DatetimeLocal => "datetime-local",
            InputKind::Color => "color",
            InputKind::Other(name) => name,
        }
    }
}

impl From<&str> for InputKind {
    fn from(s: &str) -> Self {
        match s {
            "text" => InputKind::Text,
            "number" => InputKind::Number,
            "email" => InputKind::Email,
            "url" => InputKind::Url,
            "tel" => InputKind::Tel,
            "date" => InputKind::Date,
            "month" => InputKind::Month,
            "week" => InputKind::Week,
            "time" => InputKind::Time,
            "datetime-local" => InputKind::DatetimeLocal,
            "color" => InputKind::Color,
            other => InputKind::Other(other.to_string()),
        }
    }
}

impl From<String> for InputKind {
    fn from(s: String) -> Self {
        InputKind::from(s.as_str())
    }
}

impl From<InputKind> for String {
    fn from(kind: InputKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How attribute bags from several controls bound to one setting combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Later controls overwrite same-named attributes of earlier ones.
    #[default]
    LastWriteWins,
    /// `required` is OR-ed; the tightest numeric and length bounds win.
    MostRestrictive,
}

/// Lifecycle of a control inside the live reporter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlState {
    Unbound,
    Watching,
}
