//! Human-readable messages attached to validity failures.
//!
//! Every [`FailureKind`] has one English default. A catalog only stores
//! overrides, so a partial translation falls back to English per entry.
//! Type mismatches may additionally be worded per input kind ("Not a URL.").

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::enums::{FailureKind, InputKind};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCatalog {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub messages: BTreeMap<FailureKind, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub type_mismatch: BTreeMap<InputKind, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        MessageCatalog::default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.type_mismatch.is_empty()
    }

    pub fn with_message(mut self, kind: FailureKind, message: impl Into<String>) -> Self {
        self.messages.insert(kind, message.into());
        self
    }

    pub fn with_type_mismatch(mut self, kind: InputKind, message: impl Into<String>) -> Self {
        self.type_mismatch.insert(kind, message.into());
        self
    }

    /// Message for `kind`.
    pub fn message(&self, kind: FailureKind) -> &str {
        self.messages
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| default_message(kind))
    }

    /// Message for a type mismatch raised by an `input` check.
    ///
    /// Resolution order: catalog override for the input kind, catalog
    /// override for `typeMismatch`, English default for the input kind,
    /// English generic default.
    pub fn type_mismatch(&self, input: &InputKind) -> &str {
        if let Some(m) = self.type_mismatch.get(input) {
            return m;
        }
        if let Some(m) = self.messages.get(&FailureKind::TypeMismatch) {
            return m;
        }
        default_type_mismatch(input).unwrap_or_else(|| default_message(FailureKind::TypeMismatch))
    }
}

pub fn default_message(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::ValueMissing => "Missing value.",
        FailureKind::TypeMismatch => "Invalid value.",
        FailureKind::RangeUnderflow => "Number too small.",
        FailureKind::RangeOverflow => "Number too large.",
        FailureKind::StepMismatch => "Step mismatch.",
        FailureKind::TooLong => "Value too long.",
        FailureKind::TooShort => "Value too short.",
        FailureKind::PatternMismatch => "Pattern mismatch.",
    }
}

fn default_type_mismatch(input: &InputKind) -> Option<&'static str> {
    match input {
        InputKind::Number => Some("Not a number."),
        InputKind::Email => Some("Not an email."),
        InputKind::Url => Some("Not a URL."),
        InputKind::Tel => Some("Does not look like a phone number."),
        InputKind::Date => Some("Not a valid date."),
        InputKind::Month => Some("Not a valid month."),
        InputKind::Week => Some("Not a valid week."),
        InputKind::Time => Some("Not a valid time."),
        InputKind::DatetimeLocal => Some("Not a valid date and time."),
        InputKind::Color => Some("Not a color."),
        InputKind::Text | InputKind::Other(_) => None,
    }
}
