use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

use crate::enums::*;
use crate::messages::MessageCatalog;
use crate::primitives;

// ─── Manifest ────────────────────────────────────────────────────────────────

/// The declarations a settings panel is built from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub settings: Vec<Setting>,
    #[serde(default)]
    pub controls: Vec<Control>,
    #[serde(default)]
    pub options: ValidatorOptions,
    #[serde(default)]
    pub timeouts: Timeouts,
    #[serde(default, skip_serializing_if = "MessageCatalog::is_empty")]
    pub messages: MessageCatalog,
}

// ─── Setting ─────────────────────────────────────────────────────────────────

/// A persisted value that controls edit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub id: String,
    #[serde(default, alias = "default", skip_serializing_if = "Value::is_null")]
    pub value: Value,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub setting_type: Option<String>,
}

impl Setting {
    pub fn new(id: impl Into<String>) -> Self {
        Setting {
            id: id.into(),
            value: Value::Null,
            setting_type: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }
}

// ─── Control ─────────────────────────────────────────────────────────────────

/// A widget bound to one or more settings.
///
/// A control declared without `settings` edits the setting sharing its id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: InputKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_settings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub settings: Vec<String>,
    #[serde(default, skip_serializing_if = "InputAttrs::is_empty")]
    pub input_attrs: InputAttrs,
}

impl Control {
    pub fn new(id: impl Into<String>, kind: impl Into<InputKind>) -> Self {
        Control {
            id: id.into(),
            kind: kind.into(),
            label: None,
            description: None,
            section: None,
            settings: Vec::new(),
            input_attrs: InputAttrs::new(),
        }
    }

    pub fn with_settings<I, S>(mut self, settings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings = settings.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.input_attrs.insert(name, value);
        self
    }

    /// Ids of the settings this control edits.
    pub fn setting_ids(&self) -> Vec<&str> {
        if self.settings.is_empty() {
            vec![self.id.as_str()]
        } else {
            self.settings.iter().map(String::as_str).collect()
        }
    }

    /// The setting the control's primary input writes to.
    pub fn primary_setting(&self) -> &str {
        self.settings.first().map(String::as_str).unwrap_or(&self.id)
    }

    pub fn edits(&self, setting_id: &str) -> bool {
        self.setting_ids().contains(&setting_id)
    }
}

/// Accepts a single id, a list of ids, or a keyed map (`{default: id}`).
fn deserialize_settings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        One(String),
        Many(Vec<String>),
        Keyed(Map<String, Value>),
    }

    match Repr::deserialize(d)? {
        Repr::One(id) => Ok(vec![id]),
        Repr::Many(ids) => Ok(ids),
        Repr::Keyed(map) => map
            .into_iter()
            .map(|(key, v)| match v {
                Value::String(id) => Ok(id),
                other => Err(serde::de::Error::custom(format!(
                    "setting reference '{}' must be a string, got {}",
                    key, other
                ))),
            })
            .collect(),
    }
}

// ─── InputAttrs ──────────────────────────────────────────────────────────────

/// Attribute bag copied onto a control's input element.
///
/// Values keep the loose typing of the declaration (`min: "1"` and `min: 1`
/// are equivalent); the typed accessors interpret them the way the input
/// element would.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputAttrs(Map<String, Value>);

impl InputAttrs {
    pub fn new() -> Self {
        InputAttrs(Map::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// `required` counts when its value is truthy (`true`, `"required"`, `1`).
    pub fn required(&self) -> bool {
        self.get("required").is_some_and(primitives::is_truthy)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(primitives::attr_number)
    }

    pub fn min(&self) -> Option<f64> {
        self.number("min")
    }

    pub fn max(&self) -> Option<f64> {
        self.number("max")
    }

    /// A positive step; `"any"`, zero and negative steps disable step checks.
    pub fn step(&self) -> Option<f64> {
        self.number("step").filter(|s| *s > 0.0)
    }

    pub fn max_length(&self) -> Option<usize> {
        self.length("maxlength")
    }

    pub fn min_length(&self) -> Option<usize> {
        self.length("minlength")
    }

    pub fn pattern(&self) -> Option<&str> {
        self.get("pattern")
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
    }

    fn length(&self, name: &str) -> Option<usize> {
        self.number(name)
            .filter(|n| *n >= 0.0)
            .map(|n| n.trunc() as usize)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for InputAttrs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        InputAttrs(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ─── Validity ────────────────────────────────────────────────────────────────

/// One entry of a [`Validity`] result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityError {
    pub code: FailureKind,
    pub message: String,
}

/// Ordered validity failures for one value. Empty means valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Validity {
    errors: Vec<ValidityError>,
}

impl Validity {
    pub fn new() -> Self {
        Validity::default()
    }

    pub fn add(&mut self, code: FailureKind, message: impl Into<String>) {
        self.errors.push(ValidityError {
            code,
            message: message.into(),
        });
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has(&self, code: FailureKind) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    pub fn codes(&self) -> Vec<FailureKind> {
        self.errors.iter().map(|e| e.code).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidityError> {
        self.errors.iter()
    }

    /// The first message recorded for `code`.
    pub fn message(&self, code: FailureKind) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.message.as_str())
    }
}

impl IntoIterator for Validity {
    type Item = ValidityError;
    type IntoIter = std::vec::IntoIter<ValidityError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

// ─── Options ─────────────────────────────────────────────────────────────────

/// Knobs that trade parity with the reference behavior for stricter checks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorOptions {
    #[serde(default)]
    pub merge: MergeStrategy,
    /// Reproduce the reference time check, which flags well-formed times and
    /// lets semantically invalid ones through.
    #[serde(default)]
    pub invert_time_check: bool,
}

pub const DEFAULT_WINDOW_REFRESH_MS: u64 = 500;

fn default_window_refresh() -> u64 {
    DEFAULT_WINDOW_REFRESH_MS
}

/// Host timeouts, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeouts {
    #[serde(default = "default_window_refresh")]
    pub window_refresh: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Timeouts {
            window_refresh: DEFAULT_WINDOW_REFRESH_MS,
        }
    }
}

impl Timeouts {
    pub fn window_refresh(&self) -> Duration {
        Duration::from_millis(self.window_refresh)
    }
}
