//! Server-side constraint validation.
//!
//! Re-implements the browser's constraint-validation algorithm for the
//! HTML5 input types a control can declare. Checks run in a fixed order and
//! each appends at most one failure; an empty value short-circuits everything
//! after the `required` check.

use serde_json::Value;
use tracing::{debug, warn};

use crate::customizer::Customizer;
use crate::enums::*;
use crate::messages::MessageCatalog;
use crate::primitives::{self, TimeFields};
use crate::resolve::{Constraints, resolve_constraints};
use crate::types::*;

/// Validates `value` against every control bound to its setting, with
/// default options and English messages.
pub fn validate<'a, I>(value: &Value, bound_controls: I) -> Validity
where
    I: IntoIterator<Item = &'a Control>,
{
    let options = ValidatorOptions::default();
    let constraints = resolve_constraints(bound_controls, options.merge);
    validate_constraints(
        Validity::new(),
        value,
        &constraints,
        &options,
        &MessageCatalog::default(),
    )
}

/// The `customize_validate_{id}` filter body.
///
/// Resolves the constraints of `setting` from the controls registered with
/// `customizer` and appends failures to `validity`.
pub fn validate_input_constraints(
    validity: Validity,
    value: &Value,
    setting: &Setting,
    customizer: &Customizer,
) -> Validity {
    let options = customizer.options();
    let constraints =
        resolve_constraints(customizer.bound_controls(&setting.id), options.merge);
    validate_constraints(validity, value, &constraints, options, customizer.messages())
}

/// Appends the failures of `value` under `constraints` to `validity`.
///
/// Non-scalar values are not this validator's concern and leave `validity`
/// untouched.
pub fn validate_constraints(
    mut validity: Validity,
    value: &Value,
    constraints: &Constraints,
    options: &ValidatorOptions,
    messages: &MessageCatalog,
) -> Validity {
    let Some(string_value) = primitives::stringify(value) else {
        return validity;
    };
    let s = string_value.as_str();
    let attrs = &constraints.attrs;
    let mut report = Report {
        validity: &mut validity,
        messages,
    };

    if s.is_empty() {
        if attrs.required() {
            report.add(FailureKind::ValueMissing);
        }
        return validity;
    }

    let mut candidate: Option<f64> = None;

    if constraints.has_kind(&InputKind::Number) {
        match primitives::number_value(value) {
            None => report.mismatch(&InputKind::Number),
            Some(n) if attrs.min().is_some_and(|min| n < min) => {
                report.add(FailureKind::RangeUnderflow)
            }
            Some(n) if attrs.max().is_some_and(|max| n > max) => {
                report.add(FailureKind::RangeOverflow)
            }
            Some(n) => candidate = Some(n),
        }
    }

    if constraints.has_kind(&InputKind::Email) && !primitives::is_valid_email(s) {
        report.mismatch(&InputKind::Email);
    }

    if constraints.has_kind(&InputKind::Url) && !primitives::is_valid_url(s) {
        report.mismatch(&InputKind::Url);
    }

    if constraints.has_kind(&InputKind::Tel) && !primitives::looks_like_phone(s) {
        report.mismatch(&InputKind::Tel);
    }

    if constraints.has_kind(&InputKind::Date) {
        match primitives::date_timestamp(s) {
            Some(ts) => candidate = Some(ts as f64),
            None => report.mismatch(&InputKind::Date),
        }
    }

    if constraints.has_kind(&InputKind::Month) {
        match primitives::month_timestamp(s) {
            Some(ts) => candidate = Some(ts as f64),
            None => report.mismatch(&InputKind::Month),
        }
    }

    if constraints.has_kind(&InputKind::Week) && !primitives::is_valid_week(s) {
        report.mismatch(&InputKind::Week);
    }

    if constraints.has_kind(&InputKind::Time) {
        if options.invert_time_check {
            check_time_inverted(primitives::match_time(s), &mut report);
        } else {
            match primitives::time_seconds(s) {
                Some(secs) => candidate = Some(secs as f64),
                None => report.mismatch(&InputKind::Time),
            }
        }
    }

    if constraints.has_kind(&InputKind::DatetimeLocal) {
        match primitives::datetime_local_timestamp(s) {
            Some(ts) => candidate = Some(ts as f64),
            None => report.mismatch(&InputKind::DatetimeLocal),
        }
    }

    if let (Some(candidate), Some(step)) = (candidate, attrs.step())
        && primitives::step_mismatch(candidate, step)
    {
        report.add(FailureKind::StepMismatch);
    }

    if constraints.has_kind(&InputKind::Color) && !primitives::is_valid_color(s) {
        report.mismatch(&InputKind::Color);
    }

    let length = primitives::utf16_len(s);
    if attrs.max_length().is_some_and(|max| length > max) {
        report.add(FailureKind::TooLong);
    }
    if attrs.min_length().is_some_and(|min| length < min) {
        report.add(FailureKind::TooShort);
    }

    if let Some(pattern) = attrs.pattern() {
        match primitives::pattern_matches(pattern, s) {
            Ok(true) => {}
            Ok(false) => report.add(FailureKind::PatternMismatch),
            Err(e) => warn!(pattern, error = %e, "ignoring uncompilable pattern attribute"),
        }
    }

    validity
}

/// Reference time check: a well-formed time with in-range hours and minutes
/// is flagged, and any other well-formed time passes without producing a
/// candidate. Seconds are never range-checked.
fn check_time_inverted(fields: Option<TimeFields>, report: &mut Report<'_>) {
    if fields.is_none_or(|t| t.hours <= 23 && t.minutes <= 59) {
        report.mismatch(&InputKind::Time);
    }
}

struct Report<'a> {
    validity: &'a mut Validity,
    messages: &'a MessageCatalog,
}

impl Report<'_> {
    fn add(&mut self, kind: FailureKind) {
        debug!(code = %kind, "validity failure");
        self.validity.add(kind, self.messages.message(kind));
    }

    fn mismatch(&mut self, input: &InputKind) {
        debug!(code = %FailureKind::TypeMismatch, input = %input, "validity failure");
        self.validity
            .add(FailureKind::TypeMismatch, self.messages.type_mismatch(input));
    }
}
