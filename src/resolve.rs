//! Attribute resolution: the union of kinds and attributes over every control
//! bound to a setting.

use serde_json::Value;

use crate::enums::{InputKind, MergeStrategy};
use crate::types::{Control, InputAttrs};

/// Kinds and attributes that apply to one setting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Constraints {
    pub kinds: Vec<InputKind>,
    pub attrs: InputAttrs,
}

impl Constraints {
    /// Constraints of a single control-like declaration.
    pub fn new(kind: impl Into<InputKind>, attrs: InputAttrs) -> Self {
        Constraints {
            kinds: vec![kind.into()],
            attrs,
        }
    }

    pub fn has_kind(&self, kind: &InputKind) -> bool {
        self.kinds.contains(kind)
    }
}

/// Unions the kinds and attribute bags of `controls`, in order.
pub fn resolve_constraints<'a, I>(controls: I, strategy: MergeStrategy) -> Constraints
where
    I: IntoIterator<Item = &'a Control>,
{
    let mut resolved = Constraints::default();
    for control in controls {
        resolved.kinds.push(control.kind.clone());
        match strategy {
            MergeStrategy::LastWriteWins => {
                for (name, value) in control.input_attrs.iter() {
                    resolved.attrs.insert(name.clone(), value.clone());
                }
            }
            MergeStrategy::MostRestrictive => merge_restrictive(&mut resolved.attrs, &control.input_attrs),
        }
    }
    resolved
}

fn merge_restrictive(into: &mut InputAttrs, from: &InputAttrs) {
    for (name, value) in from.iter() {
        let merged = match name.as_str() {
            "required" if into.required() => continue,
            "min" | "minlength" => tighter(into.number(name), from.number(name), f64::max),
            "max" | "maxlength" => tighter(into.number(name), from.number(name), f64::min),
            _ => Some(value.clone()),
        };
        if let Some(merged) = merged.or_else(|| into.get(name).is_none().then(|| value.clone())) {
            into.insert(name.clone(), merged);
        }
    }
}

/// The tighter of two bounds. A non-numeric incoming bound never displaces a
/// numeric one; a numeric incoming bound replaces a missing or malformed one.
fn tighter(current: Option<f64>, incoming: Option<f64>, pick: fn(f64, f64) -> f64) -> Option<Value> {
    let bound = match (current, incoming) {
        (Some(c), Some(n)) => pick(c, n),
        (None, Some(n)) => n,
        (_, None) => return None,
    };
    serde_json::Number::from_f64(bound).map(Value::Number)
}
