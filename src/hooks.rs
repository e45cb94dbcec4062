//! Per-setting validation filters and the points they are attached at.
//!
//! Each setting gets one filter hook, `customize_validate_{setting_id}`. The
//! input-constraint filter is attached when the panel registers and again
//! right before save-time validation, so settings added in between are
//! covered. Attaching is idempotent.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::customizer::Customizer;
use crate::types::{Setting, Validity};
use crate::validate::validate_input_constraints;

pub const VALIDATE_HOOK_PREFIX: &str = "customize_validate_";

/// Name under which [`validate_input_constraints`] is registered.
pub const INPUT_CONSTRAINTS_FILTER: &str = "validate_input_constraints";

/// Filter signature: (accumulator, submitted value, setting, panel) → accumulator.
pub type ValidateFilter = fn(Validity, &Value, &Setting, &Customizer) -> Validity;

pub fn validate_hook_name(setting_id: &str) -> String {
    format!("{}{}", VALIDATE_HOOK_PREFIX, setting_id)
}

#[derive(Clone)]
struct RegisteredFilter {
    name: &'static str,
    callback: ValidateFilter,
}

/// Named filters per hook, run in the order they were added.
#[derive(Clone, Default)]
pub struct HookRegistry {
    filters: BTreeMap<String, Vec<RegisteredFilter>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        HookRegistry::default()
    }

    pub fn add_filter(&mut self, hook: &str, name: &'static str, callback: ValidateFilter) {
        trace!(hook, filter = name, "adding filter");
        self.filters
            .entry(hook.to_string())
            .or_default()
            .push(RegisteredFilter { name, callback });
    }

    pub fn has_filter(&self, hook: &str, name: &str) -> bool {
        self.filters
            .get(hook)
            .is_some_and(|filters| filters.iter().any(|f| f.name == name))
    }

    pub fn filter_count(&self, hook: &str) -> usize {
        self.filters.get(hook).map_or(0, Vec::len)
    }

    /// Runs every filter attached to `setting`'s validation hook.
    pub fn apply_validate(
        &self,
        validity: Validity,
        value: &Value,
        setting: &Setting,
        customizer: &Customizer,
    ) -> Validity {
        let Some(filters) = self.filters.get(&validate_hook_name(&setting.id)) else {
            return validity;
        };
        filters
            .iter()
            .fold(validity, |acc, f| (f.callback)(acc, value, setting, customizer))
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: BTreeMap<&str, Vec<&str>> = self
            .filters
            .iter()
            .map(|(hook, fs)| (hook.as_str(), fs.iter().map(|f| f.name).collect()))
            .collect();
        f.debug_struct("HookRegistry").field("filters", &names).finish()
    }
}

/// Attaches the input-constraint filter to every registered setting that
/// does not have it yet.
pub fn add_validity_constraint_callbacks(hooks: &mut HookRegistry, customizer: &Customizer) {
    for setting in customizer.settings() {
        let hook = validate_hook_name(&setting.id);
        if !hooks.has_filter(&hook, INPUT_CONSTRAINTS_FILTER) {
            hooks.add_filter(&hook, INPUT_CONSTRAINTS_FILTER, validate_input_constraints);
        }
    }
}

/// Panel registration trigger.
pub fn on_customize_register(hooks: &mut HookRegistry, customizer: &Customizer) {
    add_validity_constraint_callbacks(hooks, customizer);
}

/// Trigger that runs immediately before save-time validation.
pub fn on_save_validation_before(hooks: &mut HookRegistry, customizer: &Customizer) {
    add_validity_constraint_callbacks(hooks, customizer);
}

/// Save-time validation of submitted values, keyed by setting id.
///
/// Fires [`on_save_validation_before`] first. Values for unregistered
/// settings are skipped.
pub fn validate_for_save(
    hooks: &mut HookRegistry,
    customizer: &Customizer,
    values: &Map<String, Value>,
) -> BTreeMap<String, Validity> {
    on_save_validation_before(hooks, customizer);

    let mut results = BTreeMap::new();
    for (setting_id, value) in values {
        let Some(setting) = customizer.setting(setting_id) else {
            debug!(setting = %setting_id, "skipping value for unregistered setting");
            continue;
        };
        let validity = hooks.apply_validate(Validity::new(), value, setting, customizer);
        results.insert(setting_id.clone(), validity);
    }
    results
}
