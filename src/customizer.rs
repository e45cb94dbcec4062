//! In-memory model of the settings panel: registered settings and controls.
//!
//! The host platform owns registration and storage; this is the read side the
//! validator and the hooks need, built from a [`Manifest`] or assembled by hand.

use std::collections::HashSet;

use crate::error::{ManifestError, ManifestErrorKind};
use crate::messages::MessageCatalog;
use crate::primitives;
use crate::types::*;

#[derive(Clone, Debug, Default)]
pub struct Customizer {
    settings: Vec<Setting>,
    controls: Vec<Control>,
    options: ValidatorOptions,
    timeouts: Timeouts,
    messages: MessageCatalog,
}

impl Customizer {
    pub fn new() -> Self {
        Customizer::default()
    }

    pub fn from_manifest(manifest: Manifest) -> Self {
        Customizer {
            settings: manifest.settings,
            controls: manifest.controls,
            options: manifest.options,
            timeouts: manifest.timeouts,
            messages: manifest.messages,
        }
    }

    pub fn to_manifest(&self) -> Manifest {
        Manifest {
            settings: self.settings.clone(),
            controls: self.controls.clone(),
            options: self.options.clone(),
            timeouts: self.timeouts.clone(),
            messages: self.messages.clone(),
        }
    }

    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    /// Registers a setting, replacing one with the same id.
    pub fn add_setting(&mut self, setting: Setting) {
        match self.settings.iter_mut().find(|s| s.id == setting.id) {
            Some(existing) => *existing = setting,
            None => self.settings.push(setting),
        }
    }

    /// Registers a control, replacing one with the same id in place.
    pub fn add_control(&mut self, control: Control) {
        match self.controls.iter_mut().find(|c| c.id == control.id) {
            Some(existing) => *existing = control,
            None => self.controls.push(control),
        }
    }

    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn setting(&self, id: &str) -> Option<&Setting> {
        self.settings.iter().find(|s| s.id == id)
    }

    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }

    /// Controls editing `setting_id`, in registration order.
    pub fn bound_controls<'a>(&'a self, setting_id: &'a str) -> impl Iterator<Item = &'a Control> {
        self.controls.iter().filter(move |c| c.edits(setting_id))
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }
}

/// Checks a parsed manifest for dangling and duplicate references.
///
/// Returns every problem found, not just the first.
pub fn check(manifest: &Manifest) -> Vec<ManifestError> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for (i, setting) in manifest.settings.iter().enumerate() {
        if !seen.insert(setting.id.as_str()) {
            errors.push(ManifestError {
                kind: ManifestErrorKind::DuplicateSetting,
                path: format!("settings[{}].id", i),
                message: format!("duplicate setting id '{}'", setting.id),
            });
        }
    }

    let mut controls_seen = HashSet::new();
    for (i, control) in manifest.controls.iter().enumerate() {
        if !controls_seen.insert(control.id.as_str()) {
            errors.push(ManifestError {
                kind: ManifestErrorKind::DuplicateControl,
                path: format!("controls[{}].id", i),
                message: format!("duplicate control id '{}'", control.id),
            });
        }

        for setting_id in control.setting_ids() {
            if !seen.contains(setting_id) {
                errors.push(ManifestError {
                    kind: ManifestErrorKind::UnknownSetting,
                    path: format!("controls[{}].settings", i),
                    message: format!(
                        "control '{}' references unknown setting '{}'",
                        control.id, setting_id
                    ),
                });
            }
        }

        if let Some(pattern) = control.input_attrs.pattern()
            && let Err(e) = primitives::pattern_matches(pattern, "")
        {
            errors.push(ManifestError {
                kind: ManifestErrorKind::InvalidPattern,
                path: format!("controls[{}].input_attrs.pattern", i),
                message: format!("pattern '{}' does not compile: {}", pattern, e),
            });
        }
    }

    if manifest.timeouts.window_refresh == 0 {
        errors.push(ManifestError {
            kind: ManifestErrorKind::InvalidTimeout,
            path: "timeouts.window_refresh".to_string(),
            message: "window_refresh must be greater than zero".to_string(),
        });
    }

    errors
}
