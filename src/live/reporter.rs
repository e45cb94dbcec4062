//! Debounced native validity reporting for embedded controls.
//!
//! Once a control is embedded and has exactly one input-like element, a
//! watcher on its setting re-runs the element's native validity report after
//! edits settle for the window-refresh interval. Reporting is best effort:
//! elements without the capability are skipped and failures are logged and
//! dropped.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::enums::ControlState;
use crate::error::ReportError;
use crate::live::debounce::Debouncer;
use crate::types::Timeouts;

/// Native validity reporting on an input-like element.
pub trait ReportValidity {
    /// Whether the element exposes native reporting at all.
    fn supports_report_validity(&self) -> bool;

    /// Shows the platform's inline validation UI. `Ok(true)` when valid.
    fn report_validity(&mut self) -> Result<bool, ReportError>;
}

/// A control as the client-side registry exposes it.
pub trait LiveControl {
    type Input: ReportValidity;

    fn id(&self) -> &str;

    /// The setting the control's primary input edits, if any.
    fn setting_id(&self) -> Option<&str>;

    fn is_embedded(&self) -> bool;

    /// Every `input`, `select` and `textarea` inside the control's container.
    fn inputs(&self) -> Vec<Self::Input>;
}

/// The host's live control registry.
pub trait ControlRegistry {
    type Control: LiveControl;

    fn controls(&self) -> Vec<Self::Control>;
}

struct Watch<I> {
    control_id: String,
    setting_id: String,
    input: I,
    debouncer: Debouncer,
}

pub struct LiveReporter<C: LiveControl> {
    interval: Duration,
    pending: Vec<C>,
    watches: Vec<Watch<C::Input>>,
    states: BTreeMap<String, ControlState>,
}

impl<C: LiveControl> LiveReporter<C> {
    pub fn new(interval: Duration) -> Self {
        LiveReporter {
            interval,
            pending: Vec::new(),
            watches: Vec::new(),
            states: BTreeMap::new(),
        }
    }

    pub fn from_timeouts(timeouts: &Timeouts) -> Self {
        LiveReporter::new(timeouts.window_refresh())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Onboards every control already in `registry`.
    ///
    /// Controls registered afterwards go through [`on_control_added`](Self::on_control_added).
    pub fn init<R: ControlRegistry<Control = C>>(&mut self, registry: &R) {
        for control in registry.controls() {
            self.on_control_added(control);
        }
    }

    /// Onboards one control. Adding the same control id twice is a no-op.
    pub fn on_control_added(&mut self, control: C) {
        if self.states.contains_key(control.id()) {
            return;
        }
        self.states
            .insert(control.id().to_string(), ControlState::Unbound);
        if control.is_embedded() {
            self.attach(control);
        } else {
            self.pending.push(control);
        }
    }

    /// Completes onboarding of a control that was added before it embedded.
    pub fn on_control_embedded(&mut self, control_id: &str) {
        if let Some(pos) = self.pending.iter().position(|c| c.id() == control_id) {
            let control = self.pending.remove(pos);
            self.attach(control);
        }
    }

    fn attach(&mut self, control: C) {
        let Some(setting_id) = control.setting_id().map(str::to_string) else {
            trace!(control = control.id(), "no setting; not watching");
            return;
        };
        let mut inputs = control.inputs();
        if inputs.len() != 1 {
            trace!(
                control = control.id(),
                inputs = inputs.len(),
                "not exactly one input; not watching"
            );
            return;
        }
        let Some(input) = inputs.pop() else {
            return;
        };

        let control_id = control.id().to_string();
        debug!(control = %control_id, setting = %setting_id, "watching for validity");
        self.states.insert(control_id.clone(), ControlState::Watching);
        self.watches.push(Watch {
            control_id,
            setting_id,
            input,
            debouncer: Debouncer::new(self.interval),
        });
    }

    pub fn state(&self, control_id: &str) -> Option<ControlState> {
        self.states.get(control_id).copied()
    }

    /// Restarts the debounce of every watcher on `setting_id`.
    pub fn on_setting_changed(&mut self, setting_id: &str, now: Instant) {
        for watch in self.watches.iter_mut().filter(|w| w.setting_id == setting_id) {
            watch.debouncer.trigger(now);
        }
    }

    /// Earliest pending report, for scheduling the next [`tick`](Self::tick).
    pub fn next_deadline(&self) -> Option<Instant> {
        self.watches
            .iter()
            .filter_map(|w| w.debouncer.deadline())
            .min()
    }

    /// Fires every watcher whose quiet period has elapsed.
    ///
    /// Returns how many native reports were invoked.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut invoked = 0;
        for watch in &mut self.watches {
            if watch.debouncer.poll(now) && report(&mut watch.input, &watch.control_id) {
                invoked += 1;
            }
        }
        invoked
    }
}

/// Probes for the capability, then reports; errors never propagate.
fn report<I: ReportValidity>(input: &mut I, control_id: &str) -> bool {
    if !input.supports_report_validity() {
        trace!(control = control_id, "element cannot report validity");
        return false;
    }
    match input.report_validity() {
        Ok(valid) => debug!(control = control_id, valid, "reported validity"),
        Err(e) => debug!(control = control_id, error = %e, "validity report failed"),
    }
    true
}
