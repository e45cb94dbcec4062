//! Two-way bindings between a bound value and a DOM-like element.
//!
//! A [`BindingFactory`] decides, per element, which event signals a user edit
//! and how the value is read from and written to the element. Form controls
//! listen to `input` (or `change` for checkboxes and radios) so the bound
//! value tracks every keystroke; other elements keep the generic HTML
//! synchronizer and listen to nothing.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::primitives;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementTag {
    Input,
    Select,
    Textarea,
    Other(String),
}

impl ElementTag {
    /// `input`, `select` or `textarea`.
    pub fn is_form_control(&self) -> bool {
        !matches!(self, ElementTag::Other(_))
    }
}

/// The host's handle on a single element.
pub trait Element {
    fn tag(&self) -> ElementTag;

    /// The `type` property of an `<input>`, lower-case.
    fn input_type(&self) -> Option<String> {
        None
    }

    fn html(&self) -> String;
    fn set_html(&mut self, html: &str);

    fn value(&self) -> String;
    fn set_value(&mut self, value: &str);

    fn checked(&self) -> bool {
        false
    }

    fn set_checked(&mut self, _checked: bool) {}
}

/// How a bound value is written to and read from an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Synchronizer {
    /// Inner HTML; the default for non-form elements.
    Html,
    /// The element's `value`.
    Value,
    /// Checked state as a boolean.
    Checkbox,
    /// Checked when the bound value equals the element's `value`.
    Radio,
}

impl Synchronizer {
    pub fn update<E: Element + ?Sized>(&self, element: &mut E, to: &Value) {
        match self {
            Synchronizer::Html => element.set_html(&text(to)),
            Synchronizer::Value => element.set_value(&text(to)),
            Synchronizer::Checkbox => element.set_checked(primitives::is_truthy(to)),
            Synchronizer::Radio => {
                let checked = text(to) == element.value();
                element.set_checked(checked);
            }
        }
    }

    pub fn refresh<E: Element + ?Sized>(&self, element: &E) -> Value {
        match self {
            Synchronizer::Html => Value::String(element.html()),
            Synchronizer::Value => Value::String(element.value()),
            Synchronizer::Checkbox => Value::Bool(element.checked()),
            Synchronizer::Radio => {
                if element.checked() {
                    Value::String(element.value())
                } else {
                    Value::Null
                }
            }
        }
    }
}

fn text(value: &Value) -> String {
    primitives::stringify(value).unwrap_or_default()
}

/// Builds [`ElementBinding`]s, choosing the event and synchronizer per element.
///
/// Kind-specific synchronizers override the plain value synchronizer for
/// `<input>` elements of that type; checkbox and radio are registered by
/// default.
#[derive(Clone, Debug)]
pub struct BindingFactory {
    synchronizers: BTreeMap<String, Synchronizer>,
}

impl Default for BindingFactory {
    fn default() -> Self {
        BindingFactory::new()
            .with_synchronizer("checkbox", Synchronizer::Checkbox)
            .with_synchronizer("radio", Synchronizer::Radio)
    }
}

impl BindingFactory {
    /// A factory with no kind-specific synchronizers.
    pub fn new() -> Self {
        BindingFactory {
            synchronizers: BTreeMap::new(),
        }
    }

    pub fn with_synchronizer(mut self, input_type: impl Into<String>, sync: Synchronizer) -> Self {
        self.synchronizers.insert(input_type.into(), sync);
        self
    }

    /// Event that signals a user edit, if the element has one.
    pub fn event_for<E: Element + ?Sized>(&self, element: &E) -> Option<&'static str> {
        if !element.tag().is_form_control() {
            return None;
        }
        match element.input_type().as_deref() {
            Some("checkbox") | Some("radio") => Some("change"),
            _ => Some("input"),
        }
    }

    pub fn synchronizer_for<E: Element + ?Sized>(&self, element: &E) -> Synchronizer {
        let tag = element.tag();
        if !tag.is_form_control() {
            return Synchronizer::Html;
        }
        if tag == ElementTag::Input
            && let Some(sync) = element
                .input_type()
                .and_then(|t| self.synchronizers.get(&t).copied())
        {
            return sync;
        }
        Synchronizer::Value
    }

    /// Binds `element`, seeding the bound value from the element's live value.
    pub fn bind<E: Element>(&self, element: E) -> ElementBinding<E> {
        let event = self.event_for(&element);
        let synchronizer = self.synchronizer_for(&element);
        let value = synchronizer.refresh(&element);
        ElementBinding {
            element,
            event,
            synchronizer,
            value,
            callbacks: Vec::new(),
        }
    }
}

type ChangeCallback = Box<dyn FnMut(&Value, &Value)>;

/// A bound value kept in step with one element.
///
/// Writes go to the element only when they differ from what it already
/// shows, so an edit in progress is never overwritten with itself.
pub struct ElementBinding<E> {
    element: E,
    event: Option<&'static str>,
    synchronizer: Synchronizer,
    value: Value,
    callbacks: Vec<ChangeCallback>,
}

impl<E: Element> ElementBinding<E> {
    pub fn get(&self) -> &Value {
        &self.value
    }

    pub fn event(&self) -> Option<&'static str> {
        self.event
    }

    pub fn synchronizer(&self) -> Synchronizer {
        self.synchronizer
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    /// Registers a callback receiving `(new, old)` on every change.
    pub fn bind(&mut self, callback: impl FnMut(&Value, &Value) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Sets the bound value. Returns `false` if it was already `to`.
    pub fn set(&mut self, to: Value) -> bool {
        if self.value == to {
            return false;
        }
        let from = std::mem::replace(&mut self.value, to);
        if self.synchronizer.refresh(&self.element) != self.value {
            self.synchronizer.update(&mut self.element, &self.value);
        }
        for callback in &mut self.callbacks {
            callback(&self.value, &from);
        }
        true
    }

    /// Pulls the element's live value into the bound value.
    pub fn refresh(&mut self) -> bool {
        let live = self.synchronizer.refresh(&self.element);
        self.set(live)
    }

    /// Dispatches an element event; only the binding's own event refreshes.
    pub fn handle_event(&mut self, event: &str) -> bool {
        if self.event == Some(event) {
            self.refresh()
        } else {
            false
        }
    }
}
