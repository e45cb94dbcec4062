//! Client-side half: keeps input bindings in sync with user edits and
//! surfaces native validity reports as values settle.
//!
//! The host platform is represented by traits ([`Element`], [`LiveControl`],
//! [`ControlRegistry`]); time is passed in explicitly so the host keeps
//! ownership of its event loop.

pub mod binding;
pub mod debounce;
pub mod reporter;

pub use binding::{BindingFactory, Element, ElementBinding, ElementTag, Synchronizer};
pub use debounce::Debouncer;
pub use reporter::{ControlRegistry, LiveControl, LiveReporter, ReportValidity};
