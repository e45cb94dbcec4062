//! HTML5 input validity constraints for Customizer settings.
//!
//! Controls in a live-preview settings panel declare an input `type` and an
//! attribute bag (`required`, `min`, `max`, `step`, `maxlength`, `minlength`,
//! `pattern`). The browser enforces those while the user types; this crate
//! enforces the same constraints again on save and wires up the live
//! reporting on the client side:
//!
//! ```text
//! parse(yaml) → Manifest → check(manifest) → Customizer
//!   save:  hooks::validate_for_save → customize_validate_{id} → Validity
//!   live:  LiveReporter::on_setting_changed → (debounce) → report_validity()
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use customize_validity::{Control, FailureKind, validate};
//! use serde_json::json;
//!
//! let control = Control::new("test_number", "number")
//!     .with_attr("min", "1")
//!     .with_attr("max", "4")
//!     .with_attr("step", "0.5");
//!
//! assert!(validate(&json!("2.5"), [&control]).is_valid());
//! assert_eq!(validate(&json!("5"), [&control]).codes(), vec![FailureKind::RangeOverflow]);
//! ```

pub mod customizer;
pub mod enums;
pub mod error;
pub mod hooks;
pub mod live;
pub mod messages;
pub mod parse;
pub mod primitives;
pub mod resolve;
pub mod serialize;
pub mod types;
pub mod validate;

pub use customizer::{Customizer, check};
pub use enums::*;
pub use error::*;
pub use messages::MessageCatalog;
pub use types::*;

// Re-export entry-point functions at the crate root for convenience.
pub use parse::parse;
pub use serialize::serialize;
pub use validate::validate;

/// Convenience entry point composing parse → check → [`Customizer`].
///
/// # Errors
///
/// Returns `Err(Vec<CustomizeError>)` if parsing fails or the manifest check
/// finds problems.
///
/// # Example
///
/// ```rust
/// let yaml = r#"
/// settings:
///   - id: test_number
/// controls:
///   - id: test_number
///     type: number
///     settings:
///       default: test_number
///     input_attrs:
///       min: "1"
///       max: "4"
///       step: "0.5"
/// "#;
///
/// match customize_validity::load(yaml) {
///     Ok(customizer) => println!("{} controls", customizer.controls().len()),
///     Err(errors) => eprintln!("{} errors", errors.len()),
/// }
/// ```
pub fn load(input: &str) -> Result<Customizer, Vec<CustomizeError>> {
    let manifest = parse::parse(input).map_err(|e| vec![CustomizeError::Parse(e)])?;

    let errors = customizer::check(&manifest);
    if !errors.is_empty() {
        return Err(errors.into_iter().map(CustomizeError::Manifest).collect());
    }

    Ok(Customizer::from_manifest(manifest))
}
