//! [`Manifest`] → YAML serialization.

use crate::error::SerializeError;
use crate::types::Manifest;

/// Serialize a Manifest to a YAML string that [`crate::parse`] reads back.
pub fn serialize(manifest: &Manifest) -> Result<String, SerializeError> {
    let value = serde_json::to_value(manifest).map_err(|e| SerializeError {
        message: format!("failed to convert manifest to JSON value: {}", e),
    })?;

    let yaml = serde_saphyr::to_string(&value).map_err(|e| SerializeError {
        message: format!("failed to serialize to YAML: {}", e),
    })?;

    Ok(yaml)
}
