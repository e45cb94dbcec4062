use crate::error::{ParseError, ParseErrorKind};
use crate::types::Manifest;

const TOP_LEVEL_KEYS: &[&str] = &["settings", "controls", "options", "timeouts", "messages"];

/// Parse a YAML (or JSON) string into an unchecked [`Manifest`].
///
/// Performs deserialization and type mapping only; reference checks are
/// done by [`crate::customizer::check`].
pub fn parse(input: &str) -> Result<Manifest, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError {
            kind: ParseErrorKind::Syntax,
            message: "empty input".to_string(),
            path: None,
            line: None,
            column: None,
        });
    }

    // YAML → serde_json::Value → Manifest, so JSON input goes through the same path
    let value: serde_json::Value = serde_saphyr::from_str(input).map_err(|e| {
        let msg = e.to_string();
        let (line, column) = extract_location(&msg);
        ParseError {
            kind: classify_saphyr_error(&msg),
            message: msg,
            path: None,
            line,
            column,
        }
    })?;

    let Some(obj) = value.as_object() else {
        return Err(ParseError {
            kind: ParseErrorKind::TypeMismatch,
            message: "manifest root must be a YAML mapping".to_string(),
            path: None,
            line: None,
            column: None,
        });
    };

    for key in obj.keys() {
        if !TOP_LEVEL_KEYS.contains(&key.as_str()) {
            return Err(ParseError {
                kind: ParseErrorKind::TypeMismatch,
                message: format!("unknown top-level field: {}", key),
                path: Some(key.clone()),
                line: None,
                column: None,
            });
        }
    }

    serde_json::from_value(value).map_err(|e| {
        let msg = e.to_string();
        ParseError {
            kind: classify_json_error(&msg),
            message: msg,
            path: None,
            line: None,
            column: None,
        }
    })
}

/// Pulls `line N column M` out of a deserializer message, when present.
fn extract_location(msg: &str) -> (Option<usize>, Option<usize>) {
    let lower = msg.to_lowercase();
    let number_after = |marker: &str| {
        lower.find(marker).and_then(|i| {
            lower[i + marker.len()..]
                .trim_start()
                .split(|c: char| !c.is_ascii_digit())
                .next()
                .and_then(|n| n.parse::<usize>().ok())
        })
    };
    (number_after("line"), number_after("column"))
}

fn classify_saphyr_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("unknown") || lower.contains("variant") {
        ParseErrorKind::UnknownVariant
    } else if lower.contains("type") || lower.contains("invalid") || lower.contains("expected") {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}

fn classify_json_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("unknown variant") || lower.contains("unknown field") {
        ParseErrorKind::UnknownVariant
    } else if lower.contains("missing field")
        || lower.contains("invalid type")
        || lower.contains("must be a string")
    {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}
