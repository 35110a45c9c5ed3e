//! Turning raw model text into a candidate tree

use crate::error::FailureKind;
use genui_schema::{UiNode, Validator};
use serde_json::Value;

/// Strip a surrounding Markdown code fence, if any.
///
/// Models asked for bare JSON still sometimes wrap it in a fenced block
/// tagged `json`. Anything else is returned trimmed.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`, `JSON`, ...) on the opening line
    match body.find('\n') {
        Some(newline) if !body[..newline].trim_start().starts_with(['{', '[']) => {
            body[newline + 1..].trim()
        }
        _ => body.trim(),
    }
}

/// Parse and validate one backend response
pub fn decode(text: &str, validator: &Validator) -> Result<UiNode, FailureKind> {
    let value: Value = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| FailureKind::Parse(e.to_string()))?;
    validator.parse(&value).map_err(FailureKind::Validation)
}
