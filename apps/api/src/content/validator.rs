//! Template Variable Validator — confirms the normalized mapping carries a
//! non-empty value for every key its template's strict contract requires.
//!
//! A field counts as missing when it is absent OR falsy: empty string,
//! empty sequence, empty mapping, zero, false. Known quirk inherited from
//! the template contracts: a statistics value of exactly 0 at a checked key
//! is flagged missing. Preserved deliberately — tightening to key-present
//! semantics would change accepted inputs.

use serde_json::Value;

use crate::content::content_type::ContentType;
use crate::content::models::RenderVars;

/// Checks the variant's required-field list in order, returning every
/// missing field by name. Content types without a strict contract (the
/// generic article) always pass.
pub fn validate(vars: &RenderVars, content_type: ContentType) -> Result<(), Vec<&'static str>> {
    let missing: Vec<&'static str> = content_type
        .required_fields()
        .iter()
        .filter(|&&field| is_missing(vars.get(field)))
        .copied()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
    }
}
