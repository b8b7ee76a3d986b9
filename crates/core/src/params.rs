//! Pure helper functions for extracting typed settings from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value cannot be interpreted, the default is returned.
//! These never fail, so a malformed setting can never reach the render loop.

use serde_json::Value;

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `u32` from `params[name]`, returning `default` if missing or malformed.
///
/// Accepts JSON integers and decimal strings such as `"10"`, since settings
/// stores commonly keep list choices as strings. Negative, fractional and
/// out-of-range values fall back to `default` with a warning.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    let Some(raw) = params.get(name) else {
        return default;
    };
    let parsed = match raw {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    parsed.unwrap_or_else(|| {
        log::warn!("setting '{name}' has unusable value {raw}, using default {default}");
        default
    })
}
