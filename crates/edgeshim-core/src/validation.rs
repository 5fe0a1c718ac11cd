//! Inbound payload validation.
//!
//! Payloads are first decoded into typed models with serde, then checked with
//! the [`Validate`] rules of the model. Both steps report the offending field.

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{EdgeCloudError, EdgeCloudResult};

lazy_static! {
    /// Names accepted for applications and providers
    pub static ref NAME_PATTERN: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9_-]{0,63}$").unwrap();

    // serde names the offending field in backticks
    static ref SERDE_FIELD: Regex = Regex::new(r"field `([^`]+)`").unwrap();
}

/// Field-level rules of an inbound model
pub trait Validate {
    fn validate(&self) -> EdgeCloudResult<()>;
}

/// Decode `payload` into `T` and run its validation rules.
///
/// Decode errors are reported against the field serde names, or `payload`
/// when the error is not tied to a field.
pub fn parse_validated<T>(payload: &Value) -> EdgeCloudResult<T>
where
    T: DeserializeOwned + Validate,
{
    let model: T = serde_json::from_value(payload.clone())
        .map_err(|e| EdgeCloudError::validation(field_of(&e), e.to_string()))?;
    model.validate()?;
    Ok(model)
}

fn field_of(error: &serde_json::Error) -> String {
    SERDE_FIELD
        .captures(&error.to_string())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "payload".to_string())
}

/// Fail when `value` is empty or whitespace only
pub fn require_non_empty(field: &str, value: &str) -> EdgeCloudResult<()> {
    if value.trim().is_empty() {
        return Err(EdgeCloudError::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Fail when `value` does not match [`NAME_PATTERN`]
pub fn require_name(field: &str, value: &str) -> EdgeCloudResult<()> {
    if !NAME_PATTERN.is_match(value) {
        return Err(EdgeCloudError::validation(
            field,
            format!("'{}' does not match {}", value, NAME_PATTERN.as_str()),
        ));
    }
    Ok(())
}

/// Fail when `port` is outside 1..=65535
pub fn require_port(field: &str, port: u32) -> EdgeCloudResult<()> {
    if port == 0 || port > 65535 {
        return Err(EdgeCloudError::validation(
            field,
            format!("port {} is outside 1..=65535", port),
        ));
    }
    Ok(())
}
