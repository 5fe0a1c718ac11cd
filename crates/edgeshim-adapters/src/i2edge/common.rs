//! i2Edge transport helpers

use edgeshim_core::error::PlatformKind;
use edgeshim_core::transport::{HttpTransport, TransportResponse};
use serde_json::Value;
use std::sync::Arc;

use crate::http::{describe_json_error, PartnerHttp};

/// HTTP helpers bound to an i2Edge base URL
pub fn i2edge_http(base_url: &str, transport: Arc<dyn HttpTransport>) -> PartnerHttp {
    PartnerHttp::new(PlatformKind::I2Edge, base_url, transport, describe_i2edge_error)
}

/// i2Edge answers errors as `{"detail": ...}`, where request validation
/// failures carry a list of `{loc, msg}` entries
pub fn describe_i2edge_error(response: &TransportResponse) -> String {
    let details = response
        .json::<Value>()
        .ok()
        .and_then(|body| body.get("detail").and_then(Value::as_array).cloned());

    match details {
        Some(entries) if !entries.is_empty() => entries
            .iter()
            .map(|entry| {
                let location = entry
                    .get("loc")
                    .and_then(Value::as_array)
                    .map(|loc| {
                        loc.iter()
                            .map(|part| match part {
                                Value::String(s) => s.clone(),
                                other => other.to_string(),
                            })
                            .collect::<Vec<_>>()
                            .join(".")
                    })
                    .unwrap_or_default();
                let message = entry.get("msg").and_then(Value::as_str).unwrap_or("invalid");
                if location.is_empty() {
                    message.to_string()
                } else {
                    format!("{}: {}", location, message)
                }
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => describe_json_error(response),
    }
}
