//! Normalized response envelope returned by every adapter operation

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::EdgeCloudResult;
use crate::schema::{check_body, BodySchema};
use crate::transport::{RequestSummary, TransportResponse};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Partner-independent HTTP response.
///
/// Built by adapters from plain values, never from a transport library's
/// response type.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedHttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub encoding: String,
    /// URL of the partner call this response was derived from
    pub url: Option<String>,
    /// Partner request this response was derived from
    pub request: Option<RequestSummary>,
}

impl NormalizedHttpResponse {
    /// JSON response with no schema check. Prefer [`Self::validated`] for
    /// standardized bodies.
    pub fn json<T: Serialize + ?Sized>(status_code: u16, content: &T) -> EdgeCloudResult<Self> {
        let body = serde_json::to_vec(content)?;
        Ok(Self {
            status_code,
            headers: json_headers(),
            body,
            encoding: "utf-8".to_string(),
            url: None,
            request: None,
        })
    }

    /// JSON response whose body is checked against `schema` first
    pub fn validated<T: Serialize + ?Sized>(
        schema: BodySchema,
        status_code: u16,
        content: &T,
        origin: Option<&TransportResponse>,
    ) -> EdgeCloudResult<Self> {
        let value = serde_json::to_value(content)?;
        check_body(schema, &value)?;
        let response = Self::json(status_code, &value)?;
        Ok(match origin {
            Some(origin) => response.with_origin(origin),
            None => response,
        })
    }

    /// Partner response returned as-is, apart from the envelope
    pub fn passthrough(response: TransportResponse) -> Self {
        Self {
            status_code: response.status,
            headers: json_headers(),
            body: response.body,
            encoding: "utf-8".to_string(),
            url: Some(response.url),
            request: Some(response.request),
        }
    }

    /// Empty-bodied response (e.g. `204 No Content`)
    pub fn no_content(status_code: u16, origin: &TransportResponse) -> Self {
        Self {
            status_code,
            headers: BTreeMap::new(),
            body: Vec::new(),
            encoding: "utf-8".to_string(),
            url: Some(origin.url.clone()),
            request: Some(origin.request.clone()),
        }
    }

    fn with_origin(mut self, origin: &TransportResponse) -> Self {
        self.url = Some(origin.url.clone());
        self.request = Some(origin.request.clone());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Value of the `Content-Type` header
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).map(String::as_str)
    }

    /// Decode the body into `T`
    pub fn json_body<T: DeserializeOwned>(&self) -> EdgeCloudResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Decode the body as an untyped JSON value; an empty body is `null`
    pub fn body_value(&self) -> EdgeCloudResult<Value> {
        if self.body.is_empty() {
            return Ok(Value::Null);
        }
        self.json_body()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn json_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
    headers
}
