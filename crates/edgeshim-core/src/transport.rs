//! HTTP transport seam
//!
//! Adapters never talk to an HTTP library directly. They go through
//! [`HttpTransport`], which issues exactly one request per call and reports
//! network-level failures as [`TransportError`]. Status-code policy belongs to
//! the per-partner helpers, not to the transport.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Debug, Display};
use thiserror::Error;

/// HTTP methods used against partner backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// The request that produced a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSummary {
    pub method: Method,
    pub url: String,
}

/// Raw partner response as seen by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    /// Final URL (after redirects)
    pub url: String,
    pub request: RequestSummary,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Body as (lossy) UTF-8 text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Network-level failure: the request did not produce an HTTP response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{method} {url} failed: {message}")]
pub struct TransportError {
    pub method: Method,
    pub url: String,
    pub message: String,
}

/// Interface for issuing partner HTTP calls
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    /// GET `url` with query parameters
    async fn get(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<TransportResponse, TransportError>;

    /// POST a JSON body
    async fn post_json(&self, url: &str, body: &Value) -> Result<TransportResponse, TransportError>;

    /// POST a multipart form made of text fields
    async fn post_multipart(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<TransportResponse, TransportError>;

    /// DELETE `url`
    async fn delete(&self, url: &str) -> Result<TransportResponse, TransportError>;
}
