//! Partner HTTP helpers shared by the adapters.
//!
//! [`PartnerHttp`] issues one request per call through the configured
//! [`HttpTransport`] and turns network failures and non-2xx answers into a
//! [`PlatformError`] for its partner.

use edgeshim_core::error::{EdgeCloudError, EdgeCloudResult, PlatformError, PlatformKind};
use edgeshim_core::response::NormalizedHttpResponse;
use edgeshim_core::transport::{HttpTransport, TransportError, TransportResponse};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Extracts a human readable message from a failed partner response
pub type DescribeError = fn(&TransportResponse) -> String;

#[derive(Clone)]
pub struct PartnerHttp {
    platform: PlatformKind,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    describe: DescribeError,
}

impl fmt::Debug for PartnerHttp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartnerHttp")
            .field("platform", &self.platform)
            .field("base_url", &self.base_url)
            .field("transport", &self.transport)
            .finish()
    }
}

impl PartnerHttp {
    pub fn new(
        platform: PlatformKind,
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        describe: DescribeError,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            platform,
            base_url,
            transport,
            describe,
        }
    }

    pub fn platform(&self) -> PlatformKind {
        self.platform
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of `path` under the partner base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Absolute URL of `path` followed by `ids`, each encoded as exactly one
    /// path segment
    pub fn resource_url(&self, path: &str, ids: &[&str]) -> EdgeCloudResult<String> {
        let invalid_base = |reason: String| {
            EdgeCloudError::Config(format!("invalid partner URL '{}': {}", self.base_url, reason))
        };
        let mut url = Url::parse(&self.url(path)).map_err(|e| invalid_base(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| invalid_base("cannot be a base".into()))?;
            for id in ids {
                if matches!(*id, "" | "." | "..") {
                    return Err(EdgeCloudError::validation(
                        "id",
                        format!("'{}' is not a usable resource identifier", id),
                    ));
                }
                segments.push(id);
            }
        }
        Ok(url.into())
    }

    pub async fn get(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> EdgeCloudResult<TransportResponse> {
        self.get_url(self.url(path), params).await
    }

    /// GET `{path}/{id}/...` with every id encoded as one path segment
    pub async fn get_resource(
        &self,
        path: &str,
        ids: &[&str],
    ) -> EdgeCloudResult<TransportResponse> {
        self.get_url(self.resource_url(path, ids)?, &[]).await
    }

    async fn get_url(
        &self,
        url: String,
        params: &[(String, String)],
    ) -> EdgeCloudResult<TransportResponse> {
        debug!(platform = %self.platform, %url, "GET");
        let result = self.transport.get(&url, params).await;
        self.check(result)
    }

    pub async fn post(&self, path: &str, payload: &Value) -> EdgeCloudResult<TransportResponse> {
        let url = self.url(path);
        debug!(platform = %self.platform, %url, "POST");
        let result = self.transport.post_json(&url, payload).await;
        self.check(result)
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        fields: &[(String, String)],
    ) -> EdgeCloudResult<TransportResponse> {
        let url = self.url(path);
        debug!(platform = %self.platform, %url, "POST multipart");
        let result = self.transport.post_multipart(&url, fields).await;
        self.check(result)
    }

    /// DELETE `{path}/{id}`, `id` encoded as one path segment
    pub async fn delete(&self, path: &str, id: &str) -> EdgeCloudResult<TransportResponse> {
        let url = self.resource_url(path, &[id])?;
        debug!(platform = %self.platform, %url, "DELETE");
        let result = self.transport.delete(&url).await;
        self.check(result)
    }

    fn check(
        &self,
        result: Result<TransportResponse, TransportError>,
    ) -> EdgeCloudResult<TransportResponse> {
        match result {
            Ok(response) if response.is_success() => Ok(response),
            Ok(response) => {
                let message = (self.describe)(&response);
                error!(
                    platform = %self.platform,
                    status = response.status,
                    url = %response.url,
                    %message,
                    "partner request failed"
                );
                Err(PlatformError::new(self.platform, Some(response.status), message).into())
            }
            Err(e) => {
                error!(platform = %self.platform, error = %e, "partner unreachable");
                Err(PlatformError::new(self.platform, None, e.to_string()).into())
            }
        }
    }
}

/// Unwrap a field the mapping needs from a partner record
pub fn require<'a>(value: Option<&'a str>, context: &str, field: &str) -> EdgeCloudResult<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| EdgeCloudError::missing_field(context, field))
}

/// Report an upstream 404 on the keyed resource `resource`/`id` as not found
pub fn keyed<'a>(
    resource: &'a str,
    id: &'a str,
) -> impl FnOnce(EdgeCloudError) -> EdgeCloudError + 'a {
    move |e| match e {
        EdgeCloudError::Platform(platform) => platform.for_resource(resource, id),
        other => other,
    }
}

/// Hand a 2xx answer other than the documented success status back unmodified
pub fn pass_through(operation: &str, response: TransportResponse) -> NormalizedHttpResponse {
    warn!(
        operation,
        status = response.status,
        "unexpected partner status, passing response through"
    );
    NormalizedHttpResponse::passthrough(response)
}

/// Decode a partner body, reporting shape mismatches as mapping errors
pub fn decode<T: DeserializeOwned>(
    response: &TransportResponse,
    context: &str,
) -> EdgeCloudResult<T> {
    response
        .json()
        .map_err(|e| EdgeCloudError::Mapping(format!("unexpected {} payload: {}", context, e)))
}

/// Error text from a JSON body carrying `detail`, `message` or `error`,
/// falling back to the raw body
pub fn describe_json_error(response: &TransportResponse) -> String {
    let from_json = response.json::<Value>().ok().and_then(|body| {
        ["detail", "message", "error"].iter().find_map(|key| match body.get(*key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        })
    });
    match from_json {
        Some(message) => message,
        None => {
            let text = response.text();
            if text.trim().is_empty() {
                format!("HTTP {} with empty body", response.status)
            } else {
                text
            }
        }
    }
}
