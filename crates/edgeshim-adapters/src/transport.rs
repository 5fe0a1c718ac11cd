//! reqwest implementation of the transport seam

use async_trait::async_trait;
use edgeshim_core::error::{EdgeCloudError, EdgeCloudResult};
use edgeshim_core::transport::{
    HttpTransport, Method, RequestSummary, TransportError, TransportResponse,
};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Client-wide request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`HttpTransport`] backed by a shared `reqwest` client. No retries.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the default timeout
    pub fn new() -> EdgeCloudResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> EdgeCloudResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EdgeCloudError::Config(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wrap an already configured client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        request: RequestBuilder,
    ) -> Result<TransportResponse, TransportError> {
        debug!(%method, %url, "sending partner request");
        let failed = |e: reqwest::Error| TransportError {
            method,
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = request.send().await.map_err(failed)?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.bytes().await.map_err(failed)?;

        Ok(TransportResponse {
            status,
            url: final_url,
            request: RequestSummary {
                method,
                url: url.to_string(),
            },
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<TransportResponse, TransportError> {
        let request = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .query(params);
        self.send(Method::Get, url, request).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &Value,
    ) -> Result<TransportResponse, TransportError> {
        let request = self.client.post(url).json(body);
        self.send(Method::Post, url, request).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<TransportResponse, TransportError> {
        let form = fields
            .iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            });
        let request = self.client.post(url).multipart(form);
        self.send(Method::Post, url, request).await
    }

    async fn delete(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let request = self.client.delete(url).header("Accept", "application/json");
        self.send(Method::Delete, url, request).await
    }
}
