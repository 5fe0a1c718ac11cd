//! Mock implementation of the partner transport.

use async_trait::async_trait;
use edgeshim_core::transport::{HttpTransport, TransportError, TransportResponse};
use mockall::mock;
use serde_json::Value;
use std::fmt;

mock! {
    pub HttpTransport {}

    #[async_trait]
    impl HttpTransport for HttpTransport {
        async fn get(
            &self,
            url: &str,
            params: &[(String, String)],
        ) -> Result<TransportResponse, TransportError>;
        async fn post_json(
            &self,
            url: &str,
            body: &Value,
        ) -> Result<TransportResponse, TransportError>;
        async fn post_multipart(
            &self,
            url: &str,
            fields: &[(String, String)],
        ) -> Result<TransportResponse, TransportError>;
        async fn delete(&self, url: &str) -> Result<TransportResponse, TransportError>;
    }
}

impl fmt::Debug for MockHttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockHttpTransport").finish_non_exhaustive()
    }
}

/// Mock transport on which every call fails the test
pub fn create_silent_transport() -> MockHttpTransport {
    let mut transport = MockHttpTransport::new();
    transport.expect_get().times(0);
    transport.expect_post_json().times(0);
    transport.expect_post_multipart().times(0);
    transport.expect_delete().times(0);
    transport
}
