//! Kubernetes service-function API transport helpers

use edgeshim_core::error::PlatformKind;
use edgeshim_core::transport::{HttpTransport, TransportResponse};
use serde_json::Value;
use std::sync::Arc;

use crate::http::{describe_json_error, PartnerHttp};

/// HTTP helpers bound to a service-function API base URL
pub fn kubernetes_http(base_url: &str, transport: Arc<dyn HttpTransport>) -> PartnerHttp {
    PartnerHttp::new(PlatformKind::Kubernetes, base_url, transport, describe_kubernetes_error)
}

/// The API answers problem documents (`{title, detail, status}`); the title
/// is prefixed to the detail when both are present
pub fn describe_kubernetes_error(response: &TransportResponse) -> String {
    let problem = response.json::<Value>().ok().and_then(|body| {
        let title = body.get("title").and_then(Value::as_str)?.to_string();
        let detail = body.get("detail").and_then(Value::as_str).map(str::to_string);
        Some((title, detail))
    });

    match problem {
        Some((title, Some(detail))) => format!("{}: {}", title, detail),
        Some((title, None)) => title,
        None => describe_json_error(response),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeshim_core::transport::{Method, RequestSummary};
    use serde_json::json;

    fn response(body: &str) -> TransportResponse {
        TransportResponse {
            status: 400,
            url: "http://k8s/serviceFunction".into(),
            request: RequestSummary {
                method: Method::Post,
                url: "http://k8s/serviceFunction".into(),
            },
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn problem_documents_combine_title_and_detail() {
        let body = json!({
            "title": "Bad Request",
            "detail": "'service_function_image' is a required property",
            "status": 400
        })
        .to_string();
        assert_eq!(
            describe_kubernetes_error(&response(&body)),
            "Bad Request: 'service_function_image' is a required property"
        );
    }

    #[test]
    fn other_bodies_fall_back_to_generic_description() {
        assert_eq!(describe_kubernetes_error(&response(r#"{"message":"boom"}"#)), "boom");
        assert_eq!(describe_kubernetes_error(&response("upstream reset")), "upstream reset");
    }
}
