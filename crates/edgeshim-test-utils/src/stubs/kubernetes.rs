//! Kubernetes service-function API stubs

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `GET /nodes` with one ready and one not-ready node
pub async fn nodes(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nodes": [
                { "id": "node-a", "name": "edge-a", "location": "Athens", "status": "Ready" },
                { "id": "node-b", "name": "edge-b", "location": "Patras", "status": "NotReady" }
            ]
        })))
        .mount(server)
        .await;
}

/// Registered service function as the API returns it
pub fn service_function_record(app_id: &str, name: &str) -> Value {
    json!({
        "app_id": app_id,
        "service_function_name": name,
        "service_function_image": "docker.io/library/nginx:1.25",
        "application_ports": [80],
        "app_provider": "acme",
        "version": "1.0.0"
    })
}

/// `GET /serviceFunction/{app_id}`
pub async fn service_function(server: &MockServer, app_id: &str, name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/serviceFunction/{}", app_id)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(service_function_record(app_id, name)),
        )
        .mount(server)
        .await;
}

/// `GET /deployedServiceFunctions` answering `records`
pub async fn deployed_functions(server: &MockServer, records: Value) {
    Mock::given(method("GET"))
        .and(path("/deployedServiceFunctions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
        .mount(server)
        .await;
}
