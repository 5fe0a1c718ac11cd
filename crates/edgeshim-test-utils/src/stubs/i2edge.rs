//! i2Edge partner stubs

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `GET /zones/list` with one non-UUID and one UUID zone
pub async fn zones_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/zones/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "zoneId": "Omega",
                "nodeName": "i2edge-node-1",
                "geographyDetails": "Barcelona",
                "geolocation": "41.3851,2.1734"
            },
            {
                "zoneId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "nodeName": "i2edge-node-2",
                "geographyDetails": "Madrid"
            }
        ])))
        .mount(server)
        .await;
}

/// Onboarded application record as i2Edge stores it
pub fn onboarded_record(app_id: &str, app_name: &str) -> Value {
    json!({
        "profile_data": {
            "app_id": app_id,
            "appProviderId": "acme",
            "appDeploymentZones": ["zoneA"],
            "appMetaData": { "appName": app_name, "version": "1.0.0" },
            "appComponentSpecs": [{ "artefactId": "a1", "componentName": app_name }]
        }
    })
}

/// `GET /application/onboarding/{app_id}`
pub async fn onboarded_app(server: &MockServer, app_id: &str, app_name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/application/onboarding/{}", app_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(onboarded_record(app_id, app_name)))
        .mount(server)
        .await;
}

/// `GET /application_instances` answering `records`
pub async fn application_instances(server: &MockServer, records: Value) {
    Mock::given(method("GET"))
        .and(path("/application_instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
        .mount(server)
        .await;
}
