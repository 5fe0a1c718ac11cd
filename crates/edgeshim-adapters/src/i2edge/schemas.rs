//! i2Edge wire models

use edgeshim_core::instances::InstanceRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Node selector label carrying the zone of an application instance
pub const ZONE_SELECTOR_LABEL: &str = "feature.node.kubernetes.io/zoneID";

/// Entry of `GET /zones/list`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneListItem {
    pub zone_id: Option<String>,
    pub node_name: Option<String>,
    pub geography_details: Option<String>,
    pub geolocation: Option<String>,
}

/// Multipart form of `POST /artefact`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactOnboarding {
    pub artefact_id: String,
    pub name: String,
    pub repo_name: Option<String>,
    pub repo_type: String,
    pub repo_url: String,
    pub repo_user_name: Option<String>,
    pub repo_password: Option<String>,
    pub repo_token: Option<String>,
}

impl ArtefactOnboarding {
    /// Form fields in wire order; absent optional values are left out
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("artefact_id".to_string(), self.artefact_id.clone()),
            ("name".to_string(), self.name.clone()),
            ("repo_type".to_string(), self.repo_type.clone()),
            ("repo_url".to_string(), self.repo_url.clone()),
        ];
        let optional = [
            ("repo_name", &self.repo_name),
            ("repo_user_name", &self.repo_user_name),
            ("repo_password", &self.repo_password),
            ("repo_token", &self.repo_token),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                fields.push((name.to_string(), value.clone()));
            }
        }
        fields
    }
}

/// Artefact record of `GET /artefact[/{id}]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtefactRecord {
    pub artefact_id: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub repo_type: Option<String>,
    pub repo_url: Option<String>,
    pub repo_user_name: Option<String>,
    pub repo_password: Option<String>,
    pub repo_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppComponentSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artefact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    #[serde(default, rename = "serviceNameNB", skip_serializing_if = "Option::is_none")]
    pub service_name_nb: Option<String>,
    #[serde(default, rename = "serviceNameEW", skip_serializing_if = "Option::is_none")]
    pub service_name_ew: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppMetaData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_provider_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// `profile_data` of an onboarded application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    #[serde(rename = "app_id")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_provider_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub app_deployment_zones: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_meta_data: Option<AppMetaData>,
    #[serde(default, rename = "appQoSProfile", skip_serializing_if = "Option::is_none")]
    pub app_qos_profile: Option<Value>,
    #[serde(default)]
    pub app_component_specs: Vec<AppComponentSpec>,
}

/// Body of `POST /application/onboarding`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationOnboardingRequest<T: Serialize> {
    pub profile_data: T,
}

/// Onboarded application record of `GET /application/onboarding/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OnboardedApp {
    pub profile_data: Option<ProfileData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInfo {
    pub flavour_id: String,
    pub zone_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDeployData {
    pub app_id: String,
    pub app_provider_id: String,
    pub app_version: String,
    pub zone_info: ZoneInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppParameters {
    pub namespace: String,
}

/// Body of `POST /application_instance`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppDeploy {
    pub app_deploy_data: AppDeployData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_parameters: Option<AppParameters>,
}

/// Answer of `POST /application_instance`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeployResult {
    pub app_instance_id: Option<String>,
    #[serde(alias = "zoneId", rename = "zoneID")]
    pub zone_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppSpec {
    #[serde(default, rename = "nodeSelector")]
    pub node_selector: BTreeMap<String, String>,
}

/// Entry of `GET /application_instances`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppInstanceRecord {
    pub app_instance_id: Option<String>,
    pub app_id: Option<String>,
    pub release_name: Option<String>,
    pub zone_id: Option<String>,
    pub deploy_status: Option<String>,
    #[serde(default)]
    pub app_spec: AppSpec,
}

impl InstanceRecord for AppInstanceRecord {
    fn release_name(&self) -> Option<&str> {
        self.release_name.as_deref()
    }

    /// `zone_id` of the record, or the zone node selector the instance was
    /// scheduled with
    fn zone_id(&self) -> Option<&str> {
        self.zone_id
            .as_deref()
            .or_else(|| self.app_spec.node_selector.get(ZONE_SELECTOR_LABEL).map(String::as_str))
    }

    fn instance_id(&self) -> Option<&str> {
        self.app_instance_id.as_deref()
    }
}

/// Answer of `GET /application_instance/{zone}/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInstanceDetail {
    pub app_instance_state: Option<String>,
    #[serde(default, rename = "accesspointInfo")]
    pub accesspoint_info: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn form_fields_skip_missing_credentials() {
        let form = ArtefactOnboarding {
            artefact_id: "a1".into(),
            name: "chart1".into(),
            repo_name: Some("unknown-repo".into()),
            repo_type: "PUBLICREPO".into(),
            repo_url: "https://example.org/charts".into(),
            repo_user_name: None,
            repo_password: None,
            repo_token: Some("t0k".into()),
        };
        let names: Vec<_> = form.form_fields().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            names,
            vec!["artefact_id", "name", "repo_type", "repo_url", "repo_name", "repo_token"]
        );
    }

    #[test]
    fn instance_zone_falls_back_to_node_selector() {
        let record: AppInstanceRecord = serde_json::from_value(json!({
            "app_instance_id": "i-1",
            "release_name": "nginx",
            "deploy_status": "DEPLOYED",
            "app_spec": { "nodeSelector": { ZONE_SELECTOR_LABEL: "zoneA" } }
        }))
        .unwrap();
        assert_eq!(record.zone_id(), Some("zoneA"));

        let explicit: AppInstanceRecord = serde_json::from_value(json!({
            "app_instance_id": "i-2",
            "zone_id": "zoneB",
            "app_spec": { "nodeSelector": { ZONE_SELECTOR_LABEL: "zoneA" } }
        }))
        .unwrap();
        assert_eq!(explicit.zone_id(), Some("zoneB"));
    }

    #[test]
    fn deploy_body_shape() {
        let body = AppDeploy {
            app_deploy_data: AppDeployData {
                app_id: "demo-1".into(),
                app_provider_id: "acme".into(),
                app_version: "1.0.0".into(),
                zone_info: ZoneInfo {
                    flavour_id: "f1".into(),
                    zone_id: "zoneA".into(),
                },
            },
            app_parameters: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "app_deploy_data": {
                    "appId": "demo-1",
                    "appProviderId": "acme",
                    "appVersion": "1.0.0",
                    "zoneInfo": { "flavourId": "f1", "zoneId": "zoneA" }
                }
            })
        );
    }

    #[test]
    fn deploy_result_accepts_both_zone_spellings() {
        let upper: DeployResult =
            serde_json::from_value(json!({ "app_instance_id": "i-1", "zoneID": "zoneA" })).unwrap();
        let lower: DeployResult =
            serde_json::from_value(json!({ "app_instance_id": "i-1", "zoneId": "zoneA" })).unwrap();
        assert_eq!(upper, lower);
    }
}
