//! Kubernetes service-function API wire models

use edgeshim_core::camara::EdgeCloudZoneStatus;
use edgeshim_core::instances::InstanceRecord;
use serde::{Deserialize, Serialize};

/// Cluster node, one per edge zone
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Node {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

impl Node {
    pub fn zone_status(&self) -> EdgeCloudZoneStatus {
        match self.status.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("ready") => EdgeCloudZoneStatus::Active,
            Some("notready") => EdgeCloudZoneStatus::Inactive,
            _ => EdgeCloudZoneStatus::Unknown,
        }
    }
}

/// Answer of `GET /nodes`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeList {
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// Body of `POST /serviceFunction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceFunctionRegistration {
    pub app_id: String,
    pub service_function_name: String,
    pub service_function_image: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub application_ports: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Registered service function of `GET /serviceFunction[s]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceFunction {
    pub app_id: Option<String>,
    pub service_function_name: Option<String>,
    pub service_function_image: Option<String>,
    #[serde(default)]
    pub application_ports: Vec<u32>,
    pub app_provider: Option<String>,
    pub version: Option<String>,
}

/// Answer of `GET /serviceFunctions`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceFunctionList {
    #[serde(default)]
    pub apps: Vec<ServiceFunction>,
}

/// Body of `POST /deployedServiceFunction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployServiceFunction {
    pub service_function_name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Answer of `POST /deployedServiceFunction`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeployedServiceFunctionCreated {
    pub service_function_instance_id: Option<String>,
    pub location: Option<String>,
}

/// Entry of `GET /deployedServiceFunctions`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeployedServiceFunction {
    pub service_function_instance_id: Option<String>,
    pub service_function_instance_name: Option<String>,
    pub service_function_catalogue_name: Option<String>,
    pub app_id: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
}

impl InstanceRecord for DeployedServiceFunction {
    fn release_name(&self) -> Option<&str> {
        self.service_function_catalogue_name.as_deref()
    }

    fn zone_id(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn instance_id(&self) -> Option<&str> {
        self.service_function_instance_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn node_status_maps_to_zone_status() {
        let node = |status: Option<&str>| Node {
            id: Some("n1".into()),
            name: None,
            location: None,
            status: status.map(str::to_string),
        };
        assert_eq!(node(Some("Ready")).zone_status(), EdgeCloudZoneStatus::Active);
        assert_eq!(node(Some("NotReady")).zone_status(), EdgeCloudZoneStatus::Inactive);
        assert_eq!(node(Some("Cordoned")).zone_status(), EdgeCloudZoneStatus::Unknown);
        assert_eq!(node(None).zone_status(), EdgeCloudZoneStatus::Unknown);
    }

    #[test]
    fn registration_omits_empty_optionals() {
        let body = ServiceFunctionRegistration {
            app_id: "demo-1".into(),
            service_function_name: "nginx".into(),
            service_function_image: "docker.io/library/nginx:1.25".into(),
            application_ports: vec![],
            app_provider: None,
            version: Some("1.0.0".into()),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "app_id": "demo-1",
                "service_function_name": "nginx",
                "service_function_image": "docker.io/library/nginx:1.25",
                "version": "1.0.0"
            })
        );
    }

    #[test]
    fn deployed_function_is_matched_by_catalogue_name_and_location() {
        let record: DeployedServiceFunction = serde_json::from_value(json!({
            "service_function_instance_id": "sf-1",
            "service_function_instance_name": "nginx-x7",
            "service_function_catalogue_name": "nginx",
            "status": "running",
            "location": "node-a"
        }))
        .unwrap();
        assert_eq!(record.release_name(), Some("nginx"));
        assert_eq!(record.zone_id(), Some("node-a"));
        assert_eq!(record.instance_id(), Some("sf-1"));
    }
}
