//! JSON Schemas for outbound response bodies.
//!
//! Every synthetic body an adapter returns is checked against the schema of
//! its operation before it leaves the adapter, so callers only ever see
//! schema-valid bodies.

use jsonschema::JSONSchema;
use lazy_static::lazy_static;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::error::{EdgeCloudError, EdgeCloudResult};

const UUID_PATTERN: &str =
    "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

/// Response body shapes, one per operation family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodySchema {
    // CAMARA
    EdgeCloudZones,
    AppOnboarded,
    AppManifest,
    AppManifests,
    AppInstanceCreated,
    AppInstance,
    AppInstances,
    Artefact,
    Artefacts,
    ArtefactCreated,
    Acknowledgement,
    // GSMA
    ZonesList,
    ZoneRegisteredData,
    ZoneRegisteredDataList,
    AcceptedZoneResourceInfo,
    OnboardedAppGsma,
    AppInstanceState,
    ZoneAppInstances,
}

impl BodySchema {
    const ALL: [BodySchema; 18] = [
        BodySchema::EdgeCloudZones,
        BodySchema::AppOnboarded,
        BodySchema::AppManifest,
        BodySchema::AppManifests,
        BodySchema::AppInstanceCreated,
        BodySchema::AppInstance,
        BodySchema::AppInstances,
        BodySchema::Artefact,
        BodySchema::Artefacts,
        BodySchema::ArtefactCreated,
        BodySchema::Acknowledgement,
        BodySchema::ZonesList,
        BodySchema::ZoneRegisteredData,
        BodySchema::ZoneRegisteredDataList,
        BodySchema::AcceptedZoneResourceInfo,
        BodySchema::OnboardedAppGsma,
        BodySchema::AppInstanceState,
        BodySchema::ZoneAppInstances,
    ];

    /// The JSON Schema document for this body
    pub fn document(&self) -> Value {
        match self {
            BodySchema::EdgeCloudZones => array_of(edge_cloud_zone()),
            BodySchema::AppOnboarded => json!({
                "type": "object",
                "required": ["appId", "message"],
                "properties": {
                    "appId": non_empty_string(),
                    "message": { "type": "string" }
                }
            }),
            BodySchema::AppManifest => json!({
                "type": "object",
                "required": ["appManifest"],
                "properties": { "appManifest": app_manifest() }
            }),
            BodySchema::AppManifests => array_of(app_manifest()),
            BodySchema::AppInstanceCreated => json!({
                "type": "object",
                "required": ["appInstIdentifier", "zoneId"],
                "properties": {
                    "appInstIdentifier": non_empty_string(),
                    "zoneId": non_empty_string()
                }
            }),
            BodySchema::AppInstance => app_instance_info(),
            BodySchema::AppInstances => array_of(app_instance_info()),
            BodySchema::Artefact => artefact(),
            BodySchema::Artefacts => array_of(artefact()),
            BodySchema::ArtefactCreated => json!({
                "type": "object",
                "required": ["artefactId", "message"],
                "properties": {
                    "artefactId": non_empty_string(),
                    "message": { "type": "string" }
                }
            }),
            BodySchema::Acknowledgement => json!({
                "type": "object",
                "required": ["response"],
                "properties": { "response": { "type": "string" } }
            }),
            BodySchema::ZonesList => array_of(json!({
                "type": "object",
                "required": ["zoneId", "geographyDetails"],
                "properties": {
                    "zoneId": non_empty_string(),
                    "geolocation": { "type": "string" },
                    "geographyDetails": { "type": "string" }
                }
            })),
            BodySchema::ZoneRegisteredData => zone_registered_data(),
            BodySchema::ZoneRegisteredDataList => array_of(zone_registered_data()),
            BodySchema::AcceptedZoneResourceInfo => json!({
                "type": "object",
                "required": ["acceptedZoneResourceInfo"],
                "properties": {
                    "acceptedZoneResourceInfo": array_of(zone_registered_data())
                }
            }),
            BodySchema::OnboardedAppGsma => json!({
                "type": "object",
                "required": ["appId", "appProviderId", "appMetaData", "appComponentSpecs"],
                "properties": {
                    "appId": non_empty_string(),
                    "appProviderId": non_empty_string(),
                    "appDeploymentZones": { "type": "array", "items": { "type": "string" } },
                    "appMetaData": {
                        "type": "object",
                        "required": ["appName", "version"],
                        "properties": {
                            "appName": non_empty_string(),
                            "version": non_empty_string()
                        }
                    },
                    "appQoSProfile": { "type": "object" },
                    "appComponentSpecs": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["artefactId"],
                            "properties": { "artefactId": non_empty_string() }
                        }
                    }
                }
            }),
            BodySchema::AppInstanceState => json!({
                "type": "object",
                "required": ["appInstanceState"],
                "properties": {
                    "appInstanceState": gsma_instance_state(),
                    "accesspointInfo": { "type": "array" }
                }
            }),
            BodySchema::ZoneAppInstances => array_of(json!({
                "type": "object",
                "required": ["zoneId", "appInstanceInfo"],
                "properties": {
                    "zoneId": non_empty_string(),
                    "appInstanceInfo": array_of(json!({
                        "type": "object",
                        "required": ["appInstIdentifier", "appInstanceState"],
                        "properties": {
                            "appInstIdentifier": non_empty_string(),
                            "appInstanceState": gsma_instance_state()
                        }
                    }))
                }
            })),
        }
    }
}

fn array_of(items: Value) -> Value {
    json!({ "type": "array", "items": items })
}

fn non_empty_string() -> Value {
    json!({ "type": "string", "minLength": 1 })
}

fn gsma_instance_state() -> Value {
    json!({ "enum": ["PENDING", "READY", "FAILED", "TERMINATING", "UNKNOWN"] })
}

fn edge_cloud_zone() -> Value {
    json!({
        "type": "object",
        "required": [
            "edgeCloudZoneId",
            "edgeCloudZoneName",
            "edgeCloudProvider",
            "edgeCloudZoneStatus"
        ],
        "properties": {
            "edgeCloudZoneId": { "type": "string", "pattern": UUID_PATTERN },
            "edgeCloudZoneName": non_empty_string(),
            "edgeCloudProvider": non_empty_string(),
            "edgeCloudRegion": { "type": "string" },
            "edgeCloudZoneStatus": { "enum": ["active", "inactive", "unknown"] }
        }
    })
}

fn app_manifest() -> Value {
    json!({
        "type": "object",
        "required": ["appId", "name", "version", "appProvider", "componentSpec"],
        "properties": {
            "appId": non_empty_string(),
            "name": non_empty_string(),
            "version": non_empty_string(),
            "appProvider": non_empty_string(),
            "packageType": { "enum": ["QCOW2", "OVA", "CONTAINER", "HELM"] },
            "appRepo": {
                "type": "object",
                "required": ["type", "imagePath"],
                "properties": {
                    "type": { "enum": ["UPLOAD", "PUBLICREPO", "PRIVATEREPO"] },
                    "imagePath": non_empty_string()
                }
            },
            "componentSpec": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "required": ["componentName"],
                    "properties": {
                        "componentName": non_empty_string(),
                        "networkInterfaces": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "required": ["interfaceId", "protocol", "port", "visibilityType"],
                                "properties": {
                                    "protocol": { "enum": ["TCP", "UDP", "ANY"] },
                                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 },
                                    "visibilityType": {
                                        "enum": ["VISIBILITY_EXTERNAL", "VISIBILITY_INTERNAL"]
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

fn app_instance_info() -> Value {
    json!({
        "type": "object",
        "required": ["name", "appId", "appInstanceId", "status", "edgeCloudZoneId"],
        "properties": {
            "name": non_empty_string(),
            "appId": non_empty_string(),
            "appInstanceId": non_empty_string(),
            "appProvider": { "type": "string" },
            "status": { "enum": ["instantiating", "ready", "terminating", "unknown"] },
            "edgeCloudZoneId": non_empty_string()
        }
    })
}

fn artefact() -> Value {
    json!({
        "type": "object",
        "required": ["artefactId", "artefactName"],
        "properties": {
            "artefactId": non_empty_string(),
            "artefactName": non_empty_string(),
            "appProviderId": { "type": "string" },
            "artefactDescription": { "type": "string" },
            "artefactVersionInfo": { "type": "string" },
            "artefactVirtType": { "enum": ["VM_TYPE", "CONTAINER_TYPE"] },
            "artefactFileFormat": { "enum": ["WINZIP", "TAR", "TEXT", "TARGZ"] },
            "artefactDescriptorType": {
                "enum": ["HELM", "TERRAFORM", "ANSIBLE", "SHELL", "COMPONENTSPEC"]
            },
            "repoType": { "enum": ["UPLOAD", "PUBLICREPO", "PRIVATEREPO"] },
            "artefactRepoLocation": {
                "type": "object",
                "required": ["repoURL"],
                "properties": {
                    "repoURL": non_empty_string(),
                    "userName": { "type": "string" },
                    "password": { "type": "string" },
                    "token": { "type": "string" }
                }
            }
        }
    })
}

fn zone_registered_data() -> Value {
    json!({
        "type": "object",
        "required": ["zoneId"],
        "properties": {
            "zoneId": non_empty_string(),
            "reservedComputeResources": { "type": "array" },
            "computeResourceQuotaLimits": { "type": "array" },
            "flavoursSupported": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["flavourId", "cpuArchType", "numCPU", "memorySize", "storageSize"]
                }
            },
            "networkResources": { "type": "object" },
            "zoneServiceLevelObjsInfo": { "type": "object" }
        }
    })
}

lazy_static! {
    static ref REGISTRY: HashMap<BodySchema, Result<JSONSchema, String>> = BodySchema::ALL
        .iter()
        .map(|schema| {
            let compiled = JSONSchema::compile(&schema.document()).map_err(|e| e.to_string());
            (*schema, compiled)
        })
        .collect();
}

/// Check `body` against the schema registered for `schema`.
///
/// Violations are reported as [`EdgeCloudError::Mapping`]: the adapter built
/// a body that does not satisfy the standardized contract.
pub fn check_body(schema: BodySchema, body: &Value) -> EdgeCloudResult<()> {
    let compiled = match REGISTRY.get(&schema) {
        Some(Ok(compiled)) => compiled,
        Some(Err(e)) => {
            return Err(EdgeCloudError::Mapping(format!(
                "schema {:?} failed to compile: {}",
                schema, e
            )))
        }
        None => {
            return Err(EdgeCloudError::Mapping(format!(
                "no schema registered for {:?}",
                schema
            )))
        }
    };

    if let Err(errors) = compiled.validate(body) {
        let details = errors
            .map(|e| format!("{} (at '{}')", e, e.instance_path))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(EdgeCloudError::Mapping(format!(
            "{:?} body violates the standardized schema: {}",
            schema, details
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_compiles() {
        for schema in BodySchema::ALL {
            assert!(
                JSONSchema::compile(&schema.document()).is_ok(),
                "{:?} does not compile",
                schema
            );
        }
    }

    #[test]
    fn zone_id_must_be_a_uuid() {
        let body = json!([{
            "edgeCloudZoneId": "Omega",
            "edgeCloudZoneName": "node-1",
            "edgeCloudProvider": "i2edge",
            "edgeCloudZoneStatus": "unknown"
        }]);
        let err = check_body(BodySchema::EdgeCloudZones, &body).unwrap_err();
        assert!(err.is_mapping());
        assert!(err.to_string().contains("/0/edgeCloudZoneId"));
    }

    #[test]
    fn accepts_a_valid_deploy_result() {
        let body = json!({ "appInstIdentifier": "inst-1", "zoneId": "zoneA" });
        assert!(check_body(BodySchema::AppInstanceCreated, &body).is_ok());
    }

    #[test]
    fn rejects_an_empty_instance_identifier() {
        let body = json!({ "appInstIdentifier": "", "zoneId": "zoneA" });
        assert!(check_body(BodySchema::AppInstanceCreated, &body).is_err());
    }
}
