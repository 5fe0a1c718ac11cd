//! Payload fixtures shared by adapter and lifecycle tests.

use serde_json::{json, Value};

/// Federation context used throughout the tests
pub const FEDERATION_CONTEXT: &str = "fed-1";

/// CAMARA application manifest of the `demo-1` nginx application
pub fn camara_manifest() -> Value {
    json!({
        "appId": "demo-1",
        "name": "nginx",
        "version": "1.0.0",
        "appProvider": "acme",
        "packageType": "CONTAINER",
        "appRepo": {
            "type": "PUBLICREPO",
            "imagePath": "docker.io/library/nginx:1.25"
        },
        "requiredResources": {
            "infraKind": "kubernetes",
            "applicationResources": {
                "cpuPool": { "numCPU": 2, "memory": 2048 }
            },
            "isStandalone": false
        },
        "componentSpec": [{
            "componentName": "nginx",
            "networkInterfaces": [{
                "interfaceId": "eth0",
                "protocol": "TCP",
                "port": 80,
                "visibilityType": "VISIBILITY_EXTERNAL"
            }]
        }]
    })
}

/// Deploy targets as sent by CAMARA callers
pub fn app_zones(zone_ids: &[&str]) -> Value {
    Value::Array(
        zone_ids
            .iter()
            .map(|zone_id| json!({ "EdgeCloudZone": { "edgeCloudZoneId": zone_id } }))
            .collect(),
    )
}

/// GSMA artefact upload without repository name or type
pub fn gsma_artefact() -> Value {
    json!({
        "artefactId": "a1",
        "appProviderId": "acme",
        "artefactName": "chart1",
        "artefactVersionInfo": "1.0.0",
        "artefactVirtType": "CONTAINER_TYPE",
        "artefactDescriptorType": "HELM",
        "artefactRepoLocation": { "repoURL": "https://example.org/charts" }
    })
}

/// GSMA onboarding request of `demo-1`
pub fn gsma_onboarding() -> Value {
    json!({
        "appId": "demo-1",
        "appProviderId": "acme",
        "appDeploymentZones": ["zoneA"],
        "appMetaData": {
            "appName": "nginx",
            "version": "1.0.0",
            "appDescription": "reverse proxy",
            "mobilitySupport": false,
            "category": "UTILITY"
        },
        "appQoSProfile": {
            "latencyConstraints": "NONE",
            "multiUserClients": "APP_TYPE_SINGLE_USER",
            "noOfUsersPerAppInst": 1,
            "appProvisioning": true
        },
        "appComponentSpecs": [{
            "serviceNameNB": "nginx-nb",
            "serviceNameEW": "nginx-ew",
            "componentName": "nginx",
            "artefactId": "a1"
        }],
        "edgeAppFQDN": "nginx.demo.example.org"
    })
}

/// GSMA deployment request of `demo-1` into `zone_id`
pub fn gsma_deploy(zone_id: &str, flavour_id: &str) -> Value {
    json!({
        "appId": "demo-1",
        "appVersion": "1.0.0",
        "appProviderId": "acme",
        "zoneInfo": { "zoneId": zone_id, "flavourId": flavour_id },
        "appInstCallbackLink": "https://callbacks.example.org/instances"
    })
}

/// Zone resource record keyed with `zone_key` (`zoneId` or `zoneID`)
pub fn zone_registered_data(zone_key: &str, zone_id: &str) -> Value {
    let mut zone = json!({
        "reservedComputeResources": [{ "cpuArchType": "ISA_X86_64", "numCPU": 4, "memory": 8192 }],
        "computeResourceQuotaLimits": [
            { "cpuArchType": "ISA_X86_64", "numCPU": 16, "memory": 32768 }
        ],
        "flavoursSupported": [{
            "flavourId": "small",
            "cpuArchType": "ISA_X86_64",
            "supportedOSTypes": [{
                "architecture": "x86_64",
                "distribution": "UBUNTU",
                "version": "OS_VERSION_UBUNTU_2204_LTS",
                "license": "OS_LICENSE_TYPE_FREE"
            }],
            "numCPU": 2,
            "memorySize": 4096,
            "storageSize": 20,
            "fpga": ["xilinx-u250"],
            "vpu": ["movidius"],
            "cpuExclusivity": ["core-0"]
        }]
    });
    if let Value::Object(fields) = &mut zone {
        fields.insert(zone_key.to_string(), Value::String(zone_id.to_string()));
    }
    zone
}
