//! CAMARA edge cloud models
//!
//! Request and response shapes of the standardized (CAMARA) edge-cloud API.
//! Field names follow the wire format, so every type is `camelCase` on the wire.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::{EdgeCloudError, EdgeCloudResult};
use crate::validation::{require_name, require_non_empty, require_port, Validate};

/// Zone availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeCloudZoneStatus {
    Active,
    Inactive,
    Unknown,
}

impl EdgeCloudZoneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeCloudZoneStatus::Active => "active",
            EdgeCloudZoneStatus::Inactive => "inactive",
            EdgeCloudZoneStatus::Unknown => "unknown",
        }
    }
}

impl Display for EdgeCloudZoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeCloudZoneStatus {
    type Err = EdgeCloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(EdgeCloudZoneStatus::Active),
            "inactive" => Ok(EdgeCloudZoneStatus::Inactive),
            "unknown" => Ok(EdgeCloudZoneStatus::Unknown),
            other => Err(EdgeCloudError::validation(
                "status",
                format!("'{}' is not one of active, inactive, unknown", other),
            )),
        }
    }
}

/// Edge cloud zone as exposed to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeCloudZone {
    /// Always a UUID, see [`crate::ids::ensure_valid_uuid`]
    pub edge_cloud_zone_id: String,
    pub edge_cloud_zone_name: String,
    pub edge_cloud_provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_cloud_region: Option<String>,
    pub edge_cloud_zone_status: EdgeCloudZoneStatus,
}

impl EdgeCloudZone {
    /// Whether the zone passes the optional region and status filters
    pub fn matches(&self, region: Option<&str>, status: Option<EdgeCloudZoneStatus>) -> bool {
        let region_ok = region.map_or(true, |r| self.edge_cloud_region.as_deref() == Some(r));
        let status_ok = status.map_or(true, |s| self.edge_cloud_zone_status == s);
        region_ok && status_ok
    }
}

// ---------------------------------------------------------------------------
// Artefacts
// ---------------------------------------------------------------------------

/// Where an artefact's repository lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepoType {
    Upload,
    #[default]
    #[serde(rename = "PUBLICREPO")]
    PublicRepo,
    #[serde(rename = "PRIVATEREPO")]
    PrivateRepo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VirtType {
    VmType,
    ContainerType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileFormat {
    Winzip,
    Tar,
    Text,
    Targz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DescriptorType {
    Helm,
    Terraform,
    Ansible,
    Shell,
    Componentspec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtefactRepoLocation {
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Artefact registration request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtefactCreate {
    pub artefact_id: String,
    pub artefact_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    #[serde(default)]
    pub repo_type: RepoType,
    pub artefact_repo_location: ArtefactRepoLocation,
}

impl ArtefactCreate {
    /// Public repository artefact without credentials
    pub fn new(
        artefact_id: impl Into<String>,
        artefact_name: impl Into<String>,
        repo_url: impl Into<String>,
    ) -> Self {
        Self {
            artefact_id: artefact_id.into(),
            artefact_name: artefact_name.into(),
            repo_name: None,
            repo_type: RepoType::PublicRepo,
            artefact_repo_location: ArtefactRepoLocation {
                repo_url: repo_url.into(),
                user_name: None,
                password: None,
                token: None,
            },
        }
    }
}

impl Validate for ArtefactCreate {
    fn validate(&self) -> EdgeCloudResult<()> {
        require_non_empty("artefactId", &self.artefact_id)?;
        require_non_empty("artefactName", &self.artefact_name)?;
        require_non_empty("artefactRepoLocation.repoURL", &self.artefact_repo_location.repo_url)
    }
}

/// Artefact as exposed to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artefact {
    pub artefact_id: String,
    pub artefact_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_provider_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artefact_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artefact_version_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artefact_virt_type: Option<VirtType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artefact_file_format: Option<FileFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artefact_descriptor_type: Option<DescriptorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_type: Option<RepoType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artefact_repo_location: Option<ArtefactRepoLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtefactCreated {
    pub artefact_id: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Application manifest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PackageType {
    Qcow2,
    Ova,
    Container,
    Helm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRepo {
    #[serde(rename = "type")]
    pub repo_type: RepoType,
    pub image_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InfraKind {
    Kubernetes,
    VirtualMachine,
    Container,
    Docker,
    Any,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    pub min_number_of_nodes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_node_cpu: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_node_memory: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuPool {
    #[serde(rename = "numCPU")]
    pub num_cpu: u32,
    /// Megabytes
    pub memory: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology: Option<Topology>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuPool {
    #[serde(rename = "numGPU")]
    pub num_gpu: u32,
    #[serde(rename = "gpuMemory")]
    pub gpu_memory: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology: Option<Topology>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_pool: Option<CpuPool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_pool: Option<GpuPool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredResources {
    pub infra_kind: InfraKind,
    #[serde(default)]
    pub application_resources: ApplicationResources,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_standalone: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Tcp,
    Udp,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisibilityType {
    VisibilityExternal,
    VisibilityInternal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    pub interface_id: String,
    pub protocol: Protocol,
    pub port: u32,
    pub visibility_type: VisibilityType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    pub component_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub network_interfaces: Vec<NetworkInterface>,
}

/// Application manifest submitted for onboarding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppManifest {
    pub app_id: String,
    pub name: String,
    pub version: String,
    pub app_provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_type: Option<PackageType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_repo: Option<AppRepo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_resources: Option<RequiredResources>,
    pub component_spec: Vec<ComponentSpec>,
}

impl Validate for AppManifest {
    fn validate(&self) -> EdgeCloudResult<()> {
        require_non_empty("appId", &self.app_id)?;
        require_name("name", &self.name)?;
        require_non_empty("version", &self.version)?;
        require_name("appProvider", &self.app_provider)?;

        if let Some(repo) = &self.app_repo {
            require_non_empty("appRepo.imagePath", &repo.image_path)?;
        }
        if self.component_spec.is_empty() {
            return Err(EdgeCloudError::validation(
                "componentSpec",
                "at least one component is required",
            ));
        }
        for (i, component) in self.component_spec.iter().enumerate() {
            require_non_empty(
                &format!("componentSpec[{}].componentName", i),
                &component.component_name,
            )?;
            for (j, iface) in component.network_interfaces.iter().enumerate() {
                let prefix = format!("componentSpec[{}].networkInterfaces[{}]", i, j);
                require_non_empty(&format!("{}.interfaceId", prefix), &iface.interface_id)?;
                require_port(&format!("{}.port", prefix), iface.port)?;
            }
        }
        Ok(())
    }
}

/// Body of `get_onboarded_app`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppManifestEnvelope {
    pub app_manifest: AppManifest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppOnboarded {
    pub app_id: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Deployment
// ---------------------------------------------------------------------------

/// Reference to a partner zone in a deploy request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRef {
    /// Partner zone id, passed to the backend as-is
    pub edge_cloud_zone_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_cloud_zone_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_cloud_zone_status: Option<EdgeCloudZoneStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_cloud_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_cloud_region: Option<String>,
}

/// Deploy target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppZone {
    #[serde(rename = "EdgeCloudZone")]
    pub edge_cloud_zone: ZoneRef,
}

impl AppZone {
    pub fn new(zone_id: impl Into<String>) -> Self {
        Self {
            edge_cloud_zone: ZoneRef {
                edge_cloud_zone_id: zone_id.into(),
                edge_cloud_zone_name: None,
                edge_cloud_zone_status: None,
                edge_cloud_provider: None,
                edge_cloud_region: None,
            },
        }
    }

    pub fn zone_id(&self) -> &str {
        &self.edge_cloud_zone.edge_cloud_zone_id
    }
}

/// The zone a deployment goes to: the first one requested.
pub fn first_zone(zones: &[AppZone]) -> EdgeCloudResult<&str> {
    let zone = zones
        .first()
        .ok_or_else(|| EdgeCloudError::validation("appZones", "at least one zone is required"))?;
    require_non_empty("appZones[0].EdgeCloudZone.edgeCloudZoneId", zone.zone_id())?;
    Ok(zone.zone_id())
}

/// Body of a successful deploy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInstanceCreated {
    pub app_inst_identifier: String,
    pub zone_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceStatus {
    Instantiating,
    Ready,
    Terminating,
    Unknown,
}

impl InstanceStatus {
    /// Interpret a partner status string. Failed partner instances have no
    /// standardized status and read as `unknown`.
    pub fn from_partner(status: Option<&str>) -> Self {
        match status.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("ready" | "running" | "deployed" | "succeeded") => InstanceStatus::Ready,
            Some("instantiating" | "pending" | "deploying" | "creating" | "containercreating") => {
                InstanceStatus::Instantiating
            }
            Some("terminating" | "deleting" | "undeploying") => InstanceStatus::Terminating,
            _ => InstanceStatus::Unknown,
        }
    }
}

/// Deployed application instance as exposed to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInstanceInfo {
    pub name: String,
    pub app_id: String,
    pub app_instance_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_provider: Option<String>,
    pub status: InstanceStatus,
    pub edge_cloud_zone_id: String,
}

/// Optional filters for `get_all_deployed_apps`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployedAppsFilter {
    pub app_id: Option<String>,
    pub app_instance_id: Option<String>,
    pub zone_id: Option<String>,
}

impl DeployedAppsFilter {
    pub fn for_app(app_id: impl Into<String>) -> Self {
        Self {
            app_id: Some(app_id.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, instance: &AppInstanceInfo) -> bool {
        fn ok(filter: &Option<String>, value: &str) -> bool {
            filter.as_deref().map_or(true, |f| f == value)
        }
        ok(&self.app_id, &instance.app_id)
            && ok(&self.app_instance_id, &instance.app_instance_id)
            && ok(&self.zone_id, &instance.edge_cloud_zone_id)
    }
}

/// Plain confirmation body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub response: String,
}

impl Acknowledgement {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}
