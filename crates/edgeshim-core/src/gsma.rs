//! GSMA Operator Platform federation (EWBI) models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::camara::{ArtefactCreate, ArtefactRepoLocation, InstanceStatus, RepoType};
use crate::error::EdgeCloudResult;
use crate::validation::{require_non_empty, Validate};

/// Repository name used when a federation artefact request has none
pub const DEFAULT_REPO_NAME: &str = "unknown-repo";

// ---------------------------------------------------------------------------
// Zones
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDetails {
    pub zone_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geolocation: Option<String>,
    pub geography_details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HugePage {
    pub page_size: String,
    pub number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuInfo {
    pub gpu_vendor_type: String,
    pub gpu_mode_name: String,
    pub gpu_memory: u64,
    #[serde(rename = "numGPU")]
    pub num_gpu: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeResourceInfo {
    pub cpu_arch_type: String,
    #[serde(rename = "numCPU")]
    pub num_cpu: u32,
    pub memory: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_storage: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu: Option<Vec<GpuInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpu: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fpga: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hugepages: Option<Vec<HugePage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_exclusivity: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsType {
    pub architecture: String,
    pub distribution: String,
    pub version: String,
    pub license: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flavour {
    pub flavour_id: String,
    pub cpu_arch_type: String,
    #[serde(default, rename = "supportedOSTypes")]
    pub supported_os_types: Vec<OsType>,
    #[serde(rename = "numCPU")]
    pub num_cpu: u32,
    pub memory_size: u64,
    pub storage_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu: Option<Vec<GpuInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fpga: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpu: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hugepages: Option<Vec<HugePage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_exclusivity: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkResources {
    pub egress_band_width: u64,
    #[serde(rename = "dedicatedNIC")]
    pub dedicated_nic: u32,
    pub support_sriov: bool,
    #[serde(rename = "supportDPDK")]
    pub support_dpdk: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatencyRange {
    pub min_latency: u32,
    pub max_latency: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JitterRange {
    pub min_jitter: u32,
    pub max_jitter: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThroughputRange {
    pub min_throughput: u32,
    pub max_throughput: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneServiceLevelObjsInfo {
    pub latency_ranges: LatencyRange,
    pub jitter_ranges: JitterRange,
    pub throughput_ranges: ThroughputRange,
}

/// Zone resources offered to a federation partner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRegisteredData {
    #[serde(alias = "zoneID")]
    pub zone_id: String,
    #[serde(default)]
    pub reserved_compute_resources: Vec<ComputeResourceInfo>,
    #[serde(default)]
    pub compute_resource_quota_limits: Vec<ComputeResourceInfo>,
    #[serde(default)]
    pub flavours_supported: Vec<Flavour>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_resources: Option<NetworkResources>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_service_level_objs_info: Option<ZoneServiceLevelObjsInfo>,
}

/// Body of an availability-zone synchronization request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityZoneInfoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_availability_zones: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avail_zone_notif_link: Option<String>,
}

impl AvailabilityZoneInfoRequest {
    /// Whether `zone_id` is among the zones the partner accepted
    pub fn accepts(&self, zone_id: &str) -> bool {
        self.accepted_availability_zones
            .as_ref()
            .map_or(true, |zones| zones.iter().any(|z| z == zone_id))
    }
}

impl Validate for AvailabilityZoneInfoRequest {
    fn validate(&self) -> EdgeCloudResult<()> {
        if let Some(zones) = &self.accepted_availability_zones {
            for (i, zone) in zones.iter().enumerate() {
                require_non_empty(&format!("acceptedAvailabilityZones[{}]", i), zone)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedZoneResourceInfo {
    pub accepted_zone_resource_info: Vec<ZoneRegisteredData>,
}

// ---------------------------------------------------------------------------
// Artefacts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GsmaRepoLocation {
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Federation artefact upload request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtefactCreateRequest {
    pub artefact_id: String,
    pub artefact_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_provider_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artefact_version_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artefact_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_type: Option<RepoType>,
    pub artefact_repo_location: GsmaRepoLocation,
}

impl ArtefactCreateRequest {
    /// Convert into the artefact registration shared with the CAMARA path,
    /// filling in the repository defaults
    pub fn into_artefact_create(self) -> ArtefactCreate {
        let location = self.artefact_repo_location;
        ArtefactCreate {
            artefact_id: self.artefact_id,
            artefact_name: self.artefact_name,
            repo_name: Some(
                location
                    .repo_name
                    .unwrap_or_else(|| DEFAULT_REPO_NAME.to_string()),
            ),
            repo_type: self.repo_type.unwrap_or(RepoType::PublicRepo),
            artefact_repo_location: ArtefactRepoLocation {
                repo_url: location.repo_url,
                user_name: location.user_name,
                password: location.password,
                token: location.token,
            },
        }
    }
}

impl Validate for ArtefactCreateRequest {
    fn validate(&self) -> EdgeCloudResult<()> {
        require_non_empty("artefactId", &self.artefact_id)?;
        require_non_empty("artefactName", &self.artefact_name)?;
        require_non_empty("artefactRepoLocation.repoURL", &self.artefact_repo_location.repo_url)
    }
}

// ---------------------------------------------------------------------------
// Application onboarding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppMetaData {
    pub app_name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobility_support: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppComponentSpec {
    pub artefact_id: String,
    #[serde(default, rename = "serviceNameNB", skip_serializing_if = "Option::is_none")]
    pub service_name_nb: Option<String>,
    #[serde(default, rename = "serviceNameEW", skip_serializing_if = "Option::is_none")]
    pub service_name_ew: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
}

/// Federation onboarding request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppOnboardingRequest {
    pub app_id: String,
    pub app_provider_id: String,
    #[serde(default)]
    pub app_deployment_zones: Vec<String>,
    pub app_meta_data: AppMetaData,
    #[serde(default, rename = "appQoSProfile", skip_serializing_if = "Option::is_none")]
    pub app_qos_profile: Option<Value>,
    pub app_component_specs: Vec<AppComponentSpec>,
    #[serde(default, rename = "edgeAppFQDN", skip_serializing_if = "Option::is_none")]
    pub edge_app_fqdn: Option<String>,
    /// Fields passed through to the partner untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for AppOnboardingRequest {
    fn validate(&self) -> EdgeCloudResult<()> {
        require_non_empty("appId", &self.app_id)?;
        require_non_empty("appProviderId", &self.app_provider_id)?;
        require_non_empty("appMetaData.appName", &self.app_meta_data.app_name)?;
        require_non_empty("appMetaData.version", &self.app_meta_data.version)?;
        if self.app_component_specs.is_empty() {
            return Err(crate::error::EdgeCloudError::validation(
                "appComponentSpecs",
                "at least one component is required",
            ));
        }
        for (i, spec) in self.app_component_specs.iter().enumerate() {
            require_non_empty(&format!("appComponentSpecs[{}].artefactId", i), &spec.artefact_id)?;
        }
        Ok(())
    }
}

/// Onboarded application as exposed to federation partners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardedAppGsma {
    pub app_id: String,
    pub app_provider_id: String,
    #[serde(default)]
    pub app_deployment_zones: Vec<String>,
    pub app_meta_data: AppMetaData,
    #[serde(default, rename = "appQoSProfile", skip_serializing_if = "Option::is_none")]
    pub app_qos_profile: Option<Value>,
    pub app_component_specs: Vec<AppComponentSpec>,
}

// ---------------------------------------------------------------------------
// Deployment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInfo {
    pub zone_id: String,
    pub flavour_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_consumption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub res_pool: Option<String>,
}

/// Federation deploy request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDeployRequest {
    pub app_id: String,
    pub app_version: String,
    pub app_provider_id: String,
    pub zone_info: ZoneInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_inst_callback_link: Option<String>,
}

impl Validate for AppDeployRequest {
    fn validate(&self) -> EdgeCloudResult<()> {
        require_non_empty("appId", &self.app_id)?;
        require_non_empty("appVersion", &self.app_version)?;
        require_non_empty("appProviderId", &self.app_provider_id)?;
        require_non_empty("zoneInfo.zoneId", &self.zone_info.zone_id)?;
        require_non_empty("zoneInfo.flavourId", &self.zone_info.flavour_id)
    }
}

/// Instance state as reported to federation partners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GsmaInstanceState {
    Pending,
    Ready,
    Failed,
    Terminating,
    Unknown,
}

impl GsmaInstanceState {
    /// Interpret a partner status string, keeping partner failures as `FAILED`
    pub fn from_partner(status: Option<&str>) -> Self {
        match status.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("failed" | "error" | "crashloopbackoff") => GsmaInstanceState::Failed,
            _ => InstanceStatus::from_partner(status).into(),
        }
    }
}

impl From<InstanceStatus> for GsmaInstanceState {
    fn from(status: InstanceStatus) -> Self {
        match status {
            InstanceStatus::Instantiating => GsmaInstanceState::Pending,
            InstanceStatus::Ready => GsmaInstanceState::Ready,
            InstanceStatus::Terminating => GsmaInstanceState::Terminating,
            InstanceStatus::Unknown => GsmaInstanceState::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInstanceStateInfo {
    pub app_instance_state: GsmaInstanceState,
    #[serde(default, rename = "accesspointInfo", skip_serializing_if = "Vec::is_empty")]
    pub accesspoint_info: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneAppInstance {
    pub app_inst_identifier: String,
    pub app_instance_state: GsmaInstanceState,
}

/// Instances of one zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneAppInstances {
    pub zone_id: String,
    pub app_instance_info: Vec<ZoneAppInstance>,
}

/// Group `(zone, instance)` pairs by zone, zones in lexical order and
/// instances in input order
pub fn group_by_zone<I>(instances: I) -> Vec<ZoneAppInstances>
where
    I: IntoIterator<Item = (String, ZoneAppInstance)>,
{
    let mut zones: BTreeMap<String, Vec<ZoneAppInstance>> = BTreeMap::new();
    for (zone_id, instance) in instances {
        zones.entry(zone_id).or_default().push(instance);
    }
    zones
        .into_iter()
        .map(|(zone_id, app_instance_info)| ZoneAppInstances {
            zone_id,
            app_instance_info,
        })
        .collect()
}
