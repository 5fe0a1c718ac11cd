//! i2Edge adapter
//!
//! Maps the standardized CAMARA and GSMA operations onto the i2Edge
//! artefact/Helm API.

use async_trait::async_trait;
use edgeshim_core::camara::{
    first_zone, Acknowledgement, AppInstanceCreated, AppInstanceInfo, AppManifest,
    AppManifestEnvelope, AppOnboarded, AppZone, Artefact, ArtefactCreate, ArtefactCreated,
    ArtefactRepoLocation, ComponentSpec, DeployedAppsFilter, DescriptorType, EdgeCloudZone,
    EdgeCloudZoneStatus, InstanceStatus, PackageType, RepoType, VirtType,
};
use edgeshim_core::error::{EdgeCloudError, EdgeCloudResult, PlatformKind};
use edgeshim_core::flavour::{FlavourRequest, FlavourSelector, StaticFlavour};
use edgeshim_core::gsma::{
    self, group_by_zone, AcceptedZoneResourceInfo, AppDeployRequest, AppInstanceStateInfo,
    AppOnboardingRequest, ArtefactCreateRequest, AvailabilityZoneInfoRequest, GsmaInstanceState,
    OnboardedAppGsma, ZoneAppInstance, ZoneDetails, ZoneRegisteredData,
};
use edgeshim_core::ids::ensure_valid_uuid;
use edgeshim_core::instances::{filter_instances, find_instance, InstanceQuery, InstanceRecord};
use edgeshim_core::interface::EdgeCloudManagement;
use edgeshim_core::response::NormalizedHttpResponse;
use edgeshim_core::schema::BodySchema;
use edgeshim_core::transport::{HttpTransport, TransportResponse};
use edgeshim_core::validation::{parse_validated, Validate};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::common::i2edge_http;
use super::schemas::{
    AppComponentSpec, AppDeploy, AppDeployData, AppInstanceDetail, AppInstanceRecord,
    AppMetaData, AppParameters, ApplicationOnboardingRequest, ArtefactOnboarding, ArtefactRecord,
    DeployResult, OnboardedApp, ProfileData, ZoneInfo, ZoneListItem,
};
use crate::http::{decode, keyed, pass_through, require, PartnerHttp};
use crate::transport::ReqwestTransport;

/// Provider name reported for i2Edge zones
pub const PROVIDER: &str = "i2edge";

const ZONES_LIST: &str = "/zones/list";
const ZONES: &str = "/zones";
const ZONE: &str = "/zone";
const ARTEFACT: &str = "/artefact";
const ONBOARDING: &str = "/application/onboarding";
const ONBOARDINGS: &str = "/applications/onboarding";
const INSTANCE: &str = "/application_instance";
const INSTANCES: &str = "/application_instances";

/// Adapter for the i2Edge platform
#[derive(Debug, Clone)]
pub struct I2EdgeClient {
    http: PartnerHttp,
    flavours: Arc<dyn FlavourSelector>,
    namespace: Option<String>,
}

impl I2EdgeClient {
    /// Client over the default reqwest transport
    pub fn new(base_url: &str, flavour_id: &str) -> EdgeCloudResult<Self> {
        let transport = Arc::new(ReqwestTransport::new()?);
        Ok(Self::with_transport(base_url, flavour_id, transport))
    }

    pub fn with_transport(
        base_url: &str,
        flavour_id: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            http: i2edge_http(base_url, transport),
            flavours: Arc::new(StaticFlavour::new(flavour_id)),
            namespace: None,
        }
    }

    /// Replace the flavour selection strategy
    pub fn with_flavour_selector(mut self, flavours: Arc<dyn FlavourSelector>) -> Self {
        self.flavours = flavours;
        self
    }

    /// Kubernetes namespace passed as deployment parameter
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    fn app_parameters(&self) -> Option<AppParameters> {
        self.namespace.clone().map(|namespace| AppParameters { namespace })
    }

    async fn fetch_onboarded(
        &self,
        app_id: &str,
    ) -> EdgeCloudResult<(ProfileData, TransportResponse)> {
        let response = self
            .http
            .get_resource(ONBOARDING, &[app_id])
            .await
            .map_err(keyed("application", app_id))?;
        let record: OnboardedApp = decode(&response, "onboarded application")?;
        let profile = record
            .profile_data
            .ok_or_else(|| EdgeCloudError::missing_field(ONBOARDED_CONTEXT, "profile_data"))?;
        Ok((profile, response))
    }

    async fn fetch_artefact(
        &self,
        artefact_id: &str,
    ) -> EdgeCloudResult<(Artefact, TransportResponse)> {
        let response = self
            .http
            .get_resource(ARTEFACT, &[artefact_id])
            .await
            .map_err(keyed("artefact", artefact_id))?;
        let record: ArtefactRecord = decode(&response, "artefact")?;
        Ok((standard_artefact(&record)?, response))
    }

    async fn upload_artefact(
        &self,
        artefact: &ArtefactCreate,
    ) -> EdgeCloudResult<TransportResponse> {
        artefact.validate()?;
        let location = &artefact.artefact_repo_location;
        let form = ArtefactOnboarding {
            artefact_id: artefact.artefact_id.clone(),
            name: artefact.artefact_name.clone(),
            repo_name: artefact.repo_name.clone(),
            repo_type: repo_type_name(artefact.repo_type)?,
            repo_url: location.repo_url.clone(),
            repo_user_name: location.user_name.clone(),
            repo_password: location.password.clone(),
            repo_token: location.token.clone(),
        };
        self.http.post_multipart(ARTEFACT, &form.form_fields()).await
    }

    async fn list_instances(&self) -> EdgeCloudResult<(Vec<AppInstanceRecord>, TransportResponse)> {
        let response = self.http.get(INSTANCES, &[]).await?;
        let records: Vec<AppInstanceRecord> = decode(&response, "application instance list")?;
        Ok((records, response))
    }

    /// Submit a deployment; `202 Accepted` becomes `{appInstIdentifier, zoneId}`
    async fn submit_deployment(
        &self,
        operation: &str,
        payload: &AppDeploy,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let requested_zone = &payload.app_deploy_data.zone_info.zone_id;
        let response = self.http.post(INSTANCE, &serde_json::to_value(payload)?).await?;
        if response.status != 202 {
            return Ok(pass_through(operation, response));
        }

        let result: DeployResult = decode(&response, "deployment")?;
        let created = AppInstanceCreated {
            app_inst_identifier: require(
                result.app_instance_id.as_deref(),
                "i2Edge deployment",
                "app_instance_id",
            )?
            .to_string(),
            zone_id: result.zone_id.unwrap_or_else(|| requested_zone.clone()),
        };
        info!(
            app_id = %payload.app_deploy_data.app_id,
            app_instance_id = %created.app_inst_identifier,
            zone_id = %created.zone_id,
            "application deployed"
        );
        NormalizedHttpResponse::validated(
            BodySchema::AppInstanceCreated,
            202,
            &created,
            Some(&response),
        )
    }

    async fn acknowledge_delete(
        &self,
        path: &str,
        resource: &str,
        id: &str,
        message: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let response = self.http.delete(path, id).await.map_err(keyed(resource, id))?;
        if response.status != 200 {
            return Ok(pass_through(message, response));
        }
        info!(%resource, %id, "{}", message);
        NormalizedHttpResponse::validated(
            BodySchema::Acknowledgement,
            200,
            &Acknowledgement::new(message),
            Some(&response),
        )
    }
}

const ONBOARDED_CONTEXT: &str = "i2Edge onboarded application";
const INSTANCE_CONTEXT: &str = "i2Edge application instance";

fn repo_type_name(repo_type: RepoType) -> EdgeCloudResult<String> {
    match serde_json::to_value(repo_type)? {
        Value::String(name) => Ok(name),
        other => Err(EdgeCloudError::Mapping(format!("unexpected repo type {}", other))),
    }
}

fn standard_zone(item: &ZoneListItem) -> EdgeCloudResult<EdgeCloudZone> {
    const CONTEXT: &str = "i2Edge zone";
    let zone_id = require(item.zone_id.as_deref(), CONTEXT, "zoneId")?;
    let name = require(item.node_name.as_deref(), CONTEXT, "nodeName")?;
    let region = require(item.geography_details.as_deref(), CONTEXT, "geographyDetails")?;
    Ok(EdgeCloudZone {
        edge_cloud_zone_id: ensure_valid_uuid(zone_id),
        edge_cloud_zone_name: name.to_string(),
        edge_cloud_provider: PROVIDER.to_string(),
        edge_cloud_region: Some(region.to_string()),
        edge_cloud_zone_status: EdgeCloudZoneStatus::Unknown,
    })
}

fn standard_artefact(record: &ArtefactRecord) -> EdgeCloudResult<Artefact> {
    const CONTEXT: &str = "i2Edge artefact";
    let artefact_id = require(record.artefact_id.as_deref(), CONTEXT, "artefact_id")?;
    let name = require(record.name.as_deref(), CONTEXT, "name")?;
    let repo_type = record
        .repo_type
        .as_deref()
        .and_then(|t| {
            serde_json::from_value::<RepoType>(Value::String(t.to_ascii_uppercase())).ok()
        });

    Ok(Artefact {
        artefact_id: artefact_id.to_string(),
        artefact_name: name.to_string(),
        app_provider_id: None,
        artefact_description: None,
        artefact_version_info: record.version.clone(),
        artefact_virt_type: Some(VirtType::ContainerType),
        artefact_file_format: None,
        artefact_descriptor_type: Some(DescriptorType::Helm),
        repo_type,
        artefact_repo_location: record.repo_url.as_ref().map(|url| ArtefactRepoLocation {
            repo_url: url.clone(),
            user_name: record.repo_user_name.clone(),
            password: record.repo_password.clone(),
            token: record.repo_token.clone(),
        }),
    })
}

fn meta_data(profile: &ProfileData) -> EdgeCloudResult<&AppMetaData> {
    profile
        .app_meta_data
        .as_ref()
        .ok_or_else(|| EdgeCloudError::missing_field(ONBOARDED_CONTEXT, "profile_data.appMetaData"))
}

fn provider_of(profile: &ProfileData) -> EdgeCloudResult<&str> {
    let from_meta = profile.app_meta_data.as_ref().and_then(|m| m.app_provider_id.as_deref());
    require(
        profile.app_provider_id.as_deref().or(from_meta),
        ONBOARDED_CONTEXT,
        "profile_data.appProviderId",
    )
}

/// Release name of the onboarded application's instances
fn release_name(profile: &ProfileData) -> EdgeCloudResult<&str> {
    require(
        meta_data(profile)?.app_name.as_deref(),
        ONBOARDED_CONTEXT,
        "profile_data.appMetaData.appName",
    )
}

fn standard_manifest(profile: &ProfileData) -> EdgeCloudResult<AppManifest> {
    let meta = meta_data(profile)?;
    let component_spec = profile
        .app_component_specs
        .iter()
        .map(|spec| {
            let name = spec.component_name.as_deref().or(spec.artefact_id.as_deref());
            Ok(ComponentSpec {
                component_name: require(name, ONBOARDED_CONTEXT, "appComponentSpecs.artefactId")?
                    .to_string(),
                network_interfaces: Vec::new(),
            })
        })
        .collect::<EdgeCloudResult<Vec<_>>>()?;

    Ok(AppManifest {
        app_id: require(profile.app_id.as_deref(), ONBOARDED_CONTEXT, "profile_data.app_id")?
            .to_string(),
        name: release_name(profile)?.to_string(),
        version: require(
            meta.version.as_deref(),
            ONBOARDED_CONTEXT,
            "profile_data.appMetaData.version",
        )?
        .to_string(),
        app_provider: provider_of(profile)?.to_string(),
        package_type: Some(PackageType::Helm),
        app_repo: None,
        required_resources: None,
        component_spec,
    })
}

fn federation_app(profile: &ProfileData) -> EdgeCloudResult<OnboardedAppGsma> {
    let meta = meta_data(profile)?;
    let app_component_specs = profile
        .app_component_specs
        .iter()
        .map(|spec| {
            Ok(gsma::AppComponentSpec {
                artefact_id: require(
                    spec.artefact_id.as_deref(),
                    ONBOARDED_CONTEXT,
                    "appComponentSpecs.artefactId",
                )?
                .to_string(),
                service_name_nb: spec.service_name_nb.clone(),
                service_name_ew: spec.service_name_ew.clone(),
                component_name: spec.component_name.clone(),
            })
        })
        .collect::<EdgeCloudResult<Vec<_>>>()?;

    Ok(OnboardedAppGsma {
        app_id: require(profile.app_id.as_deref(), ONBOARDED_CONTEXT, "profile_data.app_id")?
            .to_string(),
        app_provider_id: provider_of(profile)?.to_string(),
        app_deployment_zones: profile.app_deployment_zones.clone(),
        app_meta_data: gsma::AppMetaData {
            app_name: release_name(profile)?.to_string(),
            version: require(
                meta.version.as_deref(),
                ONBOARDED_CONTEXT,
                "profile_data.appMetaData.version",
            )?
            .to_string(),
            app_description: meta.app_description.clone(),
            mobility_support: None,
            access_token: None,
            category: meta.category.clone(),
        },
        app_qos_profile: profile.app_qos_profile.clone(),
        app_component_specs,
    })
}

fn instance_info(
    record: &AppInstanceRecord,
    app_provider: Option<&str>,
) -> EdgeCloudResult<AppInstanceInfo> {
    let app_instance_id = require(record.instance_id(), INSTANCE_CONTEXT, "app_instance_id")?;
    let zone_id = require(record.zone_id(), INSTANCE_CONTEXT, "zone_id")?;
    let app_id = require(
        record.app_id.as_deref().or(record.release_name()),
        INSTANCE_CONTEXT,
        "app_id",
    )?;
    Ok(AppInstanceInfo {
        name: record.release_name().unwrap_or(app_id).to_string(),
        app_id: app_id.to_string(),
        app_instance_id: app_instance_id.to_string(),
        app_provider: app_provider.map(str::to_string),
        status: InstanceStatus::from_partner(record.deploy_status.as_deref()),
        edge_cloud_zone_id: zone_id.to_string(),
    })
}

fn access_points(info: Option<Value>) -> Vec<Value> {
    match info {
        Some(Value::Array(entries)) => entries,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other],
    }
}

#[async_trait]
impl EdgeCloudManagement for I2EdgeClient {
    fn platform(&self) -> PlatformKind {
        PlatformKind::I2Edge
    }

    // ---- CAMARA -----------------------------------------------------------

    async fn get_edge_cloud_zones(
        &self,
        region: Option<&str>,
        status: Option<EdgeCloudZoneStatus>,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let response = self.http.get(ZONES_LIST, &[]).await?;
        let items: Vec<ZoneListItem> = decode(&response, "zone list")?;
        let zones = items
            .iter()
            .map(standard_zone)
            .collect::<EdgeCloudResult<Vec<_>>>()?
            .into_iter()
            .filter(|zone| zone.matches(region, status))
            .collect::<Vec<_>>();

        info!(count = zones.len(), "availability zones retrieved");
        NormalizedHttpResponse::validated(
            BodySchema::EdgeCloudZones,
            response.status,
            &zones,
            Some(&response),
        )
    }

    async fn create_artefact(
        &self,
        artefact: &ArtefactCreate,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let response = self.upload_artefact(artefact).await?;
        if response.status != 201 {
            return Ok(pass_through("create_artefact", response));
        }
        info!(artefact_id = %artefact.artefact_id, "artefact created");
        let created = ArtefactCreated {
            artefact_id: artefact.artefact_id.clone(),
            message: "Artefact created successfully".to_string(),
        };
        NormalizedHttpResponse::validated(
            BodySchema::ArtefactCreated,
            201,
            &created,
            Some(&response),
        )
    }

    async fn get_artefact(&self, artefact_id: &str) -> EdgeCloudResult<NormalizedHttpResponse> {
        let (artefact, response) = self.fetch_artefact(artefact_id).await?;
        info!(%artefact_id, "artefact retrieved");
        NormalizedHttpResponse::validated(BodySchema::Artefact, 200, &artefact, Some(&response))
    }

    async fn get_all_artefacts(&self) -> EdgeCloudResult<NormalizedHttpResponse> {
        let response = self.http.get(ARTEFACT, &[]).await?;
        let records: Vec<ArtefactRecord> = decode(&response, "artefact list")?;
        let artefacts = records
            .iter()
            .map(standard_artefact)
            .collect::<EdgeCloudResult<Vec<_>>>()?;
        info!(count = artefacts.len(), "artefacts retrieved");
        NormalizedHttpResponse::validated(BodySchema::Artefacts, 200, &artefacts, Some(&response))
    }

    async fn delete_artefact(&self, artefact_id: &str) -> EdgeCloudResult<NormalizedHttpResponse> {
        self.acknowledge_delete(ARTEFACT, "artefact", artefact_id, "Artefact deleted successfully")
            .await
    }

    async fn onboard_app(&self, app_manifest: &Value) -> EdgeCloudResult<NormalizedHttpResponse> {
        let manifest: AppManifest = parse_validated(app_manifest)?;

        let profile = ProfileData {
            app_id: Some(manifest.app_id.clone()),
            app_provider_id: Some(manifest.app_provider.clone()),
            app_deployment_zones: Vec::new(),
            app_meta_data: Some(AppMetaData {
                app_name: Some(manifest.name.clone()),
                app_provider_id: Some(manifest.app_provider.clone()),
                version: Some(manifest.version.clone()),
                ..Default::default()
            }),
            app_qos_profile: None,
            app_component_specs: vec![AppComponentSpec {
                artefact_id: Some(manifest.app_id.clone()),
                ..Default::default()
            }],
        };
        let payload = serde_json::to_value(ApplicationOnboardingRequest { profile_data: profile })?;
        let response = self.http.post(ONBOARDING, &payload).await?;

        info!(app_id = %manifest.app_id, "application onboarded");
        let onboarded = AppOnboarded {
            app_id: manifest.app_id,
            message: "Application onboarded successfully".to_string(),
        };
        NormalizedHttpResponse::validated(
            BodySchema::AppOnboarded,
            response.status,
            &onboarded,
            Some(&response),
        )
    }

    async fn get_onboarded_app(&self, app_id: &str) -> EdgeCloudResult<NormalizedHttpResponse> {
        let (profile, response) = self.fetch_onboarded(app_id).await?;
        let envelope = AppManifestEnvelope {
            app_manifest: standard_manifest(&profile)?,
        };
        info!(%app_id, "onboarded application retrieved");
        NormalizedHttpResponse::validated(BodySchema::AppManifest, 200, &envelope, Some(&response))
    }

    async fn get_all_onboarded_apps(&self) -> EdgeCloudResult<NormalizedHttpResponse> {
        let response = self.http.get(ONBOARDINGS, &[]).await?;
        let records: Vec<OnboardedApp> = decode(&response, "onboarded application list")?;
        let manifests = records
            .iter()
            .map(|record| {
                record
                    .profile_data
                    .as_ref()
                    .ok_or_else(|| EdgeCloudError::missing_field(ONBOARDED_CONTEXT, "profile_data"))
                    .and_then(standard_manifest)
            })
            .collect::<EdgeCloudResult<Vec<_>>>()?;
        info!(count = manifests.len(), "onboarded applications retrieved");
        NormalizedHttpResponse::validated(
            BodySchema::AppManifests,
            200,
            &manifests,
            Some(&response),
        )
    }

    async fn delete_onboarded_app(&self, app_id: &str) -> EdgeCloudResult<NormalizedHttpResponse> {
        self.acknowledge_delete(
            ONBOARDING,
            "application",
            app_id,
            "Application deleted successfully",
        )
        .await
    }

    async fn deploy_app(
        &self,
        app_id: &str,
        app_zones: &[AppZone],
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let zone_id = first_zone(app_zones)?;
        if app_zones.len() > 1 {
            debug!(
                %app_id,
                requested = app_zones.len(),
                %zone_id,
                "deploying to the first requested zone only"
            );
        }

        let (profile, _) = self.fetch_onboarded(app_id).await?;
        let flavour_id = self
            .flavours
            .select(&FlavourRequest { app_id, zone_id })
            .await?;

        let payload = AppDeploy {
            app_deploy_data: AppDeployData {
                app_id: app_id.to_string(),
                app_provider_id: provider_of(&profile)?.to_string(),
                app_version: require(
                    meta_data(&profile)?.version.as_deref(),
                    ONBOARDED_CONTEXT,
                    "profile_data.appMetaData.version",
                )?
                .to_string(),
                zone_info: ZoneInfo {
                    flavour_id,
                    zone_id: zone_id.to_string(),
                },
            },
            app_parameters: self.app_parameters(),
        };
        self.submit_deployment("deploy_app", &payload).await
    }

    async fn get_deployed_app(
        &self,
        app_id: &str,
        app_instance_id: Option<&str>,
        zone_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let (profile, _) = self.fetch_onboarded(app_id).await?;
        let release = release_name(&profile)?;
        let (records, response) = self.list_instances().await?;

        let query = InstanceQuery::new(release, zone_id).with_instance(app_instance_id);
        let record = find_instance(&records, &query).ok_or_else(|| {
            EdgeCloudError::not_found(
                "application instance",
                format!("{} in zone {}", app_instance_id.unwrap_or(app_id), zone_id),
            )
        })?;

        let mut info = instance_info(record, profile.app_provider_id.as_deref())?;
        info.app_id = app_id.to_string();
        info!(
            %app_id,
            %zone_id,
            app_instance_id = %info.app_instance_id,
            "application instance retrieved"
        );
        NormalizedHttpResponse::validated(BodySchema::AppInstance, 200, &info, Some(&response))
    }

    async fn get_all_deployed_apps(
        &self,
        filter: &DeployedAppsFilter,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let (records, response) = self.list_instances().await?;
        let instances = records
            .iter()
            .map(|record| instance_info(record, None))
            .collect::<EdgeCloudResult<Vec<_>>>()?
            .into_iter()
            .filter(|info| filter.matches(info))
            .collect::<Vec<_>>();
        info!(count = instances.len(), "application instances retrieved");
        NormalizedHttpResponse::validated(
            BodySchema::AppInstances,
            200,
            &instances,
            Some(&response),
        )
    }

    async fn undeploy_app(&self, app_instance_id: &str) -> EdgeCloudResult<NormalizedHttpResponse> {
        self.acknowledge_delete(
            INSTANCE,
            "application instance",
            app_instance_id,
            "Application instance undeployed successfully",
        )
        .await
    }

    // ---- GSMA -------------------------------------------------------------

    async fn get_edge_cloud_zones_list_gsma(&self) -> EdgeCloudResult<NormalizedHttpResponse> {
        let response = self.http.get(ZONES_LIST, &[]).await?;
        let items: Vec<ZoneListItem> = decode(&response, "zone list")?;
        let zones = items
            .into_iter()
            .map(|item| {
                Ok(ZoneDetails {
                    zone_id: require(item.zone_id.as_deref(), "i2Edge zone", "zoneId")?.to_string(),
                    geography_details: require(
                        item.geography_details.as_deref(),
                        "i2Edge zone",
                        "geographyDetails",
                    )?
                    .to_string(),
                    geolocation: item.geolocation,
                })
            })
            .collect::<EdgeCloudResult<Vec<_>>>()?;
        NormalizedHttpResponse::validated(BodySchema::ZonesList, 200, &zones, Some(&response))
    }

    async fn get_edge_cloud_zones_gsma(
        &self,
        federation_context_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let response = self.http.get(ZONES, &[]).await?;
        let zones: Vec<ZoneRegisteredData> = decode(&response, "zone resource list")?;
        info!(%federation_context_id, count = zones.len(), "federation zones retrieved");
        NormalizedHttpResponse::validated(
            BodySchema::ZoneRegisteredDataList,
            200,
            &zones,
            Some(&response),
        )
    }

    async fn availability_zone_info_gsma(
        &self,
        federation_context_id: &str,
        request_body: &Value,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let request: AvailabilityZoneInfoRequest = parse_validated(request_body)?;
        let response = self.http.get(ZONES, &[]).await?;
        let zones: Vec<ZoneRegisteredData> = decode(&response, "zone resource list")?;
        let accepted = AcceptedZoneResourceInfo {
            accepted_zone_resource_info: zones
                .into_iter()
                .filter(|zone| request.accepts(&zone.zone_id))
                .collect(),
        };
        info!(
            %federation_context_id,
            count = accepted.accepted_zone_resource_info.len(),
            "availability zones synchronized"
        );
        NormalizedHttpResponse::validated(
            BodySchema::AcceptedZoneResourceInfo,
            200,
            &accepted,
            Some(&response),
        )
    }

    async fn get_edge_cloud_zone_details_gsma(
        &self,
        federation_context_id: &str,
        zone_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let response = self
            .http
            .get_resource(ZONE, &[zone_id])
            .await
            .map_err(keyed("zone", zone_id))?;
        let zone: ZoneRegisteredData = decode(&response, "zone")?;
        info!(%federation_context_id, %zone_id, "zone details retrieved");
        NormalizedHttpResponse::validated(
            BodySchema::ZoneRegisteredData,
            200,
            &zone,
            Some(&response),
        )
    }

    async fn create_artefact_gsma(
        &self,
        federation_context_id: &str,
        request_body: &Value,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let request: ArtefactCreateRequest = parse_validated(request_body)?;
        let artefact = request.into_artefact_create();
        let response = self.upload_artefact(&artefact).await?;
        if response.status != 201 {
            return Ok(pass_through("create_artefact_gsma", response));
        }
        info!(%federation_context_id, artefact_id = %artefact.artefact_id, "artefact uploaded");
        NormalizedHttpResponse::validated(
            BodySchema::Acknowledgement,
            200,
            &Acknowledgement::new("Artefact uploaded successfully"),
            Some(&response),
        )
    }

    async fn get_artefact_gsma(
        &self,
        federation_context_id: &str,
        artefact_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let (artefact, response) = self.fetch_artefact(artefact_id).await?;
        info!(%federation_context_id, %artefact_id, "artefact retrieved");
        NormalizedHttpResponse::validated(BodySchema::Artefact, 200, &artefact, Some(&response))
    }

    async fn delete_artefact_gsma(
        &self,
        _federation_context_id: &str,
        artefact_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        self.acknowledge_delete(ARTEFACT, "artefact", artefact_id, "Artefact deletion successful")
            .await
    }

    async fn onboard_app_gsma(
        &self,
        federation_context_id: &str,
        request_body: &Value,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let mut request: AppOnboardingRequest = parse_validated(request_body)?;
        if request.edge_app_fqdn.take().is_some() {
            debug!(app_id = %request.app_id, "edgeAppFQDN is not forwarded to i2Edge");
        }
        let app_id = request.app_id.clone();

        let mut profile = serde_json::to_value(&request)?;
        if let Some(fields) = profile.as_object_mut() {
            if let Some(id) = fields.remove("appId") {
                fields.insert("app_id".to_string(), id);
            }
        }
        let payload = serde_json::to_value(ApplicationOnboardingRequest { profile_data: profile })?;
        let response = self.http.post(ONBOARDING, &payload).await?;
        if !matches!(response.status, 200 | 201) {
            return Ok(pass_through("onboard_app_gsma", response));
        }

        info!(%federation_context_id, %app_id, "application onboarded");
        NormalizedHttpResponse::validated(
            BodySchema::Acknowledgement,
            200,
            &Acknowledgement::new("Application onboarded successfully"),
            Some(&response),
        )
    }

    async fn get_onboarded_app_gsma(
        &self,
        federation_context_id: &str,
        app_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let (profile, response) = self.fetch_onboarded(app_id).await?;
        let app = federation_app(&profile)?;
        info!(%federation_context_id, %app_id, "onboarded application retrieved");
        NormalizedHttpResponse::validated(BodySchema::OnboardedAppGsma, 200, &app, Some(&response))
    }

    async fn delete_onboarded_app_gsma(
        &self,
        _federation_context_id: &str,
        app_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        self.acknowledge_delete(ONBOARDING, "application", app_id, "App deletion successful")
            .await
    }

    async fn deploy_app_gsma(
        &self,
        federation_context_id: &str,
        idempotency_key: &str,
        request_body: &Value,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let request: AppDeployRequest = parse_validated(request_body)?;
        debug!(
            %federation_context_id,
            %idempotency_key,
            app_id = %request.app_id,
            "federation deploy request"
        );

        let payload = AppDeploy {
            app_deploy_data: AppDeployData {
                app_id: request.app_id,
                app_provider_id: request.app_provider_id,
                app_version: request.app_version,
                zone_info: ZoneInfo {
                    flavour_id: request.zone_info.flavour_id,
                    zone_id: request.zone_info.zone_id,
                },
            },
            app_parameters: self.app_parameters(),
        };
        self.submit_deployment("deploy_app_gsma", &payload).await
    }

    async fn get_deployed_app_gsma(
        &self,
        federation_context_id: &str,
        app_id: &str,
        app_instance_id: &str,
        zone_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let response = self
            .http
            .get_resource(INSTANCE, &[zone_id, app_instance_id])
            .await
            .map_err(keyed("application instance", app_instance_id))?;
        let detail: AppInstanceDetail = decode(&response, "application instance")?;

        let state = AppInstanceStateInfo {
            app_instance_state: GsmaInstanceState::from_partner(
                detail.app_instance_state.as_deref(),
            ),
            accesspoint_info: access_points(detail.accesspoint_info),
        };
        info!(
            %federation_context_id,
            %app_id,
            %app_instance_id,
            %zone_id,
            "application instance state retrieved"
        );
        NormalizedHttpResponse::validated(
            BodySchema::AppInstanceState,
            200,
            &state,
            Some(&response),
        )
    }

    async fn get_all_deployed_apps_gsma(
        &self,
        federation_context_id: &str,
        app_id: &str,
        app_provider: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let (profile, _) = self.fetch_onboarded(app_id).await?;
        let release = release_name(&profile)?;
        let (records, response) = self.list_instances().await?;

        let instances = filter_instances(&records, &InstanceQuery::in_any_zone(release))
            .into_iter()
            .map(|record| {
                let zone_id = require(record.zone_id(), INSTANCE_CONTEXT, "zone_id")?;
                let instance = ZoneAppInstance {
                    app_inst_identifier: require(
                        record.instance_id(),
                        INSTANCE_CONTEXT,
                        "app_instance_id",
                    )?
                    .to_string(),
                    app_instance_state: GsmaInstanceState::from_partner(
                        record.deploy_status.as_deref(),
                    ),
                };
                Ok((zone_id.to_string(), instance))
            })
            .collect::<EdgeCloudResult<Vec<_>>>()?;

        let grouped = group_by_zone(instances);
        info!(
            %federation_context_id,
            %app_id,
            %app_provider,
            zones = grouped.len(),
            "application instances retrieved"
        );
        NormalizedHttpResponse::validated(
            BodySchema::ZoneAppInstances,
            200,
            &grouped,
            Some(&response),
        )
    }

    async fn undeploy_app_gsma(
        &self,
        _federation_context_id: &str,
        _app_id: &str,
        app_instance_id: &str,
        _zone_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        self.acknowledge_delete(
            INSTANCE,
            "application instance",
            app_instance_id,
            "Application instance termination request accepted",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeshim_test_utils::fixtures;
    use edgeshim_test_utils::mocks::MockHttpTransport;
    use edgeshim_test_utils::stubs::i2edge as stub;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FLAVOUR: &str = "67f3a0b0e3184a85952e174d";

    fn client(server: &MockServer) -> I2EdgeClient {
        I2EdgeClient::new(&server.uri(), FLAVOUR).unwrap()
    }

    #[tokio::test]
    async fn zones_are_normalized_with_uuid_ids() {
        let server = MockServer::start().await;
        stub::zones_list(&server).await;

        let response = client(&server).get_edge_cloud_zones(None, None).await.unwrap();
        assert_eq!(response.status_code, 200);

        let zones: Vec<EdgeCloudZone> = response.json_body().unwrap();
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].edge_cloud_zone_id, ensure_valid_uuid("Omega"));
        assert_eq!(zones[0].edge_cloud_zone_name, "i2edge-node-1");
        assert_eq!(zones[0].edge_cloud_provider, PROVIDER);
        assert_eq!(zones[0].edge_cloud_zone_status, EdgeCloudZoneStatus::Unknown);
        assert_eq!(zones[1].edge_cloud_zone_id, "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[tokio::test]
    async fn zone_region_filter_is_applied() {
        let server = MockServer::start().await;
        stub::zones_list(&server).await;

        let response = client(&server)
            .get_edge_cloud_zones(Some("Madrid"), None)
            .await
            .unwrap();
        let zones: Vec<EdgeCloudZone> = response.json_body().unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].edge_cloud_region.as_deref(), Some("Madrid"));
    }

    #[tokio::test]
    async fn zone_missing_node_name_is_a_mapping_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zones/list"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "zoneId": "Omega", "geographyDetails": "Barcelona" }])),
            )
            .mount(&server)
            .await;

        let err = client(&server).get_edge_cloud_zones(None, None).await.unwrap_err();
        assert!(err.is_mapping());
        assert!(err.to_string().contains("nodeName"));
    }

    #[tokio::test]
    async fn zone_outage_is_a_platform_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zones/list"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(json!({ "detail": "maintenance" })),
            )
            .mount(&server)
            .await;

        let err = client(&server).get_edge_cloud_zones(None, None).await.unwrap_err();
        assert!(err.is_platform());
        assert_eq!(err.upstream_status(), Some(503));
    }

    #[tokio::test]
    async fn invalid_manifest_fails_before_any_request() {
        let mut transport = MockHttpTransport::new();
        transport.expect_post_json().times(0);
        transport.expect_get().times(0);

        let adapter = I2EdgeClient::with_transport("http://i2edge", FLAVOUR, Arc::new(transport));
        let mut manifest = fixtures::camara_manifest();
        manifest.as_object_mut().unwrap().remove("appProvider");

        let err = adapter.onboard_app(&manifest).await.unwrap_err();
        assert!(matches!(
            err,
            EdgeCloudError::Validation { ref field, .. } if field == "appProvider"
        ));
    }

    #[tokio::test]
    async fn onboarding_nests_manifest_into_profile_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/application/onboarding"))
            .and(body_partial_json(json!({
                "profile_data": {
                    "app_id": "demo-1",
                    "appProviderId": "acme",
                    "appMetaData": { "appName": "nginx", "version": "1.0.0" },
                    "appComponentSpecs": [{ "artefactId": "demo-1" }]
                }
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .onboard_app(&fixtures::camara_manifest())
            .await
            .unwrap();
        assert_eq!(response.status_code, 201);
        assert_eq!(
            response.body_value().unwrap(),
            json!({ "appId": "demo-1", "message": "Application onboarded successfully" })
        );
    }

    #[tokio::test]
    async fn deploy_rehydrates_onboarded_metadata() {
        let server = MockServer::start().await;
        stub::onboarded_app(&server, "demo-1", "nginx").await;
        Mock::given(method("POST"))
            .and(path("/application_instance"))
            .and(body_partial_json(json!({
                "app_deploy_data": {
                    "appId": "demo-1",
                    "appProviderId": "acme",
                    "appVersion": "1.0.0",
                    "zoneInfo": { "flavourId": FLAVOUR, "zoneId": "zoneA" }
                }
            })))
            .respond_with(
                ResponseTemplate::new(202)
                    .set_body_json(json!({ "app_instance_id": "inst-1", "zoneID": "zoneA" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .deploy_app("demo-1", &[AppZone::new("zoneA"), AppZone::new("zoneB")])
            .await
            .unwrap();
        assert_eq!(response.status_code, 202);
        assert_eq!(
            response.body_value().unwrap(),
            json!({ "appInstIdentifier": "inst-1", "zoneId": "zoneA" })
        );
    }

    #[tokio::test]
    async fn deploy_without_onboarding_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/application/onboarding/ghost"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "detail": "App not found" })),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .deploy_app("ghost", &[AppZone::new("zoneA")])
            .await
            .unwrap_err();
        assert!(matches!(err, EdgeCloudError::NotFound { ref id, .. } if id == "ghost"));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deploy_response_without_instance_id_is_a_mapping_error() {
        let server = MockServer::start().await;
        stub::onboarded_app(&server, "demo-1", "nginx").await;
        Mock::given(method("POST"))
            .and(path("/application_instance"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "zoneID": "zoneA" })))
            .mount(&server)
            .await;

        let err = client(&server)
            .deploy_app("demo-1", &[AppZone::new("zoneA")])
            .await
            .unwrap_err();
        assert!(err.is_mapping());
    }

    #[tokio::test]
    async fn deployed_app_lookup_uses_release_name_and_zone() {
        let server = MockServer::start().await;
        stub::onboarded_app(&server, "demo-1", "a").await;
        stub::application_instances(
            &server,
            json!([
                {
                    "app_instance_id": "i1",
                    "release_name": "a",
                    "zone_id": "z1",
                    "deploy_status": "DEPLOYED"
                },
                { "app_instance_id": "i2", "release_name": "a", "zone_id": "z2" },
                { "app_instance_id": "i3", "release_name": "b", "zone_id": "z1" }
            ]),
        )
        .await;

        let adapter = client(&server);
        let response = adapter.get_deployed_app("demo-1", None, "z1").await.unwrap();
        let info: AppInstanceInfo = response.json_body().unwrap();
        assert_eq!(info.app_instance_id, "i1");
        assert_eq!(info.app_id, "demo-1");
        assert_eq!(info.status, InstanceStatus::Ready);

        let err = adapter.get_deployed_app("demo-1", None, "z3").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn deployed_app_lookup_reads_zone_from_node_selector() {
        let server = MockServer::start().await;
        stub::onboarded_app(&server, "demo-1", "nginx").await;
        stub::application_instances(
            &server,
            json!([{
                "app_instance_id": "i9",
                "release_name": "nginx",
                "deploy_status": "pending",
                "app_spec": { "nodeSelector": { "feature.node.kubernetes.io/zoneID": "zoneA" } }
            }]),
        )
        .await;

        let response = client(&server)
            .get_deployed_app("demo-1", Some("i9"), "zoneA")
            .await
            .unwrap();
        let info: AppInstanceInfo = response.json_body().unwrap();
        assert_eq!(info.edge_cloud_zone_id, "zoneA");
        assert_eq!(info.status, InstanceStatus::Instantiating);
    }

    #[tokio::test]
    async fn artefact_creation_flattens_repository_location() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/artefact"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let mut artefact = ArtefactCreate::new("a1", "chart1", "https://example.org/charts");
        artefact.artefact_repo_location.token = Some("t0k".to_string());
        let response = client(&server).create_artefact(&artefact).await.unwrap();
        assert_eq!(response.status_code, 201);

        let requests = server.received_requests().await.unwrap();
        let form = String::from_utf8_lossy(&requests[0].body).to_string();
        for field in ["artefact_id", "name", "repo_type", "repo_url", "repo_token"] {
            assert!(form.contains(&format!("name=\"{}\"", field)), "missing {}", field);
        }
        assert!(!form.contains("repo_password"));
        assert!(form.contains("PUBLICREPO"));
    }

    #[tokio::test]
    async fn artefact_creation_passes_other_success_codes_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/artefact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "queued": true })))
            .mount(&server)
            .await;

        let response = client(&server)
            .create_artefact(&ArtefactCreate::new("a1", "chart1", "https://example.org/charts"))
            .await
            .unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body_value().unwrap(), json!({ "queued": true }));
    }

    #[tokio::test]
    async fn gsma_artefact_defaults_repository_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/artefact"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let response = client(&server)
            .create_artefact_gsma("fed-1", &fixtures::gsma_artefact())
            .await
            .unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.body_value().unwrap(),
            json!({ "response": "Artefact uploaded successfully" })
        );

        let requests = server.received_requests().await.unwrap();
        let form = String::from_utf8_lossy(&requests[0].body).to_string();
        assert!(form.contains("unknown-repo"));
        assert!(form.contains("PUBLICREPO"));
    }

    #[tokio::test]
    async fn gsma_onboarding_renames_app_id_and_drops_fqdn() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/application/onboarding"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let response = client(&server)
            .onboard_app_gsma("fed-1", &fixtures::gsma_onboarding())
            .await
            .unwrap();
        assert_eq!(response.status_code, 200);

        let requests = server.received_requests().await.unwrap();
        let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let profile = &sent["profile_data"];
        assert_eq!(profile["app_id"], json!("demo-1"));
        assert!(profile.get("appId").is_none());
        assert!(profile.get("edgeAppFQDN").is_none());
        assert_eq!(profile["appComponentSpecs"][0]["artefactId"], json!("a1"));
    }

    #[tokio::test]
    async fn gsma_zone_details_accept_upper_case_zone_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zone/zoneA"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(fixtures::zone_registered_data("zoneID", "zoneA")),
            )
            .mount(&server)
            .await;

        let response = client(&server)
            .get_edge_cloud_zone_details_gsma("fed-1", "zoneA")
            .await
            .unwrap();
        let body = response.body_value().unwrap();
        assert_eq!(body["flavoursSupported"][0]["fpga"], json!(["xilinx-u250"]));
        assert_eq!(body["flavoursSupported"][0]["vpu"], json!(["movidius"]));
        assert_eq!(body["flavoursSupported"][0]["cpuExclusivity"], json!(["core-0"]));

        let zone: ZoneRegisteredData = response.json_body().unwrap();
        assert_eq!(zone.zone_id, "zoneA");
        assert_eq!(zone.flavours_supported.len(), 1);
    }

    #[tokio::test]
    async fn availability_sync_keeps_accepted_zones_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zones"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                fixtures::zone_registered_data("zoneId", "zoneA"),
                fixtures::zone_registered_data("zoneId", "zoneB")
            ])))
            .mount(&server)
            .await;

        let adapter = client(&server);
        let response = adapter
            .availability_zone_info_gsma(
                "fed-1",
                &json!({ "acceptedAvailabilityZones": ["zoneB"] }),
            )
            .await
            .unwrap();
        let accepted: AcceptedZoneResourceInfo = response.json_body().unwrap();
        assert_eq!(accepted.accepted_zone_resource_info.len(), 1);
        assert_eq!(accepted.accepted_zone_resource_info[0].zone_id, "zoneB");

        let everything = adapter.availability_zone_info_gsma("fed-1", &json!({})).await.unwrap();
        let accepted: AcceptedZoneResourceInfo = everything.json_body().unwrap();
        assert_eq!(accepted.accepted_zone_resource_info.len(), 2);
    }

    #[tokio::test]
    async fn gsma_instances_are_grouped_per_zone() {
        let server = MockServer::start().await;
        stub::onboarded_app(&server, "demo-1", "nginx").await;
        stub::application_instances(
            &server,
            json!([
                {
                    "app_instance_id": "i1",
                    "release_name": "nginx",
                    "zone_id": "zoneB",
                    "deploy_status": "DEPLOYED"
                },
                {
                    "app_instance_id": "i2",
                    "release_name": "nginx",
                    "zone_id": "zoneA",
                    "deploy_status": "pending"
                },
                { "app_instance_id": "i3", "release_name": "other", "zone_id": "zoneA" },
                { "app_instance_id": "i4", "release_name": "nginx",
                  "app_spec": { "nodeSelector": { "feature.node.kubernetes.io/zoneID": "zoneB" } } }
            ]),
        )
        .await;

        let response = client(&server)
            .get_all_deployed_apps_gsma("fed-1", "demo-1", "acme")
            .await
            .unwrap();
        assert_eq!(
            response.body_value().unwrap(),
            json!([
                { "zoneId": "zoneA", "appInstanceInfo": [
                    { "appInstIdentifier": "i2", "appInstanceState": "PENDING" }
                ]},
                { "zoneId": "zoneB", "appInstanceInfo": [
                    { "appInstIdentifier": "i1", "appInstanceState": "READY" },
                    { "appInstIdentifier": "i4", "appInstanceState": "UNKNOWN" }
                ]}
            ])
        );
    }

    #[tokio::test]
    async fn gsma_instance_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/application_instance/zoneA/i1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "appInstanceState": "READY",
                "accesspointInfo": [{ "interfaceId": "eth0", "accessPoints": { "port": 80 } }]
            })))
            .mount(&server)
            .await;

        let response = client(&server)
            .get_deployed_app_gsma("fed-1", "demo-1", "i1", "zoneA")
            .await
            .unwrap();
        let state: AppInstanceStateInfo = response.json_body().unwrap();
        assert_eq!(state.app_instance_state, GsmaInstanceState::Ready);
        assert_eq!(state.accesspoint_info.len(), 1);
    }

    #[tokio::test]
    async fn patch_is_not_implemented() {
        let transport = Arc::new(MockHttpTransport::new());
        let adapter = I2EdgeClient::with_transport("http://i2edge", FLAVOUR, transport);
        let err = adapter
            .patch_onboarded_app_gsma("fed-1", "demo-1", &json!({}))
            .await
            .unwrap_err();
        assert!(err.is_not_implemented());

        let err = adapter
            .patch_onboarded_app("demo-1", &json!({ "version": "1.0.1" }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("patch_onboarded_app"));
    }

    #[tokio::test]
    async fn undeploy_confirms_with_a_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/application_instance/inst-1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let response = client(&server).undeploy_app("inst-1").await.unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.body_value().unwrap(),
            json!({ "response": "Application instance undeployed successfully" })
        );
    }

    async fn not_found_on(server: &MockServer, verb: &str, route: &str) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "detail": "not found" })),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn deleting_an_unknown_artefact_is_not_found() {
        let server = MockServer::start().await;
        not_found_on(&server, "DELETE", "/artefact/a9").await;

        let err = client(&server).delete_artefact("a9").await.unwrap_err();
        assert!(matches!(
            err,
            EdgeCloudError::NotFound { ref resource, ref id }
                if resource == "artefact" && id == "a9"
        ));
    }

    #[tokio::test]
    async fn deleting_an_unknown_application_is_not_found() {
        let server = MockServer::start().await;
        not_found_on(&server, "DELETE", "/application/onboarding/demo-9").await;

        let err = client(&server).delete_onboarded_app("demo-9").await.unwrap_err();
        assert!(matches!(
            err,
            EdgeCloudError::NotFound { ref resource, ref id }
                if resource == "application" && id == "demo-9"
        ));
    }

    #[tokio::test]
    async fn undeploying_an_unknown_instance_is_not_found() {
        let server = MockServer::start().await;
        not_found_on(&server, "DELETE", "/application_instance/inst-9").await;

        let err = client(&server).undeploy_app("inst-9").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn ids_with_path_syntax_stay_inside_their_resource() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/artefact/..%2Fapplication%2Fonboarding%2Fvictim"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/application/onboarding/victim"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/application_instance/inst%23frag"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        not_found_on(&server, "GET", "/artefact/a1%3Fx=1").await;

        let client = client(&server);
        let deleted = client.delete_artefact("../application/onboarding/victim").await.unwrap();
        assert_eq!(deleted.status_code, 200);
        assert_eq!(client.undeploy_app("inst#frag").await.unwrap().status_code, 200);

        let err = client.get_artefact("a1?x=1").await.unwrap_err();
        assert!(matches!(err, EdgeCloudError::NotFound { ref id, .. } if id == "a1?x=1"));
        let requests = server.received_requests().await.unwrap();
        let lookup = requests.iter().find(|request| request.method.to_string() == "GET").unwrap();
        assert_eq!(lookup.url.query(), None);
    }

    #[tokio::test]
    async fn dot_segment_ids_never_reach_the_partner() {
        let server = MockServer::start().await;
        let err = client(&server).delete_artefact("..").await.unwrap_err();
        assert!(err.is_validation());
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
