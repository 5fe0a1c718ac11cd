//! Kubernetes service-function adapter
//!
//! Nodes of the cluster are exposed as edge zones, onboarded applications as
//! registered service functions and application instances as deployed
//! service functions. Artefacts have no counterpart on this platform.

use async_trait::async_trait;
use edgeshim_core::camara::{
    first_zone, Acknowledgement, AppInstanceCreated, AppInstanceInfo, AppManifest,
    AppManifestEnvelope, AppOnboarded, AppRepo, AppZone, ComponentSpec, DeployedAppsFilter,
    EdgeCloudZone, EdgeCloudZoneStatus, InstanceStatus, PackageType, RepoType,
};
use edgeshim_core::error::{EdgeCloudError, EdgeCloudResult, PlatformKind};
use edgeshim_core::gsma::{
    self, group_by_zone, AcceptedZoneResourceInfo, AppDeployRequest, AppInstanceStateInfo,
    AppOnboardingRequest, AvailabilityZoneInfoRequest, GsmaInstanceState, OnboardedAppGsma,
    ZoneAppInstance, ZoneDetails, ZoneRegisteredData,
};
use edgeshim_core::ids::ensure_valid_uuid;
use edgeshim_core::instances::{filter_instances, find_instance, InstanceQuery, InstanceRecord};
use edgeshim_core::interface::EdgeCloudManagement;
use edgeshim_core::response::NormalizedHttpResponse;
use edgeshim_core::schema::BodySchema;
use edgeshim_core::transport::{HttpTransport, TransportResponse};
use edgeshim_core::validation::parse_validated;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::common::kubernetes_http;
use super::schemas::{
    DeployServiceFunction, DeployedServiceFunction, DeployedServiceFunctionCreated, Node, NodeList,
    ServiceFunction, ServiceFunctionList, ServiceFunctionRegistration,
};
use crate::http::{decode, keyed, require, PartnerHttp};
use crate::transport::ReqwestTransport;

/// Provider name reported for cluster zones
pub const PROVIDER: &str = "kubernetes";

const NODES: &str = "/nodes";
const SERVICE_FUNCTION: &str = "/serviceFunction";
const SERVICE_FUNCTIONS: &str = "/serviceFunctions";
const DEPLOYED: &str = "/deployedServiceFunction";
const DEPLOYED_LIST: &str = "/deployedServiceFunctions";

const FUNCTION_CONTEXT: &str = "service function";
const DEPLOYED_CONTEXT: &str = "deployed service function";

/// Adapter for the Kubernetes service-function API
#[derive(Debug, Clone)]
pub struct KubernetesClient {
    http: PartnerHttp,
    namespace: Option<String>,
}

impl KubernetesClient {
    /// Client over the default reqwest transport
    pub fn new(base_url: &str) -> EdgeCloudResult<Self> {
        let transport = Arc::new(ReqwestTransport::new()?);
        Ok(Self::with_transport(base_url, transport))
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            http: kubernetes_http(base_url, transport),
            namespace: None,
        }
    }

    /// Namespace service functions are deployed into
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    async fn list_nodes(&self) -> EdgeCloudResult<(Vec<Node>, TransportResponse)> {
        let response = self.http.get(NODES, &[]).await?;
        let list: NodeList = decode(&response, "node list")?;
        Ok((list.nodes, response))
    }

    async fn fetch_function(
        &self,
        app_id: &str,
    ) -> EdgeCloudResult<(ServiceFunction, TransportResponse)> {
        let response = self
            .http
            .get_resource(SERVICE_FUNCTION, &[app_id])
            .await
            .map_err(keyed("application", app_id))?;
        let function: ServiceFunction = decode(&response, FUNCTION_CONTEXT)?;
        Ok((function, response))
    }

    async fn register(
        &self,
        registration: &ServiceFunctionRegistration,
    ) -> EdgeCloudResult<TransportResponse> {
        self.http
            .post(SERVICE_FUNCTION, &serde_json::to_value(registration)?)
            .await
    }

    async fn list_deployed(
        &self,
    ) -> EdgeCloudResult<(Vec<DeployedServiceFunction>, TransportResponse)> {
        let response = self.http.get(DEPLOYED_LIST, &[]).await?;
        let records: Vec<DeployedServiceFunction> =
            decode(&response, "deployed service function list")?;
        Ok((records, response))
    }

    /// Deploy the registered function of `app_id` onto the node of `zone_id`;
    /// any 2xx answer is reported as `202 Accepted`
    async fn submit_deployment(
        &self,
        app_id: &str,
        zone_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let (function, _) = self.fetch_function(app_id).await?;
        let payload = DeployServiceFunction {
            service_function_name: function_name(&function)?.to_string(),
            location: zone_id.to_string(),
            namespace: self.namespace.clone(),
        };
        let response = self.http.post(DEPLOYED, &serde_json::to_value(&payload)?).await?;

        let result: DeployedServiceFunctionCreated = decode(&response, "deployment")?;
        let created = AppInstanceCreated {
            app_inst_identifier: require(
                result.service_function_instance_id.as_deref(),
                "Kubernetes deployment",
                "service_function_instance_id",
            )?
            .to_string(),
            zone_id: result.location.unwrap_or_else(|| zone_id.to_string()),
        };
        info!(
            %app_id,
            app_instance_id = %created.app_inst_identifier,
            zone_id = %created.zone_id,
            "service function deployed"
        );
        NormalizedHttpResponse::validated(
            BodySchema::AppInstanceCreated,
            202,
            &created,
            Some(&response),
        )
    }

    /// Release name and deployed instances of `app_id`
    async fn deployed_instances_of(
        &self,
        app_id: &str,
    ) -> EdgeCloudResult<(ServiceFunction, Vec<DeployedServiceFunction>, TransportResponse)> {
        let (function, _) = self.fetch_function(app_id).await?;
        let (records, response) = self.list_deployed().await?;
        Ok((function, records, response))
    }

    async fn acknowledge_delete(
        &self,
        path: &str,
        resource: &str,
        id: &str,
        message: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let response = self.http.delete(path, id).await.map_err(keyed(resource, id))?;
        info!(%resource, %id, "{}", message);
        NormalizedHttpResponse::validated(
            BodySchema::Acknowledgement,
            200,
            &Acknowledgement::new(message),
            Some(&response),
        )
    }
}

fn function_name(function: &ServiceFunction) -> EdgeCloudResult<&str> {
    require(function.service_function_name.as_deref(), FUNCTION_CONTEXT, "service_function_name")
}

fn function_provider(function: &ServiceFunction) -> EdgeCloudResult<&str> {
    require(function.app_provider.as_deref(), FUNCTION_CONTEXT, "app_provider")
}

fn deployed_instance_id(record: &DeployedServiceFunction) -> EdgeCloudResult<&str> {
    require(record.instance_id(), DEPLOYED_CONTEXT, "service_function_instance_id")
}

fn standard_zone(node: &Node) -> EdgeCloudResult<EdgeCloudZone> {
    const CONTEXT: &str = "Kubernetes node";
    Ok(EdgeCloudZone {
        edge_cloud_zone_id: ensure_valid_uuid(require(node.id.as_deref(), CONTEXT, "id")?),
        edge_cloud_zone_name: require(node.name.as_deref(), CONTEXT, "name")?.to_string(),
        edge_cloud_provider: PROVIDER.to_string(),
        edge_cloud_region: node.location.clone(),
        edge_cloud_zone_status: node.zone_status(),
    })
}

fn registered_zone(node: &Node) -> EdgeCloudResult<ZoneRegisteredData> {
    Ok(ZoneRegisteredData {
        zone_id: require(node.id.as_deref(), "Kubernetes node", "id")?.to_string(),
        reserved_compute_resources: Vec::new(),
        compute_resource_quota_limits: Vec::new(),
        flavours_supported: Vec::new(),
        network_resources: None,
        zone_service_level_objs_info: None,
    })
}

fn standard_manifest(function: &ServiceFunction) -> EdgeCloudResult<AppManifest> {
    let name = function_name(function)?;
    Ok(AppManifest {
        app_id: require(function.app_id.as_deref(), FUNCTION_CONTEXT, "app_id")?.to_string(),
        name: name.to_string(),
        version: require(function.version.as_deref(), FUNCTION_CONTEXT, "version")?.to_string(),
        app_provider: function_provider(function)?.to_string(),
        package_type: Some(PackageType::Container),
        app_repo: Some(AppRepo {
            repo_type: RepoType::PublicRepo,
            image_path: require(
                function.service_function_image.as_deref(),
                FUNCTION_CONTEXT,
                "service_function_image",
            )?
            .to_string(),
            user_name: None,
            credentials: None,
            auth_type: None,
            checksum: None,
        }),
        required_resources: None,
        component_spec: vec![ComponentSpec {
            component_name: name.to_string(),
            network_interfaces: Vec::new(),
        }],
    })
}

fn federation_app(function: &ServiceFunction) -> EdgeCloudResult<OnboardedAppGsma> {
    Ok(OnboardedAppGsma {
        app_id: require(function.app_id.as_deref(), FUNCTION_CONTEXT, "app_id")?.to_string(),
        app_provider_id: function_provider(function)?.to_string(),
        app_deployment_zones: Vec::new(),
        app_meta_data: gsma::AppMetaData {
            app_name: function_name(function)?.to_string(),
            version: require(function.version.as_deref(), FUNCTION_CONTEXT, "version")?.to_string(),
            app_description: None,
            mobility_support: None,
            access_token: None,
            category: None,
        },
        app_qos_profile: None,
        app_component_specs: vec![gsma::AppComponentSpec {
            artefact_id: require(
                function.service_function_image.as_deref(),
                FUNCTION_CONTEXT,
                "service_function_image",
            )?
            .to_string(),
            service_name_nb: None,
            service_name_ew: None,
            component_name: function.service_function_name.clone(),
        }],
    })
}

fn instance_info(record: &DeployedServiceFunction) -> EdgeCloudResult<AppInstanceInfo> {
    let release = require(
        record.release_name(),
        DEPLOYED_CONTEXT,
        "service_function_catalogue_name",
    )?;
    Ok(AppInstanceInfo {
        name: record
            .service_function_instance_name
            .clone()
            .unwrap_or_else(|| release.to_string()),
        app_id: record.app_id.clone().unwrap_or_else(|| release.to_string()),
        app_instance_id: deployed_instance_id(record)?.to_string(),
        app_provider: None,
        status: InstanceStatus::from_partner(record.status.as_deref()),
        edge_cloud_zone_id: require(record.zone_id(), DEPLOYED_CONTEXT, "location")?.to_string(),
    })
}

fn zone_instance(record: &DeployedServiceFunction) -> EdgeCloudResult<(String, ZoneAppInstance)> {
    let zone_id = require(record.zone_id(), DEPLOYED_CONTEXT, "location")?;
    let instance = ZoneAppInstance {
        app_inst_identifier: deployed_instance_id(record)?.to_string(),
        app_instance_state: GsmaInstanceState::from_partner(record.status.as_deref()),
    };
    Ok((zone_id.to_string(), instance))
}

#[async_trait]
impl EdgeCloudManagement for KubernetesClient {
    fn platform(&self) -> PlatformKind {
        PlatformKind::Kubernetes
    }

    // ---- CAMARA -----------------------------------------------------------

    async fn get_edge_cloud_zones(
        &self,
        region: Option<&str>,
        status: Option<EdgeCloudZoneStatus>,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let (nodes, response) = self.list_nodes().await?;
        let zones = nodes
            .iter()
            .map(standard_zone)
            .collect::<EdgeCloudResult<Vec<_>>>()?
            .into_iter()
            .filter(|zone| zone.matches(region, status))
            .collect::<Vec<_>>();
        info!(count = zones.len(), "availability zones retrieved");
        NormalizedHttpResponse::validated(BodySchema::EdgeCloudZones, 200, &zones, Some(&response))
    }

    async fn onboard_app(&self, app_manifest: &Value) -> EdgeCloudResult<NormalizedHttpResponse> {
        let manifest: AppManifest = parse_validated(app_manifest)?;
        let image = match manifest.app_repo.as_ref().map(|repo| repo.image_path.as_str()) {
            Some(path) if !path.trim().is_empty() => path.to_string(),
            Some(_) => {
                return Err(EdgeCloudError::validation(
                    "appRepo.imagePath",
                    "must not be empty",
                ))
            }
            None => {
                return Err(EdgeCloudError::validation(
                    "appRepo",
                    "a container image is required to register a service function",
                ))
            }
        };

        let registration = ServiceFunctionRegistration {
            app_id: manifest.app_id.clone(),
            service_function_name: manifest.name.clone(),
            service_function_image: image,
            application_ports: manifest
                .component_spec
                .iter()
                .flat_map(|component| &component.network_interfaces)
                .map(|interface| interface.port)
                .collect(),
            app_provider: Some(manifest.app_provider.clone()),
            version: Some(manifest.version.clone()),
        };
        let response = self.register(&registration).await?;

        info!(app_id = %manifest.app_id, "service function registered");
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
        let (function, response) = self.fetch_function(app_id).await?;
        let envelope = AppManifestEnvelope {
            app_manifest: standard_manifest(&function)?,
        };
        info!(%app_id, "onboarded application retrieved");
        NormalizedHttpResponse::validated(BodySchema::AppManifest, 200, &envelope, Some(&response))
    }

    async fn get_all_onboarded_apps(&self) -> EdgeCloudResult<NormalizedHttpResponse> {
        let response = self.http.get(SERVICE_FUNCTIONS, &[]).await?;
        let list: ServiceFunctionList = decode(&response, "service function list")?;
        let manifests = list
            .apps
            .iter()
            .map(standard_manifest)
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
        let response = self
            .http
            .delete(SERVICE_FUNCTION, app_id)
            .await
            .map_err(keyed("application", app_id))?;
        info!(%app_id, "service function deleted");
        Ok(NormalizedHttpResponse::no_content(204, &response))
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
        self.submit_deployment(app_id, zone_id).await
    }

    async fn get_deployed_app(
        &self,
        app_id: &str,
        app_instance_id: Option<&str>,
        zone_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let (function, records, response) = self.deployed_instances_of(app_id).await?;
        let query =
            InstanceQuery::new(function_name(&function)?, zone_id).with_instance(app_instance_id);
        let record = find_instance(&records, &query).ok_or_else(|| {
            EdgeCloudError::not_found(
                "application instance",
                format!("{} in zone {}", app_instance_id.unwrap_or(app_id), zone_id),
            )
        })?;

        let mut info = instance_info(record)?;
        info.app_id = app_id.to_string();
        info.app_provider = function.app_provider.clone();
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
        let (records, response) = self.list_deployed().await?;
        let instances = records
            .iter()
            .map(instance_info)
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
        let response = self
            .http
            .delete(DEPLOYED, app_instance_id)
            .await
            .map_err(keyed("application instance", app_instance_id))?;
        info!(%app_instance_id, "service function undeployed");
        Ok(NormalizedHttpResponse::no_content(204, &response))
    }

    // ---- GSMA -------------------------------------------------------------

    async fn get_edge_cloud_zones_list_gsma(&self) -> EdgeCloudResult<NormalizedHttpResponse> {
        let (nodes, response) = self.list_nodes().await?;
        let zones = nodes
            .iter()
            .map(|node| {
                Ok(ZoneDetails {
                    zone_id: require(node.id.as_deref(), "Kubernetes node", "id")?.to_string(),
                    geolocation: None,
                    geography_details: require(
                        node.location.as_deref(),
                        "Kubernetes node",
                        "location",
                    )?
                    .to_string(),
                })
            })
            .collect::<EdgeCloudResult<Vec<_>>>()?;
        NormalizedHttpResponse::validated(BodySchema::ZonesList, 200, &zones, Some(&response))
    }

    async fn get_edge_cloud_zones_gsma(
        &self,
        federation_context_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let (nodes, response) = self.list_nodes().await?;
        let zones = nodes
            .iter()
            .map(registered_zone)
            .collect::<EdgeCloudResult<Vec<_>>>()?;
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
        let (nodes, response) = self.list_nodes().await?;
        let accepted = AcceptedZoneResourceInfo {
            accepted_zone_resource_info: nodes
                .iter()
                .map(registered_zone)
                .collect::<EdgeCloudResult<Vec<_>>>()?
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
        let (nodes, response) = self.list_nodes().await?;
        let node = nodes
            .iter()
            .find(|node| node.id.as_deref() == Some(zone_id))
            .ok_or_else(|| EdgeCloudError::not_found("zone", zone_id))?;
        let zone = registered_zone(node)?;
        info!(%federation_context_id, %zone_id, "zone details retrieved");
        NormalizedHttpResponse::validated(
            BodySchema::ZoneRegisteredData,
            200,
            &zone,
            Some(&response),
        )
    }

    async fn onboard_app_gsma(
        &self,
        federation_context_id: &str,
        request_body: &Value,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let request: AppOnboardingRequest = parse_validated(request_body)?;
        let image = request
            .app_component_specs
            .first()
            .map(|spec| spec.artefact_id.clone())
            .ok_or_else(|| {
                EdgeCloudError::validation(
                    "appComponentSpecs",
                    "at least one component is required",
                )
            })?;

        let registration = ServiceFunctionRegistration {
            app_id: request.app_id.clone(),
            service_function_name: request.app_meta_data.app_name.clone(),
            service_function_image: image,
            application_ports: Vec::new(),
            app_provider: Some(request.app_provider_id.clone()),
            version: Some(request.app_meta_data.version.clone()),
        };
        let response = self.register(&registration).await?;

        info!(%federation_context_id, app_id = %request.app_id, "service function registered");
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
        let (function, response) = self.fetch_function(app_id).await?;
        let app = federation_app(&function)?;
        info!(%federation_context_id, %app_id, "onboarded application retrieved");
        NormalizedHttpResponse::validated(BodySchema::OnboardedAppGsma, 200, &app, Some(&response))
    }

    async fn delete_onboarded_app_gsma(
        &self,
        _federation_context_id: &str,
        app_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        self.acknowledge_delete(SERVICE_FUNCTION, "application", app_id, "App deletion successful")
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
            flavour_id = %request.zone_info.flavour_id,
            "federation deploy request"
        );
        self.submit_deployment(&request.app_id, &request.zone_info.zone_id).await
    }

    async fn get_deployed_app_gsma(
        &self,
        federation_context_id: &str,
        app_id: &str,
        app_instance_id: &str,
        zone_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        let (function, records, response) = self.deployed_instances_of(app_id).await?;
        let query = InstanceQuery::new(function_name(&function)?, zone_id)
            .with_instance(Some(app_instance_id));
        let record = find_instance(&records, &query)
            .ok_or_else(|| EdgeCloudError::not_found("application instance", app_instance_id))?;

        let state = AppInstanceStateInfo {
            app_instance_state: GsmaInstanceState::from_partner(record.status.as_deref()),
            accesspoint_info: Vec::new(),
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
        let (function, records, response) = self.deployed_instances_of(app_id).await?;
        let query = InstanceQuery::in_any_zone(function_name(&function)?);
        let instances = filter_instances(&records, &query)
            .into_iter()
            .map(zone_instance)
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
            DEPLOYED,
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
    use edgeshim_core::camara::ArtefactCreate;
    use edgeshim_test_utils::fixtures;
    use edgeshim_test_utils::mocks::MockHttpTransport;
    use edgeshim_test_utils::stubs::kubernetes as stub;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> KubernetesClient {
        KubernetesClient::new(&server.uri()).unwrap()
    }

    #[tokio::test]
    async fn nodes_become_zones() {
        let server = MockServer::start().await;
        stub::nodes(&server).await;

        let response = client(&server).get_edge_cloud_zones(None, None).await.unwrap();
        let zones: Vec<EdgeCloudZone> = response.json_body().unwrap();
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].edge_cloud_zone_id, ensure_valid_uuid("node-a"));
        assert_eq!(zones[0].edge_cloud_zone_name, "edge-a");
        assert_eq!(zones[0].edge_cloud_region.as_deref(), Some("Athens"));
        assert_eq!(zones[0].edge_cloud_zone_status, EdgeCloudZoneStatus::Active);
        assert_eq!(zones[1].edge_cloud_zone_status, EdgeCloudZoneStatus::Inactive);
    }

    #[tokio::test]
    async fn zone_status_filter_is_applied() {
        let server = MockServer::start().await;
        stub::nodes(&server).await;

        let response = client(&server)
            .get_edge_cloud_zones(None, Some(EdgeCloudZoneStatus::Inactive))
            .await
            .unwrap();
        let zones: Vec<EdgeCloudZone> = response.json_body().unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].edge_cloud_zone_name, "edge-b");
    }

    #[tokio::test]
    async fn manifest_without_image_fails_before_any_request() {
        let mut transport = MockHttpTransport::new();
        transport.expect_post_json().times(0);

        let adapter = KubernetesClient::with_transport("http://k8s", Arc::new(transport));
        let mut manifest = fixtures::camara_manifest();
        manifest.as_object_mut().unwrap().remove("appRepo");

        let err = adapter.onboard_app(&manifest).await.unwrap_err();
        assert!(matches!(err, EdgeCloudError::Validation { ref field, .. } if field == "appRepo"));
    }

    #[tokio::test]
    async fn onboarding_registers_a_service_function() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/serviceFunction"))
            .and(body_json(json!({
                "app_id": "demo-1",
                "service_function_name": "nginx",
                "service_function_image": "docker.io/library/nginx:1.25",
                "application_ports": [80],
                "app_provider": "acme",
                "version": "1.0.0"
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
        let onboarded: AppOnboarded = response.json_body().unwrap();
        assert_eq!(onboarded.app_id, "demo-1");
    }

    #[tokio::test]
    async fn registered_function_reads_back_as_manifest() {
        let server = MockServer::start().await;
        stub::service_function(&server, "demo-1", "nginx").await;

        let response = client(&server).get_onboarded_app("demo-1").await.unwrap();
        let envelope: AppManifestEnvelope = response.json_body().unwrap();
        let manifest = envelope.app_manifest;
        assert_eq!(manifest.name, "nginx");
        assert_eq!(manifest.package_type, Some(PackageType::Container));
        assert_eq!(
            manifest.app_repo.map(|repo| repo.image_path),
            Some("docker.io/library/nginx:1.25".to_string())
        );
    }

    #[tokio::test]
    async fn deploy_success_is_reported_as_accepted() {
        let server = MockServer::start().await;
        stub::service_function(&server, "demo-1", "nginx").await;
        Mock::given(method("POST"))
            .and(path("/deployedServiceFunction"))
            .and(body_json(json!({ "service_function_name": "nginx", "location": "node-a" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "service_function_instance_id": "sf-1",
                "location": "node-a"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .deploy_app("demo-1", &[AppZone::new("node-a")])
            .await
            .unwrap();
        assert_eq!(response.status_code, 202);
        assert_eq!(
            response.body_value().unwrap(),
            json!({ "appInstIdentifier": "sf-1", "zoneId": "node-a" })
        );
    }

    #[tokio::test]
    async fn deploy_without_zones_is_rejected_before_any_request() {
        let mut transport = MockHttpTransport::new();
        transport.expect_get().times(0);
        transport.expect_post_json().times(0);

        let adapter = KubernetesClient::with_transport("http://k8s", Arc::new(transport));
        let err = adapter.deploy_app("demo-1", &[]).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn deployed_function_lookup() {
        let server = MockServer::start().await;
        stub::service_function(&server, "demo-1", "nginx").await;
        stub::deployed_functions(
            &server,
            json!([
                {
                    "service_function_instance_id": "sf-1",
                    "service_function_catalogue_name": "nginx",
                    "service_function_instance_name": "nginx-x7",
                    "status": "running",
                    "location": "node-a"
                },
                {
                    "service_function_instance_id": "sf-2",
                    "service_function_catalogue_name": "nginx",
                    "status": "pending",
                    "location": "node-b"
                }
            ]),
        )
        .await;

        let adapter = client(&server);
        let response = adapter.get_deployed_app("demo-1", None, "node-b").await.unwrap();
        let info: AppInstanceInfo = response.json_body().unwrap();
        assert_eq!(info.app_instance_id, "sf-2");
        assert_eq!(info.status, InstanceStatus::Instantiating);
        assert_eq!(info.app_provider.as_deref(), Some("acme"));

        let err = adapter
            .get_deployed_app("demo-1", Some("sf-1"), "node-b")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn deletes_answer_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/deployedServiceFunction/sf-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "deleted" })))
            .mount(&server)
            .await;

        let response = client(&server).undeploy_app("sf-1").await.unwrap();
        assert_eq!(response.status_code, 204);
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn deleting_an_unknown_function_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/serviceFunction/ghost"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "title": "Not Found" })))
            .mount(&server)
            .await;

        let err = client(&server).delete_onboarded_app("ghost").await.unwrap_err();
        assert!(matches!(err, EdgeCloudError::NotFound { ref id, .. } if id == "ghost"));
    }

    #[tokio::test]
    async fn function_ids_are_sent_as_one_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/serviceFunction/..%2Fnodes"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "title": "Not Found" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/serviceFunction/demo%3Fforce=true"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let err = client.get_onboarded_app("../nodes").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(client.delete_onboarded_app("demo?force=true").await.unwrap().status_code, 204);
    }

    #[tokio::test]
    async fn artefacts_are_not_implemented() {
        let adapter =
            KubernetesClient::with_transport("http://k8s", Arc::new(MockHttpTransport::new()));
        let err = adapter
            .create_artefact(&ArtefactCreate::new("a1", "chart1", "https://example.org/charts"))
            .await
            .unwrap_err();
        assert!(err.is_not_implemented());

        let err = adapter.get_artefact_gsma("fed-1", "a1").await.unwrap_err();
        assert!(err.is_not_implemented());
    }

    #[tokio::test]
    async fn gsma_onboarding_uses_first_component_as_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/serviceFunction"))
            .and(body_json(json!({
                "app_id": "demo-1",
                "service_function_name": "nginx",
                "service_function_image": "a1",
                "app_provider": "acme",
                "version": "1.0.0"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .onboard_app_gsma("fed-1", &fixtures::gsma_onboarding())
            .await
            .unwrap();
        assert_eq!(
            response.body_value().unwrap(),
            json!({ "response": "Application onboarded successfully" })
        );
    }

    #[tokio::test]
    async fn gsma_zone_details_of_unknown_node_is_not_found() {
        let server = MockServer::start().await;
        stub::nodes(&server).await;

        let adapter = client(&server);
        let response = adapter.get_edge_cloud_zone_details_gsma("fed-1", "node-b").await.unwrap();
        let zone: ZoneRegisteredData = response.json_body().unwrap();
        assert_eq!(zone.zone_id, "node-b");

        let err = adapter
            .get_edge_cloud_zone_details_gsma("fed-1", "node-z")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn gsma_instances_are_grouped_per_node() {
        let server = MockServer::start().await;
        stub::service_function(&server, "demo-1", "nginx").await;
        stub::deployed_functions(
            &server,
            json!([
                {
                    "service_function_instance_id": "sf-1",
                    "service_function_catalogue_name": "nginx",
                    "status": "running",
                    "location": "node-a"
                },
                {
                    "service_function_instance_id": "sf-2",
                    "service_function_catalogue_name": "redis",
                    "status": "running",
                    "location": "node-a"
                },
                {
                    "service_function_instance_id": "sf-3",
                    "service_function_catalogue_name": "nginx",
                    "status": "failed",
                    "location": "node-a"
                }
            ]),
        )
        .await;

        let response = client(&server)
            .get_all_deployed_apps_gsma("fed-1", "demo-1", "acme")
            .await
            .unwrap();
        assert_eq!(
            response.body_value().unwrap(),
            json!([{ "zoneId": "node-a", "appInstanceInfo": [
                { "appInstIdentifier": "sf-1", "appInstanceState": "READY" },
                { "appInstIdentifier": "sf-3", "appInstanceState": "FAILED" }
            ]}])
        );
    }
}
