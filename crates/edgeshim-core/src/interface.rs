//! The management contract every partner adapter implements

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::camara::{AppZone, ArtefactCreate, DeployedAppsFilter, EdgeCloudZoneStatus};
use crate::error::{EdgeCloudError, EdgeCloudResult, PlatformKind};
use crate::response::NormalizedHttpResponse;

/// Uniform edge-cloud management interface.
///
/// Every operation returns a [`NormalizedHttpResponse`] whose body is valid
/// for the standardized schema of that operation, or a typed error. Operations
/// a partner has no counterpart for keep the default body and report
/// [`EdgeCloudError::NotImplemented`].
#[async_trait]
pub trait EdgeCloudManagement: Send + Sync + Debug {
    /// Partner this adapter talks to
    fn platform(&self) -> PlatformKind;

    // ---- CAMARA: zones ----------------------------------------------------

    /// List zones, optionally filtered by region and status
    async fn get_edge_cloud_zones(
        &self,
        region: Option<&str>,
        status: Option<EdgeCloudZoneStatus>,
    ) -> EdgeCloudResult<NormalizedHttpResponse>;

    // ---- CAMARA: artefacts ------------------------------------------------

    async fn create_artefact(
        &self,
        _artefact: &ArtefactCreate,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        Err(EdgeCloudError::not_implemented("create_artefact", self.platform()))
    }

    async fn get_artefact(&self, _artefact_id: &str) -> EdgeCloudResult<NormalizedHttpResponse> {
        Err(EdgeCloudError::not_implemented("get_artefact", self.platform()))
    }

    async fn get_all_artefacts(&self) -> EdgeCloudResult<NormalizedHttpResponse> {
        Err(EdgeCloudError::not_implemented("get_all_artefacts", self.platform()))
    }

    async fn delete_artefact(&self, _artefact_id: &str) -> EdgeCloudResult<NormalizedHttpResponse> {
        Err(EdgeCloudError::not_implemented("delete_artefact", self.platform()))
    }

    // ---- CAMARA: onboarding -----------------------------------------------

    /// Onboard an application from a raw manifest. The manifest is validated
    /// before anything is sent to the partner.
    async fn onboard_app(&self, app_manifest: &Value) -> EdgeCloudResult<NormalizedHttpResponse>;

    async fn get_onboarded_app(&self, app_id: &str) -> EdgeCloudResult<NormalizedHttpResponse>;

    async fn get_all_onboarded_apps(&self) -> EdgeCloudResult<NormalizedHttpResponse>;

    async fn delete_onboarded_app(&self, app_id: &str) -> EdgeCloudResult<NormalizedHttpResponse>;

    async fn patch_onboarded_app(
        &self,
        _app_id: &str,
        _patch: &Value,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        Err(EdgeCloudError::not_implemented("patch_onboarded_app", self.platform()))
    }

    // ---- CAMARA: deployment -----------------------------------------------

    /// Deploy an onboarded application to the first of `app_zones`
    async fn deploy_app(
        &self,
        app_id: &str,
        app_zones: &[AppZone],
    ) -> EdgeCloudResult<NormalizedHttpResponse>;

    /// Look up the instance of `app_id` running in `zone_id`, narrowed to
    /// `app_instance_id` when given. No match is [`EdgeCloudError::NotFound`].
    async fn get_deployed_app(
        &self,
        app_id: &str,
        app_instance_id: Option<&str>,
        zone_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse>;

    async fn get_all_deployed_apps(
        &self,
        filter: &DeployedAppsFilter,
    ) -> EdgeCloudResult<NormalizedHttpResponse>;

    async fn undeploy_app(&self, app_instance_id: &str) -> EdgeCloudResult<NormalizedHttpResponse>;

    // ---- GSMA: zones ------------------------------------------------------

    async fn get_edge_cloud_zones_list_gsma(&self) -> EdgeCloudResult<NormalizedHttpResponse>;

    async fn get_edge_cloud_zones_gsma(
        &self,
        federation_context_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse>;

    async fn availability_zone_info_gsma(
        &self,
        federation_context_id: &str,
        request_body: &Value,
    ) -> EdgeCloudResult<NormalizedHttpResponse>;

    async fn get_edge_cloud_zone_details_gsma(
        &self,
        federation_context_id: &str,
        zone_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse>;

    // ---- GSMA: artefacts --------------------------------------------------

    async fn create_artefact_gsma(
        &self,
        _federation_context_id: &str,
        _request_body: &Value,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        Err(EdgeCloudError::not_implemented("create_artefact_gsma", self.platform()))
    }

    async fn get_artefact_gsma(
        &self,
        _federation_context_id: &str,
        _artefact_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        Err(EdgeCloudError::not_implemented("get_artefact_gsma", self.platform()))
    }

    async fn delete_artefact_gsma(
        &self,
        _federation_context_id: &str,
        _artefact_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        Err(EdgeCloudError::not_implemented("delete_artefact_gsma", self.platform()))
    }

    // ---- GSMA: onboarding -------------------------------------------------

    async fn onboard_app_gsma(
        &self,
        federation_context_id: &str,
        request_body: &Value,
    ) -> EdgeCloudResult<NormalizedHttpResponse>;

    async fn get_onboarded_app_gsma(
        &self,
        federation_context_id: &str,
        app_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse>;

    /// Partial update of an onboarded application
    async fn patch_onboarded_app_gsma(
        &self,
        _federation_context_id: &str,
        _app_id: &str,
        _request_body: &Value,
    ) -> EdgeCloudResult<NormalizedHttpResponse> {
        Err(EdgeCloudError::not_implemented("patch_onboarded_app_gsma", self.platform()))
    }

    async fn delete_onboarded_app_gsma(
        &self,
        federation_context_id: &str,
        app_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse>;

    // ---- GSMA: deployment -------------------------------------------------

    async fn deploy_app_gsma(
        &self,
        federation_context_id: &str,
        idempotency_key: &str,
        request_body: &Value,
    ) -> EdgeCloudResult<NormalizedHttpResponse>;

    async fn get_deployed_app_gsma(
        &self,
        federation_context_id: &str,
        app_id: &str,
        app_instance_id: &str,
        zone_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse>;

    async fn get_all_deployed_apps_gsma(
        &self,
        federation_context_id: &str,
        app_id: &str,
        app_provider: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse>;

    async fn undeploy_app_gsma(
        &self,
        federation_context_id: &str,
        app_id: &str,
        app_instance_id: &str,
        zone_id: &str,
    ) -> EdgeCloudResult<NormalizedHttpResponse>;
}
