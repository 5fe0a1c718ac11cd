//! Adapter registry
//!
//! Maps `client_name` values of the configuration to adapter constructors.

use edgeshim_adapters::{I2EdgeClient, KubernetesClient, ReqwestTransport};
use edgeshim_core::error::{EdgeCloudError, EdgeCloudResult};
use edgeshim_core::interface::EdgeCloudManagement;
use edgeshim_core::transport::HttpTransport;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::config::{AdapterSpecs, EdgeCloudConfig};

/// Builds an edge-cloud adapter from its configuration
pub type EdgeCloudConstructor =
    fn(&EdgeCloudConfig, Arc<dyn HttpTransport>) -> EdgeCloudResult<Arc<dyn EdgeCloudManagement>>;

/// Adapters instantiated from [`AdapterSpecs`]
#[derive(Debug, Clone, Default)]
pub struct Adapters {
    pub edgecloud: Option<Arc<dyn EdgeCloudManagement>>,
}

impl Adapters {
    /// The edge-cloud adapter, failing when none is configured
    pub fn edgecloud(&self) -> EdgeCloudResult<&Arc<dyn EdgeCloudManagement>> {
        self.edgecloud
            .as_ref()
            .ok_or_else(|| EdgeCloudError::Config("no edgecloud adapter configured".into()))
    }
}

pub struct AdapterRegistry {
    edgecloud: BTreeMap<String, EdgeCloudConstructor>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("edgecloud", &self.edgecloud.keys().collect::<Vec<_>>())
            .field("transport", &self.transport)
            .finish()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register_edgecloud("i2edge", i2edge);
        registry.register_edgecloud("kubernetes", kubernetes);
        registry
    }
}

impl AdapterRegistry {
    /// Registry with the built-in adapters
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry without any adapter
    pub fn empty() -> Self {
        Self {
            edgecloud: BTreeMap::new(),
            transport: None,
        }
    }

    /// Share `transport` between all adapters instead of a reqwest client each
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn register_edgecloud(&mut self, client_name: &str, constructor: EdgeCloudConstructor) {
        self.edgecloud.insert(client_name.to_string(), constructor);
    }

    /// Registered edge-cloud client names, sorted
    pub fn edgecloud_clients(&self) -> Vec<&str> {
        self.edgecloud.keys().map(String::as_str).collect()
    }

    pub fn create_edgecloud(
        &self,
        config: &EdgeCloudConfig,
    ) -> EdgeCloudResult<Arc<dyn EdgeCloudManagement>> {
        config.validate()?;
        let constructor = self.edgecloud.get(&config.client_name).ok_or_else(|| {
            EdgeCloudError::Config(format!(
                "unknown edgecloud client '{}', expected one of: {}",
                config.client_name,
                self.edgecloud_clients().join(", ")
            ))
        })?;
        let transport: Arc<dyn HttpTransport> = match &self.transport {
            Some(transport) => transport.clone(),
            None => Arc::new(ReqwestTransport::new()?),
        };
        let adapter = constructor(config, transport)?;
        info!(
            client = %config.client_name,
            base_url = %config.base_url,
            "edgecloud adapter created"
        );
        Ok(adapter)
    }

    pub fn create_adapters(&self, specs: &AdapterSpecs) -> EdgeCloudResult<Adapters> {
        let edgecloud = specs
            .edgecloud
            .as_ref()
            .map(|config| self.create_edgecloud(config))
            .transpose()?;
        Ok(Adapters { edgecloud })
    }
}

/// Instantiate the adapters of `specs` with the built-in registry
pub fn create_adapters_from(specs: &AdapterSpecs) -> EdgeCloudResult<Adapters> {
    AdapterRegistry::default().create_adapters(specs)
}

fn i2edge(
    config: &EdgeCloudConfig,
    transport: Arc<dyn HttpTransport>,
) -> EdgeCloudResult<Arc<dyn EdgeCloudManagement>> {
    let flavour_id = config.require_flavour()?;
    let mut client = I2EdgeClient::with_transport(&config.base_url, flavour_id, transport);
    if let Some(namespace) = config.namespace() {
        client = client.with_namespace(namespace);
    }
    Ok(Arc::new(client))
}

fn kubernetes(
    config: &EdgeCloudConfig,
    transport: Arc<dyn HttpTransport>,
) -> EdgeCloudResult<Arc<dyn EdgeCloudManagement>> {
    let mut client = KubernetesClient::with_transport(&config.base_url, transport);
    if let Some(namespace) = config.namespace() {
        client = client.with_namespace(namespace);
    }
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeshim_core::error::PlatformKind;
    use edgeshim_test_utils::mocks::create_silent_transport;
    use serde_json::json;

    fn registry() -> AdapterRegistry {
        AdapterRegistry::new().with_transport(Arc::new(create_silent_transport()))
    }

    #[test]
    fn builtin_clients_are_registered() {
        assert_eq!(registry().edgecloud_clients(), vec!["i2edge", "kubernetes"]);
    }

    #[test]
    fn adapters_are_selected_by_client_name() {
        let i2edge = registry()
            .create_edgecloud(
                &EdgeCloudConfig::new("i2edge", "http://i2edge:30769").with_flavour("f1"),
            )
            .unwrap();
        assert_eq!(i2edge.platform(), PlatformKind::I2Edge);

        let kubernetes = registry()
            .create_edgecloud(&EdgeCloudConfig::new("kubernetes", "http://k8s:8080"))
            .unwrap();
        assert_eq!(kubernetes.platform(), PlatformKind::Kubernetes);
    }

    #[test]
    fn unknown_client_is_a_config_error() {
        let err = registry()
            .create_edgecloud(&EdgeCloudConfig::new("aeros", "http://aeros"))
            .unwrap_err();
        assert!(matches!(err, EdgeCloudError::Config(ref message) if message.contains("aeros")));
    }

    #[test]
    fn i2edge_requires_a_flavour() {
        let err = registry()
            .create_edgecloud(&EdgeCloudConfig::new("i2edge", "http://i2edge"))
            .unwrap_err();
        assert!(err.to_string().contains("flavour_id"));
    }

    #[test]
    fn missing_sections_yield_no_adapter() {
        let specs = AdapterSpecs::from_value(json!({})).unwrap();
        let adapters = registry().create_adapters(&specs).unwrap();
        assert!(adapters.edgecloud.is_none());
        assert!(adapters.edgecloud().is_err());
    }

    #[test]
    fn custom_constructors_can_be_registered() {
        fn custom(
            config: &EdgeCloudConfig,
            transport: Arc<dyn HttpTransport>,
        ) -> EdgeCloudResult<Arc<dyn EdgeCloudManagement>> {
            Ok(Arc::new(KubernetesClient::with_transport(&config.base_url, transport)))
        }

        let mut registry = registry();
        registry.register_edgecloud("piedge", custom);
        let adapter = registry
            .create_edgecloud(&EdgeCloudConfig::new("piedge", "http://piedge"))
            .unwrap();
        assert_eq!(adapter.platform(), PlatformKind::Kubernetes);
    }
}
