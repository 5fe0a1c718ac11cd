//! Adapter configuration
//!
//! Adapters are described by an [`AdapterSpecs`] mapping with one section per
//! domain. Only the `edgecloud` section exists:
//!
//! ```toml
//! [edgecloud]
//! client_name = "i2edge"
//! base_url = "http://192.168.123.48:30769/"
//! flavour_id = "67f3a0b0e3184a85952e174d"
//! namespace = "edge-apps"
//! ```
//!
//! Keys other than `client_name`, `base_url` and `flavour_id` are kept as
//! opaque extras for the selected adapter.

use edgeshim_core::error::{EdgeCloudError, EdgeCloudResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Prefix of environment overrides, e.g. `EDGESHIM__EDGECLOUD__BASE_URL`
pub const ENV_PREFIX: &str = "EDGESHIM";

lazy_static! {
    static ref HTTP_URL: Regex = Regex::new(r"^https?://[^\s/?#]+(?:[/?#]\S*)?$").unwrap();
}

/// Adapter sections of the SDK configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterSpecs {
    #[serde(default)]
    pub edgecloud: Option<EdgeCloudConfig>,
}

/// Edge-cloud adapter selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeCloudConfig {
    /// Registered adapter name (`i2edge`, `kubernetes`)
    pub client_name: String,
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavour_id: Option<String>,
    /// Adapter specific settings (`namespace`, `scs_as_id`, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl EdgeCloudConfig {
    pub fn new(client_name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
            base_url: base_url.into(),
            flavour_id: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_flavour(mut self, flavour_id: impl Into<String>) -> Self {
        self.flavour_id = Some(flavour_id.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// String-valued extra setting
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str).filter(|v| !v.is_empty())
    }

    pub fn namespace(&self) -> Option<&str> {
        self.extra_str("namespace")
    }

    /// Flavour id, required by adapters that deploy by flavour
    pub fn require_flavour(&self) -> EdgeCloudResult<&str> {
        self.flavour_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                EdgeCloudError::Config(format!(
                    "edgecloud.flavour_id is required for client '{}'",
                    self.client_name
                ))
            })
    }

    pub fn validate(&self) -> EdgeCloudResult<()> {
        if self.client_name.trim().is_empty() {
            return Err(EdgeCloudError::Config("edgecloud.client_name must not be empty".into()));
        }
        if !HTTP_URL.is_match(&self.base_url) {
            return Err(EdgeCloudError::Config(format!(
                "edgecloud.base_url '{}' is not an http(s) URL",
                self.base_url
            )));
        }
        Ok(())
    }
}

impl AdapterSpecs {
    /// Specs from an in-process mapping
    pub fn from_value(value: Value) -> EdgeCloudResult<Self> {
        let specs: AdapterSpecs = serde_json::from_value(value)
            .map_err(|e| EdgeCloudError::Config(format!("invalid adapter specs: {}", e)))?;
        specs.validate()?;
        Ok(specs)
    }

    /// Specs from a configuration file (format by extension), overridden by
    /// `EDGESHIM__<SECTION>__<KEY>` environment variables
    pub fn load(path: impl AsRef<Path>) -> EdgeCloudResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading adapter specs");
        let specs: AdapterSpecs = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| EdgeCloudError::Config(format!("{}: {}", path.display(), e)))?;
        specs.validate()?;
        Ok(specs)
    }

    pub fn validate(&self) -> EdgeCloudResult<()> {
        match &self.edgecloud {
            Some(edgecloud) => edgecloud.validate(),
            None => Ok(()),
        }
    }
}
