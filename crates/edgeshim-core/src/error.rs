//! Error types for edgeshim
//!
//! Every adapter method either returns a normalized response or one of the
//! errors below. Partner transport failures keep the partner they came from.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// Partner backends an adapter can front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// Artefact/Helm based edge platform
    I2Edge,
    /// Kubernetes-native service-function platform
    Kubernetes,
}

impl PlatformKind {
    /// Name used as `client_name` in adapter configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformKind::I2Edge => "i2edge",
            PlatformKind::Kubernetes => "kubernetes",
        }
    }
}

impl Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformKind {
    type Err = EdgeCloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "i2edge" => Ok(PlatformKind::I2Edge),
            "kubernetes" => Ok(PlatformKind::Kubernetes),
            other => Err(EdgeCloudError::Config(format!(
                "unknown edgecloud client_name '{}'",
                other
            ))),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

/// A failed call to a partner backend.
///
/// Carries the upstream status when the partner answered, `None` when the
/// request never produced a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{platform} request failed{}: {message}", status_suffix(.status))]
pub struct PlatformError {
    pub platform: PlatformKind,
    pub status: Option<u16>,
    pub message: String,
}

impl PlatformError {
    pub fn new(platform: PlatformKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            platform,
            status,
            message: message.into(),
        }
    }

    /// Whether the partner answered 404
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    /// Convert into an [`EdgeCloudError`], turning an upstream 404 on a keyed
    /// resource into [`EdgeCloudError::NotFound`].
    pub fn for_resource(self, resource: &str, id: &str) -> EdgeCloudError {
        if self.is_not_found() {
            EdgeCloudError::not_found(resource, id)
        } else {
            EdgeCloudError::Platform(self)
        }
    }
}

/// Edge-cloud adapter error types
#[derive(Error, Debug)]
pub enum EdgeCloudError {
    /// Inbound payload failed standardized schema validation
    #[error("Validation error on `{field}`: {message}")]
    Validation { field: String, message: String },

    /// Partner response lacks data the mapping needs, or the mapped body is
    /// not schema-valid
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Requested resource does not exist on the partner backend
    #[error("{resource} '{id}' not found")]
    NotFound { resource: String, id: String },

    /// Partner transport failure
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Operation has no counterpart on this partner
    #[error("{operation} is not implemented for the {platform} platform")]
    NotImplemented {
        operation: &'static str,
        platform: PlatformKind,
    },

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for adapter operations
pub type EdgeCloudResult<T> = Result<T, EdgeCloudError>;

impl EdgeCloudError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EdgeCloudError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        EdgeCloudError::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// A partner record is missing a field the mapping requires
    pub fn missing_field(context: &str, field: &str) -> Self {
        EdgeCloudError::Mapping(format!("{} missing required field `{}`", context, field))
    }

    pub fn not_implemented(operation: &'static str, platform: PlatformKind) -> Self {
        EdgeCloudError::NotImplemented {
            operation,
            platform,
        }
    }

    /// Check if the error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, EdgeCloudError::Validation { .. })
    }

    /// Check if the error is a mapping error
    pub fn is_mapping(&self) -> bool {
        matches!(self, EdgeCloudError::Mapping(_))
    }

    /// Not-found outcome, either detected locally or reported by the partner
    pub fn is_not_found(&self) -> bool {
        match self {
            EdgeCloudError::NotFound { .. } => true,
            EdgeCloudError::Platform(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Check if the error came from the partner transport
    pub fn is_platform(&self) -> bool {
        matches!(self, EdgeCloudError::Platform(_))
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, EdgeCloudError::NotImplemented { .. })
    }

    /// Upstream HTTP status, when the error carries one
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            EdgeCloudError::Platform(e) => e.status,
            _ => None,
        }
    }
}
