//! Edgeshim SDK
//!
//! Entry point for callers: loads [`AdapterSpecs`], instantiates the
//! configured partner adapter through the [`AdapterRegistry`] and sets up
//! tracing.
//!
//! ```no_run
//! use edgeshim_sdk::{create_adapters_from, AdapterSpecs, EdgeCloudManagement};
//! use serde_json::json;
//!
//! # async fn run() -> edgeshim_sdk::EdgeCloudResult<()> {
//! let specs = AdapterSpecs::from_value(json!({
//!     "edgecloud": {
//!         "client_name": "i2edge",
//!         "base_url": "http://192.168.123.48:30769/",
//!         "flavour_id": "67f3a0b0e3184a85952e174d"
//!     }
//! }))?;
//! let adapters = create_adapters_from(&specs)?;
//! let zones = adapters.edgecloud()?.get_edge_cloud_zones(None, None).await?;
//! println!("{}", zones.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod telemetry;

pub use config::{AdapterSpecs, EdgeCloudConfig};
pub use registry::{create_adapters_from, AdapterRegistry, Adapters, EdgeCloudConstructor};
pub use telemetry::{init_tracing, LogFormat, TelemetryConfig};

pub use edgeshim_core::{
    EdgeCloudError, EdgeCloudManagement, EdgeCloudResult, NormalizedHttpResponse,
};

/// Partner-neutral models and contracts
pub use edgeshim_core as core;
/// Partner adapters
pub use edgeshim_adapters as adapters;
