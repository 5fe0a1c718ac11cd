//! Edgeshim Core
//!
//! Partner-neutral building blocks of the edge-cloud shim: the standardized
//! CAMARA and GSMA models, the error taxonomy, the normalized response
//! envelope, outbound body schemas and the [`EdgeCloudManagement`] contract
//! implemented by every partner adapter.

#![forbid(unsafe_code)]

pub mod camara;
pub mod error;
pub mod flavour;
pub mod gsma;
pub mod ids;
pub mod instances;
pub mod interface;
pub mod response;
pub mod schema;
pub mod transport;
pub mod validation;

pub use error::{EdgeCloudError, EdgeCloudResult, PlatformError, PlatformKind};
pub use flavour::{FlavourRequest, FlavourSelector, StaticFlavour};
pub use ids::ensure_valid_uuid;
pub use instances::{filter_instances, find_instance, InstanceQuery, InstanceRecord};
pub use interface::EdgeCloudManagement;
pub use response::NormalizedHttpResponse;
pub use schema::BodySchema;
pub use transport::{HttpTransport, Method, RequestSummary, TransportError, TransportResponse};
