//! Edgeshim Adapters
//!
//! Partner adapters implementing [`edgeshim_core::EdgeCloudManagement`]:
//! i2Edge (Helm artefacts) and the Kubernetes service-function API. Both
//! talk to their partner through an [`edgeshim_core::HttpTransport`], by
//! default the reqwest-backed [`ReqwestTransport`].

#![forbid(unsafe_code)]

pub mod http;
pub mod i2edge;
pub mod kubernetes;
pub mod transport;

pub use http::PartnerHttp;
pub use i2edge::I2EdgeClient;
pub use kubernetes::KubernetesClient;
pub use transport::ReqwestTransport;
