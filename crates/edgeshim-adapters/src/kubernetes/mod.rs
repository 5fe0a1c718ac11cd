//! Kubernetes service-function partner adapter

pub mod client;
pub mod common;
pub mod schemas;

pub use client::KubernetesClient;
