//! Compute flavour selection for deployments

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::EdgeCloudResult;

/// Inputs available when choosing a flavour for a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavourRequest<'a> {
    pub app_id: &'a str,
    pub zone_id: &'a str,
}

/// Strategy choosing the compute flavour a deployment runs on
#[async_trait]
pub trait FlavourSelector: Send + Sync + Debug {
    async fn select(&self, request: &FlavourRequest<'_>) -> EdgeCloudResult<String>;
}

/// Always picks the flavour set in the adapter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFlavour {
    flavour_id: String,
}

impl StaticFlavour {
    pub fn new(flavour_id: impl Into<String>) -> Self {
        Self {
            flavour_id: flavour_id.into(),
        }
    }

    pub fn flavour_id(&self) -> &str {
        &self.flavour_id
    }
}

#[async_trait]
impl FlavourSelector for StaticFlavour {
    async fn select(&self, _request: &FlavourRequest<'_>) -> EdgeCloudResult<String> {
        Ok(self.flavour_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_flavour_ignores_the_request() {
        let selector = StaticFlavour::new("67f3a0b0e3184a85952e174d");
        for zone in ["zoneA", "zoneB"] {
            let picked = selector
                .select(&FlavourRequest { app_id: "demo-1", zone_id: zone })
                .await
                .unwrap();
            assert_eq!(picked, "67f3a0b0e3184a85952e174d");
        }
    }
}
