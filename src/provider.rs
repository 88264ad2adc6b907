//! # Provider
//!
//! Entry point for the host: resolves configuration, builds the authenticated
//! platform client and hands out the resource reconcilers.
//!
//! Every `configure` call builds its own HTTP client, so providers configured with
//! different credentials in one process never share headers.

use crate::config::ProviderConfig;
use crate::constants::PROVIDER_TYPE_NAME;
use crate::error::ProviderError;
use crate::platform::{PlatformClient, PlatformService};
use crate::resources::{
    FederatedGraphResource, FederatedSubgraphResource, NamespaceResource, Resource,
};
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Provider metadata reported to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    pub type_name: String,
    pub version: String,
}

#[derive(Debug, Clone)]
pub struct WundergraphProvider {
    version: String,
}

impl WundergraphProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: self.version.clone(),
        }
    }

    /// Resolve configuration and connect to the platform
    ///
    /// # Errors
    /// Returns an error if configuration cannot be resolved or the HTTP client cannot be built
    pub fn configure(&self, config: ProviderConfig) -> Result<ConfiguredProvider> {
        let resolved = config.resolve().map_err(ProviderError::from)?;
        let client = PlatformClient::new(&resolved, &self.version)?;
        info!(
            "Configured {} provider {} against {}",
            PROVIDER_TYPE_NAME, self.version, resolved.api_url
        );
        Ok(ConfiguredProvider::with_service(Arc::new(client)))
    }
}

/// A provider bound to one platform service
#[derive(Debug, Clone)]
pub struct ConfiguredProvider {
    service: Arc<dyn PlatformService>,
}

impl ConfiguredProvider {
    pub fn with_service(service: Arc<dyn PlatformService>) -> Self {
        Self { service }
    }

    pub fn namespaces(&self) -> NamespaceResource {
        NamespaceResource::new(Arc::clone(&self.service))
    }

    pub fn federated_graphs(&self) -> FederatedGraphResource {
        FederatedGraphResource::new(Arc::clone(&self.service))
    }

    pub fn federated_subgraphs(&self) -> FederatedSubgraphResource {
        FederatedSubgraphResource::new(Arc::clone(&self.service))
    }

    pub fn resource_type_names(&self) -> Vec<String> {
        vec![
            self.namespaces().type_name(),
            self.federated_graphs().type_name(),
            self.federated_subgraphs().type_name(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_metadata() {
        let metadata = WundergraphProvider::new("0.4.0").metadata();
        assert_eq!(metadata.type_name, "wundergraph");
        assert_eq!(metadata.version, "0.4.0");
    }

    #[test]
    fn test_configure_rejects_empty_api_key() {
        let err = WundergraphProvider::new("dev")
            .configure(ProviderConfig {
                api_key: Some(String::new()),
                api_url: Some("http://localhost:3001".to_string()),
                timeout_secs: None,
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::Config(ConfigError::MissingApiKey(_)))
        ));
    }
}
