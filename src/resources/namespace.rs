//! # Namespace
//!
//! Namespaces are created by name and identified by the id the platform assigns.
//! The id is discovered by listing all namespaces after the create call.

use super::{ensure_ok, find_by_identity, observe, Resource};
use crate::diagnostics::Diagnostics;
use crate::error::{Result, ValidationError};
use crate::platform::{
    CreateNamespaceRequest, DeleteNamespaceRequest, Namespace, PlatformService,
    RenameNamespaceRequest,
};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

const READ_SUMMARY: &str = "Error reading namespaces";
const NOT_FOUND: &str = "Namespace not found";

/// Namespace resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NamespaceModel {
    /// Identifier
    #[serde(default)]
    pub id: Option<String>,
    /// The name of the namespace to be created.
    pub name: String,
}

impl From<Namespace> for NamespaceModel {
    fn from(namespace: Namespace) -> Self {
        Self {
            id: Some(namespace.id),
            name: namespace.name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NamespaceResource {
    client: Arc<dyn PlatformService>,
}

impl NamespaceResource {
    pub fn new(client: Arc<dyn PlatformService>) -> Self {
        Self { client }
    }

    async fn list(&self) -> Result<Vec<Namespace>> {
        let response = self.client.get_namespaces().await?;
        ensure_ok(&response, READ_SUMMARY)?;
        Ok(response.namespaces)
    }
}

#[async_trait]
impl Resource for NamespaceResource {
    type Model = NamespaceModel;

    const KIND: &'static str = crate::constants::NAMESPACE_KIND;

    async fn create(&self, plan: NamespaceModel, _diags: &mut Diagnostics) -> Result<NamespaceModel> {
        observe(Self::KIND, "create", async move {
            let response = self
                .client
                .create_namespace(CreateNamespaceRequest {
                    name: plan.name.clone(),
                })
                .await?;
            ensure_ok(&response, "Error creating namespace")?;

            let created = find_by_identity(
                self.list().await?,
                |n| n.name == plan.name,
                READ_SUMMARY,
                NOT_FOUND,
            )?;
            info!("Created namespace {} ({})", created.name, created.id);
            Ok(created.into())
        })
        .await
    }

    async fn read(&self, state: NamespaceModel, _diags: &mut Diagnostics) -> Result<NamespaceModel> {
        observe(Self::KIND, "read", async move {
            let id = state.id.unwrap_or_default();
            let current =
                find_by_identity(self.list().await?, |n| n.id == id, READ_SUMMARY, NOT_FOUND)?;
            Ok(current.into())
        })
        .await
    }

    async fn update(
        &self,
        plan: NamespaceModel,
        state: NamespaceModel,
        _diags: &mut Diagnostics,
    ) -> Result<NamespaceModel> {
        observe(Self::KIND, "update", async move {
            if plan.name != state.name {
                let response = self
                    .client
                    .rename_namespace(RenameNamespaceRequest {
                        name: state.name.clone(),
                        new_name: plan.name.clone(),
                    })
                    .await?;
                ensure_ok(&response, "Error renaming namespace")?;
                info!("Renamed namespace {} to {}", state.name, plan.name);
            }

            Ok(NamespaceModel {
                id: state.id,
                name: plan.name,
            })
        })
        .await
    }

    async fn delete(&self, state: NamespaceModel, _diags: &mut Diagnostics) -> Result<()> {
        observe(Self::KIND, "delete", async move {
            let response = self
                .client
                .delete_namespace(DeleteNamespaceRequest {
                    name: state.name.clone(),
                })
                .await?;
            ensure_ok(&response, "Error deleting namespace")?;
            info!("Deleted namespace {}", state.name);
            Ok(())
        })
        .await
    }

    fn import(&self, id: &str) -> Result<NamespaceModel> {
        if id.is_empty() || id.contains('/') {
            return Err(ValidationError::InvalidImportId(id.to_string()).into());
        }
        Ok(NamespaceModel {
            id: Some(id.to_string()),
            name: String::new(),
        })
    }
}
