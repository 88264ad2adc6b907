//! # Federated Graph
//!
//! A federated graph composes every subgraph of its namespace whose labels match one
//! of its label matchers. Creation and updates trigger a composition on the platform;
//! composition and deployment errors come back inline and are reported as warnings.
//!
//! The platform never returns the admission webhook secret, so `read` keeps the
//! value from the prior state.

use super::labels::{decode_label_matchers, encode_label_matchers, LabelMatcher};
use super::{
    check_composition, default_namespace, ensure_ok, find_by_identity, non_empty, observe,
    parse_import_id, Resource,
};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::platform::{
    CreateFederatedGraphRequest, DeleteFederatedGraphRequest, FederatedGraph,
    GetFederatedGraphsRequest, PlatformService, UpdateFederatedGraphRequest,
};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

const READ_SUMMARY: &str = "Error reading federated graph";

/// Federated graph resource.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FederatedGraphModel {
    /// Identifier
    #[serde(default)]
    pub id: Option<String>,
    /// The name of the federated graph to create. It is usually in the format of
    /// <org>.<env> and is used to uniquely identify your federated graph.
    pub name: String,
    /// The namespace of the federated graph. Defaults to `default`.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// The routing URL of your router. This is the URL that the router will be
    /// accessible at.
    pub routing_url: String,
    /// The label matchers selecting the subgraphs that compose this graph.
    #[serde(default)]
    pub label_matchers: Vec<LabelMatcher>,
    /// The admission webhook URL of the federated graph.
    #[serde(default)]
    pub admission_webhook_url: Option<String>,
    /// The admission webhook secret of the federated graph.
    #[serde(default)]
    pub admission_webhook_secret: Option<String>,
}

impl std::fmt::Debug for FederatedGraphModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FederatedGraphModel")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("routing_url", &self.routing_url)
            .field("label_matchers", &self.label_matchers)
            .field("admission_webhook_url", &self.admission_webhook_url)
            .field(
                "admission_webhook_secret",
                &self.admission_webhook_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct FederatedGraphResource {
    client: Arc<dyn PlatformService>,
}

impl FederatedGraphResource {
    pub fn new(client: Arc<dyn PlatformService>) -> Self {
        Self { client }
    }

    async fn list(&self, namespace: &str, summary: &str) -> Result<Vec<FederatedGraph>> {
        let response = self
            .client
            .get_federated_graphs(GetFederatedGraphsRequest {
                namespace: namespace.to_string(),
            })
            .await?;
        ensure_ok(&response, summary)?;
        Ok(response.graphs)
    }
}

#[async_trait]
impl Resource for FederatedGraphResource {
    type Model = FederatedGraphModel;

    const KIND: &'static str = crate::constants::FEDERATED_GRAPH_KIND;

    async fn create(
        &self,
        plan: FederatedGraphModel,
        diags: &mut Diagnostics,
    ) -> Result<FederatedGraphModel> {
        observe(Self::KIND, "create", async move {
            let label_matchers = encode_label_matchers(&plan.label_matchers)?;

            let response = self
                .client
                .create_federated_graph(CreateFederatedGraphRequest {
                    name: plan.name.clone(),
                    namespace: plan.namespace.clone(),
                    routing_url: plan.routing_url.clone(),
                    label_matchers,
                    admission_webhook_url: plan.admission_webhook_url.clone(),
                    admission_webhook_secret: plan.admission_webhook_secret.clone(),
                })
                .await?;
            check_composition(
                &response,
                "creating graph",
                "Error creating federated graph",
                diags,
            )?;

            let created = find_by_identity(
                self.list(&plan.namespace, READ_SUMMARY).await?,
                |g| g.name == plan.name,
                READ_SUMMARY,
                "Federated graph not found",
            )?;
            info!(
                "Created federated graph {}/{} ({})",
                plan.namespace, plan.name, created.id
            );

            Ok(FederatedGraphModel {
                id: Some(created.id),
                ..plan
            })
        })
        .await
    }

    async fn read(
        &self,
        state: FederatedGraphModel,
        _diags: &mut Diagnostics,
    ) -> Result<FederatedGraphModel> {
        observe(Self::KIND, "read", async move {
            let id = state.id.clone().unwrap_or_default();
            let current = find_by_identity(
                self.list(&state.namespace, "Error fetching federated graph list")
                    .await?,
                |g| g.id == id,
                READ_SUMMARY,
                "federated graph not found",
            )?;

            Ok(FederatedGraphModel {
                id: Some(current.id),
                name: current.name,
                namespace: current.namespace,
                routing_url: current.routing_url,
                label_matchers: decode_label_matchers(&current.label_matchers)?,
                admission_webhook_url: current.admission_webhook_url.and_then(non_empty),
                admission_webhook_secret: state.admission_webhook_secret,
            })
        })
        .await
    }

    async fn update(
        &self,
        plan: FederatedGraphModel,
        state: FederatedGraphModel,
        diags: &mut Diagnostics,
    ) -> Result<FederatedGraphModel> {
        observe(Self::KIND, "update", async move {
            let label_matchers = encode_label_matchers(&plan.label_matchers)?;
            let unset_label_matchers =
                label_matchers.is_empty() && !state.label_matchers.is_empty();

            let response = self
                .client
                .update_federated_graph(UpdateFederatedGraphRequest {
                    name: plan.name.clone(),
                    namespace: plan.namespace.clone(),
                    routing_url: plan.routing_url.clone(),
                    label_matchers,
                    unset_label_matchers,
                    admission_webhook_url: plan.admission_webhook_url.clone(),
                    admission_webhook_secret: plan.admission_webhook_secret.clone(),
                })
                .await?;
            check_composition(
                &response,
                "updating graph",
                "Error updating federated graph",
                diags,
            )?;
            info!("Updated federated graph {}/{}", plan.namespace, plan.name);

            Ok(FederatedGraphModel {
                id: state.id,
                ..plan
            })
        })
        .await
    }

    async fn delete(&self, state: FederatedGraphModel, _diags: &mut Diagnostics) -> Result<()> {
        observe(Self::KIND, "delete", async move {
            let response = self
                .client
                .delete_federated_graph(DeleteFederatedGraphRequest {
                    name: state.name.clone(),
                    namespace: state.namespace.clone(),
                })
                .await?;
            ensure_ok(&response, "Error deleting federated graph")?;
            info!("Deleted federated graph {}/{}", state.namespace, state.name);
            Ok(())
        })
        .await
    }

    fn import(&self, id: &str) -> Result<FederatedGraphModel> {
        let (namespace, id) = parse_import_id(id)?;
        Ok(FederatedGraphModel {
            id: Some(id),
            namespace: namespace.unwrap_or_else(default_namespace),
            ..Default::default()
        })
    }
}
