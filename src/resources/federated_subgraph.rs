//! # Federated Subgraph
//!
//! A subgraph is created in two steps: the subgraph itself, then its first schema
//! publish. Updates may take up to three calls, in this order:
//!
//! 1. publish the schema when it changed
//! 2. move the subgraph when its namespace changed
//! 3. update routing, subscription settings and labels
//!
//! Each call halts the sequence on failure. Calls that already succeeded are not
//! undone.

use super::labels::{labels_from_native, labels_to_native};
use super::{
    check_composition, default_namespace, ensure_ok, find_by_identity, non_empty, observe,
    parse_import_id, Resource,
};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::platform::{
    CreateFederatedSubgraphRequest, DeleteFederatedSubgraphRequest, GetLatestSubgraphSdlRequest,
    GetSubgraphsRequest, Label, MoveGraphRequest, PlatformService,
    PublishFederatedSubgraphRequest, Subgraph, SubscriptionProtocol, UpdateSubgraphRequest,
    WebsocketSubprotocol,
};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

fn default_subscription_protocol() -> Option<String> {
    Some(SubscriptionProtocol::default().to_string())
}

fn default_websocket_subprotocol() -> Option<String> {
    Some(WebsocketSubprotocol::default().to_string())
}

/// Federated subgraph resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FederatedSubgraphModel {
    /// Identifier
    #[serde(default)]
    pub id: Option<String>,
    /// The name of the subgraph to create. It is usually in the format of
    /// <org>.<service.name> and is used to uniquely identify your federated subgraph.
    pub name: String,
    /// The namespace name of the subgraph. Defaults to `default`.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// The routing URL of your subgraph. Required unless the subgraph is an
    /// event-driven graph.
    #[serde(default)]
    pub routing_url: Option<String>,
    /// The schema to upload to the subgraph, in SDL format.
    pub schema: String,
    /// The URL used when subscribing to the subgraph.
    #[serde(default)]
    pub subscription_url: Option<String>,
    /// One of `ws`, `sse`, `sse_post`.
    #[serde(default = "default_subscription_protocol")]
    pub subscription_protocol: Option<String>,
    /// One of `auto`, `graphql-ws`, `graphql-transport-ws`. Only used with `ws`.
    #[serde(default = "default_websocket_subprotocol")]
    pub websocket_subprotocol: Option<String>,
    /// The labels to apply to the subgraph.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Whether the subgraph is an Event-Driven Graph (EDG).
    #[serde(default)]
    pub is_event_driven_graph: bool,
    /// Whether the subgraph is a feature subgraph.
    #[serde(default)]
    pub is_feature_subgraph: bool,
}

/// Plan values checked and mapped before any remote call
struct Mapped {
    subscription_protocol: SubscriptionProtocol,
    websocket_subprotocol: WebsocketSubprotocol,
    labels: Vec<Label>,
}

impl FederatedSubgraphModel {
    fn mapped(&self) -> Result<Mapped> {
        Ok(Mapped {
            subscription_protocol: SubscriptionProtocol::map(self.subscription_protocol.as_deref())?,
            websocket_subprotocol: WebsocketSubprotocol::map(self.websocket_subprotocol.as_deref())?,
            labels: labels_to_native(&self.labels),
        })
    }

    /// Literals the platform reports but this provider does not know are kept as-is
    fn from_remote(subgraph: Subgraph, schema: String) -> Self {
        let subscription_protocol = SubscriptionProtocol::from_remote(&subgraph.subscription_protocol)
            .map_or(subgraph.subscription_protocol, |p| p.to_string());
        let websocket_subprotocol = WebsocketSubprotocol::from_remote(&subgraph.websocket_subprotocol)
            .map_or(subgraph.websocket_subprotocol, |p| p.to_string());
        Self {
            id: Some(subgraph.id),
            name: subgraph.name,
            namespace: subgraph.namespace,
            routing_url: non_empty(subgraph.routing_url),
            schema,
            subscription_url: non_empty(subgraph.subscription_url),
            subscription_protocol: Some(subscription_protocol),
            websocket_subprotocol: Some(websocket_subprotocol),
            labels: labels_from_native(&subgraph.labels),
            is_event_driven_graph: subgraph.is_event_driven_graph,
            is_feature_subgraph: subgraph.is_feature_subgraph,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FederatedSubgraphResource {
    client: Arc<dyn PlatformService>,
}

impl FederatedSubgraphResource {
    pub fn new(client: Arc<dyn PlatformService>) -> Self {
        Self { client }
    }

    async fn list(&self, namespace: &str, summary: &str) -> Result<Vec<Subgraph>> {
        let response = self
            .client
            .get_subgraphs(GetSubgraphsRequest {
                namespace: namespace.to_string(),
            })
            .await?;
        ensure_ok(&response, summary)?;
        Ok(response.graphs)
    }

    async fn publish(
        &self,
        name: &str,
        namespace: &str,
        schema: &str,
        action: &str,
        summary: &str,
        diags: &mut Diagnostics,
    ) -> Result<()> {
        let response = self
            .client
            .publish_federated_subgraph(PublishFederatedSubgraphRequest {
                name: name.to_string(),
                namespace: namespace.to_string(),
                schema: schema.to_string(),
            })
            .await?;
        check_composition(&response, action, summary, diags)?;
        debug!("Published schema of subgraph {}/{}", namespace, name);
        Ok(())
    }
}

#[async_trait]
impl Resource for FederatedSubgraphResource {
    type Model = FederatedSubgraphModel;

    const KIND: &'static str = crate::constants::FEDERATED_SUBGRAPH_KIND;

    async fn create(
        &self,
        plan: FederatedSubgraphModel,
        diags: &mut Diagnostics,
    ) -> Result<FederatedSubgraphModel> {
        observe(Self::KIND, "create", async move {
            let mapped = plan.mapped()?;

            let response = self
                .client
                .create_federated_subgraph(CreateFederatedSubgraphRequest {
                    name: plan.name.clone(),
                    namespace: plan.namespace.clone(),
                    routing_url: plan.routing_url.clone(),
                    labels: mapped.labels,
                    subscription_url: plan.subscription_url.clone(),
                    subscription_protocol: mapped.subscription_protocol,
                    websocket_subprotocol: mapped.websocket_subprotocol,
                    is_event_driven_graph: plan.is_event_driven_graph,
                    is_feature_subgraph: plan.is_feature_subgraph,
                })
                .await?;
            ensure_ok(&response, "Error creating subgraph")?;

            let created = find_by_identity(
                self.list(&plan.namespace, "Error reading subgraph").await?,
                |s| s.name == plan.name,
                "Error reading subgraph",
                "subgraph not found",
            )?;

            self.publish(
                &plan.name,
                &plan.namespace,
                &plan.schema,
                "publishing subgraph",
                "Error creating subgraph",
                diags,
            )
            .await?;
            info!(
                "Created subgraph {}/{} ({})",
                plan.namespace, plan.name, created.id
            );

            Ok(FederatedSubgraphModel {
                id: Some(created.id),
                ..plan
            })
        })
        .await
    }

    async fn read(
        &self,
        state: FederatedSubgraphModel,
        _diags: &mut Diagnostics,
    ) -> Result<FederatedSubgraphModel> {
        observe(Self::KIND, "read", async move {
            let id = state.id.unwrap_or_default();
            let current = find_by_identity(
                self.list(&state.namespace, "Error fetching subgraph list")
                    .await?,
                |s| s.id == id,
                "Error reading federated subgraph",
                "federated subgraph not found",
            )?;

            let sdl = self
                .client
                .get_latest_subgraph_sdl(GetLatestSubgraphSdlRequest {
                    name: current.name.clone(),
                    namespace: current.namespace.clone(),
                })
                .await?;
            ensure_ok(&sdl, "Error fetching SDL")?;

            Ok(FederatedSubgraphModel::from_remote(
                current,
                sdl.sdl.unwrap_or_default(),
            ))
        })
        .await
    }

    async fn update(
        &self,
        plan: FederatedSubgraphModel,
        state: FederatedSubgraphModel,
        diags: &mut Diagnostics,
    ) -> Result<FederatedSubgraphModel> {
        observe(Self::KIND, "update", async move {
            let mapped = plan.mapped()?;

            // The subgraph still lives in the prior namespace until it is moved.
            if plan.schema != state.schema {
                self.publish(
                    &plan.name,
                    &state.namespace,
                    &plan.schema,
                    "publishing subgraph",
                    "Error updating subgraph",
                    diags,
                )
                .await?;
            }

            if plan.namespace != state.namespace {
                let response = self
                    .client
                    .move_subgraph(MoveGraphRequest {
                        name: state.name.clone(),
                        namespace: state.namespace.clone(),
                        new_namespace: plan.namespace.clone(),
                    })
                    .await?;
                ensure_ok(&response, "Error moving subgraph")?;
                info!(
                    "Moved subgraph {} from {} to {}",
                    state.name, state.namespace, plan.namespace
                );
            }

            let response = self
                .client
                .update_subgraph(UpdateSubgraphRequest {
                    name: plan.name.clone(),
                    namespace: plan.namespace.clone(),
                    routing_url: plan.routing_url.clone(),
                    unset_labels: mapped.labels.is_empty() && !state.labels.is_empty(),
                    labels: mapped.labels,
                    subscription_url: plan.subscription_url.clone(),
                    subscription_protocol: mapped.subscription_protocol,
                    websocket_subprotocol: mapped.websocket_subprotocol,
                })
                .await?;
            check_composition(
                &response,
                "updating subgraph",
                "Error updating subgraph",
                diags,
            )?;
            info!("Updated subgraph {}/{}", plan.namespace, plan.name);

            Ok(FederatedSubgraphModel {
                id: state.id,
                ..plan
            })
        })
        .await
    }

    async fn delete(&self, state: FederatedSubgraphModel, _diags: &mut Diagnostics) -> Result<()> {
        observe(Self::KIND, "delete", async move {
            let response = self
                .client
                .delete_federated_subgraph(DeleteFederatedSubgraphRequest {
                    subgraph_name: state.name.clone(),
                    namespace: state.namespace.clone(),
                })
                .await?;
            ensure_ok(&response, "Error deleting subgraph")?;
            info!("Deleted subgraph {}/{}", state.namespace, state.name);
            Ok(())
        })
        .await
    }

    fn import(&self, id: &str) -> Result<FederatedSubgraphModel> {
        let (namespace, id) = parse_import_id(id)?;
        Ok(FederatedSubgraphModel {
            id: Some(id),
            namespace: namespace.unwrap_or_else(default_namespace),
            subscription_protocol: default_subscription_protocol(),
            websocket_subprotocol: default_websocket_subprotocol(),
            ..Default::default()
        })
    }
}
