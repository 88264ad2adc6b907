//! # Platform Service
//!
//! Abstract interface for the Cosmo control plane's platform API.
//!
//! The reconcilers only ever talk to this trait. Implementations return an error
//! only when the call itself failed; a decoded message with a non-`OK` status is a
//! successful call and it is up to the caller to inspect it.

use crate::error::Result;
use async_trait::async_trait;

pub mod client;
pub mod messages;

pub use client::PlatformClient;
pub use messages::*;

/// Platform API operations used by the resources
#[async_trait]
pub trait PlatformService: Send + Sync + std::fmt::Debug {
    async fn create_namespace(&self, request: CreateNamespaceRequest) -> Result<StatusResponse>;

    async fn get_namespaces(&self) -> Result<GetNamespacesResponse>;

    async fn rename_namespace(&self, request: RenameNamespaceRequest) -> Result<StatusResponse>;

    async fn delete_namespace(&self, request: DeleteNamespaceRequest) -> Result<StatusResponse>;

    async fn create_federated_graph(
        &self,
        request: CreateFederatedGraphRequest,
    ) -> Result<CompositionResponse>;

    async fn get_federated_graphs(
        &self,
        request: GetFederatedGraphsRequest,
    ) -> Result<GetFederatedGraphsResponse>;

    async fn update_federated_graph(
        &self,
        request: UpdateFederatedGraphRequest,
    ) -> Result<CompositionResponse>;

    async fn delete_federated_graph(
        &self,
        request: DeleteFederatedGraphRequest,
    ) -> Result<StatusResponse>;

    async fn create_federated_subgraph(
        &self,
        request: CreateFederatedSubgraphRequest,
    ) -> Result<StatusResponse>;

    async fn get_subgraphs(&self, request: GetSubgraphsRequest) -> Result<GetSubgraphsResponse>;

    async fn publish_federated_subgraph(
        &self,
        request: PublishFederatedSubgraphRequest,
    ) -> Result<CompositionResponse>;

    async fn get_latest_subgraph_sdl(
        &self,
        request: GetLatestSubgraphSdlRequest,
    ) -> Result<GetLatestSubgraphSdlResponse>;

    async fn move_subgraph(&self, request: MoveGraphRequest) -> Result<StatusResponse>;

    async fn update_subgraph(&self, request: UpdateSubgraphRequest) -> Result<CompositionResponse>;

    async fn delete_federated_subgraph(
        &self,
        request: DeleteFederatedSubgraphRequest,
    ) -> Result<StatusResponse>;
}
