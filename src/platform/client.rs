//! # Platform Connect Client
//!
//! Native Connect-protocol client for the Cosmo platform service.
//! Uses reqwest for HTTP requests with unary JSON encoding:
//!
//! ```text
//! POST {api_url}/wg.cosmo.platform.v1.PlatformService/{Method}
//! Content-Type: application/json
//! Connect-Protocol-Version: 1
//! ```
//!
//! A 2xx answer carries the response message. Anything else carries a Connect
//! error body `{"code": "...", "message": "..."}`.

use super::messages::*;
use super::PlatformService;
use crate::config::ResolvedConfig;
use crate::constants::{CONNECT_PROTOCOL_VERSION, PLATFORM_SERVICE_PATH};
use crate::error::{ProviderError, Result};
use crate::observability::metrics;
use crate::transport::build_http_client;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, debug_span, Instrument};

/// Connect error body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
struct ConnectErrorResponse {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Platform service client over HTTP
#[derive(Clone)]
pub struct PlatformClient {
    http_client: Client,
    base_url: String,
}

impl std::fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PlatformClient {
    /// Create a client with its own authenticated transport
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &ResolvedConfig, version: &str) -> anyhow::Result<Self> {
        let http_client = build_http_client(config, version)?;
        debug!("Initializing platform client for {}", config.api_url);
        Ok(Self::with_http_client(http_client, config.api_url.clone()))
    }

    /// Wrap an already configured HTTP client
    pub fn with_http_client(http_client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{PLATFORM_SERVICE_PATH}/{method}", self.base_url)
    }

    async fn call<Req, Resp>(&self, method: &'static str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let span = debug_span!("platform.rpc", rpc.method = method);
        async {
            let start = Instant::now();
            let result = self.send(method, request).await;
            metrics::record_rpc(method, start.elapsed().as_secs_f64(), result.is_ok());
            result
        }
        .instrument(span)
        .await
    }

    async fn send<Req, Resp>(&self, method: &'static str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let response = self
            .http_client
            .post(self.method_url(method))
            .header("Connect-Protocol-Version", CONNECT_PROTOCOL_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                operation: method,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            debug!("{} returned HTTP {}: {}", method, status, error_text);
            return Err(connect_error(method, status, &error_text));
        }

        response
            .json::<Resp>()
            .await
            .map_err(|source| ProviderError::Transport {
                operation: method,
                source,
            })
    }
}

/// Map a non-2xx answer onto an rpc error
fn connect_error(method: &'static str, status: reqwest::StatusCode, body: &str) -> ProviderError {
    match serde_json::from_str::<ConnectErrorResponse>(body) {
        Ok(error) if !error.code.is_empty() => ProviderError::Rpc {
            operation: method,
            code: error.code,
            message: error.message,
        },
        _ => ProviderError::Rpc {
            operation: method,
            code: format!("http_{}", status.as_u16()),
            message: if body.is_empty() {
                status.to_string()
            } else {
                body.to_string()
            },
        },
    }
}

#[async_trait]
impl PlatformService for PlatformClient {
    async fn create_namespace(&self, request: CreateNamespaceRequest) -> Result<StatusResponse> {
        self.call("CreateNamespace", &request).await
    }

    async fn get_namespaces(&self) -> Result<GetNamespacesResponse> {
        self.call("GetNamespaces", &GetNamespacesRequest::default())
            .await
    }

    async fn rename_namespace(&self, request: RenameNamespaceRequest) -> Result<StatusResponse> {
        self.call("RenameNamespace", &request).await
    }

    async fn delete_namespace(&self, request: DeleteNamespaceRequest) -> Result<StatusResponse> {
        self.call("DeleteNamespace", &request).await
    }

    async fn create_federated_graph(
        &self,
        request: CreateFederatedGraphRequest,
    ) -> Result<CompositionResponse> {
        self.call("CreateFederatedGraph", &request).await
    }

    async fn get_federated_graphs(
        &self,
        request: GetFederatedGraphsRequest,
    ) -> Result<GetFederatedGraphsResponse> {
        self.call("GetFederatedGraphs", &request).await
    }

    async fn update_federated_graph(
        &self,
        request: UpdateFederatedGraphRequest,
    ) -> Result<CompositionResponse> {
        self.call("UpdateFederatedGraph", &request).await
    }

    async fn delete_federated_graph(
        &self,
        request: DeleteFederatedGraphRequest,
    ) -> Result<StatusResponse> {
        self.call("DeleteFederatedGraph", &request).await
    }

    async fn create_federated_subgraph(
        &self,
        request: CreateFederatedSubgraphRequest,
    ) -> Result<StatusResponse> {
        self.call("CreateFederatedSubgraph", &request).await
    }

    async fn get_subgraphs(&self, request: GetSubgraphsRequest) -> Result<GetSubgraphsResponse> {
        self.call("GetSubgraphs", &request).await
    }

    async fn publish_federated_subgraph(
        &self,
        request: PublishFederatedSubgraphRequest,
    ) -> Result<CompositionResponse> {
        self.call("PublishFederatedSubgraph", &request).await
    }

    async fn get_latest_subgraph_sdl(
        &self,
        request: GetLatestSubgraphSdlRequest,
    ) -> Result<GetLatestSubgraphSdlResponse> {
        self.call("GetLatestSubgraphSDL", &request).await
    }

    async fn move_subgraph(&self, request: MoveGraphRequest) -> Result<StatusResponse> {
        self.call("MoveSubgraph", &request).await
    }

    async fn update_subgraph(&self, request: UpdateSubgraphRequest) -> Result<CompositionResponse> {
        self.call("UpdateSubgraph", &request).await
    }

    async fn delete_federated_subgraph(
        &self,
        request: DeleteFederatedSubgraphRequest,
    ) -> Result<StatusResponse> {
        self.call("DeleteFederatedSubgraph", &request).await
    }
}
