//! Common test utilities
//!
//! - `init_rustls`: process-wide rustls crypto provider for tests that open HTTP clients
//! - `FakePlatform`: in-memory platform service recording every call it receives

#![allow(dead_code, reason = "Each test crate uses a different subset of these helpers")]

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use wundergraph_provider::error::{ProviderError, Result};
use wundergraph_provider::platform::*;
use wundergraph_provider::ConfiguredProvider;

static RUSTLS_INIT: Once = Once::new();

/// Initialize rustls crypto provider for tests
///
/// Uses a `Once` to ensure it's only called once across all tests.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        rustls::crypto::ring::default_provider()
            .install_default()
            .expect("Failed to install rustls crypto provider");
    });
}

/// One recorded call: RPC method name and JSON request body
#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub body: Value,
}

#[derive(Debug, Default)]
struct Store {
    namespaces: Vec<Namespace>,
    graphs: Vec<FederatedGraph>,
    subgraphs: Vec<Subgraph>,
    sdl: HashMap<(String, String), String>,
    calls: Vec<Call>,
    statuses: HashMap<&'static str, ResponseStatus>,
    rpc_errors: HashMap<&'static str, (String, String)>,
    composition_errors: Vec<CompositionError>,
    deployment_errors: Vec<DeploymentError>,
    hide_listings: bool,
}

/// In-memory platform service
///
/// Behaves like the control plane for the happy path. Individual methods can be
/// made to answer with a non-OK status or an rpc error.
#[derive(Debug, Default)]
pub struct FakePlatform {
    store: Mutex<Store>,
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn not_found(what: &str) -> ResponseStatus {
    ResponseStatus::error(StatusCode::ErrNotFound, format!("{what} not found"))
}

impl FakePlatform {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Provider wired to this fake
    pub fn provider(self: &Arc<Self>) -> ConfiguredProvider {
        ConfiguredProvider::with_service(Arc::clone(self) as Arc<dyn PlatformService>)
    }

    /// Answer every call of `method` with the given status
    pub fn fail_with(&self, method: &'static str, code: StatusCode, details: &str) {
        self.store
            .lock()
            .unwrap()
            .statuses
            .insert(method, ResponseStatus::error(code, details));
    }

    /// Answer every call of `method` with a Connect error
    pub fn rpc_error(&self, method: &'static str, code: &str, message: &str) {
        self.store
            .lock()
            .unwrap()
            .rpc_errors
            .insert(method, (code.to_string(), message.to_string()));
    }

    /// Composition feedback attached to failing composition responses
    pub fn composition_feedback(&self, composition: &[&str], deployment: &[&str]) {
        let mut store = self.store.lock().unwrap();
        store.composition_errors = composition
            .iter()
            .map(|m| CompositionError {
                message: (*m).to_string(),
                ..Default::default()
            })
            .collect();
        store.deployment_errors = deployment
            .iter()
            .map(|m| DeploymentError {
                message: (*m).to_string(),
                ..Default::default()
            })
            .collect();
    }

    /// Listings return nothing, as if they lagged behind writes
    pub fn hide_listings(&self) {
        self.store.lock().unwrap().hide_listings = true;
    }

    pub fn seed_namespace(&self, name: &str) -> String {
        let id = new_id();
        self.store.lock().unwrap().namespaces.push(Namespace {
            id: id.clone(),
            name: name.to_string(),
        });
        id
    }

    pub fn seed_graph(&self, graph: FederatedGraph) {
        self.store.lock().unwrap().graphs.push(graph);
    }

    pub fn seed_subgraph(&self, subgraph: Subgraph, sdl: &str) {
        let mut store = self.store.lock().unwrap();
        store.sdl.insert(
            (subgraph.namespace.clone(), subgraph.name.clone()),
            sdl.to_string(),
        );
        store.subgraphs.push(subgraph);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.store.lock().unwrap().calls.clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method)
            .map(|c| c.body)
            .collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls_to(method).len()
    }

    /// Method names in call order
    pub fn methods(&self) -> Vec<&'static str> {
        self.calls().into_iter().map(|c| c.method).collect()
    }

    pub fn namespaces(&self) -> Vec<Namespace> {
        self.store.lock().unwrap().namespaces.clone()
    }

    pub fn graphs(&self) -> Vec<FederatedGraph> {
        self.store.lock().unwrap().graphs.clone()
    }

    pub fn subgraphs(&self) -> Vec<Subgraph> {
        self.store.lock().unwrap().subgraphs.clone()
    }

    pub fn sdl(&self, namespace: &str, name: &str) -> Option<String> {
        self.store
            .lock()
            .unwrap()
            .sdl
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    /// Record the call and return the injected outcome, if any
    fn begin(
        &self,
        method: &'static str,
        request: &impl Serialize,
    ) -> Result<Option<ResponseStatus>> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(Call {
            method,
            body: serde_json::to_value(request).unwrap(),
        });
        if let Some((code, message)) = store.rpc_errors.get(method) {
            return Err(ProviderError::Rpc {
                operation: method,
                code: code.clone(),
                message: message.clone(),
            });
        }
        Ok(store.statuses.get(method).cloned())
    }

    fn status(status: Option<ResponseStatus>) -> StatusResponse {
        StatusResponse {
            response: Some(status.unwrap_or_else(ResponseStatus::ok)),
        }
    }

    fn composition(&self, status: ResponseStatus) -> CompositionResponse {
        let store = self.store.lock().unwrap();
        CompositionResponse {
            response: Some(status),
            composition_errors: store.composition_errors.clone(),
            deployment_errors: store.deployment_errors.clone(),
            composition_warnings: vec![],
        }
    }
}

#[async_trait]
impl PlatformService for FakePlatform {
    async fn create_namespace(&self, request: CreateNamespaceRequest) -> Result<StatusResponse> {
        if let Some(status) = self.begin("CreateNamespace", &request)? {
            return Ok(Self::status(Some(status)));
        }
        let mut store = self.store.lock().unwrap();
        if store.namespaces.iter().any(|n| n.name == request.name) {
            return Ok(Self::status(Some(ResponseStatus::error(
                StatusCode::ErrAlreadyExists,
                "namespace already exists",
            ))));
        }
        store.namespaces.push(Namespace {
            id: new_id(),
            name: request.name,
        });
        Ok(Self::status(None))
    }

    async fn get_namespaces(&self) -> Result<GetNamespacesResponse> {
        if let Some(status) = self.begin("GetNamespaces", &GetNamespacesRequest::default())? {
            return Ok(GetNamespacesResponse {
                response: Some(status),
                namespaces: vec![],
            });
        }
        let store = self.store.lock().unwrap();
        Ok(GetNamespacesResponse {
            response: None,
            namespaces: if store.hide_listings {
                vec![]
            } else {
                store.namespaces.clone()
            },
        })
    }

    async fn rename_namespace(&self, request: RenameNamespaceRequest) -> Result<StatusResponse> {
        if let Some(status) = self.begin("RenameNamespace", &request)? {
            return Ok(Self::status(Some(status)));
        }
        let mut store = self.store.lock().unwrap();
        match store.namespaces.iter_mut().find(|n| n.name == request.name) {
            Some(namespace) => {
                namespace.name = request.new_name;
                Ok(Self::status(None))
            }
            None => Ok(Self::status(Some(not_found("namespace")))),
        }
    }

    async fn delete_namespace(&self, request: DeleteNamespaceRequest) -> Result<StatusResponse> {
        if let Some(status) = self.begin("DeleteNamespace", &request)? {
            return Ok(Self::status(Some(status)));
        }
        self.store
            .lock()
            .unwrap()
            .namespaces
            .retain(|n| n.name != request.name);
        Ok(Self::status(None))
    }

    async fn create_federated_graph(
        &self,
        request: CreateFederatedGraphRequest,
    ) -> Result<CompositionResponse> {
        if let Some(status) = self.begin("CreateFederatedGraph", &request)? {
            return Ok(self.composition(status));
        }
        self.store.lock().unwrap().graphs.push(FederatedGraph {
            id: new_id(),
            name: request.name,
            namespace: request.namespace,
            routing_url: request.routing_url,
            label_matchers: request.label_matchers,
            admission_webhook_url: request.admission_webhook_url,
        });
        Ok(CompositionResponse::default())
    }

    async fn get_federated_graphs(
        &self,
        request: GetFederatedGraphsRequest,
    ) -> Result<GetFederatedGraphsResponse> {
        if let Some(status) = self.begin("GetFederatedGraphs", &request)? {
            return Ok(GetFederatedGraphsResponse {
                response: Some(status),
                graphs: vec![],
            });
        }
        let store = self.store.lock().unwrap();
        let graphs = store
            .graphs
            .iter()
            .filter(|g| !store.hide_listings && g.namespace == request.namespace)
            .cloned()
            .collect();
        Ok(GetFederatedGraphsResponse {
            response: Some(ResponseStatus::ok()),
            graphs,
        })
    }

    async fn update_federated_graph(
        &self,
        request: UpdateFederatedGraphRequest,
    ) -> Result<CompositionResponse> {
        if let Some(status) = self.begin("UpdateFederatedGraph", &request)? {
            return Ok(self.composition(status));
        }
        let mut store = self.store.lock().unwrap();
        let Some(graph) = store
            .graphs
            .iter_mut()
            .find(|g| g.name == request.name && g.namespace == request.namespace)
        else {
            return Ok(CompositionResponse {
                response: Some(not_found("federated graph")),
                ..Default::default()
            });
        };
        graph.routing_url = request.routing_url;
        graph.label_matchers = if request.unset_label_matchers {
            vec![]
        } else {
            request.label_matchers
        };
        graph.admission_webhook_url = request.admission_webhook_url;
        Ok(CompositionResponse::default())
    }

    async fn delete_federated_graph(
        &self,
        request: DeleteFederatedGraphRequest,
    ) -> Result<StatusResponse> {
        if let Some(status) = self.begin("DeleteFederatedGraph", &request)? {
            return Ok(Self::status(Some(status)));
        }
        self.store
            .lock()
            .unwrap()
            .graphs
            .retain(|g| !(g.name == request.name && g.namespace == request.namespace));
        Ok(Self::status(None))
    }

    async fn create_federated_subgraph(
        &self,
        request: CreateFederatedSubgraphRequest,
    ) -> Result<StatusResponse> {
        if let Some(status) = self.begin("CreateFederatedSubgraph", &request)? {
            return Ok(Self::status(Some(status)));
        }
        self.store.lock().unwrap().subgraphs.push(Subgraph {
            id: new_id(),
            name: request.name,
            namespace: request.namespace,
            routing_url: request.routing_url.unwrap_or_default(),
            labels: request.labels,
            subscription_url: request.subscription_url.unwrap_or_default(),
            subscription_protocol: request.subscription_protocol.as_str().to_string(),
            websocket_subprotocol: request.websocket_subprotocol.as_str().to_string(),
            is_event_driven_graph: request.is_event_driven_graph,
            is_feature_subgraph: request.is_feature_subgraph,
        });
        Ok(Self::status(None))
    }

    async fn get_subgraphs(&self, request: GetSubgraphsRequest) -> Result<GetSubgraphsResponse> {
        if let Some(status) = self.begin("GetSubgraphs", &request)? {
            return Ok(GetSubgraphsResponse {
                response: Some(status),
                graphs: vec![],
            });
        }
        let store = self.store.lock().unwrap();
        let graphs = store
            .subgraphs
            .iter()
            .filter(|s| !store.hide_listings && s.namespace == request.namespace)
            .cloned()
            .collect();
        Ok(GetSubgraphsResponse {
            response: None,
            graphs,
        })
    }

    async fn publish_federated_subgraph(
        &self,
        request: PublishFederatedSubgraphRequest,
    ) -> Result<CompositionResponse> {
        if let Some(status) = self.begin("PublishFederatedSubgraph", &request)? {
            return Ok(self.composition(status));
        }
        let mut store = self.store.lock().unwrap();
        if !store
            .subgraphs
            .iter()
            .any(|s| s.name == request.name && s.namespace == request.namespace)
        {
            return Ok(CompositionResponse {
                response: Some(not_found("subgraph")),
                ..Default::default()
            });
        }
        store
            .sdl
            .insert((request.namespace, request.name), request.schema);
        Ok(CompositionResponse::default())
    }

    async fn get_latest_subgraph_sdl(
        &self,
        request: GetLatestSubgraphSdlRequest,
    ) -> Result<GetLatestSubgraphSdlResponse> {
        if let Some(status) = self.begin("GetLatestSubgraphSDL", &request)? {
            return Ok(GetLatestSubgraphSdlResponse {
                response: Some(status),
                ..Default::default()
            });
        }
        let store = self.store.lock().unwrap();
        Ok(
            match store.sdl.get(&(request.namespace, request.name)) {
                Some(sdl) => GetLatestSubgraphSdlResponse {
                    response: None,
                    sdl: Some(sdl.clone()),
                    version_id: Some(new_id()),
                },
                None => GetLatestSubgraphSdlResponse {
                    response: Some(not_found("sdl")),
                    ..Default::default()
                },
            },
        )
    }

    async fn move_subgraph(&self, request: MoveGraphRequest) -> Result<StatusResponse> {
        if let Some(status) = self.begin("MoveSubgraph", &request)? {
            return Ok(Self::status(Some(status)));
        }
        let mut store = self.store.lock().unwrap();
        let Some(subgraph) = store
            .subgraphs
            .iter_mut()
            .find(|s| s.name == request.name && s.namespace == request.namespace)
        else {
            return Ok(Self::status(Some(not_found("subgraph"))));
        };
        subgraph.namespace = request.new_namespace.clone();
        if let Some(sdl) = store
            .sdl
            .remove(&(request.namespace, request.name.clone()))
        {
            store.sdl.insert((request.new_namespace, request.name), sdl);
        }
        Ok(Self::status(None))
    }

    async fn update_subgraph(&self, request: UpdateSubgraphRequest) -> Result<CompositionResponse> {
        if let Some(status) = self.begin("UpdateSubgraph", &request)? {
            return Ok(self.composition(status));
        }
        let mut store = self.store.lock().unwrap();
        let Some(subgraph) = store
            .subgraphs
            .iter_mut()
            .find(|s| s.name == request.name && s.namespace == request.namespace)
        else {
            return Ok(CompositionResponse {
                response: Some(not_found("subgraph")),
                ..Default::default()
            });
        };
        if let Some(routing_url) = request.routing_url {
            subgraph.routing_url = routing_url;
        }
        subgraph.subscription_url = request.subscription_url.unwrap_or_default();
        subgraph.subscription_protocol = request.subscription_protocol.as_str().to_string();
        subgraph.websocket_subprotocol = request.websocket_subprotocol.as_str().to_string();
        subgraph.labels = if request.unset_labels {
            vec![]
        } else {
            request.labels
        };
        Ok(CompositionResponse::default())
    }

    async fn delete_federated_subgraph(
        &self,
        request: DeleteFederatedSubgraphRequest,
    ) -> Result<StatusResponse> {
        if let Some(status) = self.begin("DeleteFederatedSubgraph", &request)? {
            return Ok(Self::status(Some(status)));
        }
        self.store.lock().unwrap().subgraphs.retain(|s| {
            !(s.name == request.subgraph_name && s.namespace == request.namespace)
        });
        Ok(Self::status(None))
    }
}
