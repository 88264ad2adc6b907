//! # Platform API Messages
//!
//! Request/response payloads of the Cosmo platform service in proto3 JSON form.
//!
//! Conventions of the encoding that matter here:
//! - field names are camelCase, except where the proto field itself is spelled
//!   `routingURL` / `admissionWebhookURL`
//! - default values are omitted on the wire, so every response field is `#[serde(default)]`
//! - a missing `response` (or a missing `code`) is the zero enum value, i.e. `OK`

use serde::{Deserialize, Serialize};

// ============================================================================
// Status
// ============================================================================

/// `EnumStatusCode` of the platform API
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusCode {
    #[default]
    Ok,
    Err,
    ErrNotFound,
    ErrAlreadyExists,
    ErrInvalidSubgraphSchema,
    ErrSubgraphCompositionFailed,
    ErrInvalidLabels,
    ErrDeploymentFailed,
    ErrInvalidName,
    ErrBadRequest,
    ErrLimitReached,
    NotAuthenticated,
    NotAuthorized,
    /// Any code this client does not know by name
    Other(String),
}

impl StatusCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::Err => "ERR",
            Self::ErrNotFound => "ERR_NOT_FOUND",
            Self::ErrAlreadyExists => "ERR_ALREADY_EXISTS",
            Self::ErrInvalidSubgraphSchema => "ERR_INVALID_SUBGRAPH_SCHEMA",
            Self::ErrSubgraphCompositionFailed => "ERR_SUBGRAPH_COMPOSITION_FAILED",
            Self::ErrInvalidLabels => "ERR_INVALID_LABELS",
            Self::ErrDeploymentFailed => "ERR_DEPLOYMENT_FAILED",
            Self::ErrInvalidName => "ERR_INVALID_NAME",
            Self::ErrBadRequest => "ERR_BAD_REQUEST",
            Self::ErrLimitReached => "ERR_LIMIT_REACHED",
            Self::NotAuthenticated => "ERROR_NOT_AUTHENTICATED",
            Self::NotAuthorized => "ERROR_NOT_AUTHORIZED",
            Self::Other(code) => code,
        }
    }
}

impl From<String> for StatusCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "" | "OK" => Self::Ok,
            "ERR" => Self::Err,
            "ERR_NOT_FOUND" => Self::ErrNotFound,
            "ERR_ALREADY_EXISTS" => Self::ErrAlreadyExists,
            "ERR_INVALID_SUBGRAPH_SCHEMA" => Self::ErrInvalidSubgraphSchema,
            "ERR_SUBGRAPH_COMPOSITION_FAILED" => Self::ErrSubgraphCompositionFailed,
            "ERR_INVALID_LABELS" => Self::ErrInvalidLabels,
            "ERR_DEPLOYMENT_FAILED" => Self::ErrDeploymentFailed,
            "ERR_INVALID_NAME" => Self::ErrInvalidName,
            "ERR_BAD_REQUEST" => Self::ErrBadRequest,
            "ERR_LIMIT_REACHED" => Self::ErrLimitReached,
            "ERROR_NOT_AUTHENTICATED" => Self::NotAuthenticated,
            "ERROR_NOT_AUTHORIZED" => Self::NotAuthorized,
            _ => Self::Other(code),
        }
    }
}

impl From<StatusCode> for String {
    fn from(code: StatusCode) -> Self {
        code.as_str().to_string()
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status block embedded in every platform response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStatus {
    #[serde(default)]
    pub code: StatusCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ResponseStatus {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn error(code: StatusCode, details: impl Into<String>) -> Self {
        Self {
            code,
            details: Some(details.into()),
        }
    }
}

/// Access to the embedded status of a response message
pub trait HasStatus {
    fn status(&self) -> Option<&ResponseStatus>;

    /// Status code, `OK` when the block is absent
    fn code(&self) -> StatusCode {
        self.status().map(|s| s.code.clone()).unwrap_or_default()
    }

    fn details(&self) -> String {
        self.status()
            .and_then(|s| s.details.clone())
            .unwrap_or_default()
    }

    fn is_ok(&self) -> bool {
        self.code() == StatusCode::Ok
    }
}

macro_rules! impl_has_status {
    ($($ty:ty),+ $(,)?) => {
        $(impl HasStatus for $ty {
            fn status(&self) -> Option<&ResponseStatus> {
                self.response.as_ref()
            }
        })+
    };
}

/// Response that carries nothing but a status (rename, delete, move, update)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub response: Option<ResponseStatus>,
}

// ============================================================================
// Composition feedback
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub federated_graph_name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub feature_flag: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub federated_graph_name: String,
    #[serde(default)]
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionWarning {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub federated_graph_name: String,
    #[serde(default)]
    pub namespace: String,
}

/// Composition outcome attached to graph creation and schema publishing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionResponse {
    #[serde(default)]
    pub response: Option<ResponseStatus>,
    #[serde(default)]
    pub composition_errors: Vec<CompositionError>,
    #[serde(default)]
    pub deployment_errors: Vec<DeploymentError>,
    #[serde(default)]
    pub composition_warnings: Vec<CompositionWarning>,
}

// ============================================================================
// Namespaces
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateNamespaceRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetNamespacesRequest {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetNamespacesResponse {
    #[serde(default)]
    pub response: Option<ResponseStatus>,
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameNamespaceRequest {
    pub name: String,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteNamespaceRequest {
    pub name: String,
}

// ============================================================================
// Federated graphs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedGraph {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, rename = "routingURL")]
    pub routing_url: String,
    #[serde(default)]
    pub label_matchers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admission_webhook_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFederatedGraphRequest {
    pub name: String,
    pub namespace: String,
    pub routing_url: String,
    pub label_matchers: Vec<String>,
    #[serde(rename = "admissionWebhookURL", skip_serializing_if = "Option::is_none")]
    pub admission_webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_webhook_secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetFederatedGraphsRequest {
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetFederatedGraphsResponse {
    #[serde(default)]
    pub response: Option<ResponseStatus>,
    #[serde(default)]
    pub graphs: Vec<FederatedGraph>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFederatedGraphRequest {
    pub name: String,
    pub namespace: String,
    pub routing_url: String,
    pub label_matchers: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unset_label_matchers: bool,
    #[serde(rename = "admissionWebhookURL", skip_serializing_if = "Option::is_none")]
    pub admission_webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_webhook_secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteFederatedGraphRequest {
    pub name: String,
    pub namespace: String,
}

// ============================================================================
// Federated subgraphs
// ============================================================================

/// `GraphQLSubscriptionProtocol`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubscriptionProtocol {
    #[default]
    #[serde(rename = "GRAPHQL_SUBSCRIPTION_PROTOCOL_WS")]
    Ws,
    #[serde(rename = "GRAPHQL_SUBSCRIPTION_PROTOCOL_SSE")]
    Sse,
    #[serde(rename = "GRAPHQL_SUBSCRIPTION_PROTOCOL_SSE_POST")]
    SsePost,
}

/// `GraphQLWebsocketSubprotocol`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WebsocketSubprotocol {
    #[default]
    #[serde(rename = "GRAPHQL_WEBSOCKET_SUBPROTOCOL_AUTO")]
    Auto,
    #[serde(rename = "GRAPHQL_WEBSOCKET_SUBPROTOCOL_WS")]
    GraphqlWs,
    #[serde(rename = "GRAPHQL_WEBSOCKET_SUBPROTOCOL_TRANSPORT_WS")]
    GraphqlTransportWs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// Subgraph as listed by `GetSubgraphs`
///
/// The protocol fields come back as display literals (`ws`, `graphql-ws`, ...)
/// rather than enum names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subgraph {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, rename = "routingURL")]
    pub routing_url: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub subscription_url: String,
    #[serde(default)]
    pub subscription_protocol: String,
    #[serde(default)]
    pub websocket_subprotocol: String,
    #[serde(default)]
    pub is_event_driven_graph: bool,
    #[serde(default)]
    pub is_feature_subgraph: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFederatedSubgraphRequest {
    pub name: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_url: Option<String>,
    pub labels: Vec<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_url: Option<String>,
    pub subscription_protocol: SubscriptionProtocol,
    pub websocket_subprotocol: WebsocketSubprotocol,
    pub is_event_driven_graph: bool,
    pub is_feature_subgraph: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetSubgraphsRequest {
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSubgraphsResponse {
    #[serde(default)]
    pub response: Option<ResponseStatus>,
    #[serde(default)]
    pub graphs: Vec<Subgraph>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishFederatedSubgraphRequest {
    pub name: String,
    pub namespace: String,
    pub schema: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetLatestSubgraphSdlRequest {
    pub name: String,
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLatestSubgraphSdlResponse {
    #[serde(default)]
    pub response: Option<ResponseStatus>,
    #[serde(default)]
    pub sdl: Option<String>,
    #[serde(default)]
    pub version_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveGraphRequest {
    pub name: String,
    pub namespace: String,
    pub new_namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubgraphRequest {
    pub name: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_url: Option<String>,
    pub labels: Vec<Label>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unset_labels: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_url: Option<String>,
    pub subscription_protocol: SubscriptionProtocol,
    pub websocket_subprotocol: WebsocketSubprotocol,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFederatedSubgraphRequest {
    pub subgraph_name: String,
    pub namespace: String,
}

impl_has_status!(
    StatusResponse,
    CompositionResponse,
    GetNamespacesResponse,
    GetFederatedGraphsResponse,
    GetSubgraphsResponse,
    GetLatestSubgraphSdlResponse,
);
