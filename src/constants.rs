//! # Constants
//!
//! Shared constants used throughout the provider.
//!
//! These values represent the defaults of the public Cosmo control plane and can be
//! overridden via provider configuration or environment variables where applicable.

/// Public Cosmo control plane endpoint used when no API URL is configured
pub const DEFAULT_API_URL: &str = "https://cosmo-cp.wundergraph.com";

/// Environment fallback for the API key
pub const ENV_API_KEY: &str = "WGC_API_KEY";

/// Environment fallback for the API URL
pub const ENV_API_URL: &str = "WGC_API_URL";

/// Environment fallback for the per-request timeout (seconds)
pub const ENV_API_TIMEOUT_SECS: &str = "WGC_API_TIMEOUT_SECS";

/// Default per-request timeout against the control plane (seconds)
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Namespace used when a graph or subgraph does not name one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Connect service path prefix of the platform API
pub const PLATFORM_SERVICE_PATH: &str = "wg.cosmo.platform.v1.PlatformService";

/// Connect protocol version header value
pub const CONNECT_PROTOCOL_VERSION: &str = "1";

/// Provider type name; resource type names are `{PROVIDER_TYPE_NAME}_{kind}`
pub const PROVIDER_TYPE_NAME: &str = "wundergraph";

/// Resource kind suffixes
pub const NAMESPACE_KIND: &str = "namespace";
pub const FEDERATED_GRAPH_KIND: &str = "federated_graph";
pub const FEDERATED_SUBGRAPH_KIND: &str = "federated_subgraph";
