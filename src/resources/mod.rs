//! # Resources
//!
//! Reconcilers for the platform resources managed by the provider.
//!
//! Each reconciler translates between its declarative model and the platform API:
//! - `namespace`: namespaces (create, rename, delete)
//! - `federated_graph`: federated graphs and their label matchers
//! - `federated_subgraph`: subgraphs, their schema and namespace moves
//!
//! The platform has no get-by-id endpoint, so every identity lookup lists the
//! entities of a namespace and scans for a match (`find_by_identity`).

pub mod federated_graph;
pub mod federated_subgraph;
pub mod labels;
pub mod namespace;
pub mod protocol;

pub use federated_graph::{FederatedGraphModel, FederatedGraphResource};
pub use federated_subgraph::{FederatedSubgraphModel, FederatedSubgraphResource};
pub use labels::LabelMatcher;
pub use namespace::{NamespaceModel, NamespaceResource};

use crate::constants::{DEFAULT_NAMESPACE, PROVIDER_TYPE_NAME};
use crate::diagnostics::Diagnostics;
use crate::error::{ProviderError, Result, ValidationError};
use crate::observability::metrics;
use crate::platform::{CompositionResponse, HasStatus};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, info_span, Instrument};

/// CRUD lifecycle of one resource kind
///
/// The caller owns invocation order and state persistence. Every operation returns
/// the new state on success; on failure nothing is returned, so the caller keeps its
/// previous state.
#[async_trait]
pub trait Resource: Send + Sync {
    type Model: Serialize + DeserializeOwned + JsonSchema + Send + Sync;

    /// Short kind name used in metrics and logs
    const KIND: &'static str;

    /// Type name as exposed to the host, e.g. `wundergraph_namespace`
    fn type_name(&self) -> String {
        format!("{PROVIDER_TYPE_NAME}_{}", Self::KIND)
    }

    async fn create(&self, plan: Self::Model, diags: &mut Diagnostics) -> Result<Self::Model>;

    async fn read(&self, state: Self::Model, diags: &mut Diagnostics) -> Result<Self::Model>;

    async fn update(
        &self,
        plan: Self::Model,
        state: Self::Model,
        diags: &mut Diagnostics,
    ) -> Result<Self::Model>;

    async fn delete(&self, state: Self::Model, diags: &mut Diagnostics) -> Result<()>;

    /// Seed a state from an import id; the caller follows up with `read`
    fn import(&self, id: &str) -> Result<Self::Model>;
}

/// Run one resource operation inside a span and record its metrics
pub(crate) async fn observe<T, F>(kind: &'static str, operation: &'static str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let span = info_span!("resource", resource = kind, operation = operation);
    async move {
        let start = Instant::now();
        let result = fut.await;
        metrics::record_operation(
            kind,
            operation,
            start.elapsed().as_secs_f64(),
            result.is_ok(),
        );
        if let Err(e) = &result {
            debug!("{} {} failed: {}", kind, operation, e);
        }
        result
    }
    .instrument(span)
    .await
}

/// Scan a listing for the entity matching `predicate`
///
/// # Errors
/// Returns `ProviderError::NotFound` with the given summary/detail when nothing matches
pub fn find_by_identity<T, P>(items: Vec<T>, predicate: P, summary: &str, detail: &str) -> Result<T>
where
    P: FnMut(&T) -> bool,
{
    items
        .into_iter()
        .find(predicate)
        .ok_or_else(|| ProviderError::NotFound {
            summary: summary.to_string(),
            detail: detail.to_string(),
        })
}

/// Fail when the embedded status of a response is not `OK`
///
/// # Errors
/// Returns `ProviderError::Status` carrying the response details
pub fn ensure_ok(response: &impl HasStatus, summary: &str) -> Result<()> {
    if response.is_ok() {
        return Ok(());
    }
    Err(ProviderError::Status {
        summary: summary.to_string(),
        details: status_details(response),
    })
}

fn status_details(response: &impl HasStatus) -> String {
    let details = response.details();
    if details.is_empty() {
        response.code().to_string()
    } else {
        details
    }
}

/// Check a composition response, surfacing its feedback as warnings
///
/// Composition warnings are always reported. Composition and deployment errors are
/// reported when the status is not `OK`, before the status error is returned.
///
/// # Errors
/// Returns `ProviderError::Status` when the status is not `OK`
pub fn check_composition(
    response: &CompositionResponse,
    action: &str,
    summary: &str,
    diags: &mut Diagnostics,
) -> Result<()> {
    for warning in &response.composition_warnings {
        diags.add_warning(format!("Composition warnings when {action}"), &warning.message);
    }

    if response.is_ok() {
        return Ok(());
    }

    for e in &response.composition_errors {
        diags.add_warning(format!("Composition errors when {action}"), &e.message);
    }
    for e in &response.deployment_errors {
        diags.add_warning(format!("Deployment errors when {action}"), &e.message);
    }

    ensure_ok(response, summary)
}

/// Split an import id into an optional namespace and the entity id
///
/// Accepts `<id>` or `<namespace>/<id>`.
///
/// # Errors
/// Returns `InvalidImportId` for empty ids or empty parts
pub fn parse_import_id(raw: &str) -> Result<(Option<String>, String), ValidationError> {
    let invalid = || ValidationError::InvalidImportId(raw.to_string());
    match raw.split_once('/') {
        None if !raw.is_empty() => Ok((None, raw.to_string())),
        Some((namespace, id)) if !namespace.is_empty() && !id.is_empty() && !id.contains('/') => {
            Ok((Some(namespace.to_string()), id.to_string()))
        }
        _ => Err(invalid()),
    }
}

pub(crate) fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// Empty strings coming back from the platform mean "not set"
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{CompositionError, DeploymentError, ResponseStatus, StatusCode, StatusResponse};

    #[test]
    fn test_find_by_identity() {
        let items = vec![("a", 1), ("b", 2)];
        assert_eq!(
            find_by_identity(items.clone(), |(name, _)| *name == "b", "Error", "missing").unwrap(),
            ("b", 2)
        );

        let err = find_by_identity(items, |(name, _)| *name == "c", "Error reading", "not found")
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Error reading: not found");
    }

    #[test]
    fn test_ensure_ok() {
        assert!(ensure_ok(&StatusResponse::default(), "Error").is_ok());

        let response = StatusResponse {
            response: Some(ResponseStatus::error(StatusCode::ErrNotFound, "namespace missing")),
        };
        let err = ensure_ok(&response, "Error deleting namespace").unwrap_err();
        assert_eq!(err.summary(), "Error deleting namespace");
        assert_eq!(err.detail(), "namespace missing");

        let response = StatusResponse {
            response: Some(ResponseStatus {
                code: StatusCode::NotAuthorized,
                details: None,
            }),
        };
        let err = ensure_ok(&response, "Error").unwrap_err();
        assert_eq!(err.detail(), "ERROR_NOT_AUTHORIZED");
    }

    #[test]
    fn test_check_composition_reports_errors_as_warnings() {
        let response = CompositionResponse {
            response: Some(ResponseStatus::error(
                StatusCode::ErrSubgraphCompositionFailed,
                "composition failed",
            )),
            composition_errors: vec![CompositionError {
                message: "field conflict".to_string(),
                ..Default::default()
            }],
            deployment_errors: vec![DeploymentError {
                message: "router unreachable".to_string(),
                ..Default::default()
            }],
            composition_warnings: vec![],
        };

        let mut diags = Diagnostics::new();
        let err = check_composition(
            &response,
            "creating graph",
            "Error creating federated graph",
            &mut diags,
        )
        .unwrap_err();

        assert_eq!(err.detail(), "composition failed");
        let summaries: Vec<_> = diags.warnings().map(|d| d.summary.as_str()).collect();
        assert_eq!(
            summaries,
            vec![
                "Composition errors when creating graph",
                "Deployment errors when creating graph"
            ]
        );
        assert!(!diags.has_error());
    }

    #[test]
    fn test_check_composition_ok_ignores_stale_errors() {
        let response = CompositionResponse {
            composition_errors: vec![CompositionError::default()],
            ..Default::default()
        };
        let mut diags = Diagnostics::new();
        assert!(check_composition(&response, "updating graph", "Error", &mut diags).is_ok());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_parse_import_id() {
        assert_eq!(parse_import_id("abc").unwrap(), (None, "abc".to_string()));
        assert_eq!(
            parse_import_id("staging/abc").unwrap(),
            (Some("staging".to_string()), "abc".to_string())
        );
        assert!(parse_import_id("").is_err());
        assert!(parse_import_id("/abc").is_err());
        assert!(parse_import_id("staging/").is_err());
        assert!(parse_import_id("a/b/c").is_err());
    }
}
