//! # Host Adapter
//!
//! Runs a single resource operation on behalf of a host that speaks JSON.
//!
//! The host owns state persistence and planning. It sends the desired plan and/or
//! the prior state, and gets back the new state together with the diagnostics of
//! the operation:
//!
//! ```json
//! { "state": { "id": "...", "name": "..." }, "diagnostics": [] }
//! ```
//!
//! A failed operation yields `"state": null` and an error diagnostic.

use crate::constants::{
    FEDERATED_GRAPH_KIND, FEDERATED_SUBGRAPH_KIND, NAMESPACE_KIND, PROVIDER_TYPE_NAME,
};
use crate::diagnostics::Diagnostics;
use crate::error::{ProviderError, Result, ValidationError};
use crate::provider::ConfiguredProvider;
use crate::resources::Resource;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Namespace,
    FederatedGraph,
    FederatedSubgraph,
}

impl ResourceKind {
    pub const ALL: [Self; 3] = [Self::Namespace, Self::FederatedGraph, Self::FederatedSubgraph];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Namespace => NAMESPACE_KIND,
            Self::FederatedGraph => FEDERATED_GRAPH_KIND,
            Self::FederatedSubgraph => FEDERATED_SUBGRAPH_KIND,
        }
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    /// Accepts the short kind (`namespace`) or the full type name (`wundergraph_namespace`)
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let short = s
            .strip_prefix(PROVIDER_TYPE_NAME)
            .and_then(|rest| rest.strip_prefix('_'))
            .unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == short)
            .ok_or_else(|| format!("unknown resource type: {s}"))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "import" => Ok(Self::Import),
            _ => Err(format!("unknown operation: {s}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HostRequest {
    #[serde(default)]
    pub plan: Option<Value>,
    #[serde(default)]
    pub state: Option<Value>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostResponse {
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

impl HostResponse {
    pub fn has_error(&self) -> bool {
        self.diagnostics.has_error()
    }
}

/// Run one operation against one resource kind
pub async fn dispatch(
    provider: &ConfiguredProvider,
    kind: ResourceKind,
    operation: Operation,
    request: HostRequest,
) -> HostResponse {
    let mut diagnostics = Diagnostics::new();
    let result = match kind {
        ResourceKind::Namespace => {
            run(&provider.namespaces(), operation, request, &mut diagnostics).await
        }
        ResourceKind::FederatedGraph => {
            run(&provider.federated_graphs(), operation, request, &mut diagnostics).await
        }
        ResourceKind::FederatedSubgraph => {
            run(
                &provider.federated_subgraphs(),
                operation,
                request,
                &mut diagnostics,
            )
            .await
        }
    };

    match result {
        Ok(state) => HostResponse { state, diagnostics },
        Err(e) => {
            diagnostics.add_provider_error(&e);
            HostResponse {
                state: None,
                diagnostics,
            }
        }
    }
}

async fn run<R: Resource>(
    resource: &R,
    operation: Operation,
    request: HostRequest,
    diags: &mut Diagnostics,
) -> Result<Option<Value>> {
    let state = match operation {
        Operation::Create => {
            let plan = decode::<R::Model>(request.plan, "plan")?;
            resource.create(plan, diags).await?
        }
        Operation::Read => {
            let state = decode::<R::Model>(request.state, "state")?;
            resource.read(state, diags).await?
        }
        Operation::Update => {
            let plan = decode::<R::Model>(request.plan, "plan")?;
            let state = decode::<R::Model>(request.state, "state")?;
            resource.update(plan, state, diags).await?
        }
        Operation::Delete => {
            let state = decode::<R::Model>(request.state, "state")?;
            resource.delete(state, diags).await?;
            return Ok(None);
        }
        Operation::Import => {
            let id = request.id.ok_or(ValidationError::MissingInput("id"))?;
            let seed = resource.import(&id)?;
            resource.read(seed, diags).await?
        }
    };

    serde_json::to_value(&state)
        .map(Some)
        .map_err(|e| invalid("state", &e))
}

fn decode<T: DeserializeOwned>(value: Option<Value>, what: &'static str) -> Result<T> {
    let value = value.ok_or(ValidationError::MissingInput(what))?;
    serde_json::from_value(value).map_err(|e| invalid(what, &e))
}

fn invalid(what: &'static str, err: &serde_json::Error) -> ProviderError {
    ValidationError::InvalidInput {
        what,
        reason: err.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_parsing() {
        assert_eq!(
            "namespace".parse::<ResourceKind>().unwrap(),
            ResourceKind::Namespace
        );
        assert_eq!(
            "wundergraph_federated_subgraph".parse::<ResourceKind>().unwrap(),
            ResourceKind::FederatedSubgraph
        );
        assert!("wundergraph_router".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_operation_parsing() {
        assert_eq!("Import".parse::<Operation>().unwrap(), Operation::Import);
        assert!("upsert".parse::<Operation>().is_err());
    }

    #[test]
    fn test_decode_reports_missing_and_invalid_input() {
        let err = decode::<crate::resources::NamespaceModel>(None, "plan").unwrap_err();
        assert_eq!(err.detail(), "missing plan");

        let err = decode::<crate::resources::NamespaceModel>(
            Some(serde_json::json!({"id": 3})),
            "state",
        )
        .unwrap_err();
        assert!(err.detail().starts_with("invalid state:"));
    }
}
