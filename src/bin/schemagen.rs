//! # Schema Generator
//!
//! Prints the JSON Schema of the provider configuration and of every resource model.
//!
//! ```bash
//! cargo run --bin schemagen > schema/wundergraph.json
//! ```

use anyhow::{Context, Result};
use schemars::schema_for;
use serde_json::{json, Map};
use wundergraph_provider::config::ProviderConfig;
use wundergraph_provider::constants::{
    FEDERATED_GRAPH_KIND, FEDERATED_SUBGRAPH_KIND, NAMESPACE_KIND, PROVIDER_TYPE_NAME,
};
use wundergraph_provider::resources::{
    FederatedGraphModel, FederatedSubgraphModel, NamespaceModel,
};

fn main() -> Result<()> {
    let mut resources = Map::new();
    resources.insert(
        format!("{PROVIDER_TYPE_NAME}_{NAMESPACE_KIND}"),
        json!(schema_for!(NamespaceModel)),
    );
    resources.insert(
        format!("{PROVIDER_TYPE_NAME}_{FEDERATED_GRAPH_KIND}"),
        json!(schema_for!(FederatedGraphModel)),
    );
    resources.insert(
        format!("{PROVIDER_TYPE_NAME}_{FEDERATED_SUBGRAPH_KIND}"),
        json!(schema_for!(FederatedSubgraphModel)),
    );

    let document = json!({
        "provider": schema_for!(ProviderConfig),
        "resources": resources,
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&document).context("Failed to serialize schema")?
    );
    Ok(())
}
