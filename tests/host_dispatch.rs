//! JSON host adapter end to end against the in-memory platform

mod common;

use common::FakePlatform;
use serde_json::json;
use wundergraph_provider::host::{dispatch, HostRequest, Operation, ResourceKind};
use wundergraph_provider::platform::StatusCode;

#[tokio::test]
async fn test_create_graph_returns_state() {
    let platform = FakePlatform::new();
    let provider = platform.provider();

    let response = dispatch(
        &provider,
        ResourceKind::FederatedGraph,
        Operation::Create,
        HostRequest {
            plan: Some(json!({
                "name": "acme.prod",
                "routing_url": "https://api.acme.com",
                "label_matchers": [{"key": "env", "values": ["prod"]}]
            })),
            ..Default::default()
        },
    )
    .await;

    assert!(!response.has_error());
    let state = response.state.unwrap();
    assert_eq!(state["namespace"], "default");
    assert_eq!(state["id"], json!(platform.graphs()[0].id));
    assert_eq!(
        platform.calls_to("CreateFederatedGraph")[0]["labelMatchers"],
        json!(["env=prod"])
    );
}

#[tokio::test]
async fn test_import_reads_subgraph() {
    let platform = FakePlatform::new();
    let provider = platform.provider();

    let created = dispatch(
        &provider,
        ResourceKind::FederatedSubgraph,
        Operation::Create,
        HostRequest {
            plan: Some(json!({
                "name": "products",
                "namespace": "default",
                "routing_url": "http://products:4001/graphql",
                "schema": "type Query { a: String }",
                "subscription_protocol": "sse"
            })),
            ..Default::default()
        },
    )
    .await
    .state
    .unwrap();

    let id = created["id"].as_str().unwrap().to_string();
    let imported = dispatch(
        &provider,
        ResourceKind::FederatedSubgraph,
        Operation::Import,
        HostRequest {
            id: Some(format!("default/{id}")),
            ..Default::default()
        },
    )
    .await;

    assert!(!imported.has_error());
    assert_eq!(imported.state.unwrap(), created);
}

#[tokio::test]
async fn test_delete_returns_no_state() {
    let platform = FakePlatform::new();
    platform.seed_namespace("staging");
    let provider = platform.provider();

    let response = dispatch(
        &provider,
        ResourceKind::Namespace,
        Operation::Delete,
        HostRequest {
            state: Some(json!({"id": "ns-1", "name": "staging"})),
            ..Default::default()
        },
    )
    .await;

    assert!(!response.has_error());
    assert!(response.state.is_none());
    assert!(platform.namespaces().is_empty());
}

#[tokio::test]
async fn test_error_becomes_diagnostic() {
    let platform = FakePlatform::new();
    platform.fail_with("CreateNamespace", StatusCode::ErrLimitReached, "namespace limit reached");
    let provider = platform.provider();

    let response = dispatch(
        &provider,
        ResourceKind::Namespace,
        Operation::Create,
        HostRequest {
            plan: Some(json!({"name": "staging"})),
            ..Default::default()
        },
    )
    .await;

    assert!(response.has_error());
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "state": null,
            "diagnostics": [{
                "severity": "error",
                "summary": "Error creating namespace",
                "detail": "namespace limit reached"
            }]
        })
    );
}

#[tokio::test]
async fn test_missing_plan_is_rejected_without_remote_calls() {
    let platform = FakePlatform::new();
    let provider = platform.provider();

    let response = dispatch(
        &provider,
        ResourceKind::FederatedSubgraph,
        Operation::Update,
        HostRequest {
            state: Some(json!({"name": "products", "schema": ""})),
            ..Default::default()
        },
    )
    .await;

    assert!(response.has_error());
    let detail = response.diagnostics.iter().next().unwrap().detail.clone();
    assert_eq!(detail, "missing plan");
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn test_warnings_accompany_failed_create() {
    let platform = FakePlatform::new();
    platform.fail_with(
        "CreateFederatedGraph",
        StatusCode::ErrSubgraphCompositionFailed,
        "composition failed",
    );
    platform.composition_feedback(&["conflict"], &[]);
    let provider = platform.provider();

    let response = dispatch(
        &provider,
        ResourceKind::FederatedGraph,
        Operation::Create,
        HostRequest {
            plan: Some(json!({"name": "acme.prod", "routing_url": "https://api.acme.com"})),
            ..Default::default()
        },
    )
    .await;

    let severities: Vec<_> = serde_json::to_value(&response.diagnostics)
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["severity"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(severities, vec!["warning", "error"]);
}
