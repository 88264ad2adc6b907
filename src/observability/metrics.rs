//! # Metrics
//!
//! Prometheus metrics for monitoring provider operations.
//!
//! ## Metrics Exposed
//!
//! - `wundergraph_provider_operations_total` - Reconciler operations by resource and operation
//! - `wundergraph_provider_operation_errors_total` - Failed reconciler operations
//! - `wundergraph_provider_operation_duration_seconds` - Duration of reconciler operations
//! - `wundergraph_provider_rpc_calls_total` - Control plane calls by method
//! - `wundergraph_provider_rpc_errors_total` - Control plane calls that failed at transport level
//! - `wundergraph_provider_rpc_duration_seconds` - Duration of control plane calls

use anyhow::{Context, Result};
use prometheus::{Encoder, HistogramVec, IntCounterVec, Registry, TextEncoder};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static OPERATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "wundergraph_provider_operations_total",
            "Total number of reconciler operations by resource and operation",
        ),
        &["resource", "operation"],
    )
    .expect("Failed to create OPERATIONS_TOTAL metric - this should never happen")
});

static OPERATION_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "wundergraph_provider_operation_errors_total",
            "Total number of failed reconciler operations by resource and operation",
        ),
        &["resource", "operation"],
    )
    .expect("Failed to create OPERATION_ERRORS_TOTAL metric - this should never happen")
});

static OPERATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "wundergraph_provider_operation_duration_seconds",
            "Duration of reconciler operations in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
        &["resource", "operation"],
    )
    .expect("Failed to create OPERATION_DURATION metric - this should never happen")
});

static RPC_CALLS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "wundergraph_provider_rpc_calls_total",
            "Total number of control plane calls by method",
        ),
        &["method"],
    )
    .expect("Failed to create RPC_CALLS_TOTAL metric - this should never happen")
});

static RPC_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "wundergraph_provider_rpc_errors_total",
            "Total number of control plane calls that failed before a message was decoded",
        ),
        &["method"],
    )
    .expect("Failed to create RPC_ERRORS_TOTAL metric - this should never happen")
});

static RPC_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "wundergraph_provider_rpc_duration_seconds",
            "Duration of control plane calls in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.5, 1.0, 2.0, 5.0]),
        &["method"],
    )
    .expect("Failed to create RPC_DURATION metric - this should never happen")
});

fn register(collector: Box<dyn prometheus::core::Collector>) -> Result<()> {
    match REGISTRY.register(collector) {
        Ok(()) | Err(prometheus::Error::AlreadyReg) => Ok(()),
        Err(e) => Err(e).context("Failed to register metric"),
    }
}

/// Register every collector with the registry. Safe to call more than once.
///
/// # Errors
/// Returns an error if a collector clashes with one already registered
pub fn register_metrics() -> Result<()> {
    register(Box::new(OPERATIONS_TOTAL.clone()))?;
    register(Box::new(OPERATION_ERRORS_TOTAL.clone()))?;
    register(Box::new(OPERATION_DURATION.clone()))?;
    register(Box::new(RPC_CALLS_TOTAL.clone()))?;
    register(Box::new(RPC_ERRORS_TOTAL.clone()))?;
    register(Box::new(RPC_DURATION.clone()))?;

    Ok(())
}

pub fn record_operation(resource: &str, operation: &str, duration: f64, success: bool) {
    OPERATIONS_TOTAL
        .with_label_values(&[resource, operation])
        .inc();
    OPERATION_DURATION
        .with_label_values(&[resource, operation])
        .observe(duration);
    if !success {
        OPERATION_ERRORS_TOTAL
            .with_label_values(&[resource, operation])
            .inc();
    }
}

pub fn record_rpc(method: &str, duration: f64, success: bool) {
    RPC_CALLS_TOTAL.with_label_values(&[method]).inc();
    RPC_DURATION.with_label_values(&[method]).observe(duration);
    if !success {
        RPC_ERRORS_TOTAL.with_label_values(&[method]).inc();
    }
}

/// Render the registry in the Prometheus text exposition format
///
/// # Errors
/// Returns an error if encoding fails
pub fn render_metrics() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&REGISTRY.gather(), &mut buffer)
        .context("Failed to encode metrics")?;
    String::from_utf8(buffer).context("Metrics output is not valid UTF-8")
}
