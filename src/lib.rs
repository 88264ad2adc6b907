//! # WunderGraph Cosmo Provider
//!
//! Declarative management of WunderGraph Cosmo platform resources: namespaces,
//! federated graphs and federated subgraphs.
//!
//! A host hands the provider a desired plan and/or the prior state of a resource; the
//! provider reconciles it against the Cosmo control plane and returns the new state.
//!
//! ## Layout
//!
//! - `config`: provider and logging configuration
//! - `platform`: the platform service interface and its Connect/JSON client
//! - `resources`: reconcilers, label matcher codec, protocol mapping
//! - `provider`: configuration entry point handing out the reconcilers
//! - `host`: JSON adapter running one operation at a time
//! - `observability`: tracing setup and Prometheus metrics

pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod host;
pub mod observability;
pub mod platform;
pub mod provider;
pub mod resources;
pub mod transport;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{ProviderError, Result};
pub use provider::{ConfiguredProvider, WundergraphProvider};
pub use resources::Resource;

/// Crate version reported in metadata and the User-Agent header
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
