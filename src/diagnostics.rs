//! # Diagnostics
//!
//! Advisories collected while a resource operation runs.
//!
//! Warnings never fail an operation on their own. An operation that fails returns
//! its error; the host adapter turns that error into an error diagnostic.

use crate::error::ProviderError;
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

/// Ordered collection of diagnostics for one operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        let summary = summary.into();
        let detail = detail.into();
        warn!("{}: {}", summary, detail);
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            summary,
            detail,
        });
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        let summary = summary.into();
        let detail = detail.into();
        error!("{}: {}", summary, detail);
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            summary,
            detail,
        });
    }

    /// Record a failed operation
    pub fn add_provider_error(&mut self, err: &ProviderError) {
        self.add_error(err.summary(), err.detail());
    }

    pub fn has_error(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_warnings_do_not_count_as_errors() {
        let mut diags = Diagnostics::new();
        diags.add_warning("Composition errors when creating graph", "field conflict");
        assert!(!diags.has_error());
        assert_eq!(diags.warnings().count(), 1);

        diags.add_provider_error(&ProviderError::from(ValidationError::LabelMatcherParse));
        assert!(diags.has_error());
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn test_serializes_as_list() {
        let mut diags = Diagnostics::new();
        diags.add_warning("Deployment errors when creating graph", "router unreachable");

        let value = serde_json::to_value(&diags).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "severity": "warning",
                "summary": "Deployment errors when creating graph",
                "detail": "router unreachable"
            }])
        );
    }
}
