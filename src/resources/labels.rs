//! # Labels
//!
//! Label matcher codec and subgraph label conversion.
//!
//! A federated graph selects its subgraphs with label matchers. Locally a matcher is
//! a key with one or more values; on the wire each matcher is a single string:
//!
//! ```text
//! { key: "env", values: ["prod", "staging"] }  <->  "env=prod,env=staging"
//! ```
//!
//! Decoding takes the key from the first tag of an entry and does not compare it
//! against the keys of the remaining tags.

use crate::error::ValidationError;
use crate::platform::Label;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One label matcher: a key and the values it accepts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LabelMatcher {
    pub key: String,
    pub values: Vec<String>,
}

impl LabelMatcher {
    pub fn new(key: impl Into<String>, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Encode matchers into their wire form, preserving order
///
/// # Errors
/// Returns `LabelMatcherParse` for a matcher without values
pub fn encode_label_matchers(matchers: &[LabelMatcher]) -> Result<Vec<String>, ValidationError> {
    matchers
        .iter()
        .map(|matcher| {
            if matcher.values.is_empty() {
                return Err(ValidationError::LabelMatcherParse);
            }
            Ok(matcher
                .values
                .iter()
                .map(|value| format!("{}={}", matcher.key, value))
                .collect::<Vec<_>>()
                .join(","))
        })
        .collect()
}

/// Decode wire-form matchers
///
/// # Errors
/// Returns `LabelMatcherParse` when a tag does not split into exactly `key` and `value`
pub fn decode_label_matchers(encoded: &[String]) -> Result<Vec<LabelMatcher>, ValidationError> {
    encoded.iter().map(|entry| decode_entry(entry)).collect()
}

fn decode_entry(entry: &str) -> Result<LabelMatcher, ValidationError> {
    let mut key = "";
    let mut values = Vec::new();

    for tag in entry.split(',') {
        let parts: Vec<&str> = tag.split('=').collect();
        let [tag_key, value] = parts.as_slice() else {
            return Err(ValidationError::LabelMatcherParse);
        };
        if key.is_empty() {
            key = tag_key;
        }
        values.push((*value).to_string());
    }

    Ok(LabelMatcher {
        key: key.to_string(),
        values,
    })
}

/// Subgraph labels as sent to the platform, ordered by key
pub fn labels_to_native(labels: &BTreeMap<String, String>) -> Vec<Label> {
    labels
        .iter()
        .map(|(key, value)| Label {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}

/// Subgraph labels as stored locally
///
/// A key repeated by the platform keeps its last value.
pub fn labels_from_native(labels: &[Label]) -> BTreeMap<String, String> {
    labels
        .iter()
        .map(|label| (label.key.clone(), label.value.clone()))
        .collect()
}
