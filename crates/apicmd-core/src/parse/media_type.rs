use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::schema::SchemaOrRef;

/// A media type object inside a request body's `content` map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,

    /// Named Example objects; only their `value` is used.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, serde_json::Value>,
}

impl MediaType {
    /// Explicit example values, `example` first, then each `examples.*.value` in order.
    pub fn explicit_examples(&self) -> Vec<&serde_json::Value> {
        let mut values: Vec<&serde_json::Value> = self.example.iter().collect();
        values.extend(self.examples.values().filter_map(|e| e.get("value")));
        values
    }
}

/// True when a media type range such as `*/*` or `application/*` is declared.
pub fn is_wildcard(content_type: &str) -> bool {
    content_type.contains('*')
}
