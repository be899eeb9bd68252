use indexmap::IndexMap;
use serde_json::Value;

use crate::parse::request_body::RequestBody;

use super::sampler::sample;

/// Request body examples as text, keyed by content type.
///
/// Declared examples take precedence: when any media type carries one, only
/// declared examples are used. Otherwise one example is sampled from each
/// media type's schema.
pub fn extract_examples(body: &RequestBody) -> IndexMap<String, Vec<String>> {
    let declared = body
        .content
        .values()
        .any(|mt| !mt.explicit_examples().is_empty());

    let mut examples = IndexMap::new();
    for (content_type, media_type) in &body.content {
        let values: Vec<Value> = if declared {
            media_type.explicit_examples().into_iter().cloned().collect()
        } else {
            media_type.schema.iter().map(sample).collect()
        };
        let rendered: Vec<String> = values
            .iter()
            .filter_map(|value| {
                let text = render_example(content_type, value);
                if text.is_none() {
                    log::warn!("skipping {content_type} example that cannot be rendered as text");
                }
                text
            })
            .collect();
        if !rendered.is_empty() {
            examples.insert(content_type.clone(), rendered);
        }
    }
    examples
}

/// Strings are used as-is; structured values are pretty-printed for JSON
/// media types and dumped for YAML ones.
pub fn render_example(content_type: &str, value: &Value) -> Option<String> {
    if let Value::String(text) = value {
        return Some(text.clone());
    }
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if essence == "application/json" || essence.ends_with("+json") {
        serde_json::to_string_pretty(value).ok()
    } else if is_yaml(&essence) {
        serde_yaml_ng::to_string(value).ok()
    } else {
        None
    }
}

fn is_yaml(essence: &str) -> bool {
    matches!(
        essence,
        "application/yaml" | "application/x-yaml" | "text/yaml" | "text/x-yaml"
    ) || essence.ends_with("+yaml")
}
