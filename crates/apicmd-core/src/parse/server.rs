use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A server variable for URL templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerVariable {
    pub default: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

/// A server URL definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, ServerVariable>,
}

impl Server {
    /// The server URL with every `{variable}` replaced by its declared default.
    /// Unknown variables are left untouched.
    pub fn expanded_url(&self) -> String {
        self.variables
            .iter()
            .fold(self.url.clone(), |url, (name, var)| {
                url.replace(&format!("{{{name}}}"), &var.default)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expanded_url() {
        let server: Server = serde_yaml_ng::from_str(
            r#"
url: https://{region}.example.com/{basePath}/{missing}
variables:
  region:
    default: eu
    enum: [eu, us]
  basePath:
    default: v2
"#,
        )
        .unwrap();
        assert_eq!(server.expanded_url(), "https://eu.example.com/v2/{missing}");
    }

    #[test]
    fn test_plain_url() {
        let server: Server = serde_yaml_ng::from_str("url: /api/v3\n").unwrap();
        assert_eq!(server.expanded_url(), "/api/v3");
    }
}
