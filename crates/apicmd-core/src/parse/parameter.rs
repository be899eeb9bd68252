use serde::{Deserialize, Serialize};

use super::schema::SchemaOrRef;

/// Parameter location.
///
/// Locations outside the four defined by OpenAPI deserialize as `Unknown`
/// so that the model builder can report and drop them instead of rejecting
/// the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
    #[serde(other)]
    Unknown,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Path => "path",
            ParameterLocation::Cookie => "cookie",
            ParameterLocation::Unknown => "unknown",
        }
    }
}

/// An API parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
}

impl Parameter {
    /// The inline schema, if the parameter has one that is not an unresolved `$ref`.
    pub fn inline_schema(&self) -> Option<&super::schema::Schema> {
        match self.schema.as_ref()? {
            SchemaOrRef::Schema(schema) => Some(schema),
            SchemaOrRef::Ref { .. } => None,
        }
    }

    pub fn is_array(&self) -> bool {
        self.inline_schema().is_some_and(|s| s.is_array())
    }

    pub fn has_default(&self) -> bool {
        self.inline_schema()
            .is_some_and(|s| s.default_value.is_some())
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated.unwrap_or(false)
    }

    /// Whether array values are sent as repeated `key=value` pairs.
    /// Defaults to true only for the `form` style, which is the default query style.
    pub fn explodes(&self) -> bool {
        self.explode
            .unwrap_or_else(|| matches!(self.style.as_deref(), None | Some("form")))
    }
}

/// A reference or inline parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Parameter),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(yaml: &str) -> Parameter {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_unknown_location() {
        let p = param("name: q\nin: matrix\n");
        assert_eq!(p.location, ParameterLocation::Unknown);
    }

    #[test]
    fn test_explode_defaults() {
        assert!(param("name: tags\nin: query\n").explodes());
        assert!(param("name: tags\nin: query\nstyle: form\n").explodes());
        assert!(!param("name: tags\nin: query\nexplode: false\n").explodes());
        assert!(!param("name: tags\nin: query\nstyle: pipeDelimited\n").explodes());
        assert!(param("name: tags\nin: query\nstyle: spaceDelimited\nexplode: true\n").explodes());
    }

    #[test]
    fn test_array_and_default() {
        let p = param("name: tags\nin: query\nschema:\n  type: array\n  items:\n    type: string\n");
        assert!(p.is_array());
        assert!(!p.has_default());

        let p = param("name: limit\nin: query\nschema:\n  type: integer\n  default: 20\n");
        assert!(!p.is_array());
        assert!(p.has_default());

        let p = param("name: id\nin: path\nrequired: true\n");
        assert!(!p.is_array());
        assert!(!p.has_default());
    }
}
