pub mod components;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod request_body;
pub mod schema;
pub mod server;
pub mod spec;

use crate::error::{ParseError, ResolveError};
use ref_resolve::RefResolver;
use spec::OpenApiSpec;

/// Parse an OpenAPI spec from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiSpec, ParseError> {
    let spec: OpenApiSpec = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse an OpenAPI spec from JSON.
pub fn from_json(input: &str) -> Result<OpenApiSpec, ParseError> {
    let spec: OpenApiSpec = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse a document whose format is only known from its location.
///
/// `.json` locations, and content starting with `{`, are read as JSON; everything else as YAML.
pub fn from_str_detect(location: &str, input: &str) -> Result<OpenApiSpec, ParseError> {
    let looks_json = location.to_ascii_lowercase().ends_with(".json")
        || input.trim_start().starts_with('{');
    if looks_json {
        from_json(input)
    } else {
        from_yaml(input)
    }
}

/// Dereference every `#/components/...` pointer, producing a self-contained document.
pub fn resolve(spec: &OpenApiSpec) -> Result<OpenApiSpec, ResolveError> {
    RefResolver::new(spec).resolve_spec(spec)
}

fn validate_version(spec: &OpenApiSpec) -> Result<(), ParseError> {
    if !spec.openapi.starts_with("3.") {
        return Err(ParseError::UnsupportedVersion(spec.openapi.clone()));
    }
    Ok(())
}
