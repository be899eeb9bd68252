use std::path::PathBuf;

use thiserror::Error;

use crate::model::HttpMethod;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),
}

/// A failure while turning one endpoint into a command. Always fatal to the whole build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{method} {path}: {reason}")]
    Endpoint {
        method: HttpMethod,
        path: String,
        reason: String,
    },
}

impl BuildError {
    pub fn endpoint(method: HttpMethod, path: &str, reason: impl Into<String>) -> Self {
        BuildError::Endpoint {
            method,
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
