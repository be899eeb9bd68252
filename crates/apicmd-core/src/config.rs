use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.apicmd.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApicmdConfig {
    /// Path or URL of the OpenAPI document.
    pub input: String,
    /// Path of the generated program.
    pub output: String,
    /// Program name; defaults to the output file stem.
    pub name: Option<String>,
    pub naming: NamingConfig,
}

impl Default for ApicmdConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: "cli.js".to_string(),
            name: None,
            naming: NamingConfig::default(),
        }
    }
}

/// Naming strategy and aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub strategy: NamingStrategy,
    /// Map from raw command name (operationId or route-derived) to custom alias.
    pub aliases: IndexMap<String, String>,
}

/// How command names are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    /// operationId when present, else method + path.
    #[default]
    UseOperationId,
    /// Always method + path.
    UseRouteBased,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".apicmd.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ApicmdConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# apicmd configuration
input: openapi.yaml   # path or http(s) URL of the OpenAPI document
output: cli.js        # generated program
# name: petstore      # program name, defaults to the output file stem

naming:
  strategy: use_operation_id  # use_operation_id | use_route_based
  aliases: {}
    # getPetById: show-pet      # raw name → custom command name
"#
}
