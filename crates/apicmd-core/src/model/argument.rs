use serde::Serialize;

use crate::parse::parameter::{Parameter, ParameterLocation};

/// A command-line argument of a command.
#[derive(Debug, Clone, Serialize)]
pub struct Argument {
    /// Collision-resolved kebab-case name. Options are declared as `--{name}`.
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    pub value_type: ValueType,
    pub mapping: ArgumentMapping,
    pub kind: ArgumentKind,
}

impl Argument {
    pub fn is_positional(&self) -> bool {
        matches!(self.kind, ArgumentKind::Positional)
    }

    pub fn option(&self) -> Option<&OptionSpec> {
        match &self.kind {
            ArgumentKind::Option(spec) => Some(spec),
            ArgumentKind::Positional => None,
        }
    }

    /// The parameter definition, for arguments mapped to a parameter.
    pub fn parameter(&self) -> Option<&Parameter> {
        match &self.mapping {
            ArgumentMapping::Parameter(definition) => Some(definition),
            _ => None,
        }
    }

    pub fn location(&self) -> Option<ParameterLocation> {
        self.parameter().map(|p| p.location)
    }
}

/// How values are passed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// A single value.
    Single,
    /// A comma-separated list.
    Multi,
}

/// Positional argument or named option.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ArgumentKind {
    Positional,
    Option(OptionSpec),
}

/// Option-only attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionSpec {
    /// One-letter alias, e.g. `l` for `-l, --limit`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Shorter placeholder shown in help: `--{name} <{value_name}>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
}

/// Where the argument's value goes in the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ArgumentMapping {
    /// A path, query, header or cookie parameter.
    Parameter(Parameter),
    /// Path to a file holding the request body.
    RequestBody {
        #[serde(skip_serializing_if = "Option::is_none")]
        default_content_type: Option<String>,
    },
    /// Overrides the body's content type.
    ContentType,
}
