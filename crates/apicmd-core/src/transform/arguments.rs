use crate::model::{Argument, ArgumentKind, ArgumentMapping, OptionSpec, ValueType};
use crate::parse::media_type::is_wildcard;
use crate::parse::parameter::{Parameter, ParameterLocation};
use crate::parse::request_body::RequestBody;
use crate::parse::schema::{Schema, value_to_cli_string};

use super::name_normalizer::to_kebab;
use super::unique_name::{NameConvention, UniqueNameAllocator};

/// Letters and words taken by the global options of the generated program
/// (`-d, --debug`, `-s, --server`, `-a, --auth`, `-h, --help`).
pub const RESERVED_FLAGS: &[&str] = &["d", "debug", "s", "server", "a", "auth", "h", "help"];

/// Headers owned by the transport layer; never exposed as arguments.
const TRANSPORT_HEADERS: &[&str] = &["accept", "content-type", "authorization"];

/// Commander parses `--no-<x>` as the negation of `--x`.
const NEGATION_PREFIX: &str = "no-";

const DEPRECATED_PREFIX: &str = "*DEPRECATED* ";
const ARRAY_PREFIX: &str = "Comma-separated list. ";

/// Whether a header parameter is one of `Accept`, `Content-Type` or `Authorization`.
pub fn is_transport_header(param: &Parameter) -> bool {
    param.location == ParameterLocation::Header
        && TRANSPORT_HEADERS
            .iter()
            .any(|h| param.name.eq_ignore_ascii_case(h))
}

/// Prefix a description with the deprecation marker when needed.
pub fn mark_deprecated(text: &str, deprecated: bool) -> String {
    if deprecated {
        format!("{DEPRECATED_PREFIX}{text}").trim_end().to_string()
    } else {
        text.to_string()
    }
}

/// Builds the argument list of one command, owning the command's name scope.
pub struct ArgumentBuilder {
    names: UniqueNameAllocator,
    arguments: Vec<Argument>,
}

impl Default for ArgumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgumentBuilder {
    pub fn new() -> Self {
        Self {
            names: UniqueNameAllocator::new(NameConvention::Kebab, RESERVED_FLAGS.iter().copied()),
            arguments: Vec::new(),
        }
    }

    /// Positional iff required, without a default, and not an array.
    pub fn add_parameter(&mut self, param: &Parameter) {
        let name = self.names.allocate(&argument_name(&param.name));
        let schema = param.inline_schema();
        let is_array = param.is_array();

        let kind = if param.required && !param.has_default() && !is_array {
            ArgumentKind::Positional
        } else {
            ArgumentKind::Option(OptionSpec {
                flag: self.claim_flag(&name),
                default: schema
                    .and_then(|s| s.default_value.as_ref())
                    .map(|d| match d {
                        serde_json::Value::Array(items) => items
                            .iter()
                            .map(value_to_cli_string)
                            .collect::<Vec<_>>()
                            .join(","),
                        other => value_to_cli_string(other),
                    }),
                value_name: None,
            })
        };

        self.arguments.push(Argument {
            name,
            description: parameter_description(param, schema),
            choices: schema.and_then(choices),
            value_type: if is_array {
                ValueType::Multi
            } else {
                ValueType::Single
            },
            mapping: ArgumentMapping::Parameter(param.clone()),
            kind,
        });
    }

    /// Adds the body file argument and, when the content type is negotiable,
    /// the `body-type` selector.
    pub fn add_request_body(&mut self, body: &RequestBody) {
        let content_types: Vec<&str> = body.content.keys().map(String::as_str).collect();
        let wildcard = content_types.iter().any(|ct| is_wildcard(ct));
        // Without a wildcard the first declared type is sent when no selector is given.
        let default_content_type = if wildcard {
            None
        } else {
            content_types.first().map(|ct| ct.to_string())
        };

        let description = match body.description.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => format!("File containing the request body. {text}"),
            _ => "File containing the request body".to_string(),
        };
        let name = self.names.allocate("body");
        self.arguments.push(Argument {
            name,
            description,
            choices: None,
            value_type: ValueType::Single,
            mapping: ArgumentMapping::RequestBody {
                default_content_type: default_content_type.clone(),
            },
            kind: if body.required {
                ArgumentKind::Positional
            } else {
                ArgumentKind::Option(OptionSpec::default())
            },
        });

        if !wildcard && content_types.len() < 2 {
            return;
        }

        let name = self.names.allocate("body-type");
        let (kind, choices) = if wildcard {
            let kind = if body.required {
                ArgumentKind::Positional
            } else {
                ArgumentKind::Option(OptionSpec {
                    value_name: Some("type".to_string()),
                    ..OptionSpec::default()
                })
            };
            (kind, None)
        } else {
            let kind = ArgumentKind::Option(OptionSpec {
                flag: None,
                default: content_types.first().map(|ct| ct.to_string()),
                value_name: Some("type".to_string()),
            });
            (kind, Some(content_types.iter().map(|ct| ct.to_string()).collect()))
        };
        self.arguments.push(Argument {
            name,
            description: "Content type of the request body".to_string(),
            choices,
            value_type: ValueType::Single,
            mapping: ArgumentMapping::ContentType,
            kind,
        });
    }

    pub fn finish(self) -> Vec<Argument> {
        self.arguments
    }

    /// First letter of the option name, if it is still free in this command.
    /// Claiming it keeps later options from reusing it.
    fn claim_flag(&mut self, name: &str) -> Option<char> {
        let letter = name.chars().next().filter(char::is_ascii_alphabetic)?;
        let symbol = letter.to_string();
        if self.names.is_taken(&symbol) {
            return None;
        }
        self.names.allocate(&symbol);
        Some(letter)
    }
}

/// Kebab name of a parameter argument; `no-` names get a `param-` prefix.
fn argument_name(raw: &str) -> String {
    let kebab = to_kebab(raw);
    if kebab.starts_with(NEGATION_PREFIX) {
        format!("param-{kebab}")
    } else {
        kebab
    }
}

fn parameter_description(param: &Parameter, schema: Option<&Schema>) -> String {
    let text = param
        .description
        .as_deref()
        .or_else(|| schema.and_then(|s| s.description.as_deref()))
        .unwrap_or_default()
        .trim_end();
    let text = if param.is_array() {
        format!("{ARRAY_PREFIX}{text}")
    } else {
        text.to_string()
    };
    mark_deprecated(text.trim_end(), param.is_deprecated())
}

fn choices(schema: &Schema) -> Option<Vec<String>> {
    let values = if schema.is_array() {
        &schema.items_schema()?.enum_values
    } else {
        &schema.enum_values
    };
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(value_to_cli_string).collect())
}
