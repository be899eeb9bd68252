use indexmap::IndexMap;

use crate::config::NamingStrategy;
use crate::error::BuildError;
use crate::model::{ApiCall, Command, CommandEntry, CommandGroup, Program};
use crate::parse::parameter::ParameterLocation;
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::spec::OpenApiSpec;

use super::arguments::{ArgumentBuilder, is_transport_header, mark_deprecated};
use super::examples::extract_examples;
use super::grouping::{Endpoint, collect_endpoints, group_by_tag};
use super::name_normalizer::{route_to_name, trim_description};
use super::unique_name::{NameConvention, UniqueNameAllocator};

/// Options controlling how command names are derived.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub naming_strategy: NamingStrategy,
    /// Raw name (operationId or route-derived) to custom command name.
    pub aliases: IndexMap<String, String>,
}

/// Build the command model of a resolved document.
pub fn build(spec: &OpenApiSpec, program_name: &str) -> Result<Program, BuildError> {
    build_with_options(spec, program_name, &BuildOptions::default())
}

/// Build with explicit naming options.
pub fn build_with_options(
    spec: &OpenApiSpec,
    program_name: &str,
    options: &BuildOptions,
) -> Result<Program, BuildError> {
    let endpoints = collect_endpoints(spec)?;
    let groups = group_by_tag(spec, endpoints);

    // Command and group names share one program-wide scope.
    let mut names = UniqueNameAllocator::new(NameConvention::Camel, ["help"]);
    let mut commands = Vec::with_capacity(groups.root.len() + groups.tagged.len());

    for endpoint in &groups.root {
        let command = build_command(endpoint, &mut names, options)?;
        commands.push(CommandEntry::Command(command));
    }

    for (tag, endpoints) in &groups.tagged {
        let name = names.allocate(tag);
        let description = spec
            .tags
            .iter()
            .find(|t| t.name == *tag)
            .and_then(|t| t.description.as_deref())
            .map(str::trim_end)
            .filter(|d| !d.is_empty());
        let subcommands = endpoints
            .iter()
            .map(|endpoint| build_command(endpoint, &mut names, options))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("group {name}: {} commands", subcommands.len());
        commands.push(CommandEntry::Group(CommandGroup {
            name,
            summary: description.map(trim_description),
            description: description.map(str::to_string),
            subcommands,
        }));
    }

    Ok(Program {
        name: program_name.to_string(),
        help_text: spec.info.description.clone(),
        default_server: spec.servers.first().map(|s| s.expanded_url()),
        commands,
    })
}

fn build_command(
    endpoint: &Endpoint<'_>,
    names: &mut UniqueNameAllocator,
    options: &BuildOptions,
) -> Result<Command, BuildError> {
    let Endpoint {
        method,
        path,
        operation: op,
        ..
    } = *endpoint;

    let raw_name = match options.naming_strategy {
        NamingStrategy::UseOperationId => op
            .operation_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| route_to_name(method, path)),
        NamingStrategy::UseRouteBased => route_to_name(method, path),
    };
    let raw_name = options.aliases.get(&raw_name).unwrap_or(&raw_name);
    let name = names.allocate(raw_name);

    let deprecated = op.is_deprecated();
    let summary_source = op.summary.as_deref().or(op.description.as_deref());
    let description_source = op.description.as_deref().or(op.summary.as_deref());
    let summary = mark_deprecated(&trim_description(summary_source.unwrap_or_default()), deprecated);
    let description = mark_deprecated(description_source.unwrap_or_default().trim_end(), deprecated);

    let mut arguments = ArgumentBuilder::new();
    for param in &endpoint.parameters {
        if param.name.is_empty() {
            return Err(BuildError::endpoint(method, path, "parameter without a name"));
        }
        if param.location == ParameterLocation::Unknown {
            log::warn!(
                "{method} {path}: dropping parameter '{}' with unknown location",
                param.name
            );
            continue;
        }
        if is_transport_header(param) {
            log::debug!("{method} {path}: header '{}' is set by the runtime", param.name);
            continue;
        }
        arguments.add_parameter(param);
    }

    let mut examples = IndexMap::new();
    match &op.request_body {
        Some(RequestBodyOrRef::RequestBody(body)) => {
            arguments.add_request_body(body);
            examples = extract_examples(body);
        }
        Some(RequestBodyOrRef::Ref { ref_path }) => {
            return Err(BuildError::endpoint(
                method,
                path,
                format!("unresolved request body reference {ref_path}"),
            ));
        }
        None => {}
    }

    log::debug!("{method} {path} -> {name}");
    Ok(Command {
        name,
        summary,
        description,
        arguments: arguments.finish(),
        examples,
        api: ApiCall {
            method,
            path: path.to_string(),
        },
    })
}
