use indexmap::IndexMap;

use crate::error::BuildError;
use crate::model::HttpMethod;
use crate::parse::operation::Operation;
use crate::parse::parameter::{Parameter, ParameterOrRef};
use crate::parse::spec::OpenApiSpec;

/// One HTTP method on one path, with its effective parameter list.
#[derive(Debug, Clone)]
pub struct Endpoint<'a> {
    pub method: HttpMethod,
    pub path: &'a str,
    pub operation: &'a Operation,
    /// Path-item parameters not overridden by the operation, then the operation's own.
    pub parameters: Vec<&'a Parameter>,
}

/// Endpoints partitioned by first tag.
#[derive(Debug, Default)]
pub struct EndpointGroups<'a> {
    /// Untagged endpoints, attached directly to the program.
    pub root: Vec<Endpoint<'a>>,
    /// Tag name to its endpoints, in output order.
    pub tagged: IndexMap<String, Vec<Endpoint<'a>>>,
}

/// Every operation of the document, in path order then path-item method order.
pub fn collect_endpoints(spec: &OpenApiSpec) -> Result<Vec<Endpoint<'_>>, BuildError> {
    let mut endpoints = Vec::new();
    for (path, item) in &spec.paths {
        for (method, operation) in item.operations() {
            let shared = inline_parameters(&item.parameters, method, path)?;
            let own = inline_parameters(&operation.parameters, method, path)?;
            endpoints.push(Endpoint {
                method,
                path,
                operation,
                parameters: merge_parameters(shared, own),
            });
        }
    }
    Ok(endpoints)
}

/// Partition by first tag. Tags follow the document's declaration order,
/// restricted to tags that are used; used but undeclared tags come after, in
/// the order they were first seen.
pub fn group_by_tag<'a>(spec: &OpenApiSpec, endpoints: Vec<Endpoint<'a>>) -> EndpointGroups<'a> {
    let mut root = Vec::new();
    let mut seen: IndexMap<String, Vec<Endpoint<'a>>> = IndexMap::new();
    for endpoint in endpoints {
        match endpoint.operation.first_tag() {
            Some(tag) => seen.entry(tag.to_string()).or_default().push(endpoint),
            None => root.push(endpoint),
        }
    }

    let mut tagged = IndexMap::with_capacity(seen.len());
    for tag in &spec.tags {
        if let Some(group) = seen.shift_remove(&tag.name) {
            tagged.insert(tag.name.clone(), group);
        }
    }
    tagged.extend(seen);

    EndpointGroups { root, tagged }
}

fn inline_parameters<'a>(
    params: &'a [ParameterOrRef],
    method: HttpMethod,
    path: &str,
) -> Result<Vec<&'a Parameter>, BuildError> {
    params
        .iter()
        .map(|p| match p {
            ParameterOrRef::Parameter(param) => Ok(param),
            ParameterOrRef::Ref { ref_path } => Err(BuildError::endpoint(
                method,
                path,
                format!("unresolved parameter reference {ref_path}"),
            )),
        })
        .collect()
}

fn merge_parameters<'a>(shared: Vec<&'a Parameter>, own: Vec<&'a Parameter>) -> Vec<&'a Parameter> {
    let mut merged: Vec<&Parameter> = shared
        .into_iter()
        .filter(|p| {
            !own
                .iter()
                .any(|o| o.name == p.name && o.location == p.location)
        })
        .collect();
    merged.extend(own);
    merged
}
