use apicmd_core::model::{Argument, ArgumentMapping, Command, ValueType};
use apicmd_core::parse::parameter::{Parameter, ParameterLocation};

use super::identifier_scope;
use crate::error::GenerateError;
use crate::sanitize::js_string;

/// The `.action(...)` handler of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBlock {
    /// Handler parameters: one identifier per positional argument, then `options`.
    pub params: Vec<String>,
    /// Statements of the handler body, already indented relative to it.
    pub lines: Vec<String>,
}

/// Key under which commander stores an option: `--x-request-id` → `xRequestId`.
pub fn option_key(name: &str) -> String {
    let mut parts = name.split('-');
    let mut key = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            key.extend(first.to_uppercase());
            key.push_str(chars.as_str());
        }
    }
    key
}

pub fn emit_action(cmd: &Command) -> Result<ActionBlock, GenerateError> {
    let mut idents = identifier_scope(&["options", "req"]);

    let mut params = Vec::new();
    let values: Vec<String> = cmd
        .arguments
        .iter()
        .map(|arg| {
            if arg.is_positional() {
                let ident = idents.allocate(&arg.name);
                params.push(ident.clone());
                ident
            } else {
                format!("options['{}']", js_string(&option_key(&arg.name)))
            }
        })
        .collect();
    params.push("options".to_string());

    let mut lines = vec!["const req = emptyRequestParams()".to_string()];
    let mut body = None;
    let mut selector = None;
    for (arg, value) in cmd.arguments.iter().zip(&values) {
        match &arg.mapping {
            ArgumentMapping::Parameter(param) => {
                lines.extend(parameter_lines(cmd, arg, param, value)?);
            }
            ArgumentMapping::RequestBody {
                default_content_type,
            } => body = Some((value, default_content_type.as_deref())),
            ArgumentMapping::ContentType => selector = Some(value),
        }
    }

    if let Some((value, default_content_type)) = body {
        lines.push(format!("if ({value} !== undefined) {{"));
        lines.push(format!("  req.body = fs.readFileSync({value})"));
        let candidates: Vec<String> = selector
            .cloned()
            .into_iter()
            .chain(default_content_type.map(|ct| format!("'{}'", js_string(ct))))
            .collect();
        if !candidates.is_empty() {
            let content_type = idents.allocate("contentType");
            lines.push(format!("  const {content_type} = {}", candidates.join(" || ")));
            lines.push(format!("  if ({content_type}) {{"));
            lines.push(format!("    req.headers['Content-Type'] = {content_type}"));
            lines.push("  }".to_string());
        }
        lines.push("}".to_string());
    } else if selector.is_some() {
        return Err(GenerateError::command(
            cmd,
            "content type selector without a request body",
        ));
    }

    lines.push(format!(
        "await request('{}', defaultServer, '{}', req)",
        js_string(cmd.api.method.as_str()),
        js_string(&cmd.api.path)
    ));

    Ok(ActionBlock { params, lines })
}

fn parameter_lines(
    cmd: &Command,
    arg: &Argument,
    param: &Parameter,
    value: &str,
) -> Result<Vec<String>, GenerateError> {
    let key = js_string(&param.name);
    let multi = arg.value_type == ValueType::Multi;
    let joined = if multi {
        format!("{value}.join(',')")
    } else {
        value.to_string()
    };

    let assign = match param.location {
        ParameterLocation::Path => vec![format!("req.pathParams['{key}'] = {joined}")],
        ParameterLocation::Header => vec![format!("req.headers['{key}'] = {joined}")],
        ParameterLocation::Cookie => vec![format!("req.cookies['{key}'] = {joined}")],
        ParameterLocation::Query if multi && param.explodes() => vec![
            format!("for (const v of {value}) {{"),
            format!("  req.queryParams.push(['{key}', v])"),
            "}".to_string(),
        ],
        ParameterLocation::Query => vec![format!("req.queryParams.push(['{key}', {joined}])")],
        ParameterLocation::Unknown => {
            return Err(GenerateError::command(
                cmd,
                format!("parameter '{}' has an unknown location", param.name),
            ));
        }
    };

    if arg.is_positional() {
        return Ok(assign);
    }
    let mut lines = Vec::with_capacity(assign.len() + 2);
    lines.push(format!("if ({value} !== undefined) {{"));
    lines.extend(assign.into_iter().map(|line| format!("  {line}")));
    lines.push("}".to_string());
    Ok(lines)
}
