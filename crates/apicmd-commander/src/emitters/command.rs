use apicmd_core::model::{Argument, Command, ValueType};
use apicmd_core::transform::UniqueNameAllocator;
use minijinja::{Environment, Value, context};

use super::action::emit_action;
use crate::error::GenerateError;

/// Emit one command attached to `parent`, a program or group variable.
///
/// `vars` is the program-wide identifier scope; a variable is only claimed
/// when the command needs one for its `examples` subcommand.
pub fn emit_command(
    env: &Environment<'_>,
    cmd: &Command,
    parent: &str,
    vars: &mut UniqueNameAllocator,
) -> Result<String, GenerateError> {
    log::debug!("emitting {} {} as {}", cmd.api.method, cmd.api.path, cmd.name);
    let action = emit_action(cmd)?;

    let (var, examples) = if cmd.examples.is_empty() {
        (None, None)
    } else {
        let json = serde_json::to_string(&cmd.examples)?;
        (Some(vars.allocate(&cmd.name)), Some(json))
    };

    let summary = Some(cmd.summary.as_str()).filter(|s| !s.is_empty() && *s != cmd.description);
    let positionals: Vec<Value> = cmd.positionals().map(positional_context).collect();
    let options: Vec<Value> = cmd.options().map(option_context).collect();

    let tmpl = env.get_template("command.js.j2")?;
    let rendered = tmpl.render(context! {
        parent => parent,
        var => var,
        name => &cmd.name,
        summary => summary,
        description => &cmd.description,
        positionals => positionals,
        options => options,
        params => &action.params,
        action => &action.lines,
        examples => examples,
    })?;
    Ok(rendered.trim_end().to_string())
}

fn positional_context(arg: &Argument) -> Value {
    context! {
        name => &arg.name,
        description => &arg.description,
        choices => &arg.choices,
    }
}

fn option_context(arg: &Argument) -> Value {
    let spec = arg.option().cloned().unwrap_or_default();
    let multi = arg.value_type == ValueType::Multi;

    let flag = spec.flag.map(|f| format!("-{f}, ")).unwrap_or_default();
    let value_name = spec.value_name.as_deref().unwrap_or(&arg.name);
    let declaration = format!("{flag}--{} <{value_name}>", arg.name);

    let mut description = arg.description.clone();
    let mut append = |note: String| {
        if !description.is_empty() {
            description.push(' ');
        }
        description.push_str(&note);
    };
    if multi && let Some(choices) = &arg.choices {
        append(format!("(choices: {})", choices.join(", ")));
    }
    if let Some(default) = &spec.default {
        append(format!("(default: {default})"));
    }

    context! {
        declaration => declaration,
        description => description,
        choices => if multi { None } else { arg.choices.clone() },
        multi => multi,
    }
}
