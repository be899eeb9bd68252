use apicmd_core::model::{CommandEntry, CommandGroup, Program};
use apicmd_core::transform::name_normalizer::to_env_prefix;
use minijinja::{Environment, context};

use super::command::emit_command;
use super::{environment, identifier_scope};
use crate::error::GenerateError;

/// Emit the complete program: header, `defaultServer`, commands and groups in
/// model order, then the entry-point trailer.
pub fn emit_program(program: &Program) -> Result<String, GenerateError> {
    let env = environment()?;
    let mut vars = identifier_scope(&[]);

    let mut blocks = Vec::with_capacity(program.commands.len());
    for entry in &program.commands {
        match entry {
            CommandEntry::Command(cmd) => {
                blocks.push(emit_command(&env, cmd, "program", &mut vars)?);
            }
            CommandEntry::Group(group) => {
                let var = vars.allocate(&group.name);
                blocks.push(emit_group(&env, group, &var)?);
                for cmd in &group.subcommands {
                    blocks.push(emit_command(&env, cmd, &var, &mut vars)?);
                }
            }
        }
    }

    let tmpl = env.get_template("program.js.j2")?;
    let source = tmpl.render(context! {
        name => &program.name,
        env_prefix => to_env_prefix(&program.name),
        default_server => program.default_server.as_deref().unwrap_or_default(),
        help_text => &program.help_text,
        blocks => &blocks,
    })?;
    log::debug!("emitted {} blocks for {}", blocks.len(), program.name);
    Ok(source)
}

fn emit_group(
    env: &Environment<'_>,
    group: &CommandGroup,
    var: &str,
) -> Result<String, GenerateError> {
    let summary = group
        .summary
        .as_deref()
        .filter(|s| !s.is_empty() && Some(*s) != group.description.as_deref());
    let tmpl = env.get_template("group.js.j2")?;
    let rendered = tmpl.render(context! {
        name => &group.name,
        var => var,
        summary => summary,
        description => &group.description,
    })?;
    Ok(rendered.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicmd_core::model::{ApiCall, Command, HttpMethod};
    use indexmap::IndexMap;

    fn command(name: &str, path: &str) -> Command {
        Command {
            name: name.to_string(),
            summary: String::new(),
            description: String::new(),
            arguments: Vec::new(),
            examples: IndexMap::new(),
            api: ApiCall {
                method: HttpMethod::Get,
                path: path.to_string(),
            },
        }
    }

    fn program() -> Program {
        Program {
            name: "pet-store".to_string(),
            help_text: Some("Pets, with 'quotes'".to_string()),
            default_server: None,
            commands: vec![
                CommandEntry::Command(command("health", "/health")),
                CommandEntry::Group(CommandGroup {
                    name: "program".to_string(),
                    summary: Some("Programs".to_string()),
                    description: None,
                    subcommands: vec![command("listPrograms", "/programs")],
                }),
            ],
        }
    }

    #[test]
    fn test_header_and_trailer() {
        let js = emit_program(&program()).unwrap();
        assert!(js.starts_with("#!/usr/bin/env node\n"));
        assert!(js.contains(".env('PET_STORE_DEBUG')"));
        assert!(js.contains(".env('PET_STORE_SERVER')"));
        assert!(js.contains(".env('PET_STORE_AUTH')"));
        assert!(js.contains("  .name('pet-store')\n"));
        assert!(js.contains("\nconst defaultServer = ''\n"));
        assert!(js.contains("\nprogram.description('Pets, with \\'quotes\\'')\n"));
        assert!(js.ends_with(
            "if (require.main === module) {\n  program.parseAsync(process.argv)\n} else {\n  module.exports = program\n}\n"
        ));
    }

    #[test]
    fn test_group_variable_avoids_runtime_names() {
        let js = emit_program(&program()).unwrap();
        assert!(js.contains(
            "/* ============== program ============== */\nconst program1 = program.command('program')\n  .summary('Programs')\n"
        ));
        assert!(js.contains("\nprogram1.command('listPrograms')\n"));
        assert!(js.contains("\nprogram.command('health')\n"));
    }

    #[test]
    fn test_group_summary_equal_to_description_omitted() {
        let env = environment().unwrap();
        let mut group = CommandGroup {
            name: "pets".to_string(),
            summary: Some("Everything about pets".to_string()),
            description: Some("Everything about pets".to_string()),
            subcommands: Vec::new(),
        };
        assert_eq!(
            emit_group(&env, &group, "pets").unwrap(),
            "/* ============== pets ============== */\nconst pets = program.command('pets')\n  .description('Everything about pets')"
        );

        group.description = Some("Everything about pets\nand owners".to_string());
        group.summary = Some("Everything about pets...".to_string());
        let js = emit_group(&env, &group, "pets").unwrap();
        assert!(js.contains("  .summary('Everything about pets...')\n"));
        assert!(js.contains("  .description('Everything about pets\\nand owners')"));
    }

    #[test]
    fn test_blocks_in_model_order() {
        let js = emit_program(&program()).unwrap();
        let health = js.find("command('health')").unwrap();
        let group = js.find("command('program')").unwrap();
        let list = js.find("command('listPrograms')").unwrap();
        assert!(health < group && group < list);
        assert_eq!(js.matches("const defaultServer").count(), 1);
    }
}
