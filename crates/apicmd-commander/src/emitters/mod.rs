pub mod action;
pub mod command;
pub mod program;

use apicmd_core::transform::{NameConvention, UniqueNameAllocator};
use minijinja::{AutoEscape, Environment};

use crate::sanitize;

/// JavaScript reserved words and globals a generated identifier must not shadow.
const JS_RESERVED: &[&str] = &[
    "arguments", "async", "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false",
    "finally", "for", "function", "if", "implements", "import", "in", "instanceof", "interface",
    "let", "new", "null", "package", "private", "protected", "public", "return", "static",
    "super", "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void",
    "while", "with", "yield", "Infinity", "NaN",
];

/// Names defined or used by the program header.
const RUNTIME_NAMES: &[&str] = &[
    "Argument", "Command", "JSON", "Object", "Option", "String", "URL", "console",
    "defaultServer", "emptyRequestParams", "expandPath", "exports", "fetch", "fs",
    "getGlobalOptions", "module", "printExamples", "process", "program", "request", "require",
];

/// An allocator for JavaScript identifiers that avoids keywords, runtime names
/// and `extra`.
pub fn identifier_scope(extra: &[&str]) -> UniqueNameAllocator {
    UniqueNameAllocator::new(
        NameConvention::Identifier,
        JS_RESERVED
            .iter()
            .chain(RUNTIME_NAMES)
            .chain(extra)
            .copied(),
    )
}

/// Template environment with the program templates and escaping filters.
///
/// Auto-escaping is off: every interpolated value goes through `js_string`
/// or `js_comment` instead.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("js_string", js_string);
    env.add_filter("js_comment", js_comment);
    env.add_template("header.js.j2", include_str!("../../templates/header.js.j2"))?;
    env.add_template("program.js.j2", include_str!("../../templates/program.js.j2"))?;
    env.add_template("group.js.j2", include_str!("../../templates/group.js.j2"))?;
    env.add_template("command.js.j2", include_str!("../../templates/command.js.j2"))?;
    Ok(env)
}

fn js_string(value: String) -> String {
    sanitize::js_string(&value)
}

fn js_comment(value: String) -> String {
    sanitize::js_comment(&value)
}
