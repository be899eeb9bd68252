use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use super::argument::Argument;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root of the command tree.
#[derive(Debug, Clone, Serialize)]
pub struct Program {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_server: Option<String>,
    /// Root-level commands first, then one group per tag.
    pub commands: Vec<CommandEntry>,
}

impl Program {
    /// Every command in emission order, root-level and grouped alike.
    pub fn all_commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter().flat_map(|entry| match entry {
            CommandEntry::Command(cmd) => std::slice::from_ref(cmd).iter(),
            CommandEntry::Group(group) => group.subcommands.iter(),
        })
    }

    pub fn groups(&self) -> impl Iterator<Item = &CommandGroup> {
        self.commands.iter().filter_map(|entry| match entry {
            CommandEntry::Group(group) => Some(group),
            CommandEntry::Command(_) => None,
        })
    }
}

/// A top-level entry of the program.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CommandEntry {
    Command(Command),
    Group(CommandGroup),
}

/// Commands sharing a tag.
#[derive(Debug, Clone, Serialize)]
pub struct CommandGroup {
    pub name: String,
    /// First line of the tag description, shown in the parent's help listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub subcommands: Vec<Command>,
}

/// One API operation as a command.
#[derive(Debug, Clone, Serialize)]
pub struct Command {
    pub name: String,
    /// Shown in the parent's help listing; omitted from output when equal to `description`.
    pub summary: String,
    pub description: String,
    pub arguments: Vec<Argument>,
    /// Rendered request body examples keyed by content type.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, Vec<String>>,
    pub api: ApiCall,
}

impl Command {
    pub fn positionals(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter().filter(|a| a.is_positional())
    }

    pub fn options(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter().filter(|a| !a.is_positional())
    }
}

/// What the command sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiCall {
    pub method: HttpMethod,
    /// Path template exactly as declared, e.g. `/pets/{petId}`.
    pub path: String,
}
