use apicmd_core::model::{Command, HttpMethod};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("command {command} ({method} {path}): {reason}")]
    Command {
        command: String,
        method: HttpMethod,
        path: String,
        reason: String,
    },

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("failed to serialize examples: {0}")]
    Examples(#[from] serde_json::Error),
}

impl GenerateError {
    pub fn command(command: &Command, reason: impl Into<String>) -> Self {
        GenerateError::Command {
            command: command.name.clone(),
            method: command.api.method,
            path: command.api.path.clone(),
            reason: reason.into(),
        }
    }
}
