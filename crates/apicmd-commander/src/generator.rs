use apicmd_core::CodeGenerator;
use apicmd_core::model::Program;

use crate::emitters;
use crate::error::GenerateError;

/// Emits a single-file Node.js program built on the `commander` package.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommanderGenerator;

impl CodeGenerator for CommanderGenerator {
    type Error = GenerateError;

    fn generate(&self, program: &Program) -> Result<String, GenerateError> {
        emitters::program::emit_program(program)
    }
}
