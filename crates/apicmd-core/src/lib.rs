pub mod config;
pub mod error;
pub mod model;
pub mod parse;
pub mod transform;

/// Trait for code generators that turn a command model into program source.
pub trait CodeGenerator {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Emit the complete source text of the generated program.
    fn generate(&self, program: &model::Program) -> Result<String, Self::Error>;
}
