pub mod emitters;
pub mod error;
pub mod generator;
pub mod sanitize;

pub use error::GenerateError;
pub use generator::CommanderGenerator;
