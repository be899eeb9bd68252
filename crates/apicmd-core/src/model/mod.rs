//! The intermediate command model: a language-agnostic description of the
//! generated program, built once per run by [`crate::transform::build`] and
//! consumed by a [`crate::CodeGenerator`].
//!
//! "Argument" and "option" refer to the command line; "parameter" refers to the
//! OpenAPI definition and the HTTP request.

mod argument;
mod command;

pub use argument::*;
pub use command::*;
