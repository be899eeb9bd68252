//! Model Builder: turns a resolved OpenAPI document into a [`crate::model::Program`].

pub mod arguments;
pub mod examples;
pub mod grouping;
pub mod name_normalizer;
pub mod sampler;
pub mod spec_to_model;
pub mod unique_name;

pub use spec_to_model::{BuildOptions, build, build_with_options};
pub use unique_name::{NameConvention, UniqueNameAllocator};
