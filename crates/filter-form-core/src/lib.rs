//! Data model for dynamic filter forms: input definitions, runtime values,
//! and the name/value pairs used for bulk reads and writes.

pub mod types;

pub use types::{FilterValue, InputDefinition, InputOption, InputType, InputValue};
