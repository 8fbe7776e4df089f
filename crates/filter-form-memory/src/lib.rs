//! In-memory implementation of the `FieldWidget` contract.
//!
//! This is the headless reference widget: no rendering surface, but the full
//! value/validate/disable lifecycle, so hosts and tests can drive a complete
//! filter form without a UI.

pub mod factory;
pub mod field;
mod validate;

pub use factory::MemoryFieldFactory;
pub use field::MemoryField;
