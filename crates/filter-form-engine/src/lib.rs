//! Reconciliation and lifecycle engine for dynamic filter forms.
//!
//! The engine keeps three things consistent across every mutation: the
//! catalog of known field definitions, the subset currently live ("active",
//! each backed by a [`FieldWidget`]), and the ordered list of fields still
//! available to add. Rendering is out of scope: hosts supply a widget
//! implementation through [`FieldWidgetFactory`].

pub mod active;
pub mod error;
pub mod event;
pub mod form;
pub mod registry;
pub mod selector;
pub mod widget;

pub use active::ActiveFieldSet;
pub use error::{FormError, WidgetError};
pub use event::{FieldChange, FieldEventSink, FormEvent};
pub use form::FilterForm;
pub use registry::{ValidationRule, ValidatorRegistry};
pub use selector::{AvailableFieldSelector, SelectorOption};
pub use widget::{FieldWidget, FieldWidgetFactory};
