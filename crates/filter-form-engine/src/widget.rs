use std::future::Future;

use filter_form_core::{FilterValue, InputDefinition};

use crate::error::WidgetError;
use crate::event::FieldEventSink;
use crate::registry::ValidationRule;

/// A live, rendered filter field.
///
/// The engine never inspects a field's internal rendering; this trait is the
/// entire contract. Async methods use RPITIT (return position `impl Trait`
/// in trait), so no `async-trait` dependency is needed.
pub trait FieldWidget: Send {
    /// The field's name, taken from its definition.
    fn name(&self) -> &str;

    /// The field's display label, if any.
    fn label(&self) -> Option<&str>;

    /// A snapshot of the live definition, reflecting in-place edits the
    /// widget tracks (in particular the current value).
    fn definition(&self) -> InputDefinition;

    /// The current value.
    fn value(&self) -> FilterValue;

    /// Sets the value programmatically. Must NOT emit change notifications;
    /// only user-originated edits go through the event sink.
    fn set_value(
        &mut self,
        value: FilterValue,
    ) -> impl Future<Output = Result<(), WidgetError>> + Send;

    /// Enables or disables user interaction with the field.
    fn set_disabled(
        &mut self,
        disabled: bool,
    ) -> impl Future<Output = Result<(), WidgetError>> + Send;

    /// Validates the current value. When `report` is true the widget should
    /// surface its diagnostic to the user in whatever way it renders them.
    fn validate(&mut self, report: bool) -> impl Future<Output = bool> + Send;

    /// Attaches a named custom validation rule.
    ///
    /// Mirrors the registry contract: a duplicate kind fails with
    /// [`WidgetError::DuplicateValidationRule`] rather than overwriting.
    fn add_validation_rule(&mut self, kind: &str, rule: ValidationRule)
        -> Result<(), WidgetError>;

    /// Wires the sink through which user-originated edits surface as
    /// form-level events.
    fn set_event_sink(&mut self, sink: FieldEventSink);

    /// Detaches the widget from its rendering surface. Called exactly once,
    /// just before the widget is dropped.
    fn detach(&mut self);
}

/// Constructs field widgets from definitions.
///
/// Construction is asynchronous (a widget may perform setup such as loading
/// resources) and may fail.
pub trait FieldWidgetFactory: Send {
    type Widget: FieldWidget;

    fn create(
        &self,
        definition: &InputDefinition,
    ) -> impl Future<Output = Result<Self::Widget, WidgetError>> + Send;
}
