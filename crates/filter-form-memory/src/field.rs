use std::sync::atomic::{AtomicUsize, Ordering};

use filter_form_core::{FilterValue, InputDefinition};
use filter_form_engine::{FieldEventSink, FieldWidget, ValidationRule, WidgetError};
use regex::Regex;
use tracing::debug;

use crate::validate;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
    NEXT_ID.fetch_add(1, Ordering::SeqCst)
}

/// A headless field widget holding its state in memory.
///
/// Programmatic writes ([`set_value`](FieldWidget::set_value)) are silent;
/// user edits go through [`edit`](MemoryField::edit), which notifies the
/// event sink the way a rendered control would.
pub struct MemoryField {
    id: usize,
    definition: InputDefinition,
    value: FilterValue,
    disabled: bool,
    pattern: Option<Regex>,
    rules: Vec<(String, ValidationRule)>,
    sink: Option<FieldEventSink>,
    detached: bool,
    last_report: Option<String>,
}

impl std::fmt::Debug for MemoryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryField")
            .field("id", &self.id)
            .field("definition", &self.definition)
            .field("value", &self.value)
            .field("disabled", &self.disabled)
            .field("pattern", &self.pattern)
            .field("rules", &self.rules.len())
            .field("sink", &self.sink)
            .field("detached", &self.detached)
            .field("last_report", &self.last_report)
            .finish()
    }
}

impl MemoryField {
    /// Builds a field from its definition.
    ///
    /// Fails when the definition carries an unparsable `pattern`.
    pub fn new(definition: InputDefinition) -> Result<Self, WidgetError> {
        let pattern = match definition.pattern.as_deref() {
            Some(p) => Some(Regex::new(p).map_err(|e| WidgetError::CreationFailed {
                name: definition.name.clone(),
                reason: format!("invalid pattern: {e}"),
            })?),
            None => None,
        };
        Ok(Self {
            id: next_id(),
            value: definition.value.clone().unwrap_or(FilterValue::Null),
            definition,
            disabled: false,
            pattern,
            rules: Vec::new(),
            sink: None,
            detached: false,
            last_report: None,
        })
    }

    /// A process-unique instance id, for telling widget instances apart.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Applies a user edit: sets the value and notifies the sink.
    ///
    /// Ignored while the field is disabled or detached, matching a rendered
    /// control the user cannot interact with.
    pub fn edit(&mut self, value: FilterValue) {
        if self.disabled || self.detached {
            return;
        }
        self.value = value.clone();
        if let Some(sink) = &self.sink {
            sink.emit_edit(Some(value));
        }
    }

    /// The diagnostic recorded by the most recent reporting validation.
    pub fn last_report(&self) -> Option<&str> {
        self.last_report.as_deref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    fn guard_attached(&self) -> Result<(), WidgetError> {
        if self.detached {
            return Err(WidgetError::Detached {
                name: self.definition.name.clone(),
            });
        }
        Ok(())
    }
}

impl FieldWidget for MemoryField {
    fn name(&self) -> &str {
        &self.definition.name
    }

    fn label(&self) -> Option<&str> {
        self.definition.label.as_deref()
    }

    fn definition(&self) -> InputDefinition {
        self.definition.clone().with_value(self.value.clone())
    }

    fn value(&self) -> FilterValue {
        self.value.clone()
    }

    async fn set_value(&mut self, value: FilterValue) -> Result<(), WidgetError> {
        self.guard_attached()?;
        self.value = value;
        Ok(())
    }

    async fn set_disabled(&mut self, disabled: bool) -> Result<(), WidgetError> {
        self.guard_attached()?;
        self.disabled = disabled;
        Ok(())
    }

    async fn validate(&mut self, report: bool) -> bool {
        let failure = validate::check(&self.definition, &self.value, self.pattern.as_ref(), &self.rules);
        if let Some(message) = &failure {
            debug!(name = %self.definition.name, %message, "field validation failed");
        }
        if report {
            self.last_report = failure.clone();
        }
        failure.is_none()
    }

    fn add_validation_rule(
        &mut self,
        kind: &str,
        rule: ValidationRule,
    ) -> Result<(), WidgetError> {
        if self.rules.iter().any(|(k, _)| k == kind) {
            return Err(WidgetError::DuplicateValidationRule { kind: kind.into() });
        }
        self.rules.push((kind.to_string(), rule));
        Ok(())
    }

    fn set_event_sink(&mut self, sink: FieldEventSink) {
        self.sink = Some(sink);
    }

    fn detach(&mut self) {
        self.detached = true;
        self.sink = None;
    }
}
