use std::collections::HashSet;

use filter_form_core::InputDefinition;
use filter_form_engine::{FieldWidgetFactory, WidgetError};
use tracing::debug;

use crate::field::MemoryField;

/// Constructs [`MemoryField`] widgets.
///
/// Creation can be scripted to fail for named fields, which is how tests
/// exercise the engine's activation-failure paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryFieldFactory {
    fail_names: HashSet<String>,
}

impl MemoryFieldFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes creation fail for every field with this name.
    pub fn failing_for(mut self, name: impl Into<String>) -> Self {
        self.fail_names.insert(name.into());
        self
    }
}

impl FieldWidgetFactory for MemoryFieldFactory {
    type Widget = MemoryField;

    async fn create(&self, definition: &InputDefinition) -> Result<MemoryField, WidgetError> {
        if self.fail_names.contains(&definition.name) {
            return Err(WidgetError::CreationFailed {
                name: definition.name.clone(),
                reason: "configured to fail".into(),
            });
        }
        debug!(name = %definition.name, "creating in-memory field widget");
        MemoryField::new(definition.clone())
    }
}
