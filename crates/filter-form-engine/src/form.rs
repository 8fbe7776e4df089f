use filter_form_core::{FilterValue, InputDefinition, InputValue};
use tokio::sync::mpsc;
use tracing::debug;

use crate::active::ActiveFieldSet;
use crate::error::FormError;
use crate::event::{FieldChange, FieldEventSink, FormEvent};
use crate::registry::{ValidationRule, ValidatorRegistry};
use crate::selector::{AvailableFieldSelector, SelectorOption};
use crate::widget::{FieldWidget, FieldWidgetFactory};

/// The filter-form controller.
///
/// Owns the catalog of field definitions and keeps the active-field set and
/// the available-field selector consistent across every mutation. All
/// mutating operations take `&mut self`, so bulk calls are serialized by the
/// borrow checker; hosts sharing a form across tasks must bring their own
/// lock, which restores the same guarantee.
///
/// Form-level notifications arrive on the receiver returned by [`new`]:
/// user-originated edits and add/remove interactions each raise an `Input`
/// event followed by a `Change` event. Programmatic bulk operations
/// ([`set_inputs`], [`set_values`]) raise neither, so a host never hears
/// its own writes.
///
/// [`new`]: FilterForm::new
/// [`set_inputs`]: FilterForm::set_inputs
/// [`set_values`]: FilterForm::set_values
pub struct FilterForm<F: FieldWidgetFactory> {
    factory: F,
    catalog: Vec<InputDefinition>,
    validators: ValidatorRegistry,
    active: ActiveFieldSet<F::Widget>,
    selector: AvailableFieldSelector,
    disabled: bool,
    events: mpsc::UnboundedSender<FormEvent>,
}

impl<F: FieldWidgetFactory> FilterForm<F> {
    /// Creates an empty form and the receiver for its notifications.
    pub fn new(factory: F) -> (Self, mpsc::UnboundedReceiver<FormEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let form = Self {
            factory,
            catalog: Vec::new(),
            validators: ValidatorRegistry::new(),
            active: ActiveFieldSet::new(),
            selector: AvailableFieldSelector::new(),
            disabled: false,
            events,
        };
        (form, rx)
    }

    /// Creates a form and immediately installs `definitions` as its catalog.
    pub async fn with_inputs(
        factory: F,
        definitions: Vec<InputDefinition>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<FormEvent>), FormError> {
        let (mut form, rx) = Self::new(factory);
        form.set_inputs(definitions).await?;
        Ok((form, rx))
    }

    /// Replaces the catalog wholesale.
    ///
    /// Every current active entry is destroyed, then each definition that
    /// carries an explicit value is activated in catalog order, awaiting
    /// each activation before starting the next. The selector is refreshed
    /// once at the end. Emits no notifications.
    pub async fn set_inputs(&mut self, definitions: Vec<InputDefinition>) -> Result<(), FormError> {
        debug!(inputs = definitions.len(), "replacing filter catalog");
        self.active.clear();
        self.catalog = definitions;

        for index in 0..self.catalog.len() {
            if !self.catalog[index].has_initial_value() {
                continue;
            }
            let definition = self.catalog[index].clone();
            self.activate_at(index, &definition).await?;
        }

        self.refresh_selector();
        Ok(())
    }

    /// Replaces all field values in one pass.
    ///
    /// For each catalog entry the first pair in `values` with a matching
    /// name wins: the entry is activated if needed and set to the pair's
    /// value (a pair without a value clears the field to `Null`). Entries
    /// with no matching pair are deactivated, so an empty slice deactivates
    /// everything. The selector is refreshed once at the end. Emits no
    /// notifications.
    pub async fn set_values(&mut self, values: &[InputValue]) -> Result<(), FormError> {
        debug!(values = values.len(), "replacing filter values");
        for index in 0..self.catalog.len() {
            let definition = self.catalog[index].clone();
            let matched = values.iter().find(|v| v.name == definition.name).cloned();

            match matched {
                Some(pair) => {
                    self.activate_at(index, &definition).await?;
                    if let Some(widget) = self.active.get_mut(index) {
                        widget
                            .set_value(pair.value.unwrap_or(FilterValue::Null))
                            .await?;
                    }
                }
                None => {
                    self.active.deactivate(index);
                }
            }
        }

        self.refresh_selector();
        Ok(())
    }

    /// Registers a custom validation rule and propagates it to every
    /// currently active widget. Newly activated widgets receive it
    /// automatically thereafter.
    ///
    /// Fails with [`FormError::DuplicateValidator`] when `kind` is already
    /// registered; the registry is left unchanged.
    pub fn add_validation_kind(
        &mut self,
        kind: impl Into<String>,
        rule: ValidationRule,
    ) -> Result<(), FormError> {
        let kind = kind.into();
        self.validators.register(kind.clone(), rule.clone())?;
        for (_, widget) in self.active.iter_mut() {
            widget.add_validation_rule(&kind, rule.clone())?;
        }
        Ok(())
    }

    /// Validates active fields in render order, short-circuiting on the
    /// first failure. `report` is forwarded unmodified to each widget.
    pub async fn validate(&mut self, report: bool) -> bool {
        for (_, widget) in self.active.iter_mut() {
            if !widget.validate(report).await {
                return false;
            }
        }
        true
    }

    /// Disables or enables the structural controls (add/remove) and every
    /// active field. The available-option list is left intact; disabling
    /// only blocks interaction.
    pub async fn set_disabled(&mut self, disabled: bool) -> Result<(), FormError> {
        self.disabled = disabled;
        self.active.set_disabled_all(disabled).await?;
        self.refresh_selector();
        Ok(())
    }

    /// The current values of the active fields, in render order. Inactive
    /// fields are omitted.
    pub fn values(&self) -> Vec<InputValue> {
        self.active
            .iter()
            .map(|(_, widget)| InputValue {
                name: widget.name().to_string(),
                value: Some(widget.value()),
            })
            .collect()
    }

    /// The full catalog in order: the live definition for active fields
    /// (reflecting in-place edits), a copy of the stored definition
    /// otherwise.
    pub fn inputs(&self) -> Vec<InputDefinition> {
        self.catalog
            .iter()
            .enumerate()
            .map(|(index, stored)| match self.active.get(index) {
                Some(widget) => widget.definition(),
                None => stored.clone(),
            })
            .collect()
    }

    /// User "add" interaction: activates the field the selector offered at
    /// `index`.
    ///
    /// The selector entry is consumed before activation starts, so an
    /// in-flight add cannot be offered twice. A stale index (not offered,
    /// or no longer in the catalog after a concurrent catalog replacement)
    /// is a silent no-op and raises no notification. On success an `Input`
    /// and a `Change` notification fire, carrying the field's name and
    /// value.
    pub async fn add_field(&mut self, index: usize) -> Result<(), FormError> {
        if self.disabled {
            return Ok(());
        }
        if self.selector.take(index).is_none() {
            return Ok(());
        }
        let definition = match self.catalog.get(index) {
            Some(d) => d.clone(),
            None => {
                self.refresh_selector();
                return Ok(());
            }
        };

        if let Err(err) = self.activate_at(index, &definition).await {
            // the field is still inactive, so the refresh re-offers it
            self.refresh_selector();
            return Err(err);
        }
        self.refresh_selector();

        let value = self.active.get(index).map(|w| w.value());
        self.emit_interaction(&definition.name, value);
        Ok(())
    }

    /// User "remove" interaction: deactivates the field at `index`.
    ///
    /// A stale index is a silent no-op. On success an `Input` and a
    /// `Change` notification fire with the field's name and no value.
    pub fn remove_field(&mut self, index: usize) {
        if self.disabled {
            return;
        }
        let Some(name) = self.active.deactivate(index) else {
            return;
        };
        self.refresh_selector();
        self.emit_interaction(&name, None);
    }

    /// The fields currently offered by the add affordance, in display
    /// order.
    pub fn available(&self) -> &[SelectorOption] {
        self.selector.options()
    }

    /// The catalog indices with a live widget, in activation order.
    pub fn active_indices(&self) -> Vec<usize> {
        self.active.indices().collect()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The live widget for `index`, if active.
    pub fn field(&self, index: usize) -> Option<&F::Widget> {
        self.active.get(index)
    }

    /// Mutable access to the live widget for `index`. This is the path
    /// through which a rendering layer delivers user edits.
    pub fn field_mut(&mut self, index: usize) -> Option<&mut F::Widget> {
        self.active.get_mut(index)
    }

    async fn activate_at(
        &mut self,
        index: usize,
        definition: &InputDefinition,
    ) -> Result<(), FormError> {
        let sink = FieldEventSink::new(&definition.name, self.events.clone());
        self.active
            .activate(
                &self.factory,
                index,
                definition,
                self.disabled,
                &self.validators,
                sink,
            )
            .await?;
        Ok(())
    }

    fn refresh_selector(&mut self) {
        let active: Vec<usize> = self.active.indices().collect();
        self.selector.refresh(&self.catalog, &active);
    }

    fn emit_interaction(&self, name: &str, value: Option<FilterValue>) {
        let _ = self
            .events
            .send(FormEvent::Input(FieldChange::new(name, value.clone())));
        let _ = self
            .events
            .send(FormEvent::Change(FieldChange::new(name, value)));
    }
}
