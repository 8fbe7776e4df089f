use filter_form_core::InputDefinition;
use tracing::debug;

use crate::error::FormError;
use crate::event::FieldEventSink;
use crate::registry::ValidatorRegistry;
use crate::widget::{FieldWidget, FieldWidgetFactory};

/// The set of currently active fields: an explicit mapping from catalog
/// index to live widget.
///
/// Entries are kept in activation order, which is the order fields were
/// rendered in and the order value reads and validation walk them. At most
/// one entry exists per catalog index.
pub struct ActiveFieldSet<W> {
    entries: Vec<ActiveEntry<W>>,
}

struct ActiveEntry<W> {
    index: usize,
    widget: W,
}

impl<W: FieldWidget> ActiveFieldSet<W> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Activates the field at `index`, instantiating a widget from
    /// `definition`.
    ///
    /// Idempotent: when the index already has a live widget, that widget is
    /// returned and nothing is instantiated. A fresh widget receives the
    /// current disabled state, a replay of every registered validator, and
    /// the event sink, in that order, before it is recorded.
    pub async fn activate<F>(
        &mut self,
        factory: &F,
        index: usize,
        definition: &InputDefinition,
        disabled: bool,
        validators: &ValidatorRegistry,
        sink: FieldEventSink,
    ) -> Result<&mut W, FormError>
    where
        F: FieldWidgetFactory<Widget = W>,
    {
        match self.position(index) {
            Some(pos) => Ok(&mut self.entries[pos].widget),
            None => {
                debug!(index, name = %definition.name, "activating field widget");
                let mut widget = factory.create(definition).await?;
                if disabled {
                    widget.set_disabled(true).await?;
                }
                for (kind, rule) in validators.all() {
                    widget.add_validation_rule(kind, rule.clone())?;
                }
                widget.set_event_sink(sink);
                self.entries.push(ActiveEntry { index, widget });
                let end = self.entries.len() - 1;
                Ok(&mut self.entries[end].widget)
            }
        }
    }

    /// Deactivates the field at `index`, detaching and destroying its
    /// widget. Returns the widget's name, or `None` when the index had no
    /// live widget (a no-op).
    pub fn deactivate(&mut self, index: usize) -> Option<String> {
        let pos = self.position(index)?;
        let mut entry = self.entries.remove(pos);
        let name = entry.widget.name().to_string();
        debug!(index, name = %name, "deactivating field widget");
        entry.widget.detach();
        Some(name)
    }

    /// Detaches and destroys every widget.
    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            entry.widget.detach();
        }
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&W> {
        self.position(index).map(|pos| &self.entries[pos].widget)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut W> {
        self.position(index)
            .map(|pos| &mut self.entries[pos].widget)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.position(index).is_some()
    }

    /// Iterates `(index, widget)` pairs in activation order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &W)> {
        self.entries.iter().map(|e| (e.index, &e.widget))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut W)> {
        self.entries.iter_mut().map(|e| (e.index, &mut e.widget))
    }

    /// The active catalog indices in activation order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|e| e.index)
    }

    /// Applies the disabled state to every active widget without changing
    /// activation state.
    pub async fn set_disabled_all(&mut self, disabled: bool) -> Result<(), FormError> {
        for entry in &mut self.entries {
            entry.widget.set_disabled(disabled).await?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, index: usize) -> Option<usize> {
        self.entries.iter().position(|e| e.index == index)
    }
}

impl<W: FieldWidget> Default for ActiveFieldSet<W> {
    fn default() -> Self {
        Self::new()
    }
}
