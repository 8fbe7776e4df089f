use filter_form_core::InputDefinition;
use tracing::trace;

/// One entry offered by the add-field affordance.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorOption {
    pub index: usize,
    pub definition: InputDefinition,
}

/// The ordered list of catalog entries eligible to be added.
///
/// Recomputed after every mutation from the catalog and the active indices.
/// Ordering is a user-facing contract: ascending by label, compared
/// case-insensitively, with an absent label sorting as the empty string.
/// Entries with equal labels keep catalog order.
#[derive(Debug, Clone, Default)]
pub struct AvailableFieldSelector {
    options: Vec<SelectorOption>,
}

impl AvailableFieldSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the option list from the catalog, skipping active indices.
    pub fn refresh(&mut self, catalog: &[InputDefinition], active: &[usize]) {
        let mut options: Vec<SelectorOption> = catalog
            .iter()
            .enumerate()
            .filter(|(index, _)| !active.contains(index))
            .map(|(index, definition)| SelectorOption {
                index,
                definition: definition.clone(),
            })
            .collect();
        // stable sort: equal labels keep catalog order
        options.sort_by_cached_key(|o| o.definition.label_key());
        self.options = options;
        trace!(available = self.options.len(), "available-field list rebuilt");
    }

    /// The options in display order.
    pub fn options(&self) -> &[SelectorOption] {
        &self.options
    }

    pub fn contains(&self, index: usize) -> bool {
        self.options.iter().any(|o| o.index == index)
    }

    /// Removes and returns the option for `index`, so an in-flight add
    /// cannot be offered a second time.
    pub fn take(&mut self, index: usize) -> Option<SelectorOption> {
        let pos = self.options.iter().position(|o| o.index == index)?;
        Some(self.options.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// True when no fields remain available; hosts hide the add affordance.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
