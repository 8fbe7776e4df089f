use std::fmt;
use std::sync::Arc;

use filter_form_core::FilterValue;

use crate::error::FormError;

/// A custom validation rule: returns true when the value is acceptable.
pub type ValidationRule = Arc<dyn Fn(&FilterValue) -> bool + Send + Sync>;

/// Stores named custom validation rules for the lifetime of a form.
///
/// Rules are kept in registration order so they can be replayed onto every
/// newly activated widget. Registering a kind twice is a usage error, not a
/// silent overwrite.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    entries: Vec<(String, ValidationRule)>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule under `kind`.
    ///
    /// Fails with [`FormError::DuplicateValidator`] when the kind is already
    /// present; the registry is left unchanged in that case.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        rule: ValidationRule,
    ) -> Result<(), FormError> {
        let kind = kind.into();
        if self.contains(&kind) {
            return Err(FormError::DuplicateValidator { kind });
        }
        self.entries.push((kind, rule));
        Ok(())
    }

    /// Returns the registered `(kind, rule)` pairs in registration order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &ValidationRule)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field(
                "kinds",
                &self.entries.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            )
            .finish()
    }
}
