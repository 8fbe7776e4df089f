use serde::{Deserialize, Serialize};

use super::filter_value::FilterValue;
use super::input_option::InputOption;
use super::input_type::InputType;

/// A catalog entry describing one filter field.
///
/// Names are not required to be unique within a catalog; entries with the
/// same name are told apart by their catalog position. A present `value`
/// marks the field as initially active (the value itself may be
/// `FilterValue::Null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub input_type: InputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FilterValue>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InputOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_validation_kind: Option<String>,
}

impl InputDefinition {
    /// Creates a definition with no label, value, or constraints.
    pub fn new(name: impl Into<String>, input_type: InputType) -> Self {
        Self {
            name: name.into(),
            label: None,
            input_type,
            value: None,
            required: false,
            options: Vec::new(),
            min: None,
            max: None,
            pattern: None,
            placeholder: None,
            additional_validation_kind: None,
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets an initial value, marking the field as initially active.
    pub fn with_value(mut self, value: FilterValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Marks the field as required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the selectable options.
    pub fn with_options(mut self, options: Vec<InputOption>) -> Self {
        self.options = options;
        self
    }

    /// Sets the numeric range.
    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Sets the text pattern (a regular expression the value must match).
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Opts this field into a named custom validation rule.
    pub fn with_additional_validation_kind(mut self, kind: impl Into<String>) -> Self {
        self.additional_validation_kind = Some(kind.into());
        self
    }

    /// Returns true if the definition carries an explicit initial value.
    pub fn has_initial_value(&self) -> bool {
        self.value.is_some()
    }

    /// Returns the lowercased label, or the empty string when the label is
    /// absent. Used as the ordering key for available-field listings.
    pub fn label_key(&self) -> String {
        self.label.as_deref().unwrap_or("").to_lowercase()
    }
}

impl std::fmt::Display for InputDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.input_type)?;
        if self.required {
            write!(f, " (required)")?;
        }
        Ok(())
    }
}
