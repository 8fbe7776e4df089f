use serde::{Deserialize, Serialize};

use super::filter_value::FilterValue;

/// A selectable choice for `InputType::Select` inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputOption {
    pub label: String,
    pub value: FilterValue,
}

impl InputOption {
    /// Creates a new option.
    pub fn new(label: impl Into<String>, value: FilterValue) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// Creates a text-valued option whose value equals its label.
    pub fn text(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: FilterValue::Text(label.clone()),
            label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_option() {
        let o = InputOption::new("Ten", FilterValue::Integer(10));
        assert_eq!(o.label, "Ten");
        assert_eq!(o.value, FilterValue::Integer(10));
    }

    #[test]
    fn text_option_mirrors_label() {
        let o = InputOption::text("open");
        assert_eq!(o.label, "open");
        assert_eq!(o.value, FilterValue::Text("open".into()));
    }

    #[test]
    fn serde_roundtrip() {
        let o = InputOption::new("Yes", FilterValue::Boolean(true));
        let json = serde_json::to_string(&o).unwrap();
        let back: InputOption = serde_json::from_str(&json).unwrap();
        assert_eq!(o, back);
    }
}
