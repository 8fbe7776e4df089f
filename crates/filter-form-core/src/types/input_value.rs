use serde::{Deserialize, Serialize};

use super::filter_value::FilterValue;

/// A name/value pair used for bulk value reads and writes.
///
/// Pairs are matched against catalog entries by `name`, not position; when
/// several pairs share a name, the first one wins. A `None` value is valid
/// and clears the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputValue {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FilterValue>,
}

impl InputValue {
    /// Creates a pair carrying a value.
    pub fn new(name: impl Into<String>, value: FilterValue) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
        }
    }

    /// Creates a pair with no value, which clears the named field.
    pub fn cleared(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}
