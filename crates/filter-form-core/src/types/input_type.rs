use serde::{Deserialize, Serialize};

/// The kind of control a filter input renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum InputType {
    #[default]
    Text,
    Number,
    Select,
    Checkbox,
    DateTime,
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Number => write!(f, "number"),
            Self::Select => write!(f, "select"),
            Self::Checkbox => write!(f, "checkbox"),
            Self::DateTime => write!(f, "date_time"),
        }
    }
}
