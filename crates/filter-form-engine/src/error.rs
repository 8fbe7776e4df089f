use std::fmt;

/// Errors raised by a field widget implementation.
///
/// Uses `String` for external error details to maintain `Clone` + `Eq`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WidgetError {
    /// Constructing a widget from its definition failed.
    CreationFailed { name: String, reason: String },
    /// A validation rule with this kind is already attached to the widget.
    DuplicateValidationRule { kind: String },
    /// The widget was detached and can no longer be operated on.
    Detached { name: String },
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreationFailed { name, reason } => {
                write!(f, "failed to create field widget '{name}': {reason}")
            }
            Self::DuplicateValidationRule { kind } => {
                write!(f, "validation rule '{kind}' already attached")
            }
            Self::Detached { name } => {
                write!(f, "field widget '{name}' is detached")
            }
        }
    }
}

impl std::error::Error for WidgetError {}

/// Errors raised by form-level operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormError {
    /// A validator with this kind is already registered. The registry is
    /// left unchanged.
    DuplicateValidator { kind: String },
    /// A widget operation failed during a form operation.
    Widget(WidgetError),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateValidator { kind } => {
                write!(f, "additional validation kind '{kind}' already exists")
            }
            Self::Widget(err) => write!(f, "field widget error: {err}"),
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Widget(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WidgetError> for FormError {
    fn from(err: WidgetError) -> Self {
        Self::Widget(err)
    }
}
