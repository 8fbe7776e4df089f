use filter_form_core::{FilterValue, InputDefinition, InputType};
use filter_form_engine::ValidationRule;
use regex::Regex;

/// Checks `value` against the definition's constraints, returning the first
/// failure message, or `None` when the value is acceptable.
///
/// An empty value only fails when the field is required; all other checks
/// apply to non-empty values.
pub(crate) fn check(
    definition: &InputDefinition,
    value: &FilterValue,
    pattern: Option<&Regex>,
    rules: &[(String, ValidationRule)],
) -> Option<String> {
    if value.is_empty() {
        if definition.required {
            return Some("a value is required".to_string());
        }
        return None;
    }

    if let Some(message) = check_shape(definition, value) {
        return Some(message);
    }

    if let Some(n) = value.as_f64() {
        if let Some(min) = definition.min {
            if n < min {
                return Some(format!("{n} is below the minimum of {min}"));
            }
        }
        if let Some(max) = definition.max {
            if n > max {
                return Some(format!("{n} is above the maximum of {max}"));
            }
        }
    }

    if let (Some(regex), Some(text)) = (pattern, value.as_text()) {
        if !regex.is_match(text) {
            return Some(format!("\"{text}\" does not match the expected pattern"));
        }
    }

    if let Some(kind) = definition.additional_validation_kind.as_deref() {
        // a kind registered later simply has no effect yet
        if let Some((_, rule)) = rules.iter().find(|(k, _)| k == kind) {
            if !rule(value) {
                return Some(format!("failed '{kind}' validation"));
            }
        }
    }

    None
}

fn check_shape(definition: &InputDefinition, value: &FilterValue) -> Option<String> {
    match definition.input_type {
        InputType::Text => match value {
            FilterValue::Text(_) => None,
            other => Some(format!("expected text, got {other}")),
        },
        InputType::Number => match value {
            FilterValue::Integer(_) | FilterValue::Float(_) => None,
            other => Some(format!("expected a number, got {other}")),
        },
        InputType::Checkbox => match value {
            FilterValue::Boolean(_) => None,
            other => Some(format!("expected a boolean, got {other}")),
        },
        InputType::DateTime => match value {
            FilterValue::DateTime(_) => None,
            other => Some(format!("expected a date-time, got {other}")),
        },
        InputType::Select => {
            if definition.options.iter().any(|o| o.value == *value) {
                None
            } else {
                Some(format!("{value} is not one of the available options"))
            }
        }
        _ => None,
    }
}
