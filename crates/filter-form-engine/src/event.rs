use filter_form_core::FilterValue;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// The name/value payload carried by form-level notifications.
///
/// `value` is absent for removal interactions that did not go through a
/// value change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FilterValue>,
}

impl FieldChange {
    /// Creates a new payload.
    pub fn new(name: impl Into<String>, value: Option<FilterValue>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A form-level notification re-emitted to the host.
///
/// Every user interaction that changes a field raises an `Input` event
/// immediately followed by a `Change` event with the same payload.
/// Programmatic bulk operations raise neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "detail")]
pub enum FormEvent {
    Input(FieldChange),
    Change(FieldChange),
}

impl FormEvent {
    /// Returns the name of the affected field.
    pub fn name(&self) -> &str {
        match self {
            Self::Input(c) | Self::Change(c) => &c.name,
        }
    }

    /// Returns the value carried by the event, if any.
    pub fn value(&self) -> Option<&FilterValue> {
        match self {
            Self::Input(c) | Self::Change(c) => c.value.as_ref(),
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    pub fn is_change(&self) -> bool {
        matches!(self, Self::Change(_))
    }
}

/// The notification channel handed to each activated widget.
///
/// The sink carries the field's name, so widget implementations only supply
/// the changed value; events arrive at the host already tagged. Emission is
/// best-effort: a host that dropped its receiver simply stops listening.
#[derive(Debug, Clone)]
pub struct FieldEventSink {
    name: String,
    tx: mpsc::UnboundedSender<FormEvent>,
}

impl FieldEventSink {
    /// Creates a sink for the named field.
    pub fn new(name: impl Into<String>, tx: mpsc::UnboundedSender<FormEvent>) -> Self {
        Self {
            name: name.into(),
            tx,
        }
    }

    /// Returns the field name this sink is tagged with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emits the `Input` + `Change` pair for a user-originated edit.
    pub fn emit_edit(&self, value: Option<FilterValue>) {
        let _ = self
            .tx
            .send(FormEvent::Input(FieldChange::new(&self.name, value.clone())));
        let _ = self
            .tx
            .send(FormEvent::Change(FieldChange::new(&self.name, value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_accessors() {
        let e = FormEvent::Input(FieldChange::new("status", Some(FilterValue::Boolean(true))));
        assert_eq!(e.name(), "status");
        assert_eq!(e.value(), Some(&FilterValue::Boolean(true)));
        assert!(e.is_input());
        assert!(!e.is_change());
    }

    #[test]
    fn sink_emits_input_then_change() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = FieldEventSink::new("query", tx);
        sink.emit_edit(Some(FilterValue::Text("rust".into())));

        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        assert!(first.is_input());
        assert!(second.is_change());
        assert_eq!(first.name(), "query");
        assert_eq!(second.value(), Some(&FilterValue::Text("rust".into())));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn sink_survives_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let sink = FieldEventSink::new("query", tx);
        sink.emit_edit(None);
    }

    #[test]
    fn serde_roundtrip() {
        let e = FormEvent::Change(FieldChange::new("age", Some(FilterValue::Integer(30))));
        let json = serde_json::to_string(&e).unwrap();
        let back: FormEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }

    #[test]
    fn serde_skips_absent_value() {
        let e = FormEvent::Input(FieldChange::new("age", None));
        let json = serde_json::to_string(&e).unwrap();
        assert!(!json.contains("value"));
    }
}
