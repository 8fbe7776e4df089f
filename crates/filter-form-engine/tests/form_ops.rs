use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use filter_form_core::{FilterValue, InputDefinition, InputType, InputValue};
use filter_form_engine::{
    FieldEventSink, FieldWidget, FieldWidgetFactory, FilterForm, FormError, ValidationRule,
    WidgetError,
};

#[tokio::test]
async fn set_inputs_activates_only_valued_entries() {
    let (mut form, _rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(catalog_abc()).await.unwrap();

    assert_eq!(form.active_indices(), vec![1]);
    let available: HashSet<usize> = form.available().iter().map(|o| o.index).collect();
    assert_eq!(available, HashSet::from([0, 2]));
    assert_partition(&form, 3);
}

#[tokio::test]
async fn with_inputs_constructor_installs_catalog() {
    let (form, _rx) = FilterForm::with_inputs(TestFactory::default(), catalog_abc())
        .await
        .unwrap();
    assert_eq!(form.active_indices(), vec![1]);
    assert_eq!(form.inputs().len(), 3);
}

#[tokio::test]
async fn inputs_round_trips_never_activated_definitions() {
    let defs = catalog_abc();
    let (mut form, _rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(defs.clone()).await.unwrap();

    let back = form.inputs();
    // entries without a value start inactive and read back exactly as stored
    assert_eq!(back[0], defs[0]);
    assert_eq!(back[2], defs[2]);
    assert_eq!(back.len(), defs.len());
}

#[tokio::test]
async fn set_inputs_destroys_previous_active_entries() {
    let (mut form, _rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(catalog_abc()).await.unwrap();
    form.add_field(0).await.unwrap();
    assert_eq!(form.active_indices().len(), 2);

    form.set_inputs(vec![def("x", None)]).await.unwrap();
    assert!(form.active_indices().is_empty());
    assert_partition(&form, 1);
}

#[tokio::test]
async fn set_values_is_a_full_replace() {
    let (mut form, _rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(vec![def("a", None), def("b", None), def("c", None)])
        .await
        .unwrap();
    // activate A so the replace has something to drop
    form.add_field(0).await.unwrap();

    form.set_values(&[InputValue::new("b", FilterValue::Integer(5))])
        .await
        .unwrap();

    assert_eq!(form.active_indices(), vec![1]);
    assert_eq!(
        form.field(1).unwrap().value(),
        FilterValue::Integer(5)
    );
    assert_partition(&form, 3);
}

#[tokio::test]
async fn set_values_empty_deactivates_everything() {
    let (mut form, _rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(catalog_abc()).await.unwrap();
    assert!(!form.active_indices().is_empty());

    form.set_values(&[]).await.unwrap();
    assert!(form.active_indices().is_empty());
    assert_partition(&form, 3);
}

#[tokio::test]
async fn set_values_absent_value_clears_to_null() {
    let (mut form, _rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(vec![def("a", Some(FilterValue::Integer(9)))])
        .await
        .unwrap();

    form.set_values(&[InputValue::cleared("a")]).await.unwrap();
    assert_eq!(form.field(0).unwrap().value(), FilterValue::Null);
}

#[tokio::test]
async fn set_values_first_pair_wins_on_duplicate_names() {
    let (mut form, _rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(vec![def("a", None)]).await.unwrap();

    form.set_values(&[
        InputValue::new("a", FilterValue::Integer(1)),
        InputValue::new("a", FilterValue::Integer(2)),
    ])
    .await
    .unwrap();

    assert_eq!(form.field(0).unwrap().value(), FilterValue::Integer(1));
}

#[tokio::test]
async fn set_values_does_not_recreate_active_widgets() {
    let probe = Probe::default();
    let (mut form, _rx) = FilterForm::new(TestFactory::with_probe(probe.clone()));
    form.set_inputs(vec![def("a", Some(FilterValue::Null))])
        .await
        .unwrap();
    assert_eq!(probe.created.load(Ordering::SeqCst), 1);

    form.set_values(&[InputValue::new("a", FilterValue::Integer(3))])
        .await
        .unwrap();
    assert_eq!(probe.created.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn validate_short_circuits_on_first_failure() {
    let probe = Probe::default();
    let factory = TestFactory::with_probe(probe.clone()).failing_validation("b");
    let (mut form, _rx) = FilterForm::new(factory);
    form.set_inputs(vec![
        def("a", Some(FilterValue::Null)),
        def("b", Some(FilterValue::Null)),
        def("c", Some(FilterValue::Null)),
    ])
    .await
    .unwrap();

    assert!(!form.validate(false).await);

    let order = probe.validated.lock().unwrap().clone();
    assert_eq!(order, vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn validate_passes_when_all_fields_pass() {
    let (mut form, _rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(catalog_abc()).await.unwrap();
    assert!(form.validate(true).await);
}

#[tokio::test]
async fn duplicate_validator_kind_is_rejected() {
    let (mut form, _rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(catalog_abc()).await.unwrap();

    let accept: ValidationRule = Arc::new(|_| true);
    let reject: ValidationRule = Arc::new(|_| false);
    form.add_validation_kind("range", accept).unwrap();

    let err = form.add_validation_kind("range", reject).unwrap_err();
    assert!(matches!(err, FormError::DuplicateValidator { kind } if kind == "range"));

    // the active widget still carries exactly the first registration
    let widget = form.field(1).unwrap();
    assert_eq!(widget.rule_kinds(), vec!["range".to_string()]);
}

#[tokio::test]
async fn validators_replay_onto_later_activations() {
    let (mut form, _rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(vec![def("a", None)]).await.unwrap();
    form.add_validation_kind("range", Arc::new(|_| true)).unwrap();

    form.add_field(0).await.unwrap();
    assert_eq!(form.field(0).unwrap().rule_kinds(), vec!["range".to_string()]);
}

#[tokio::test]
async fn programmatic_bulk_calls_emit_no_events() {
    let (mut form, mut rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(catalog_abc()).await.unwrap();
    form.set_values(&[InputValue::new("a", FilterValue::Integer(1))])
        .await
        .unwrap();

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn remove_interaction_emits_input_then_change() {
    let (mut form, mut rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(catalog_abc()).await.unwrap();

    form.remove_field(1);

    let first = rx.try_recv().unwrap();
    let second = rx.try_recv().unwrap();
    assert!(first.is_input());
    assert!(second.is_change());
    assert_eq!(first.name(), "b");
    assert_eq!(first.value(), None);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn add_interaction_emits_input_then_change_with_value() {
    let (mut form, mut rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(vec![def("a", None)]).await.unwrap();

    form.add_field(0).await.unwrap();

    let first = rx.try_recv().unwrap();
    let second = rx.try_recv().unwrap();
    assert!(first.is_input());
    assert!(second.is_change());
    assert_eq!(first.name(), "a");
    assert_eq!(first.value(), Some(&FilterValue::Null));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn widget_edit_surfaces_as_form_events() {
    let (mut form, mut rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(catalog_abc()).await.unwrap();

    form.field_mut(1)
        .unwrap()
        .simulate_edit(FilterValue::Text("typed".into()));

    let first = rx.try_recv().unwrap();
    let second = rx.try_recv().unwrap();
    assert_eq!(first.name(), "b");
    assert_eq!(first.value(), Some(&FilterValue::Text("typed".into())));
    assert!(first.is_input());
    assert!(second.is_change());
}

#[tokio::test]
async fn stale_indices_are_silent_noops() {
    let (mut form, mut rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(catalog_abc()).await.unwrap();

    form.add_field(99).await.unwrap();
    form.remove_field(99);
    // index 0 carries no value and is not active, so removing it is a no-op
    form.remove_field(0);

    assert!(rx.try_recv().is_err());
    assert_partition(&form, 3);
}

#[tokio::test]
async fn add_field_creation_failure_re_offers_the_field() {
    let factory = TestFactory::default().failing_creation("a");
    let (mut form, mut rx) = FilterForm::new(factory);
    form.set_inputs(vec![def("a", None), def("b", None)])
        .await
        .unwrap();

    let err = form.add_field(0).await.unwrap_err();
    assert!(matches!(err, FormError::Widget(WidgetError::CreationFailed { .. })));
    assert!(rx.try_recv().is_err());

    // the failed field is offered again and the partition still holds
    assert!(form.available().iter().any(|o| o.index == 0));
    assert_partition(&form, 2);
}

#[tokio::test]
async fn set_disabled_reaches_widgets_and_keeps_options() {
    let (mut form, mut rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(catalog_abc()).await.unwrap();
    let available_before = form.available().len();

    form.set_disabled(true).await.unwrap();

    assert!(form.is_disabled());
    assert!(form.field(1).unwrap().disabled());
    assert_eq!(form.available().len(), available_before);

    // structural controls are inert while disabled
    form.add_field(0).await.unwrap();
    form.remove_field(1);
    assert_eq!(form.active_indices(), vec![1]);
    assert!(rx.try_recv().is_err());

    form.set_disabled(false).await.unwrap();
    assert!(!form.field(1).unwrap().disabled());
}

#[tokio::test]
async fn newly_activated_widget_inherits_disabled_state() {
    let (mut form, _rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(vec![def("a", None)]).await.unwrap();
    form.set_disabled(true).await.unwrap();

    // programmatic activation still works while disabled
    form.set_values(&[InputValue::new("a", FilterValue::Integer(1))])
        .await
        .unwrap();
    assert!(form.field(0).unwrap().disabled());
}

#[tokio::test]
async fn values_follow_render_order() {
    let (mut form, _rx) = FilterForm::new(TestFactory::default());
    form.set_inputs(vec![def("a", None), def("b", None), def("c", None)])
        .await
        .unwrap();
    form.add_field(2).await.unwrap();
    form.add_field(0).await.unwrap();

    let names: Vec<String> = form.values().into_iter().map(|v| v.name).collect();
    assert_eq!(names, vec!["c".to_string(), "a".to_string()]);
}

// ---------------------------------------------------------------------------
// Test widget
// ---------------------------------------------------------------------------

fn def(name: &str, value: Option<FilterValue>) -> InputDefinition {
    let d = InputDefinition::new(name, InputType::Text).with_label(name.to_uppercase());
    match value {
        Some(v) => d.with_value(v),
        None => d,
    }
}

/// Catalog of three fields where only "b" carries an initial value.
fn catalog_abc() -> Vec<InputDefinition> {
    vec![
        def("a", None),
        def("b", Some(FilterValue::Null)),
        def("c", None),
    ]
}

fn assert_partition<F>(form: &FilterForm<F>, catalog_len: usize)
where
    F: FieldWidgetFactory,
{
    let active: HashSet<usize> = form.active_indices().into_iter().collect();
    let available: HashSet<usize> = form.available().iter().map(|o| o.index).collect();
    assert!(active.is_disjoint(&available));
    let mut union: Vec<usize> = active.union(&available).copied().collect();
    union.sort_unstable();
    let all: Vec<usize> = (0..catalog_len).collect();
    assert_eq!(union, all);
}

#[derive(Clone, Default)]
struct Probe {
    created: Arc<AtomicUsize>,
    validated: Arc<Mutex<Vec<String>>>,
}

#[derive(Default)]
struct TestFactory {
    probe: Probe,
    fail_create: HashSet<String>,
    fail_validate: HashSet<String>,
}

impl TestFactory {
    fn with_probe(probe: Probe) -> Self {
        Self {
            probe,
            ..Self::default()
        }
    }

    fn failing_creation(mut self, name: &str) -> Self {
        self.fail_create.insert(name.to_string());
        self
    }

    fn failing_validation(mut self, name: &str) -> Self {
        self.fail_validate.insert(name.to_string());
        self
    }
}

struct TestWidget {
    definition: InputDefinition,
    value: FilterValue,
    disabled: bool,
    rules: Vec<(String, ValidationRule)>,
    sink: Option<FieldEventSink>,
    probe: Probe,
    fail_validate: bool,
}

impl TestWidget {
    fn simulate_edit(&mut self, value: FilterValue) {
        self.value = value.clone();
        if let Some(sink) = &self.sink {
            sink.emit_edit(Some(value));
        }
    }

    fn rule_kinds(&self) -> Vec<String> {
        self.rules.iter().map(|(k, _)| k.clone()).collect()
    }

    fn disabled(&self) -> bool {
        self.disabled
    }
}

impl FieldWidget for TestWidget {
    fn name(&self) -> &str {
        &self.definition.name
    }

    fn label(&self) -> Option<&str> {
        self.definition.label.as_deref()
    }

    fn definition(&self) -> InputDefinition {
        self.definition.clone().with_value(self.value.clone())
    }

    fn value(&self) -> FilterValue {
        self.value.clone()
    }

    async fn set_value(&mut self, value: FilterValue) -> Result<(), WidgetError> {
        self.value = value;
        Ok(())
    }

    async fn set_disabled(&mut self, disabled: bool) -> Result<(), WidgetError> {
        self.disabled = disabled;
        Ok(())
    }

    async fn validate(&mut self, _report: bool) -> bool {
        self.probe
            .validated
            .lock()
            .unwrap()
            .push(self.definition.name.clone());
        !self.fail_validate
    }

    fn add_validation_rule(
        &mut self,
        kind: &str,
        rule: ValidationRule,
    ) -> Result<(), WidgetError> {
        if self.rules.iter().any(|(k, _)| k == kind) {
            return Err(WidgetError::DuplicateValidationRule { kind: kind.into() });
        }
        self.rules.push((kind.to_string(), rule));
        Ok(())
    }

    fn set_event_sink(&mut self, sink: FieldEventSink) {
        self.sink = Some(sink);
    }

    fn detach(&mut self) {
        self.sink = None;
    }
}

impl FieldWidgetFactory for TestFactory {
    type Widget = TestWidget;

    async fn create(&self, definition: &InputDefinition) -> Result<TestWidget, WidgetError> {
        if self.fail_create.contains(&definition.name) {
            return Err(WidgetError::CreationFailed {
                name: definition.name.clone(),
                reason: "scripted failure".into(),
            });
        }
        self.probe.created.fetch_add(1, Ordering::SeqCst);
        Ok(TestWidget {
            definition: definition.clone(),
            value: definition.value.clone().unwrap_or(FilterValue::Null),
            disabled: false,
            rules: Vec::new(),
            sink: None,
            probe: self.probe.clone(),
            fail_validate: self.fail_validate.contains(&definition.name),
        })
    }
}
