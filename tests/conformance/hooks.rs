use customize_validity::hooks::*;
use customize_validity::*;
use serde_json::{Map, Value, json};

fn demo_customizer() -> Customizer {
    let mut customizer = Customizer::new();
    customizer.add_setting(Setting::new("test_number"));
    customizer.add_control(
        Control::new("test_number", "number")
            .with_settings(["test_number"])
            .with_attr("required", true)
            .with_attr("min", "1")
            .with_attr("max", "4")
            .with_attr("step", "0.5"),
    );
    customizer
}

fn submitted(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn hook_name_follows_convention() {
    assert_eq!(validate_hook_name("blogname"), "customize_validate_blogname");
}

#[test]
fn registering_twice_attaches_once() {
    let customizer = demo_customizer();
    let mut hooks = HookRegistry::new();

    on_customize_register(&mut hooks, &customizer);
    on_customize_register(&mut hooks, &customizer);
    on_save_validation_before(&mut hooks, &customizer);

    let hook = validate_hook_name("test_number");
    assert!(hooks.has_filter(&hook, INPUT_CONSTRAINTS_FILTER));
    assert_eq!(hooks.filter_count(&hook), 1);
}

#[test]
fn validator_runs_once_per_save() {
    let customizer = demo_customizer();
    let mut hooks = HookRegistry::new();
    on_customize_register(&mut hooks, &customizer);

    let results = validate_for_save(
        &mut hooks,
        &customizer,
        &submitted(&[("test_number", json!(""))]),
    );
    assert_eq!(results["test_number"].codes(), vec![FailureKind::ValueMissing]);
}

#[test]
fn save_reports_per_setting() {
    let mut customizer = demo_customizer();
    customizer.add_setting(Setting::new("email"));
    customizer.add_control(Control::new("email", "email"));
    let mut hooks = HookRegistry::new();

    let results = validate_for_save(
        &mut hooks,
        &customizer,
        &submitted(&[
            ("test_number", json!("2.3")),
            ("email", json!("someone@example.com")),
        ]),
    );

    assert_eq!(results["test_number"].codes(), vec![FailureKind::StepMismatch]);
    assert!(results["email"].is_valid());
}

#[test]
fn settings_added_after_registration_are_caught_before_save() {
    let mut customizer = demo_customizer();
    let mut hooks = HookRegistry::new();
    on_customize_register(&mut hooks, &customizer);

    customizer.add_setting(Setting::new("late"));
    customizer.add_control(Control::new("late", "color"));
    assert_eq!(hooks.filter_count(&validate_hook_name("late")), 0);

    let results = validate_for_save(
        &mut hooks,
        &customizer,
        &submitted(&[("late", json!("#ABCDEF"))]),
    );
    assert_eq!(results["late"].codes(), vec![FailureKind::TypeMismatch]);
    assert_eq!(hooks.filter_count(&validate_hook_name("late")), 1);
}

#[test]
fn values_for_unregistered_settings_are_skipped() {
    let customizer = demo_customizer();
    let mut hooks = HookRegistry::new();

    let results = validate_for_save(
        &mut hooks,
        &customizer,
        &submitted(&[("nobody", json!("x"))]),
    );
    assert!(results.is_empty());
}

#[test]
fn setting_without_controls_is_always_valid() {
    let mut customizer = Customizer::new();
    customizer.add_setting(Setting::new("free"));
    let mut hooks = HookRegistry::new();

    let results = validate_for_save(&mut hooks, &customizer, &submitted(&[("free", json!(""))]));
    assert!(results["free"].is_valid());
}

fn shout(mut validity: Validity, value: &Value, _: &Setting, _: &Customizer) -> Validity {
    if value.as_str().is_some_and(|s| s.chars().any(char::is_uppercase)) {
        validity.add(FailureKind::PatternMismatch, "No shouting.");
    }
    validity
}

#[test]
fn other_filters_on_the_hook_run_in_order() {
    let mut customizer = Customizer::new();
    customizer.add_setting(Setting::new("title"));
    customizer.add_control(Control::new("title", "text").with_attr("maxlength", "3"));

    let mut hooks = HookRegistry::new();
    hooks.add_filter(&validate_hook_name("title"), "shout", shout);

    let results = validate_for_save(&mut hooks, &customizer, &submitted(&[("title", json!("LOUD"))]));
    assert_eq!(
        results["title"].codes(),
        vec![FailureKind::PatternMismatch, FailureKind::TooLong]
    );
}

#[test]
fn hook_uses_customizer_options_and_messages() {
    let mut customizer = Customizer::new()
        .with_options(ValidatorOptions {
            merge: MergeStrategy::MostRestrictive,
            invert_time_check: false,
        })
        .with_messages(MessageCatalog::new().with_message(FailureKind::RangeOverflow, "Trop grand."));
    customizer.add_setting(Setting::new("n"));
    customizer.add_control(Control::new("a", "number").with_settings(["n"]).with_attr("max", "10"));
    customizer.add_control(Control::new("b", "number").with_settings(["n"]).with_attr("max", "20"));

    let mut hooks = HookRegistry::new();
    let results = validate_for_save(&mut hooks, &customizer, &submitted(&[("n", json!("15"))]));

    assert_eq!(results["n"].codes(), vec![FailureKind::RangeOverflow]);
    assert_eq!(results["n"].message(FailureKind::RangeOverflow), Some("Trop grand."));
}

#[test]
fn validity_serializes_as_code_message_entries() {
    let customizer = demo_customizer();
    let mut hooks = HookRegistry::new();
    let results = validate_for_save(&mut hooks, &customizer, &submitted(&[("test_number", json!("9"))]));

    assert_eq!(
        serde_json::to_value(&results["test_number"]).unwrap(),
        json!([{ "code": "rangeOverflow", "message": "Number too large." }])
    );
}
