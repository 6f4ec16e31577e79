//! Pruebas para el merge de respuestas (`set_field`).
//!
//! Semántica shallow: los campos del parche reemplazan, el resto se conserva.

use drive_core::model::merge_answer;
use serde_json::{json, Map, Value};

fn patch(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        other => panic!("patch must be an object, got {other}"),
    }
}

#[test]
fn merge_shallow_overrides_fields() {
    let previous = json!({"plate": "KA01AB1234", "fuel": {"type": "petrol"}, "keep": "a"});

    let out = merge_answer(Some(&previous), patch(json!({"plate": "KA01AB9999", "fuel": "electric", "new": true})));

    assert_eq!(out["plate"], json!("KA01AB9999"));
    // un objeto anidado se reemplaza entero, no se mezcla
    assert_eq!(out["fuel"], json!("electric"));
    assert_eq!(out["keep"], json!("a"));
    assert_eq!(out["new"], json!(true));
}

#[test]
fn missing_or_scalar_answer_is_replaced_by_patch() {
    assert_eq!(merge_answer(None, patch(json!({"slot": "09:30"}))), json!({"slot": "09:30"}));
    assert_eq!(merge_answer(Some(&json!("legacy")), patch(json!({"slot": "10:00"}))),
               json!({"slot": "10:00"}));
}

#[test]
fn set_field_keeps_sibling_fields() {
    use drive_core::{FlowController, FlowDefinition, FormStep};

    let def = FlowDefinition::builder("schedule_maintenance").first_step(FormStep::new("slot")).build().unwrap();
    let mut ctl = FlowController::new(def);
    ctl.set_field("slot", "date", json!("2026-11-02")).unwrap();
    ctl.set_field("slot", "time", json!("09:30")).unwrap();
    assert_eq!(ctl.state().answer("slot"), Some(&json!({"date": "2026-11-02", "time": "09:30"})));
}
