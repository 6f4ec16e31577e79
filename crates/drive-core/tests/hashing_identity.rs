use drive_core::hashing::{hash_str, hash_value};
use drive_core::{build_payload, FlowController, FlowDefinition, FormStep};
use serde_json::json;

fn def(ids: &[&str]) -> FlowDefinition {
    let mut b = FlowDefinition::builder("upload_document").first_step(FormStep::new(ids[0]));
    for id in &ids[1..] {
        b = b.add_step(FormStep::new(*id));
    }
    b.build().unwrap()
}

#[test]
fn hash_value_ignores_key_order() {
    let h = hash_value(&json!({"documentType": "rc", "pages": 2}));
    assert_eq!(h.len(), 64, "blake3 hex");
    assert_eq!(h, hash_value(&json!({"pages": 2, "documentType": "rc"})));
    assert_ne!(h, hash_str("rc"));
}

#[test]
fn definition_hash_depends_on_step_order() {
    let a = def(&["category", "file", "details"]);
    let b = def(&["category", "file", "details"]);
    let c = def(&["file", "category", "details"]);
    assert_eq!(a.definition_hash(), b.definition_hash());
    assert_ne!(a.definition_hash(), c.definition_hash());
}

#[test]
fn payload_hash_tracks_content_not_time() {
    let mut ctl = FlowController::new(def(&["category", "file", "details"]));
    ctl.set_field("category", "documentType", json!("insurance")).unwrap();
    let first = build_payload(ctl.definition(), ctl.state()).unwrap();
    let again = build_payload(ctl.definition(), ctl.state()).unwrap();
    assert_eq!(first.payload_hash, again.payload_hash, "same content, same idempotency key");

    ctl.set_field("category", "documentType", json!("pollution")).unwrap();
    let changed = build_payload(ctl.definition(), ctl.state()).unwrap();
    assert_ne!(first.payload_hash, changed.payload_hash);
}
