//! El payload contiene exactamente las respuestas y capturas del estado.

use drive_core::{build_payload, AttachmentKind, FlowController, FlowDefinition, FormStep};
use serde_json::json;

fn upload() -> FlowDefinition {
    FlowDefinition::builder("upload_document").first_step(FormStep::new("category"))
                                              .add_step(FormStep::new("file"))
                                              .add_step(FormStep::new("details"))
                                              .build()
                                              .expect("definition")
}

#[test]
fn payload_keeps_every_answer_and_capture_once() {
    let mut ctl = FlowController::new(upload());
    ctl.set_answer("category", json!({"category": "insurance"})).unwrap();
    ctl.set_answer("details", json!({"expiry": "2027-03-31"})).unwrap();
    ctl.capture("file", AttachmentKind::Photo, "front.jpg").unwrap();
    ctl.capture("file", AttachmentKind::Photo, "back.jpg").unwrap();
    ctl.capture("details", AttachmentKind::Note, "renewed online").unwrap();

    let payload = build_payload(ctl.definition(), ctl.state()).expect("payload");
    assert_eq!(payload.answer_count(), 2);
    assert_eq!(payload.attachment_count(), 3);
    assert_eq!(&payload.answers, ctl.state().answers());
    assert_eq!(&payload.attachments, ctl.state().attachments());
    assert_eq!(payload.flow, "upload_document");
    assert_eq!(payload.flow_id, ctl.flow_id());

    // mismo estado -> misma clave de idempotencia
    let again = build_payload(ctl.definition(), ctl.state()).expect("payload");
    assert_eq!(payload.payload_hash, again.payload_hash);

    ctl.capture("file", AttachmentKind::Photo, "rc-book.jpg").unwrap();
    let changed = build_payload(ctl.definition(), ctl.state()).expect("payload");
    assert_ne!(payload.payload_hash, changed.payload_hash);
}
