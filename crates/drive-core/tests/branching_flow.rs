//! Steps condicionales: la navegación salta los que no aplican.

use drive_core::gate::required;
use drive_core::{FlowController, FlowDefinition, FormStep, InMemorySubmitter, Transition};
use serde_json::json;

fn reported(answers: &drive_core::Answers) -> bool {
    answers.get("incident")
           .and_then(|v| v.get("reportedToPolice"))
           .and_then(|v| v.as_bool())
           .unwrap_or(false)
}

fn theft() -> FlowDefinition {
    FlowDefinition::builder("theft_emergency").first_step(FormStep::new("incident").gate(required(&["location"])))
                                              .add_step(FormStep::new("police_report").applicable_when(reported)
                                                                                      .gate(required(&["firNumber"])))
                                              .add_step(FormStep::new("contact").gate(required(&["phone"])))
                                              .build()
                                              .expect("definition")
}

#[test]
fn inapplicable_step_is_skipped_and_not_validated() {
    let mut ctl = FlowController::new(theft());
    ctl.set_answer("incident", json!({"location": "Sector 5 parking", "reportedToPolice": false}))
       .unwrap();
    assert_eq!(ctl.go_to_next().unwrap(),
               Transition::Moved { from: "incident".into(),
                                   to: "contact".into() });
    assert!(ctl.is_terminal());
    assert!(ctl.validate_all().is_err(), "contact still needs a phone");
    ctl.set_field("contact", "phone", json!("9123456780")).unwrap();
    assert!(ctl.validate_all().is_ok(), "police_report is not applicable");
}

#[tokio::test]
async fn applicable_step_is_visited_and_required() {
    let submitter = InMemorySubmitter::new();
    let mut ctl = FlowController::new(theft());
    ctl.set_answer("incident", json!({"location": "MG Road", "reportedToPolice": true}))
       .unwrap();
    assert_eq!(ctl.go_to_next().unwrap(),
               Transition::Moved { from: "incident".into(),
                                   to: "police_report".into() });
    assert!(ctl.go_to_next().is_err());
    ctl.set_field("police_report", "firNumber", json!("FIR-2291")).unwrap();
    ctl.go_to_next().unwrap();
    ctl.set_field("contact", "phone", json!("9123456780")).unwrap();
    let ack = ctl.submit(&submitter).await.expect("submitted");
    assert_eq!(submitter.received()[0].answers.len(), 3);
    assert!(!ack.reference.is_empty());
}
