use drive_core::gate::required;
use drive_core::{EventStore, FlowController, FlowDefinition, FlowEventKind, FormStep, InMemoryEventStore};
use uuid::Uuid;

#[test]
fn integration_smoke_inmemory_store_and_controller() {
    // InMemory event store should allow append and list deterministically
    let mut store = InMemoryEventStore::default();
    let flow_id = Uuid::new_v4();
    let ev = store.append_kind(flow_id,
                               FlowEventKind::NavigationBlocked { step_id: "x".to_string(),
                                                                  reason: "y".to_string() });
    assert_eq!(ev.seq, 0);
    assert_eq!(store.list(flow_id).len(), 1);
    assert!(store.list(Uuid::new_v4()).is_empty());

    // Controller with an explicit store emits FlowInitialized on creation
    let def = FlowDefinition::builder("upload_document").first_step(FormStep::new("category").gate(required(&["category"])))
                                                        .add_step(FormStep::new("file"))
                                                        .build()
                                                        .expect("definition");
    let ctl = FlowController::with_event_store(def, InMemoryEventStore::default());
    let events = ctl.event_store().list(ctl.flow_id());
    assert!(matches!(&events[0].kind, FlowEventKind::FlowInitialized { step_count: 2, first_step, .. } if first_step == "category"),
            "FlowInitialized missing");
    assert!(!ctl.can_proceed());
}
