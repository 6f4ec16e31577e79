use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::{FlowEvent, FlowEventKind};

/// Log append-only de eventos por flujo. `seq` es contiguo desde 0 dentro de
/// cada `flow_id`.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&mut self, flow_id: Uuid, kind: FlowEventKind) -> FlowEvent;
    /// Eventos del flujo en orden ascendente de seq.
    fn list(&self, flow_id: Uuid) -> Vec<FlowEvent>;

    fn last(&self, flow_id: Uuid) -> Option<FlowEvent> {
        self.list(flow_id).pop()
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryEventStore {
    flows: HashMap<Uuid, Vec<FlowEvent>>,
}

impl InMemoryEventStore {
    /// Flujos con al menos un evento.
    pub fn flow_ids(&self) -> Vec<Uuid> {
        self.flows.keys().copied().collect()
    }

    pub fn total_events(&self) -> usize {
        self.flows.values().map(Vec::len).sum()
    }
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, flow_id: Uuid, kind: FlowEventKind) -> FlowEvent {
        let log = self.flows.entry(flow_id).or_default();
        let ev = FlowEvent { seq: log.len() as u64,
                             flow_id,
                             kind,
                             ts: Utc::now() };
        log.push(ev.clone());
        ev
    }

    fn list(&self, flow_id: Uuid) -> Vec<FlowEvent> {
        self.flows.get(&flow_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocked(step: &str) -> FlowEventKind {
        FlowEventKind::NavigationBlocked { step_id: step.into(),
                                           reason: "missing".into() }
    }

    #[test]
    fn seq_is_per_flow_and_contiguous() {
        let mut store = InMemoryEventStore::default();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        store.append_kind(a, blocked("type"));
        store.append_kind(b, blocked("incident"));
        let second = store.append_kind(a, blocked("contact"));

        assert_eq!(second.seq, 1);
        assert_eq!(store.list(a).iter().map(|e| e.seq).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(store.last(b).map(|e| e.seq), Some(0));
        assert_eq!(store.total_events(), 3);
        assert_eq!(store.flow_ids().len(), 2);
        assert!(store.list(Uuid::new_v4()).is_empty());
    }
}
