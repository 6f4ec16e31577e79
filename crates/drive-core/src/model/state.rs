//! Estado mutable de una ejecución de flujo.
//!
//! `FlowState` sólo se modifica a través de `FlowController`; aquí se exponen
//! lecturas. Invariantes mantenidas por el controlador:
//! - `current_step_id` pertenece siempre a la definición.
//! - Las claves de `answers` y `attachments` son ids de steps declarados.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::AttachmentRef;

/// Respuestas por step: `step_id -> JSON` (normalmente un objeto de campos).
pub type Answers = BTreeMap<String, Value>;

/// Capturas por step, en orden de captura.
pub type Attachments = BTreeMap<String, Vec<AttachmentRef>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowState {
    pub(crate) flow_id: Uuid,
    pub(crate) current_step_id: String,
    #[serde(default)]
    pub(crate) answers: Answers,
    #[serde(default)]
    pub(crate) attachments: Attachments,
}

impl FlowState {
    pub(crate) fn new(flow_id: Uuid, first_step_id: &str) -> Self {
        Self { flow_id,
               current_step_id: first_step_id.to_string(),
               answers: Answers::new(),
               attachments: Attachments::new() }
    }

    pub fn flow_id(&self) -> Uuid {
        self.flow_id
    }

    pub fn current_step_id(&self) -> &str {
        &self.current_step_id
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    /// Respuesta completa de un step.
    pub fn answer(&self, step_id: &str) -> Option<&Value> {
        self.answers.get(step_id)
    }

    /// Campo `field` dentro de la respuesta (objeto) de `step_id`.
    pub fn field(&self, step_id: &str, field: &str) -> Option<&Value> {
        self.answers.get(step_id).and_then(|v| v.get(field))
    }

    /// Capturas de un step en orden. Vacío si no hay ninguna.
    pub fn list_for(&self, step_id: &str) -> &[AttachmentRef] {
        self.attachments.get(step_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn answered_steps(&self) -> usize {
        self.answers.len()
    }

    pub fn attachment_count(&self) -> usize {
        self.attachments.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttachmentKind;
    use serde_json::json;

    #[test]
    fn reads_fields_and_attachments() {
        let mut st = FlowState::new(Uuid::new_v4(), "type");
        st.answers.insert("type".into(), json!({"emergencyType": "injury"}));
        st.attachments
          .entry("type".into())
          .or_default()
          .push(AttachmentRef::new(AttachmentKind::Note, "bleeding"));

        assert_eq!(st.field("type", "emergencyType"), Some(&json!("injury")));
        assert_eq!(st.field("type", "missing"), None);
        assert_eq!(st.list_for("type").len(), 1);
        assert!(st.list_for("contact").is_empty());
        assert_eq!(st.answered_steps(), 1);
        assert_eq!(st.attachment_count(), 1);
    }

    #[test]
    fn snapshot_roundtrips_through_json() {
        let mut st = FlowState::new(Uuid::new_v4(), "vehicle");
        st.answers.insert("vehicle".into(), json!({"plate": "MH12AB1234"}));
        let raw = serde_json::to_value(&st).expect("serialize");
        let back: FlowState = serde_json::from_value(raw).expect("deserialize");
        assert_eq!(st, back);
    }
}
