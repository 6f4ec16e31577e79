//! Gates reutilizables. Cada flujo los combina en sus `FormStep`.
use serde_json::Value;

use super::{is_filled, Gate};
use crate::model::{AttachmentKind, FlowState};

/// Todos los campos deben estar rellenados.
#[derive(Debug, Clone)]
pub struct Required {
    fields: Vec<String>,
}

pub fn required(fields: &[&str]) -> Required {
    Required { fields: fields.iter().map(|f| f.to_string()).collect() }
}

impl Gate for Required {
    fn check(&self, step_id: &str, state: &FlowState) -> Result<(), String> {
        for f in &self.fields {
            if !state.field(step_id, f).is_some_and(is_filled) {
                return Err(format!("{f} is required"));
            }
        }
        Ok(())
    }
}

/// El campo debe tomar uno de los valores permitidos (selects, radios).
#[derive(Debug, Clone)]
pub struct OneOf {
    field: String,
    allowed: Vec<String>,
}

pub fn one_of(field: &str, allowed: &[&str]) -> OneOf {
    OneOf { field: field.to_string(),
            allowed: allowed.iter().map(|a| a.to_string()).collect() }
}

impl Gate for OneOf {
    fn check(&self, step_id: &str, state: &FlowState) -> Result<(), String> {
        match state.field(step_id, &self.field).and_then(Value::as_str) {
            Some(v) if self.allowed.iter().any(|a| a == v) => Ok(()),
            Some(v) => Err(format!("{v} is not a valid {}", self.field)),
            None => Err(format!("select a {}", self.field)),
        }
    }
}

/// Casillas de aceptación (términos, consentimiento).
#[derive(Debug, Clone)]
pub struct MustBeTrue {
    field: String,
    reason: String,
}

pub fn must_be_true(field: &str, reason: &str) -> MustBeTrue {
    MustBeTrue { field: field.to_string(),
                 reason: reason.to_string() }
}

impl Gate for MustBeTrue {
    fn check(&self, step_id: &str, state: &FlowState) -> Result<(), String> {
        match state.field(step_id, &self.field).and_then(Value::as_bool) {
            Some(true) => Ok(()),
            _ => Err(self.reason.clone()),
        }
    }
}

/// Mínimo de capturas en el step, opcionalmente de un tipo concreto.
#[derive(Debug, Clone)]
pub struct MinAttachments {
    kind: Option<AttachmentKind>,
    count: usize,
}

pub fn min_attachments(kind: Option<AttachmentKind>, count: usize) -> MinAttachments {
    MinAttachments { kind, count }
}

impl Gate for MinAttachments {
    fn check(&self, step_id: &str, state: &FlowState) -> Result<(), String> {
        let have = state.list_for(step_id)
                        .iter()
                        .filter(|a| self.kind.map_or(true, |k| a.kind == k))
                        .count();
        if have >= self.count {
            return Ok(());
        }
        let what = self.kind.map_or("attachment", |k| k.as_str());
        Err(format!("add at least {} {what}(s)", self.count))
    }
}

/// Predicado arbitrario sobre un campo. Un campo ausente falla.
pub struct Predicate {
    field: String,
    test: Box<dyn Fn(&Value) -> bool + Send + Sync>,
    reason: String,
}

pub fn predicate(field: &str, reason: &str, test: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Predicate {
    Predicate { field: field.to_string(),
                test: Box::new(test),
                reason: reason.to_string() }
}

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predicate").field("field", &self.field).field("reason", &self.reason).finish()
    }
}

impl Gate for Predicate {
    fn check(&self, step_id: &str, state: &FlowState) -> Result<(), String> {
        match state.field(step_id, &self.field) {
            Some(v) if (self.test)(v) => Ok(()),
            _ => Err(self.reason.clone()),
        }
    }
}

/// Conjunción: devuelve el primer motivo de fallo.
pub struct AllOf {
    gates: Vec<Box<dyn Gate>>,
}

pub fn all_of(gates: Vec<Box<dyn Gate>>) -> AllOf {
    AllOf { gates }
}

impl Gate for AllOf {
    fn check(&self, step_id: &str, state: &FlowState) -> Result<(), String> {
        self.gates.iter().try_for_each(|g| g.check(step_id, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttachmentRef;
    use serde_json::json;
    use uuid::Uuid;

    fn state_with(step: &str, answer: Value) -> FlowState {
        let mut st = FlowState::new(Uuid::new_v4(), step);
        st.answers.insert(step.to_string(), answer);
        st
    }

    #[test]
    fn required_rejects_blank_strings() {
        let gate = required(&["name", "phone"]);
        let st = state_with("contact", json!({"name": "Asha", "phone": "  "}));
        assert_eq!(gate.check("contact", &st), Err("phone is required".to_string()));

        let st = state_with("contact", json!({"name": "Asha", "phone": "9876543210"}));
        assert!(gate.passes("contact", &st));
    }

    #[test]
    fn one_of_distinguishes_missing_and_invalid() {
        let gate = one_of("emergencyType", &["injury", "illness"]);
        let empty = state_with("type", json!({}));
        assert_eq!(gate.check("type", &empty), Err("select a emergencyType".to_string()));
        let bad = state_with("type", json!({"emergencyType": "flood"}));
        assert!(gate.check("type", &bad).unwrap_err().contains("flood"));
        let ok = state_with("type", json!({"emergencyType": "injury"}));
        assert!(gate.passes("type", &ok));
    }

    #[test]
    fn min_attachments_counts_only_requested_kind() {
        let mut st = FlowState::new(Uuid::new_v4(), "evidence");
        st.attachments
          .entry("evidence".into())
          .or_default()
          .push(AttachmentRef::new(AttachmentKind::Note, "parked near gate 3"));
        let photos = min_attachments(Some(AttachmentKind::Photo), 1);
        assert_eq!(photos.check("evidence", &st), Err("add at least 1 photo(s)".to_string()));
        assert!(min_attachments(None, 1).passes("evidence", &st));
    }

    #[test]
    fn all_of_reports_first_failure_and_accepts_closures() {
        let gate = all_of(vec![Box::new(must_be_true("consent", "accept the terms")) as Box<dyn Gate>,
                               Box::new(|_: &str, _: &FlowState| Err::<(), _>("never".to_string())) as Box<dyn Gate>]);
        let st = state_with("confirm", json!({"consent": false}));
        assert_eq!(gate.check("confirm", &st), Err("accept the terms".to_string()));
        let st = state_with("confirm", json!({"consent": true}));
        assert_eq!(gate.check("confirm", &st), Err("never".to_string()));
    }

    #[test]
    fn predicate_fails_on_missing_field() {
        let gate = predicate("pin", "enter a 6 digit pin code", |v| {
            v.as_str().is_some_and(|s| s.len() == 6 && s.chars().all(|c| c.is_ascii_digit()))
        });
        assert!(!gate.passes("slot", &state_with("slot", json!({}))));
        assert!(gate.passes("slot", &state_with("slot", json!({"pin": "411001"}))));
    }
}
