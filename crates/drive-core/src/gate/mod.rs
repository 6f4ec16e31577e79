//! Gates de validación.
//!
//! Un gate es una función pura `(step_id, estado) -> Result<(), motivo>`. El
//! motivo es un texto apto para el usuario. Los gates no mutan nada; el
//! controlador decide qué hacer con el resultado (bloquear la navegación y
//! notificar).

mod rules;

pub use rules::{all_of, min_attachments, must_be_true, one_of, predicate, required, AllOf, MinAttachments, MustBeTrue,
                OneOf, Predicate, Required};

use crate::model::FlowState;

/// Predicado de validación de un step.
pub trait Gate: Send + Sync {
    fn check(&self, step_id: &str, state: &FlowState) -> Result<(), String>;

    /// Conveniencia booleana (habilita o no el botón "Next").
    fn passes(&self, step_id: &str, state: &FlowState) -> bool {
        self.check(step_id, state).is_ok()
    }
}

impl<F> Gate for F where F: Fn(&str, &FlowState) -> Result<(), String> + Send + Sync
{
    fn check(&self, step_id: &str, state: &FlowState) -> Result<(), String> {
        self(step_id, state)
    }
}

/// `true` si el valor cuenta como "rellenado": no nulo, string no vacío (tras
/// trim), array u objeto con elementos.
pub fn is_filled(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}
