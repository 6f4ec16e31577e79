//! Definiciones de los asistentes de la app.
//!
//! Cada función devuelve una `FlowDefinition` nueva; los ids de steps y de
//! campos son el contrato con la UI y con el backend.

pub mod learn_driving;
pub mod maintenance;
pub mod medical;
pub mod theft;
pub mod upload_document;

use drive_core::gate::{predicate, Predicate};
use drive_core::FlowDefinition;
use serde_json::Value;

use crate::AdapterError;

/// Nombres aceptados por `by_name`, en el orden en que se listan.
pub const FLOW_NAMES: &[&str] = &["medical_emergency",
                                  "theft_emergency",
                                  "learn_driving",
                                  "schedule_maintenance",
                                  "upload_document"];

pub fn by_name(name: &str) -> Result<FlowDefinition, AdapterError> {
    let def = match name {
        "medical_emergency" => medical::medical_emergency()?,
        "theft_emergency" => theft::theft_emergency()?,
        "learn_driving" => learn_driving::learn_driving()?,
        "schedule_maintenance" => maintenance::schedule_maintenance()?,
        "upload_document" => upload_document::upload_document()?,
        other => return Err(AdapterError::UnknownFlow(other.to_string())),
    };
    Ok(def)
}

/// Teléfono móvil de 10 dígitos (se ignoran espacios y un prefijo +91).
pub(crate) fn phone_gate(field: &str) -> Predicate {
    predicate(field, "enter a valid 10 digit mobile number", |v: &Value| {
        v.as_str().is_some_and(|raw| {
                      let digits: String = raw.trim()
                                              .trim_start_matches("+91")
                                              .chars()
                                              .filter(|c| !c.is_whitespace())
                                              .collect();
                      digits.len() == 10 && digits.chars().all(|c| c.is_ascii_digit())
                  })
    })
}

/// Lectura booleana de `answers[step][field]`, `false` si falta.
pub(crate) fn flag(answers: &drive_core::Answers, step: &str, field: &str) -> bool {
    answers.get(step)
           .and_then(|v| v.get(field))
           .and_then(Value::as_bool)
           .unwrap_or(false)
}
