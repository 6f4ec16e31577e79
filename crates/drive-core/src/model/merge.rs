//! Fusión de respuestas JSON.
//!
//! Merge "shallow": los campos del parche reemplazan a los de la respuesta
//! previa del step y el resto se conserva. Es la semántica de
//! `FlowController::set_field`.

use serde_json::{Map, Value};

/// Aplica `patch` sobre la respuesta previa. Si no había respuesta, o no era
/// un objeto, el resultado es sólo el parche.
pub fn merge_answer(previous: Option<&Value>, patch: Map<String, Value>) -> Value {
    let mut out = match previous {
        Some(Value::Object(fields)) => fields.clone(),
        _ => Map::new(),
    };
    out.extend(patch);
    Value::Object(out)
}
