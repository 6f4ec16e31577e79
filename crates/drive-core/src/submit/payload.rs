//! Agregación del payload final: respuestas + capturas de todos los steps.
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::constants::ENGINE_VERSION;
use crate::errors::FlowError;
use crate::hashing::hash_value;
use crate::model::{Answers, Attachments, FlowState};
use crate::repo::FlowDefinition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub flow: String,
    pub flow_id: Uuid,
    pub definition_hash: String,
    pub answers: Answers,
    pub attachments: Attachments,
    /// Hash del contenido; el backend lo usa como clave de idempotencia, así
    /// que los reintentos de un mismo estado envían el mismo valor.
    pub payload_hash: String,
}

impl SubmissionPayload {
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    pub fn attachment_count(&self) -> usize {
        self.attachments.values().map(Vec::len).sum()
    }

    pub fn to_json(&self) -> Result<Value, FlowError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Fusiona respuestas y capturas en un único payload. No filtra ni deduplica:
/// lo que contiene el estado es exactamente lo que se envía.
pub fn build_payload(definition: &FlowDefinition, state: &FlowState) -> Result<SubmissionPayload, FlowError> {
    let body = json!({
        "engine_version": ENGINE_VERSION,
        "flow": definition.name(),
        "flow_id": state.flow_id,
        "definition_hash": definition.definition_hash(),
        "answers": serde_json::to_value(&state.answers)?,
        "attachments": serde_json::to_value(&state.attachments)?,
    });
    Ok(SubmissionPayload { flow: definition.name().to_string(),
                           flow_id: state.flow_id,
                           definition_hash: definition.definition_hash().to_string(),
                           answers: state.answers.clone(),
                           attachments: state.attachments.clone(),
                           payload_hash: hash_value(&body) })
}
