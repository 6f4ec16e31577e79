//! Errores del controlador de flujos.
//!
//! Taxonomía:
//! - `ValidationError`: un gate bloqueó el avance. Se resuelve localmente
//!   (notificación + estado intacto).
//! - `SubmitError`: el colaborador de envío rechazó o falló. El estado se
//!   conserva para reintentar.
//! - `FlowError::Internal`: cualquier fallo inesperado (serialización,
//!   almacenamiento). Se registra y se notifica de forma genérica.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Un step no cumple su gate de validación.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[error("{step_id}: {reason}")]
pub struct ValidationError {
    pub step_id: String,
    /// Mensaje apto para mostrar al usuario.
    pub reason: String,
}

impl ValidationError {
    pub fn new(step_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { step_id: step_id.into(),
               reason: reason.into() }
    }
}

/// Fallos reportados por un `Submitter`.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum SubmitError {
    #[error("rejected by backend (status {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FlowError {
    #[error("flow definition has no steps")] EmptyDefinition,
    #[error("step id must not be empty")] EmptyStepId,
    #[error("duplicate step id: {0}")] DuplicateStep(String),
    #[error("unknown step: {0}")] UnknownStep(String),
    #[error("validation failed at {0}")] Validation(#[from] ValidationError),
    #[error("submission failed: {0}")] Submission(#[from] SubmitError),
    #[error("draft belongs to another definition (expected {expected}, found {found})")]
    DefinitionMismatch { expected: String, found: String },
    #[error("flow already completed")] FlowCompleted,
    #[error("submit is only available at the terminal step (current: {0})")] NotAtTerminalStep(String),
    #[error("storage: {0}")] Storage(String),
    #[error("internal: {0}")] Internal(String),
}

impl From<serde_json::Error> for FlowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("serde_json: {err}"))
    }
}

impl FlowError {
    /// Errores que el usuario resuelve reintentando o corrigiendo datos.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Submission(_) | Self::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_includes_step_and_reason() {
        let err = FlowError::from(ValidationError::new("type", "select an emergency type"));
        assert_eq!(err.to_string(), "validation failed at type: select an emergency type");
        assert!(err.is_recoverable());
    }

    #[test]
    fn serde_errors_map_to_internal() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: FlowError = bad.into();
        assert!(matches!(err, FlowError::Internal(_)));
        assert!(!err.is_recoverable());
    }
}
