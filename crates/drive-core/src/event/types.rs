//! Tipos de evento del flujo y estructura `FlowEvent`.
//!
//! Rol en el flujo:
//! - Cada acción sobre un `FlowController` emite eventos a un `EventStore`
//!   append-only.
//! - Estos eventos permiten reconstruir el `FlowState` (replay, ver
//!   `FlowRepository`) y sirven de traza para soporte.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SubmitError;
use crate::model::{AttachmentRef, FlowState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowEventKind {
    /// Primer evento de un `flow_id`: fija la definición usada.
    FlowInitialized {
        flow_name: String,
        definition_hash: String,
        step_count: usize,
        first_step: String,
    },
    /// Se reanudó un borrador persistido; reemplaza el estado completo.
    DraftRestored { snapshot: FlowState },
    /// Respuesta resultante del step (no el delta).
    AnswerRecorded { step_id: String, value: serde_json::Value },
    AttachmentCaptured { step_id: String, attachment: AttachmentRef },
    StepAdvanced { from: String, to: String },
    StepRetreated { from: String, to: String },
    /// El gate bloqueó el avance o el envío. No altera estado.
    NavigationBlocked { step_id: String, reason: String },
    SubmissionAttempted { payload_hash: String },
    SubmissionFailed { payload_hash: String, error: SubmitError },
    /// Cierre del flujo tras un envío aceptado.
    FlowCompleted { payload_hash: String, reference: String },
}

impl FlowEventKind {
    /// Letra compacta usada en trazas y tests.
    pub fn variant(&self) -> &'static str {
        match self {
            Self::FlowInitialized { .. } => "I",
            Self::DraftRestored { .. } => "D",
            Self::AnswerRecorded { .. } => "A",
            Self::AttachmentCaptured { .. } => "M",
            Self::StepAdvanced { .. } => "N",
            Self::StepRetreated { .. } => "P",
            Self::NavigationBlocked { .. } => "B",
            Self::SubmissionAttempted { .. } => "S",
            Self::SubmissionFailed { .. } => "X",
            Self::FlowCompleted { .. } => "C",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEvent {
    pub seq: u64, // asignado por el EventStore (orden append)
    pub flow_id: Uuid,
    pub kind: FlowEventKind,
    pub ts: DateTime<Utc>,
}
