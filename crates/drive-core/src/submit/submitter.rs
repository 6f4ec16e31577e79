//! Colaborador de envío. La llamada real al backend (REST) vive en
//! `drive-adapters`; aquí está el contrato y un doble en memoria.
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::SubmissionPayload;
use crate::errors::SubmitError;

/// Acuse del backend (id de orden, ticket, etc.).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionAck {
    pub reference: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionAck, SubmitError>;
}

/// Registra los payloads aceptados. Se le pueden encolar fallos que se
/// devolverán (en orden) antes de aceptar.
#[derive(Debug, Default)]
pub struct InMemorySubmitter {
    received: Mutex<Vec<SubmissionPayload>>,
    failures: Mutex<VecDeque<SubmitError>>,
}

impl InMemorySubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_with(errors: impl IntoIterator<Item = SubmitError>) -> Self {
        Self { received: Mutex::default(),
               failures: Mutex::new(errors.into_iter().collect()) }
    }

    pub fn push_failure(&self, error: SubmitError) {
        self.failures.lock().unwrap_or_else(|e| e.into_inner()).push_back(error);
    }

    pub fn received(&self) -> Vec<SubmissionPayload> {
        self.received.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Submitter for InMemorySubmitter {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionAck, SubmitError> {
        if let Some(err) = self.failures.lock().unwrap_or_else(|e| e.into_inner()).pop_front() {
            return Err(err);
        }
        self.received.lock().unwrap_or_else(|e| e.into_inner()).push(payload.clone());
        let short = payload.payload_hash.get(..12).unwrap_or(&payload.payload_hash);
        Ok(SubmissionAck { reference: format!("SUB-{short}"),
                           message: None })
    }
}
