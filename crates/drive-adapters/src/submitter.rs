//! `RestSubmitter`: POST del payload en JSON al backend.
//!
//! El backend responde con un objeto JSON que incluye el identificador de la
//! orden (`id`, `orderId` o `reference`). El `payload_hash` viaja en la
//! cabecera `Idempotency-Key` para que un reintento no duplique la orden.
use std::time::Duration;

use async_trait::async_trait;
use drive_core::{SubmissionAck, SubmissionPayload, SubmitError, Submitter};
use log::debug;
use serde_json::Value;

use crate::{AdapterError, AppConfig};

#[derive(Debug, Clone)]
pub struct RestSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl RestSubmitter {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AdapterError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client,
                  endpoint: endpoint.into() })
    }

    /// `None` si la configuración no define URL de envío.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, AdapterError> {
        match &config.submit_url {
            Some(url) => Ok(Some(Self::new(url.clone(), config.submit_timeout)?)),
            None => Ok(None),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Submitter for RestSubmitter {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionAck, SubmitError> {
        debug!("[submit] POST {} ({} answers, {} attachments)",
               self.endpoint,
               payload.answer_count(),
               payload.attachment_count());
        let resp = self.client
                       .post(&self.endpoint)
                       .header("Idempotency-Key", payload.payload_hash.as_str())
                       .json(payload)
                       .send()
                       .await
                       .map_err(|e| SubmitError::Network(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| SubmitError::Network(e.to_string()))?;
        parse_response(status, &body)
    }
}

const MAX_MESSAGE_LEN: usize = 200;

fn message_from(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let msg = parsed.as_ref()
                    .and_then(|v| v.get("message").or_else(|| v.get("error")))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| body.trim().to_string());
    msg.chars().take(MAX_MESSAGE_LEN).collect()
}

/// Interpreta la respuesta HTTP del backend.
pub fn parse_response(status: u16, body: &str) -> Result<SubmissionAck, SubmitError> {
    if !(200..300).contains(&status) {
        return Err(SubmitError::Rejected { status,
                                           message: message_from(body) });
    }
    let v: Value = serde_json::from_str(body).map_err(|e| SubmitError::InvalidResponse(e.to_string()))?;
    let reference = ["id", "orderId", "reference"].iter()
                                                  .find_map(|k| match v.get(*k) {
                                                      Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                                                      Some(Value::Number(n)) => Some(n.to_string()),
                                                      _ => None,
                                                  })
                                                  .ok_or_else(|| {
                                                      SubmitError::InvalidResponse("response has no order id".into())
                                                  })?;
    Ok(SubmissionAck { reference,
                       message: v.get("message").and_then(Value::as_str).map(str::to_string) })
}
