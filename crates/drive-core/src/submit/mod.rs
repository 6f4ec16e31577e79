//! Agregador de envío: construcción del payload y contrato del `Submitter`.

mod payload;
mod submitter;

pub use payload::{build_payload, SubmissionPayload};
pub use submitter::{InMemorySubmitter, SubmissionAck, Submitter};
