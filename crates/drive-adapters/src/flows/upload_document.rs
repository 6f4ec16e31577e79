use drive_core::gate::{min_attachments, one_of, required};
use drive_core::{AttachmentKind, FlowDefinition, FlowError, FlowState, FormStep};

pub const DOCUMENT_TYPES: &[&str] = &["registration", "insurance", "pollution", "driving_license", "other"];

/// Documentos que vencen y por tanto exigen fecha de expiración.
const EXPIRING: &[&str] = &["insurance", "pollution", "driving_license"];

fn expiry_when_needed(step_id: &str, state: &FlowState) -> Result<(), String> {
    let doc_type = state.field("category", "documentType").and_then(|v| v.as_str()).unwrap_or_default();
    if !EXPIRING.contains(&doc_type) {
        return Ok(());
    }
    match state.field(step_id, "expiryDate").and_then(|v| v.as_str()) {
        Some(d) if !d.trim().is_empty() => Ok(()),
        _ => Err(format!("{doc_type} documents need an expiry date")),
    }
}

/// `category → file → details`
pub fn upload_document() -> Result<FlowDefinition, FlowError> {
    FlowDefinition::builder("upload_document").first_step(FormStep::new("category").titled("Document type")
                                                                                   .gate(one_of("documentType",
                                                                                                DOCUMENT_TYPES)))
                                              .add_step(FormStep::new("file").titled("Upload")
                                                                             .gate(min_attachments(Some(AttachmentKind::Photo),
                                                                                                   1)))
                                              .add_step(FormStep::new("details").titled("Details")
                                                                                .gate(required(&["documentNumber"]))
                                                                                .gate(expiry_when_needed))
                                              .build()
}
