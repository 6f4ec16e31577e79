//! Formato persistido de un borrador.

use serde::{Deserialize, Serialize};

use super::FlowState;

/// Borrador guardado por `save_draft`: el estado más la identidad de la
/// definición que lo produjo. Sólo se reanuda con una definición del mismo
/// `definition_hash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    pub flow: String,
    pub definition_hash: String,
    pub state: FlowState,
}
