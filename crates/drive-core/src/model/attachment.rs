//! Artefactos capturados durante un flujo (fotos, audio, video, notas).
//!
//! Un `AttachmentRef` es inmutable: una vez creado sólo se agrega al final de
//! la lista del step que lo capturó.
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Photo,
    Audio,
    Video,
    Note,
}

impl AttachmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Note => "note",
        }
    }

    /// Audio y video se producen con un grabador tipo toggle.
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Audio | Self::Video)
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub kind: AttachmentKind,
    /// Referencia opaca: URI del archivo, id de upload o texto de la nota.
    pub value: String,
    pub captured_at: DateTime<Utc>,
}

impl AttachmentRef {
    pub fn new(kind: AttachmentKind, value: impl Into<String>) -> Self {
        Self { kind,
               value: value.into(),
               captured_at: Utc::now() }
    }
}
