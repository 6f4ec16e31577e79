//! Grabador tipo toggle para audio/video.
//!
//! El indicador "grabando" vive aquí, fuera del colector de capturas: sólo el
//! artefacto finalizado se agrega al flujo (`FlowController::capture_recording`).
use chrono::{DateTime, Duration, Utc};

use crate::model::AttachmentKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedRecording {
    pub kind: AttachmentKind,
    pub value: String,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecorder {
    kind: AttachmentKind,
    started_at: Option<DateTime<Utc>>,
}

impl MediaRecorder {
    pub fn audio() -> Self {
        Self { kind: AttachmentKind::Audio,
               started_at: None }
    }

    pub fn video() -> Self {
        Self { kind: AttachmentKind::Video,
               started_at: None }
    }

    pub fn kind(&self) -> AttachmentKind {
        self.kind
    }

    pub fn is_recording(&self) -> bool {
        self.started_at.is_some()
    }

    /// `false` si ya estaba grabando.
    pub fn start(&mut self) -> bool {
        if self.is_recording() {
            return false;
        }
        self.started_at = Some(Utc::now());
        true
    }

    /// Finaliza la grabación. `None` si no había una en curso.
    pub fn stop(&mut self, value: impl Into<String>) -> Option<FinishedRecording> {
        let started = self.started_at.take()?;
        Some(FinishedRecording { kind: self.kind,
                                 value: value.into(),
                                 duration: Utc::now() - started })
    }

    /// Botón único de la UI: inicia si está parado, finaliza si está grabando.
    pub fn toggle(&mut self, value: impl Into<String>) -> Option<FinishedRecording> {
        if self.is_recording() {
            self.stop(value)
        } else {
            self.start();
            None
        }
    }
}
