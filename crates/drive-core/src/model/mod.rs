//! Modelos del flujo (estado, capturas, merge de respuestas).

pub mod attachment;
pub mod draft;
pub mod merge;
pub mod state;

pub use attachment::{AttachmentKind, AttachmentRef};
pub use draft::DraftSnapshot;
pub use merge::merge_answer;
pub use state::{Answers, Attachments, FlowState};
