//! drive-core: controlador lineal de flujos por pasos (asistentes).
//!
//! Un flujo es una secuencia ordenada de steps; cada step aporta respuestas y
//! capturas, un gate decide si se puede avanzar y el último step envía todo
//! lo recogido a un `Submitter` externo.
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod gate;
pub mod hashing;
pub mod media;
pub mod model;
pub mod notify;
pub mod repo;
pub mod step;
pub mod storage;
pub mod submit;

pub use engine::{Advance, FlowController, FlowStatus, PrimaryAction, Transition};
pub use errors::{FlowError, SubmitError, ValidationError};
pub use event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
pub use media::{FinishedRecording, MediaRecorder};
pub use model::{Answers, AttachmentKind, AttachmentRef, DraftSnapshot, FlowState};
pub use notify::{CollectingNotifier, LogNotifier, Notification, NotificationVariant, Notifier};
pub use repo::{build_flow_definition, FlowDefinition, FlowInstance, FlowRepository, InMemoryFlowRepository};
pub use step::{FormStep, StepDefinition};
pub use storage::{InMemoryStorage, Storage};
pub use submit::{build_payload, InMemorySubmitter, SubmissionAck, SubmissionPayload, Submitter};
