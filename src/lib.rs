//! driveflow-rust
//!
//! Fachada del workspace: reexporta el núcleo (`drive-core`) y los
//! adaptadores (`drive-adapters`) y agrega un error de aplicación que unifica
//! ambos para quien arme un flujo completo.
//!
//! ```no_run
//! use driveflow_rust::prelude::*;
//!
//! # async fn demo() -> Result<(), AppError> {
//! let config = AppConfig::from_env()?;
//! let mut ctl = open_flow("upload_document", &config, None)?;
//! ctl.set_field("category", "documentType", serde_json::json!("rc"))?;
//! ctl.go_to_next()?;
//! let submitter = submitter_for(&config, None)?;
//! # let _ = ctl.advance(submitter.as_ref()).await;
//! # Ok(())
//! # }
//! ```

pub mod errors;

pub use drive_adapters;
pub use drive_core;

pub mod prelude {
    pub use crate::errors::AppError;
    pub use drive_adapters::flows::{by_name, FLOW_NAMES};
    pub use drive_adapters::{open_flow, submitter_for, AppConfig, JsonFileStorage, RestSubmitter};
    pub use drive_core::gate::Gate;
    pub use drive_core::{Advance, AttachmentKind, CollectingNotifier, FlowController, FlowDefinition, FlowError,
                         FlowState, FormStep, InMemoryStorage, InMemorySubmitter, MediaRecorder, Notification,
                         NotificationVariant, PrimaryAction, StepDefinition, Storage, SubmissionPayload, Submitter,
                         Transition};
}
