//! Engine: controlador de navegación + envío de un flujo.

pub mod core;
pub mod navigation;

pub use self::core::{Advance, FlowController, FlowStatus, PrimaryAction, Transition};
pub use navigation::{next_index, previous_index, progress_fraction};
