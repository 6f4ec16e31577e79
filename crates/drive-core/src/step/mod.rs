//! Definiciones relacionadas a Steps.
//!
//! Un Step es una pantalla del asistente: aporta respuestas y capturas, tiene
//! un gate que decide si se puede avanzar y, opcionalmente, un predicado que lo
//! excluye de la navegación según las respuestas previas.

pub mod definition;
pub mod form;

pub use definition::StepDefinition;
pub use form::FormStep;
