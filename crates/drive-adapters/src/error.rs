//! Errores de la capa de adaptadores.

use drive_core::FlowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("unknown flow: {0}")]
    UnknownFlow(String),
    #[error("configuration: {0}")]
    Config(String),
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Flow(#[from] FlowError),
}
