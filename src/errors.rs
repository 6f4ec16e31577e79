use drive_adapters::AdapterError;
use drive_core::FlowError;
use thiserror::Error;

/// Error de aplicación: lo que puede fallar al armar y recorrer un flujo.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de flujo: {0}")]
    Flow(#[from] FlowError),
    #[error("Error de adaptador: {0}")]
    Adapter(#[from] AdapterError),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Verdadero cuando reintentar o corregir datos puede resolverlo.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Flow(e) | Self::Adapter(AdapterError::Flow(e)) => e.is_recoverable(),
            Self::Adapter(AdapterError::Http(_)) | Self::Io(_) => true,
            Self::Adapter(_) => false,
        }
    }
}
