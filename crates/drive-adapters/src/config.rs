//! Carga de configuración desde variables de entorno (y `.env` si existe).
//!
//! - `DRIVEFLOW_STORAGE_DIR`: directorio para borradores (`JsonFileStorage`).
//! - `DRIVEFLOW_SUBMIT_URL`: endpoint REST del envío.
//! - `DRIVEFLOW_SUBMIT_TIMEOUT_SECS`: timeout del envío, por defecto 15.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use once_cell::sync::Lazy;

use crate::AdapterError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv(); // ignora error si no existe .env
});

pub const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage_dir: Option<PathBuf>,
    pub submit_url: Option<String>,
    pub submit_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AdapterError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables inyectada.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, AdapterError> {
        let non_empty = |k: &str| get(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let submit_timeout = match non_empty("DRIVEFLOW_SUBMIT_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse()
                                   .map_err(|_| AdapterError::Config(format!("DRIVEFLOW_SUBMIT_TIMEOUT_SECS={raw} is not a number")))?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_SUBMIT_TIMEOUT_SECS),
        };
        Ok(Self { storage_dir: non_empty("DRIVEFLOW_STORAGE_DIR").map(PathBuf::from),
                  submit_url: non_empty("DRIVEFLOW_SUBMIT_URL"),
                  submit_timeout })
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
