//! drive-adapters: flujos concretos de la app y colaboradores reales.
//!
//! Este crate provee:
//! - `flows`: las definiciones de los asistentes (emergencias, clases de
//!   manejo, mantenimiento, documentos) construidas con `FormStep` y gates.
//! - `storage`: `JsonFileStorage`, borradores como archivos JSON.
//! - `submitter`: `RestSubmitter`, envío por HTTP al backend.
//! - `config`: carga de `.env` / variables de entorno.
//! - `session`: arma controlador y submitter desde la configuración.

pub mod config;
pub mod error;
pub mod flows;
pub mod session;
pub mod storage;
pub mod submitter;

pub use config::{init_dotenv, AppConfig};
pub use error::AdapterError;
pub use session::{open_flow, submitter_for};
pub use storage::JsonFileStorage;
pub use submitter::RestSubmitter;
