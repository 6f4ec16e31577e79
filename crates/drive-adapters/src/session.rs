//! Armado de un controlador a partir de la configuración.
//!
//! Con `storage_dir` el flujo se reanuda (o inicia) con borradores en disco
//! bajo la clave `draft:<flow>`; sin él vive sólo en memoria.

use std::path::PathBuf;

use drive_core::{FlowController, InMemorySubmitter, Submitter};

use crate::flows::by_name;
use crate::{AdapterError, AppConfig, JsonFileStorage, RestSubmitter};

pub fn draft_key(flow: &str) -> String {
    format!("draft:{flow}")
}

/// Abre el flujo `flow`. `draft_dir` tiene prioridad sobre `config.storage_dir`.
pub fn open_flow(flow: &str, config: &AppConfig, draft_dir: Option<PathBuf>) -> Result<FlowController, AdapterError> {
    let definition = by_name(flow)?;
    let ctl = match draft_dir.or_else(|| config.storage_dir.clone()) {
        Some(dir) => FlowController::resume(definition, JsonFileStorage::new(dir), draft_key(flow))?,
        None => FlowController::new(definition),
    };
    Ok(ctl)
}

/// Endpoint efectivo: el argumento explícito tiene prioridad sobre la
/// configuración.
pub fn resolve_submit_url(config: &AppConfig, submit_url: Option<String>) -> Option<String> {
    submit_url.or_else(|| config.submit_url.clone())
}

/// `RestSubmitter` si hay endpoint (argumento o configuración), si no uno en
/// memoria.
pub fn submitter_for(config: &AppConfig, submit_url: Option<String>) -> Result<Box<dyn Submitter>, AdapterError> {
    match resolve_submit_url(config, submit_url) {
        Some(url) => Ok(Box::new(RestSubmitter::new(url, config.submit_timeout)?)),
        None => Ok(Box::new(InMemorySubmitter::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(storage_dir: Option<PathBuf>, submit_url: Option<&str>) -> AppConfig {
        AppConfig { storage_dir,
                    submit_url: submit_url.map(str::to_string),
                    submit_timeout: Duration::from_secs(5) }
    }

    #[test]
    fn opens_in_memory_without_storage_dir() {
        let ctl = open_flow("upload_document", &config(None, None), None).unwrap();
        assert!(!ctl.is_restored());
        assert_eq!(ctl.state().current_step_id(), "category");
        assert!(matches!(open_flow("tow_truck", &config(None, None), None), Err(AdapterError::UnknownFlow(_))));
    }

    #[test]
    fn submit_url_argument_wins_over_config() {
        let configured = config(None, Some("https://api.example.test/orders"));
        assert_eq!(resolve_submit_url(&configured, Some("https://override.example.test/orders".into())).as_deref(),
                   Some("https://override.example.test/orders"));
        assert_eq!(resolve_submit_url(&configured, None).as_deref(),
                   Some("https://api.example.test/orders"));
        assert_eq!(resolve_submit_url(&config(None, None), None), None);
        assert!(submitter_for(&config(None, None), None).is_ok());
        assert!(submitter_for(&configured, None).is_ok());
    }
}
