use crate::model::{Answers, FlowState};

/// Trait que define un Step (una pantalla del asistente).
///
/// Implementaciones deben ser puras: `validate` y `is_applicable` sólo leen el
/// estado recibido.
pub trait StepDefinition: Send + Sync {
    /// Identificador estable y único dentro del Flow.
    fn id(&self) -> &str;

    /// Título para la UI.
    fn title(&self) -> &str {
        self.id()
    }

    /// Gate del step: `Err(motivo)` bloquea el avance.
    fn validate(&self, _state: &FlowState) -> Result<(), String> {
        Ok(())
    }

    /// Ramas dinámicas: un step no aplicable se salta al navegar.
    fn is_applicable(&self, _answers: &Answers) -> bool {
        true
    }
}
