//! Tipos de repositorio: definición inmutable (`FlowDefinition`) y estado
//! reconstruido (`FlowInstance`).
//!
//! El repositorio aplica un replay lineal: consume eventos en orden y
//! reconstruye el `FlowState`. Sirve para auditar una sesión o reanudarla desde
//! un log persistido.
use std::collections::HashSet;
use std::fmt;

use serde_json::json;
use uuid::Uuid;

use crate::errors::FlowError;
use crate::event::{FlowEvent, FlowEventKind};
use crate::model::FlowState;
use crate::step::StepDefinition;

/// Definición inmutable del Flow: steps ordenados + hash de la definición.
///
/// Sólo se obtiene mediante `build_flow_definition` (o el builder), que
/// garantiza al menos un step e ids únicos.
///
/// ```compile_fail
/// let def = drive_core::FlowDefinition { name: "x".into(), steps: vec![], definition_hash: String::new() };
/// ```
pub struct FlowDefinition {
    name: String,
    steps: Vec<Box<dyn StepDefinition>>,
    definition_hash: String,
}

impl FlowDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Box<dyn StepDefinition>] {
        &self.steps
    }

    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Orden (índice) del step dentro del flujo.
    pub fn position(&self, step_id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id() == step_id)
    }

    pub fn step(&self, step_id: &str) -> Option<&dyn StepDefinition> {
        self.steps.iter().find(|s| s.id() == step_id).map(|s| s.as_ref())
    }

    pub fn step_at(&self, index: usize) -> Option<&dyn StepDefinition> {
        self.steps.get(index).map(|s| s.as_ref())
    }

    pub fn contains(&self, step_id: &str) -> bool {
        self.position(step_id).is_some()
    }

    /// Primer step declarado (estado inicial de toda ejecución).
    pub fn first_step_id(&self) -> &str {
        self.steps.first().map(|s| s.id()).unwrap_or_default()
    }

    pub fn step_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.id()).collect()
    }
}

impl fmt::Debug for FlowDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowDefinition")
         .field("name", &self.name)
         .field("steps", &self.step_ids())
         .field("definition_hash", &self.definition_hash)
         .finish()
    }
}

/// Construye una definición validando que haya al menos un step y que los ids
/// sean únicos y no vacíos.
pub fn build_flow_definition(name: &str, steps: Vec<Box<dyn StepDefinition>>) -> Result<FlowDefinition, FlowError> {
    use crate::hashing::{hash_str, to_canonical_json};

    if steps.is_empty() {
        return Err(FlowError::EmptyDefinition);
    }
    let mut seen = HashSet::new();
    for s in &steps {
        if s.id().trim().is_empty() {
            return Err(FlowError::EmptyStepId);
        }
        if !seen.insert(s.id()) {
            return Err(FlowError::DuplicateStep(s.id().to_string()));
        }
    }
    let ids: Vec<&str> = steps.iter().map(|s| s.id()).collect();
    let definition_hash = hash_str(&to_canonical_json(&json!({ "flow": name, "steps": ids })));
    Ok(FlowDefinition { name: name.to_string(),
                        steps,
                        definition_hash })
}

/// Resultado del replay.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowInstance {
    pub state: FlowState,
    pub completed: bool,
    pub failed_submissions: u32,
}

/// Trait para reconstruir (`replay`) el estado de un flow a partir de eventos.
pub trait FlowRepository {
    fn load(&self, flow_id: Uuid, events: &[FlowEvent], definition: &FlowDefinition) -> Result<FlowInstance, FlowError>;
}

#[derive(Debug, Default)]
pub struct InMemoryFlowRepository;

impl InMemoryFlowRepository {
    pub fn new() -> Self {
        Self
    }
}

fn known(definition: &FlowDefinition, step_id: &str) -> Result<(), FlowError> {
    if definition.contains(step_id) {
        Ok(())
    } else {
        Err(FlowError::UnknownStep(step_id.to_string()))
    }
}

impl FlowRepository for InMemoryFlowRepository {
    fn load(&self, flow_id: Uuid, events: &[FlowEvent], definition: &FlowDefinition) -> Result<FlowInstance, FlowError> {
        let mut state: Option<FlowState> = None;
        let mut completed = false;
        let mut failed_submissions = 0;

        for ev in events.iter().filter(|e| e.flow_id == flow_id) {
            match &ev.kind {
                FlowEventKind::FlowInitialized { definition_hash,
                                                 first_step,
                                                 .. } => {
                    if *definition_hash != definition.definition_hash {
                        return Err(FlowError::Internal(format!("definition hash mismatch for flow {flow_id}")));
                    }
                    known(definition, first_step)?;
                    state = Some(FlowState::new(flow_id, first_step));
                }
                kind => {
                    let st = state.as_mut()
                                  .ok_or_else(|| FlowError::Internal(format!("flow {flow_id} has no FlowInitialized")))?;
                    match kind {
                        FlowEventKind::DraftRestored { snapshot } => {
                            known(definition, &snapshot.current_step_id)?;
                            *st = snapshot.clone();
                            st.flow_id = flow_id;
                        }
                        FlowEventKind::AnswerRecorded { step_id, value } => {
                            known(definition, step_id)?;
                            st.answers.insert(step_id.clone(), value.clone());
                        }
                        FlowEventKind::AttachmentCaptured { step_id, attachment } => {
                            known(definition, step_id)?;
                            st.attachments.entry(step_id.clone()).or_default().push(attachment.clone());
                        }
                        FlowEventKind::StepAdvanced { to, .. } | FlowEventKind::StepRetreated { to, .. } => {
                            known(definition, to)?;
                            st.current_step_id = to.clone();
                        }
                        FlowEventKind::SubmissionFailed { .. } => failed_submissions += 1,
                        FlowEventKind::FlowCompleted { .. } => completed = true,
                        FlowEventKind::NavigationBlocked { .. }
                        | FlowEventKind::SubmissionAttempted { .. }
                        | FlowEventKind::FlowInitialized { .. } => {}
                    }
                }
            }
        }

        let state = state.ok_or_else(|| FlowError::Internal(format!("flow {flow_id} has no FlowInitialized")))?;
        Ok(FlowInstance { state,
                          completed,
                          failed_submissions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::FormStep;

    fn steps(ids: &[&str]) -> Vec<Box<dyn StepDefinition>> {
        ids.iter().map(|id| Box::new(FormStep::new(*id)) as Box<dyn StepDefinition>).collect()
    }

    #[test]
    fn definition_is_only_built_through_validation() {
        assert!(matches!(build_flow_definition("empty", Vec::new()), Err(FlowError::EmptyDefinition)));
        assert!(matches!(build_flow_definition("dup", steps(&["vehicle", "slot", "vehicle"])),
                         Err(FlowError::DuplicateStep(id)) if id == "vehicle"));

        let def = build_flow_definition("schedule_maintenance", steps(&["vehicle", "slot"])).unwrap();
        assert_eq!(def.name(), "schedule_maintenance");
        assert_eq!(def.steps().len(), 2);
        assert_eq!(def.first_step_id(), "vehicle");
        assert_eq!(def.definition_hash().len(), 64);
    }
}
