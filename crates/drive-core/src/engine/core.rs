//! `FlowController`: dueño exclusivo de una ejecución de flujo.
//!
//! Responsable de
//! - mantener el `FlowState` (step actual, respuestas, capturas),
//! - aplicar los gates antes de avanzar,
//! - emitir un evento por cada cambio al `EventStore`,
//! - agregar y enviar el payload en el step terminal.
//!
//! Todas las transiciones son síncronas salvo `submit`/`advance`, que esperan
//! al `Submitter`. Ningún error altera el estado: un envío fallido deja el
//! flujo en el step terminal, listo para reintentar.

use log::{debug, error, warn};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::constants::GENERIC_FAILURE_TITLE;
use crate::engine::navigation;
use crate::errors::{FlowError, ValidationError};
use crate::event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
use crate::media::FinishedRecording;
use crate::model::{merge_answer, AttachmentKind, AttachmentRef, DraftSnapshot, FlowState};
use crate::notify::{LogNotifier, Notification, NotificationVariant, Notifier};
use crate::repo::{FlowDefinition, FlowInstance, FlowRepository, InMemoryFlowRepository};
use crate::step::StepDefinition;
use crate::storage::{load_as, save_as, Storage};
use crate::submit::{build_payload, SubmissionAck, Submitter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStatus {
    InProgress,
    Completed(SubmissionAck),
}

/// Resultado de una acción de navegación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved { from: String, to: String },
    /// En el límite (primer o último step): no hubo cambio.
    Unchanged,
}

/// Acción del botón principal en el step actual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    Next,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Navigated(Transition),
    Submitted(SubmissionAck),
}

struct DraftSlot {
    storage: Box<dyn Storage>,
    key: String,
}

pub struct FlowController<E: EventStore = InMemoryEventStore> {
    definition: FlowDefinition,
    state: FlowState,
    current: usize,
    status: FlowStatus,
    event_store: E,
    notifier: Box<dyn Notifier>,
    draft: Option<DraftSlot>,
    restored: bool,
}

impl FlowController<InMemoryEventStore> {
    /// Inicia un flujo nuevo en el primer step declarado, con eventos en
    /// memoria y notificaciones al log.
    pub fn new(definition: FlowDefinition) -> Self {
        Self::with_event_store(definition, InMemoryEventStore::default())
    }

    /// Reanuda el borrador guardado bajo `key`, o inicia un flujo nuevo si no
    /// existe. En ambos casos el storage queda asociado para `save_draft`.
    pub fn resume(definition: FlowDefinition,
                  storage: impl Storage + 'static,
                  key: impl Into<String>)
                  -> Result<Self, FlowError> {
        Self::resume_with_event_store(definition, InMemoryEventStore::default(), storage, key)
    }
}

impl<E: EventStore> FlowController<E> {
    pub fn with_event_store(definition: FlowDefinition, event_store: E) -> Self {
        Self::start(definition, event_store, Uuid::new_v4())
    }

    fn start(definition: FlowDefinition, mut event_store: E, flow_id: Uuid) -> Self {
        let first = definition.first_step_id().to_string();
        event_store.append_kind(flow_id,
                                FlowEventKind::FlowInitialized { flow_name: definition.name().to_string(),
                                                                 definition_hash: definition.definition_hash().to_string(),
                                                                 step_count: definition.len(),
                                                                 first_step: first.clone() });
        debug!("[flow {flow_id}] '{}' started at '{first}'", definition.name());
        Self { state: FlowState::new(flow_id, &first),
               definition,
               current: 0,
               status: FlowStatus::InProgress,
               event_store,
               notifier: Box::new(LogNotifier),
               draft: None,
               restored: false }
    }

    pub fn resume_with_event_store(definition: FlowDefinition,
                                   event_store: E,
                                   storage: impl Storage + 'static,
                                   key: impl Into<String>)
                                   -> Result<Self, FlowError> {
        let key = key.into();
        let Some(draft) = load_as::<DraftSnapshot>(&storage, &key)? else {
            return Ok(Self::with_event_store(definition, event_store).with_storage(storage, key));
        };
        if draft.definition_hash != definition.definition_hash() {
            return Err(FlowError::DefinitionMismatch { expected: definition.name().to_string(),
                                                       found: draft.flow });
        }
        let snapshot = draft.state;
        let current = definition.position(&snapshot.current_step_id)
                                .ok_or_else(|| FlowError::UnknownStep(snapshot.current_step_id.clone()))?;
        if let Some(unknown) = snapshot.answers
                                       .keys()
                                       .chain(snapshot.attachments.keys())
                                       .find(|id| !definition.contains(id))
        {
            return Err(FlowError::UnknownStep(unknown.clone()));
        }

        let flow_id = snapshot.flow_id;
        let mut ctl = Self::start(definition, event_store, flow_id);
        ctl.event_store
           .append_kind(flow_id, FlowEventKind::DraftRestored { snapshot: snapshot.clone() });
        debug!("[flow {flow_id}] draft '{key}' restored at '{}'", snapshot.current_step_id);
        ctl.state = snapshot;
        ctl.current = current;
        ctl.restored = true;
        Ok(ctl.with_storage(storage, key))
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_storage(mut self, storage: impl Storage + 'static, key: impl Into<String>) -> Self {
        self.draft = Some(DraftSlot { storage: Box::new(storage),
                                      key: key.into() });
        self
    }

    // --- lecturas -------------------------------------------------------

    pub fn flow_id(&self) -> Uuid {
        self.state.flow_id
    }

    pub fn definition(&self) -> &FlowDefinition {
        &self.definition
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn status(&self) -> &FlowStatus {
        &self.status
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, FlowStatus::Completed(_))
    }

    /// `true` si el estado proviene de un borrador persistido.
    pub fn is_restored(&self) -> bool {
        self.restored
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Option<&dyn StepDefinition> {
        self.definition.step_at(self.current)
    }

    pub fn progress_fraction(&self) -> f64 {
        navigation::progress_fraction(&self.definition, &self.state.answers, self.current)
    }

    /// No hay steps aplicables después del actual.
    pub fn is_terminal(&self) -> bool {
        navigation::next_index(&self.definition, &self.state.answers, self.current).is_none()
    }

    pub fn primary_action(&self) -> PrimaryAction {
        if self.is_terminal() {
            PrimaryAction::Submit
        } else {
            PrimaryAction::Next
        }
    }

    /// Habilitación del botón principal (gate del step actual).
    pub fn can_proceed(&self) -> bool {
        self.check_current_gate().is_ok()
    }

    pub fn list_for(&self, step_id: &str) -> &[AttachmentRef] {
        self.state.list_for(step_id)
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    pub fn events(&self) -> Vec<FlowEvent> {
        self.event_store.list(self.state.flow_id)
    }

    /// Variante compacta de eventos (ver `FlowEventKind::variant`).
    pub fn event_variants(&self) -> Vec<&'static str> {
        self.events().iter().map(|e| e.kind.variant()).collect()
    }

    /// Reconstruye el estado desde el log de eventos.
    pub fn replay(&self) -> Result<FlowInstance, FlowError> {
        InMemoryFlowRepository::new().load(self.state.flow_id, &self.events(), &self.definition)
    }

    // --- validación -----------------------------------------------------

    fn validate_step(&self, index: usize) -> Result<(), ValidationError> {
        match self.definition.step_at(index) {
            Some(step) => step.validate(&self.state).map_err(|reason| ValidationError::new(step.id(), reason)),
            None => Ok(()),
        }
    }

    pub fn validate_current(&self) -> Result<(), ValidationError> {
        self.validate_step(self.current)
    }

    /// Gate que decide el avance: un step que las respuestas volvieron no
    /// aplicable ya no bloquea.
    fn check_current_gate(&self) -> Result<(), ValidationError> {
        if navigation::is_applicable_at(&self.definition, &self.state.answers, self.current) {
            self.validate_current()
        } else {
            Ok(())
        }
    }

    /// Valida todos los steps aplicables, en orden; devuelve el primer fallo.
    pub fn validate_all(&self) -> Result<(), ValidationError> {
        (0..self.definition.len()).filter(|&i| navigation::is_applicable_at(&self.definition, &self.state.answers, i))
                                  .try_for_each(|i| self.validate_step(i))
    }

    // --- mutaciones -----------------------------------------------------

    fn ensure_in_progress(&self) -> Result<(), FlowError> {
        match self.status {
            FlowStatus::InProgress => Ok(()),
            FlowStatus::Completed(_) => Err(FlowError::FlowCompleted),
        }
    }

    fn ensure_known(&self, step_id: &str) -> Result<(), FlowError> {
        if self.definition.contains(step_id) {
            Ok(())
        } else {
            Err(FlowError::UnknownStep(step_id.to_string()))
        }
    }

    fn append(&mut self, kind: FlowEventKind) {
        self.event_store.append_kind(self.state.flow_id, kind);
    }

    fn notify(&self, title: &str, description: &str, variant: NotificationVariant) {
        self.notifier.notify(Notification::new(title, description, variant));
    }

    /// Reemplaza la respuesta completa de un step.
    pub fn set_answer(&mut self, step_id: &str, value: Value) -> Result<(), FlowError> {
        self.ensure_in_progress()?;
        self.ensure_known(step_id)?;
        self.record_answer(step_id, value);
        Ok(())
    }

    /// Actualiza un campo de la respuesta (objeto) de un step.
    pub fn set_field(&mut self, step_id: &str, field: &str, value: Value) -> Result<(), FlowError> {
        self.ensure_in_progress()?;
        self.ensure_known(step_id)?;
        let mut patch = Map::new();
        patch.insert(field.to_string(), value);
        let merged = merge_answer(self.state.answers.get(step_id), patch);
        self.record_answer(step_id, merged);
        Ok(())
    }

    fn record_answer(&mut self, step_id: &str, value: Value) {
        self.state.answers.insert(step_id.to_string(), value.clone());
        self.append(FlowEventKind::AnswerRecorded { step_id: step_id.to_string(),
                                                    value });
        debug!("[flow {}] answer recorded for '{step_id}'", self.state.flow_id);
    }

    /// Agrega una captura al final de la lista del step. Nunca sobrescribe.
    pub fn capture(&mut self,
                   step_id: &str,
                   kind: AttachmentKind,
                   value: impl Into<String>)
                   -> Result<AttachmentRef, FlowError> {
        self.ensure_in_progress()?;
        self.ensure_known(step_id)?;
        let value = value.into();
        if value.trim().is_empty() {
            let err = ValidationError::new(step_id, format!("the {kind} is empty"));
            self.notify("Nothing captured", &err.reason, NotificationVariant::Destructive);
            return Err(err.into());
        }
        let attachment = AttachmentRef::new(kind, value);
        self.state
            .attachments
            .entry(step_id.to_string())
            .or_default()
            .push(attachment.clone());
        self.append(FlowEventKind::AttachmentCaptured { step_id: step_id.to_string(),
                                                        attachment: attachment.clone() });
        debug!("[flow {}] {kind} captured for '{step_id}' (total {})",
               self.state.flow_id,
               self.state.list_for(step_id).len());
        Ok(attachment)
    }

    pub fn capture_recording(&mut self, step_id: &str, recording: FinishedRecording) -> Result<AttachmentRef, FlowError> {
        self.capture(step_id, recording.kind, recording.value)
    }

    fn block(&mut self, err: &ValidationError) {
        warn!("[flow {}] '{}' blocked: {}", self.state.flow_id, err.step_id, err.reason);
        self.append(FlowEventKind::NavigationBlocked { step_id: err.step_id.clone(),
                                                       reason: err.reason.clone() });
        self.notify("Missing information", &err.reason, NotificationVariant::Destructive);
    }

    fn report_internal(&self, err: &FlowError) {
        error!("[flow {}] unexpected failure: {err}", self.state.flow_id);
        self.notify(GENERIC_FAILURE_TITLE, "Please try again.", NotificationVariant::Destructive);
    }

    fn move_to(&mut self, index: usize, forward: bool) -> Transition {
        let Some(step) = self.definition.step_at(index) else {
            return Transition::Unchanged;
        };
        let to = step.id().to_string();
        let from = std::mem::replace(&mut self.state.current_step_id, to.clone());
        self.current = index;
        let kind = if forward {
            FlowEventKind::StepAdvanced { from: from.clone(),
                                          to: to.clone() }
        } else {
            FlowEventKind::StepRetreated { from: from.clone(),
                                           to: to.clone() }
        };
        self.append(kind);
        debug!("[flow {}] '{from}' -> '{to}'", self.state.flow_id);
        Transition::Moved { from, to }
    }

    /// Avanza al siguiente step aplicable si el gate del actual lo permite.
    /// En el step terminal no hace nada: ahí corresponde `submit`.
    pub fn go_to_next(&mut self) -> Result<Transition, FlowError> {
        self.ensure_in_progress()?;
        let Some(next) = navigation::next_index(&self.definition, &self.state.answers, self.current) else {
            return Ok(Transition::Unchanged);
        };
        if let Err(err) = self.check_current_gate() {
            self.block(&err);
            return Err(err.into());
        }
        Ok(self.move_to(next, true))
    }

    /// Retrocede al step aplicable anterior. No-op en el primero.
    pub fn go_to_previous(&mut self) -> Result<Transition, FlowError> {
        self.ensure_in_progress()?;
        match navigation::previous_index(&self.definition, &self.state.answers, self.current) {
            Some(prev) => Ok(self.move_to(prev, false)),
            None => Ok(Transition::Unchanged),
        }
    }

    /// Envía el payload agregado. Sólo desde el step terminal y con todos los
    /// steps aplicables validados.
    pub async fn submit(&mut self, submitter: &dyn Submitter) -> Result<SubmissionAck, FlowError> {
        self.ensure_in_progress()?;
        if !self.is_terminal() {
            return Err(FlowError::NotAtTerminalStep(self.state.current_step_id.clone()));
        }
        if let Err(err) = self.validate_all() {
            self.block(&err);
            return Err(err.into());
        }
        let payload = match build_payload(&self.definition, &self.state) {
            Ok(p) => p,
            Err(e) => {
                self.report_internal(&e);
                return Err(e);
            }
        };
        let payload_hash = payload.payload_hash.clone();
        self.append(FlowEventKind::SubmissionAttempted { payload_hash: payload_hash.clone() });

        match submitter.submit(&payload).await {
            Ok(ack) => {
                self.append(FlowEventKind::FlowCompleted { payload_hash,
                                                           reference: ack.reference.clone() });
                self.notify("Submitted",
                            &format!("Reference {}", ack.reference),
                            NotificationVariant::Success);
                if let Some(d) = &self.draft {
                    if let Err(e) = d.storage.remove(&d.key) {
                        warn!("[flow {}] could not remove draft '{}': {e}", self.state.flow_id, d.key);
                    }
                }
                debug!("[flow {}] completed with reference {}", self.state.flow_id, ack.reference);
                self.status = FlowStatus::Completed(ack.clone());
                Ok(ack)
            }
            Err(error) => {
                warn!("[flow {}] submission failed: {error}", self.state.flow_id);
                self.append(FlowEventKind::SubmissionFailed { payload_hash,
                                                              error: error.clone() });
                self.notify("Submission failed", &error.to_string(), NotificationVariant::Destructive);
                Err(FlowError::Submission(error))
            }
        }
    }

    /// Botón principal: navega en steps intermedios, envía en el terminal.
    pub async fn advance(&mut self, submitter: &dyn Submitter) -> Result<Advance, FlowError> {
        if self.is_terminal() {
            self.submit(submitter).await.map(Advance::Submitted)
        } else {
            self.go_to_next().map(Advance::Navigated)
        }
    }

    // --- borradores -----------------------------------------------------

    /// Persiste el estado actual bajo la clave configurada.
    pub fn save_draft(&mut self) -> Result<(), FlowError> {
        self.ensure_in_progress()?;
        let res = match &self.draft {
            Some(d) => {
                let draft = DraftSnapshot { flow: self.definition.name().to_string(),
                                            definition_hash: self.definition.definition_hash().to_string(),
                                            state: self.state.clone() };
                save_as(d.storage.as_ref(), &d.key, &draft)
            }
            None => return Err(FlowError::Storage("no storage configured".into())),
        };
        match &res {
            Ok(()) => debug!("[flow {}] draft saved", self.state.flow_id),
            Err(e) => self.report_internal(e),
        }
        res
    }

    /// Elimina el borrador persistido (si hay storage).
    pub fn discard_draft(&mut self) -> Result<(), FlowError> {
        match &self.draft {
            Some(d) => d.storage.remove(&d.key),
            None => Ok(()),
        }
    }
}
