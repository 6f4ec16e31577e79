//! Guiones de acciones para recorrer un flujo desde la terminal.
//!
//! Un guion es un arreglo JSON; cada elemento es una acción etiquetada:
//!
//! ```json
//! [
//!   {"action": "field", "step": "type", "field": "emergencyType", "value": "injury"},
//!   {"action": "next"},
//!   {"action": "capture", "step": "evidence", "kind": "photo", "value": "IMG_001.jpg"},
//!   {"action": "submit"}
//! ]
//! ```

use std::path::Path;

use anyhow::Context;
use drive_core::{AttachmentKind, CollectingNotifier, EventStore, FlowController, FlowError, Submitter, Transition};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Answer { step: String, value: Value },
    Field { step: String, field: String, value: Value },
    Capture { step: String, kind: AttachmentKind, value: String },
    Next,
    Previous,
    Submit,
    SaveDraft,
}

pub fn parse_script(raw: &str) -> anyhow::Result<Vec<Action>> {
    serde_json::from_str(raw).context("script must be a JSON array of actions")
}

pub fn load_script(path: &Path) -> anyhow::Result<Vec<Action>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))?;
    parse_script(&raw)
}

/// Ejecuta las acciones en orden y devuelve una línea por acción (más las
/// notificaciones que produjo). Los errores de una acción no detienen el
/// guion: se reportan y se sigue, como haría un usuario.
pub async fn run_actions<E: EventStore>(ctl: &mut FlowController<E>,
                                        actions: &[Action],
                                        submitter: &dyn Submitter,
                                        notifier: &CollectingNotifier)
                                        -> Vec<String> {
    let mut out = Vec::with_capacity(actions.len());
    for (i, action) in actions.iter().enumerate() {
        let line = match apply(ctl, action, submitter).await {
            Ok(msg) => format!("#{i:02} {msg}"),
            Err(e) => format!("#{i:02} error: {e}"),
        };
        out.push(line);
        for n in notifier.take() {
            out.push(format!("    [{:?}] {}: {}", n.variant, n.title, n.description));
        }
    }
    out
}

async fn apply<E: EventStore>(ctl: &mut FlowController<E>,
                              action: &Action,
                              submitter: &dyn Submitter)
                              -> Result<String, FlowError> {
    match action {
        Action::Answer { step, value } => {
            ctl.set_answer(step, value.clone())?;
            Ok(format!("answer {step}"))
        }
        Action::Field { step, field, value } => {
            ctl.set_field(step, field, value.clone())?;
            Ok(format!("field {step}.{field} = {value}"))
        }
        Action::Capture { step, kind, value } => {
            let att = ctl.capture(step, *kind, value)?;
            Ok(format!("capture {step} {} ({} total)", att.kind, ctl.list_for(step).len()))
        }
        Action::Next => ctl.go_to_next().map(|t| describe("next", &t)),
        Action::Previous => ctl.go_to_previous().map(|t| describe("previous", &t)),
        Action::Submit => {
            let ack = ctl.submit(submitter).await?;
            Ok(format!("submitted, reference {}", ack.reference))
        }
        Action::SaveDraft => {
            ctl.save_draft()?;
            Ok(format!("draft saved at '{}'", ctl.state().current_step_id()))
        }
    }
}

fn describe(verb: &str, t: &Transition) -> String {
    match t {
        Transition::Moved { from, to } => format!("{verb}: {from} -> {to}"),
        Transition::Unchanged => format!("{verb}: unchanged"),
    }
}
