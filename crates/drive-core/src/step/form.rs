//! `FormStep`: step declarativo compuesto por gates y un predicado de
//! aplicabilidad opcional. Cubre todos los formularios de los flujos actuales.
use std::fmt;

use super::StepDefinition;
use crate::gate::Gate;
use crate::model::{Answers, FlowState};

type Applicability = Box<dyn Fn(&Answers) -> bool + Send + Sync>;

pub struct FormStep {
    id: String,
    title: String,
    gates: Vec<Box<dyn Gate>>,
    applicable: Option<Applicability>,
}

impl FormStep {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self { title: id.clone(),
               id,
               gates: Vec::new(),
               applicable: None }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Añade un gate; se evalúan en orden de declaración.
    pub fn gate(mut self, gate: impl Gate + 'static) -> Self {
        self.gates.push(Box::new(gate));
        self
    }

    pub fn applicable_when(mut self, pred: impl Fn(&Answers) -> bool + Send + Sync + 'static) -> Self {
        self.applicable = Some(Box::new(pred));
        self
    }
}

impl fmt::Debug for FormStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormStep")
         .field("id", &self.id)
         .field("title", &self.title)
         .field("gates", &self.gates.len())
         .field("conditional", &self.applicable.is_some())
         .finish()
    }
}

impl StepDefinition for FormStep {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn validate(&self, state: &FlowState) -> Result<(), String> {
        self.gates.iter().try_for_each(|g| g.check(&self.id, state))
    }

    fn is_applicable(&self, answers: &Answers) -> bool {
        self.applicable.as_ref().map_or(true, |p| p(answers))
    }
}
