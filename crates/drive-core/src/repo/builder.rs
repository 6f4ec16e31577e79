//! Builder para `FlowDefinition`.
//!
//! Obliga a declarar el primer step antes de poder construir, de modo que una
//! definición creada con el builder nunca está vacía. Los ids duplicados se
//! siguen comprobando en `build`.
//!
//! ```ignore
//! let def = FlowDefinition::builder("medical_emergency")
//!     .first_step(FormStep::new("type"))
//!     .add_step(FormStep::new("assessment"))
//!     .build()?;
//! ```

use crate::errors::FlowError;
use crate::repo::{build_flow_definition, FlowDefinition};
use crate::step::StepDefinition;

/// Estado inicial del builder: sólo conoce el nombre del flujo.
#[derive(Debug)]
pub struct DefinitionBuilderInit {
    name: String,
}

/// Builder con al menos un step declarado.
pub struct DefinitionBuilder {
    name: String,
    steps: Vec<Box<dyn StepDefinition>>,
}

impl FlowDefinition {
    pub fn builder(name: impl Into<String>) -> DefinitionBuilderInit {
        DefinitionBuilderInit { name: name.into() }
    }
}

impl DefinitionBuilderInit {
    #[inline]
    pub fn first_step(self, step: impl StepDefinition + 'static) -> DefinitionBuilder {
        DefinitionBuilder { name: self.name,
                            steps: vec![Box::new(step)] }
    }
}

impl DefinitionBuilder {
    #[inline]
    pub fn add_step(mut self, step: impl StepDefinition + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn build(self) -> Result<FlowDefinition, FlowError> {
        build_flow_definition(&self.name, self.steps)
    }
}
