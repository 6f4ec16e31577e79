mod builder;
mod types;

pub use builder::{DefinitionBuilder, DefinitionBuilderInit};
pub use types::{build_flow_definition, FlowDefinition, FlowInstance, FlowRepository, InMemoryFlowRepository};
