//! Cálculo puro de navegación sobre una definición.
//!
//! El primer step declarado es el punto de entrada y cuenta siempre como
//! aplicable; el resto se incluye según `StepDefinition::is_applicable`.
use crate::model::Answers;
use crate::repo::FlowDefinition;

pub fn is_applicable_at(definition: &FlowDefinition, answers: &Answers, index: usize) -> bool {
    index == 0 || definition.step_at(index).is_some_and(|s| s.is_applicable(answers))
}

/// Siguiente step aplicable después de `current`.
pub fn next_index(definition: &FlowDefinition, answers: &Answers, current: usize) -> Option<usize> {
    (current + 1..definition.len()).find(|&i| is_applicable_at(definition, answers, i))
}

/// Step aplicable anterior a `current`.
pub fn previous_index(definition: &FlowDefinition, answers: &Answers, current: usize) -> Option<usize> {
    (0..current.min(definition.len())).rev().find(|&i| is_applicable_at(definition, answers, i))
}

/// `(posición + 1) / total` contando sólo los steps aplicables. El step actual
/// cuenta siempre, aunque las respuestas lo hayan vuelto no aplicable.
pub fn progress_fraction(definition: &FlowDefinition, answers: &Answers, current: usize) -> f64 {
    let visible: Vec<usize> = (0..definition.len()).filter(|&i| i == current || is_applicable_at(definition, answers, i))
                                                   .collect();
    if visible.is_empty() {
        return 0.0;
    }
    let position = visible.iter().filter(|&&i| i <= current).count();
    position as f64 / visible.len() as f64
}
