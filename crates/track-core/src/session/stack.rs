//! Pila de runs activos.
//!
//! LIFO puro: el tope es el run "actual". La validación de anidado ocurre en
//! la sesión antes de hacer push; la pila no re-valida.
use track_domain::Run;

use crate::errors::TrackingError;

#[derive(Debug, Default)]
pub struct RunStack {
    runs: Vec<Run>,
}

impl RunStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, run: Run) {
        self.runs.push(run);
    }

    pub fn pop(&mut self) -> Result<Run, TrackingError> {
        self.runs.pop().ok_or(TrackingError::EmptyStack)
    }

    /// Tope de la pila sin efectos secundarios.
    pub fn active(&self) -> Option<&Run> {
        self.runs.last()
    }

    /// Run raíz (fondo de la pila); se usa en mensajes de error de anidado.
    pub fn root(&self) -> Option<&Run> {
        self.runs.first()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.runs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use track_domain::{LifecycleStage, RunData, RunInfo, RunStatus};

    fn run(id: &str) -> Run {
        Run { info: RunInfo { run_id: id.to_string(),
                              experiment_id: "0".to_string(),
                              status: RunStatus::Running,
                              lifecycle_stage: LifecycleStage::Active,
                              artifact_uri: format!("file:///trackflow/0/{id}/artifacts"),
                              start_time: Utc::now(),
                              end_time: None },
              data: RunData::default() }
    }

    #[test]
    fn pop_on_empty_stack_fails() {
        let mut stack = RunStack::new();
        assert_eq!(stack.pop().unwrap_err(), TrackingError::EmptyStack);
    }

    #[test]
    fn lifo_ordering() {
        let mut stack = RunStack::new();
        stack.push(run("a"));
        stack.push(run("b"));
        assert_eq!(stack.active().unwrap().info.run_id, "b");
        assert_eq!(stack.root().unwrap().info.run_id, "a");
        assert_eq!(stack.pop().unwrap().info.run_id, "b");
        assert_eq!(stack.pop().unwrap().info.run_id, "a");
        assert!(stack.is_empty());
    }
}
