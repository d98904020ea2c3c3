//! Experimento: agrupa runs bajo un nombre único entre no-borrados.
use serde::{Deserialize, Serialize};

use crate::run::LifecycleStage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experiment {
    /// Id asignado por el store. El id "0" (experimento por defecto) es
    /// legítimo: la presencia se comprueba sobre el objeto, nunca sobre la
    /// "veracidad" del id.
    pub experiment_id: String,
    pub name: String,
    /// Raíz bajo la que los runs de este experimento ubican sus artifacts.
    pub artifact_location: String,
    pub lifecycle_stage: LifecycleStage,
}

impl Experiment {
    pub fn is_active(&self) -> bool {
        self.lifecycle_stage == LifecycleStage::Active
    }
}
