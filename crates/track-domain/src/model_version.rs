//! Versión registrada de un modelo.
//!
//! La identidad es (`name`, `version`); `version` es inmutable una vez
//! creada, mientras que `current_stage` es una clasificación mutable
//! ("Production", "Staging", incluso la cadena literal "None").
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelVersion {
    pub name: String,
    pub version: String,
    pub current_stage: String,
    /// URI de artifact donde vive el contenido de esta versión.
    pub source: String,
    /// Run que produjo la versión.
    pub run_id: String,
}

impl ModelVersion {
    /// Versión como entero para comparar "la más reciente" por stage.
    pub fn version_number(&self) -> Option<u64> {
        self.version.parse().ok()
    }
}
