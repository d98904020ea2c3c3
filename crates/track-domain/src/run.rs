//! Run: unidad de trabajo experimental.
//!
//! Un `Run` pertenece a exactamente un experimento y acumula parámetros
//! (write-once por clave), métricas (historial ordenado por clave) y tags
//! (mutables/borrables). La identidad `run_id` la asigna el backend store;
//! este crate no genera ids.
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Estado mutable de un run. `Finished`/`Failed`/`Killed` son terminales
/// dentro de una sesión, pero un run puede reabrirse después por id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Scheduled,
    Running,
    Finished,
    Failed,
    Killed,
}

impl RunStatus {
    /// Forma textual estable (se usa en tags y salidas de CLI).
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Scheduled => "SCHEDULED",
            RunStatus::Running => "RUNNING",
            RunStatus::Finished => "FINISHED",
            RunStatus::Failed => "FAILED",
            RunStatus::Killed => "KILLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Finished | RunStatus::Failed | RunStatus::Killed)
    }
}

/// Etapa de ciclo de vida de runs y experimentos. `Deleted` es un soft
/// delete: la entidad sigue existiendo en el store pero no acepta trabajo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleStage {
    Active,
    Deleted,
}

/// Ámbito de visibilidad al listar runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewType {
    ActiveOnly,
    DeletedOnly,
    All,
}

impl ViewType {
    pub fn matches(&self, stage: LifecycleStage) -> bool {
        match self {
            ViewType::ActiveOnly => stage == LifecycleStage::Active,
            ViewType::DeletedOnly => stage == LifecycleStage::Deleted,
            ViewType::All => true,
        }
    }
}

/// Metadatos de un run (sin params/métricas/tags).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub run_id: String,
    pub experiment_id: String,
    pub status: RunStatus,
    pub lifecycle_stage: LifecycleStage,
    /// Raíz absoluta de artifacts del run (la asigna el store al crearlo).
    pub artifact_uri: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Métrica puntual: cada logueo agrega una entrada al historial de su clave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub key: String,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub step: i64,
}

/// Parámetro write-once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub key: String,
    pub value: String,
}

/// Tag mutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTag {
    pub key: String,
    pub value: String,
}

/// Datos acumulados de un run. Los mapas son `IndexMap` para iteración
/// determinista (orden de inserción).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunData {
    pub params: IndexMap<String, String>,
    pub metrics: IndexMap<String, Vec<Metric>>,
    pub tags: IndexMap<String, String>,
}

impl RunData {
    /// Último valor de una métrica: mayor `step`, y a igual step el de mayor
    /// timestamp (coincide con el orden de inserción en empates exactos).
    pub fn latest_metric(&self, key: &str) -> Option<&Metric> {
        self.metrics
            .get(key)?
            .iter()
            .max_by(|a, b| a.step.cmp(&b.step).then(a.timestamp.cmp(&b.timestamp)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub info: RunInfo,
    pub data: RunData,
}
