//! Errores del cliente de tracking.
//!
//! Todos son fallos de validación o de estado detectados localmente y
//! devueltos síncronos al llamador; ninguno se reintenta ni se traga.
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum TrackingError {
    #[error("invalid run id '{0}': must start with an alphanumeric and contain only alphanumerics, '_' or '-'")]
    InvalidRunId(String),
    #[error("run {active_run_id} is already active; end it first or pass nested=true to start a nested run")]
    NestedRunConflict { active_run_id: String },
    #[error("cannot resume run {run_id}: it belongs to experiment {run_experiment_id} but experiment {active_experiment_id} is active")]
    ExperimentMismatch {
        run_id: String,
        active_experiment_id: String,
        run_experiment_id: String,
    },
    #[error("cannot start run {0}: it is in the deleted state")]
    DeletedRun(String),
    #[error("cannot activate experiment '{0}': it is in the deleted state; restore it or delete it permanently first")]
    DeletedExperiment(String),
    #[error("invalid models uri '{0}': expected models:[//authority]/<name>/<version-or-stage>")]
    InvalidModelUri(String),
    #[error("invalid runs uri '{0}': expected runs:/<run-id>[/relative/path]")]
    InvalidRunsUri(String),
    #[error("no model version of '{name}' found for stage '{stage}'")]
    NoModelVersionForStage { name: String, stage: String },
    #[error("invalid profile '{0}': expected 'key' or 'key:secret' (at most one colon)")]
    InvalidProfile(String),
    #[error("no run is active")]
    EmptyStack,
    #[error("unsupported artifact uri scheme '{0}'")]
    UnsupportedScheme(String),

    // Fallos reportados por los colaboradores (store/registry).
    #[error("run {0} not found")]
    RunNotFound(String),
    #[error("experiment {0} not found")]
    ExperimentNotFound(String),
    #[error("experiment name '{0}' is already taken by a non-deleted experiment")]
    DuplicateExperimentName(String),
    #[error("param '{key}' of run {run_id} is already logged with value '{old}'; cannot overwrite with '{new}'")]
    ParamValueConflict {
        run_id: String,
        key: String,
        old: String,
        new: String,
    },
    #[error("model version {version} of '{name}' not found")]
    ModelVersionNotFound { name: String, version: String },
    #[error("invalid page token '{0}'")]
    InvalidPageToken(String),
}
