//! Trackflow Rust Library
//!
//! Este crate actúa como la fachada de Trackflow:
//! - Re-exporta la sesión de tracking y sus colaboradores (`track-core`).
//! - Re-exporta las entidades (`track-domain`) y la resolución de artifacts
//!   (`track-adapters`).
//! - Expone `config` con la configuración perezosa del proceso.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod config;

pub use track_adapters::{artifact_uri_for_run, ArtifactRepository, ArtifactResolver, ModelUri, RepositoryScheme,
                         RunsUri, VersionOrStage};
pub use track_core::{BackendStore, ContextTagRegistry, EnvVars, InMemoryModelRegistry, InMemoryStore, MapEnv,
                     ModelRegistry, ProcessEnv, StartRunOptions, TrackingError, TrackingSession};
pub use track_domain::{Experiment, LifecycleStage, Metric, ModelVersion, PagedList, Param, Run, RunData, RunInfo,
                       RunStatus, RunTag, ViewType};

#[cfg(test)]
mod tests {
    use super::TrackingError;

    #[test]
    fn tracking_error_messages_name_the_offender() {
        let e = TrackingError::InvalidModelUri("models:/x".into()).to_string();
        assert!(e.contains("models:/x"));
        let e = TrackingError::DeletedRun("abc".into()).to_string();
        assert!(e.contains("abc"));
        let e = TrackingError::EmptyStack.to_string();
        assert_eq!(e, "no run is active");
    }
}
