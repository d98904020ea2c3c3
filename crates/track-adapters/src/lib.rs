//! track-adapters: resolución de URIs de artifacts a repositorios concretos.
//!
//! Las tres formas reconocidas de URI (`runs:/...`, `models:/...` y las
//! nativas del backend, todo lo demás) se despachan sobre un conjunto
//! cerrado de repositorios. Las formas indirectas se resuelven en el momento
//! de construir el repositorio: `runs:` consulta el backend store y
//! `models:` consulta el registry (y reescribe credenciales si aplica).
pub mod repo;
pub mod uri;

pub use repo::{artifact_uri_for_run, ArtifactRepository, ArtifactResolver, RepositoryScheme};
pub use uri::{ModelUri, RunsUri, VersionOrStage};
