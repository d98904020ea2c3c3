//! Repositorio para URIs relativas a un run (`runs:/<id>[/path]`).
//!
//! En la construcción se consulta la raíz de artifacts del run en el
//! backend store y se delega en el repositorio del esquema resultante.
use track_core::errors::TrackingError;

use super::{artifact_uri_for_run, ArtifactRepository, ArtifactResolver};
use crate::uri::RunsUri;

#[derive(Debug, Clone)]
pub struct RunsArtifactRepository {
    artifact_uri: String,
    repo: Box<ArtifactRepository>,
}

impl RunsArtifactRepository {
    pub(crate) fn resolve_uri(uri: &str, resolver: &ArtifactResolver<'_>) -> Result<Self, TrackingError> {
        let parsed = RunsUri::parse(uri)?;
        let root = artifact_uri_for_run(resolver.store(), &parsed.run_id, parsed.path.as_deref())?;
        let repo = resolver.repository_for(&root)?;
        Ok(Self { artifact_uri: uri.to_string(),
                  repo: Box::new(repo) })
    }

    /// URI `runs:` original.
    pub fn artifact_uri(&self) -> &str {
        &self.artifact_uri
    }

    /// Repositorio concreto del destino resuelto.
    pub fn repo(&self) -> &ArtifactRepository {
        &self.repo
    }

    pub fn resolve(&self, artifact_path: Option<&str>) -> String {
        self.repo.resolve(artifact_path)
    }
}
