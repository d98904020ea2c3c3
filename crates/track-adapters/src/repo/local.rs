//! Repositorio sobre el sistema de archivos local (`file:` o ruta plana).
use crate::uri::append_path;

#[derive(Debug, Clone)]
pub struct LocalArtifactRepository {
    artifact_uri: String,
}

impl LocalArtifactRepository {
    pub fn new(artifact_uri: &str) -> Self {
        Self { artifact_uri: artifact_uri.to_string() }
    }

    pub fn artifact_uri(&self) -> &str {
        &self.artifact_uri
    }

    pub fn resolve(&self, artifact_path: Option<&str>) -> String {
        append_path(&self.artifact_uri, artifact_path)
    }
}
