//! Repositorio sobre almacenamiento de objetos (`s3:`).
use crate::uri::append_path;

#[derive(Debug, Clone)]
pub struct ObjectStoreArtifactRepository {
    artifact_uri: String,
}

impl ObjectStoreArtifactRepository {
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
