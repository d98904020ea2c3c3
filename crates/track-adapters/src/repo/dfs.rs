//! Repositorio sobre el sistema de archivos distribuido (`dfs:`).
//!
//! Es el único backend cuya URI puede llevar autoridad `perfil@host`: la
//! resolución de `models:` la inyecta cuando hay credenciales que propagar.
use crate::uri::append_path;

#[derive(Debug, Clone)]
pub struct DfsArtifactRepository {
    artifact_uri: String,
}

impl DfsArtifactRepository {
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
