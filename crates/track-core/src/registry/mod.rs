//! Contrato del registry de modelos.
//!
//! La resolución de URIs `models:` consulta este colaborador dos maneras:
//! por versión exacta (RPC de download uri) o por stage (última versión del
//! stage, usando su campo `source` directamente). La implementación real
//! vive fuera del workspace; aquí la referencia en memoria.
use track_domain::ModelVersion;

use crate::errors::TrackingError;

pub trait ModelRegistry {
    /// URI de descarga para una versión concreta de un modelo.
    fn get_model_version_download_uri(&self, name: &str, version: u64) -> Result<String, TrackingError>;

    /// Última versión registrada de `name` por cada stage pedido. Stages sin
    /// versiones simplemente no aportan elementos al resultado.
    fn get_latest_versions(&self, name: &str, stages: &[String]) -> Result<Vec<ModelVersion>, TrackingError>;
}

/// Registry en memoria para tests y demos.
#[derive(Debug, Default)]
pub struct InMemoryModelRegistry {
    versions: Vec<ModelVersion>,
}

impl InMemoryModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, version: ModelVersion) {
        self.versions.push(version);
    }

    pub fn with_version(mut self, version: ModelVersion) -> Self {
        self.register(version);
        self
    }
}

impl ModelRegistry for InMemoryModelRegistry {
    fn get_model_version_download_uri(&self, name: &str, version: u64) -> Result<String, TrackingError> {
        let wanted = version.to_string();
        self.versions
            .iter()
            .find(|v| v.name == name && v.version == wanted)
            .map(|v| v.source.clone())
            .ok_or_else(|| TrackingError::ModelVersionNotFound { name: name.to_string(),
                                                                 version: wanted })
    }

    fn get_latest_versions(&self, name: &str, stages: &[String]) -> Result<Vec<ModelVersion>, TrackingError> {
        let mut latest: Vec<ModelVersion> = Vec::new();
        for stage in stages {
            let newest = self.versions
                             .iter()
                             .filter(|v| v.name == name && &v.current_stage == stage)
                             .max_by_key(|v| v.version_number().unwrap_or(0));
            if let Some(v) = newest {
                latest.push(v.clone());
            }
        }
        Ok(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(name: &str, version: &str, stage: &str, source: &str) -> ModelVersion {
        ModelVersion { name: name.into(),
                       version: version.into(),
                       current_stage: stage.into(),
                       source: source.into(),
                       run_id: "run0".into() }
    }

    #[test]
    fn latest_version_per_stage_wins() {
        let registry = InMemoryModelRegistry::new().with_version(version("m", "1", "Production", "dfs:/reg/m/1"))
                                                   .with_version(version("m", "3", "Production", "dfs:/reg/m/3"))
                                                   .with_version(version("m", "2", "Staging", "dfs:/reg/m/2"));
        let latest = registry.get_latest_versions("m", &["Production".to_string()]).unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].version, "3");
    }

    #[test]
    fn stage_without_versions_yields_empty() {
        let registry = InMemoryModelRegistry::new().with_version(version("m", "1", "Staging", "dfs:/reg/m/1"));
        let latest = registry.get_latest_versions("m", &["Production".to_string()]).unwrap();
        assert!(latest.is_empty());
    }

    #[test]
    fn download_uri_for_missing_version_fails() {
        let registry = InMemoryModelRegistry::new();
        let err = registry.get_model_version_download_uri("m", 7).unwrap_err();
        assert_eq!(err,
                   TrackingError::ModelVersionNotFound { name: "m".into(),
                                                         version: "7".into() });
    }
}
