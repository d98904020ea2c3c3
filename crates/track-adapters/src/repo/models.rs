//! Repositorio para URIs de modelos registrados (`models:/...`).
//!
//! La construcción hace la resolución completa una sola vez:
//! nombre + versión → RPC de download uri del registry; nombre + stage →
//! última versión del stage y su campo `source` directamente (sin RPC de
//! download uri; asimetría del original que se conserva). La URI resuelta,
//! si es dfs, se reescribe con la autoridad de la URI de modelo o, en su
//! defecto, con la de la URI de registry configurada.
use track_core::errors::TrackingError;

use super::{ArtifactRepository, ArtifactResolver};
use crate::uri::{scheme, validate_authority, with_authority, ModelUri, VersionOrStage};

#[derive(Debug, Clone)]
pub struct ModelsArtifactRepository {
    artifact_uri: String,
    repo: Box<ArtifactRepository>,
}

impl ModelsArtifactRepository {
    pub(crate) fn resolve_uri(uri: &str, resolver: &ArtifactResolver<'_>) -> Result<Self, TrackingError> {
        let parsed = ModelUri::parse(uri)?;
        let source = match &parsed.selector {
            VersionOrStage::Version(version) => {
                resolver.registry().get_model_version_download_uri(&parsed.name, *version)?
            }
            VersionOrStage::Stage(stage) => {
                let latest = resolver.registry()
                                     .get_latest_versions(&parsed.name, std::slice::from_ref(stage))?;
                let newest = latest.first()
                                   .ok_or_else(|| TrackingError::NoModelVersionForStage { name: parsed.name.clone(),
                                                                                          stage: stage.clone() })?;
                newest.source.clone()
            }
        };
        let resolved = apply_credentials(&source, parsed.authority.as_deref(), resolver.registry_authority())?;
        let repo = resolver.repository_for(&resolved)?;
        Ok(Self { artifact_uri: uri.to_string(),
                  repo: Box::new(repo) })
    }

    /// URI `models:` original.
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

/// Sólo las URIs dfs llevan contexto de autenticación. Prioridad: autoridad
/// de la URI de modelo, luego la de la configuración de registry; sin
/// ninguna, la URI resuelta queda intacta.
fn apply_credentials(source: &str,
                     uri_authority: Option<&str>,
                     registry_authority: Option<&str>)
                     -> Result<String, TrackingError> {
    if scheme(source) != Some("dfs") {
        return Ok(source.to_string());
    }
    match uri_authority.or(registry_authority) {
        None => Ok(source.to_string()),
        Some(authority) => {
            validate_authority(authority)?;
            Ok(with_authority(source, authority))
        }
    }
}
