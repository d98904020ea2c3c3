//! Despacho de URIs a repositorios de artifacts.
//!
//! El conjunto de esquemas es cerrado: cada esquema mapea a exactamente un
//! tipo de repositorio por coincidencia estática de prefijo. Un esquema no
//! reconocido es un error de construcción, nunca un fallback silencioso.
mod dfs;
mod local;
mod models;
mod object_store;
mod runs;

pub use dfs::DfsArtifactRepository;
pub use local::LocalArtifactRepository;
pub use models::ModelsArtifactRepository;
pub use object_store::ObjectStoreArtifactRepository;
pub use runs::RunsArtifactRepository;

use track_core::errors::TrackingError;
use track_core::registry::ModelRegistry;
use track_core::store::BackendStore;

use crate::uri::{append_path, authority_of, scheme};

/// Conjunto cerrado de esquemas soportados.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryScheme {
    /// Rutas planas y `file:`.
    LocalFile,
    /// Sistema de archivos distribuido (`dfs:`); único esquema que acepta
    /// reescritura de credenciales.
    Dfs,
    /// Almacenamiento de objetos (`s3:`).
    ObjectStore,
    /// Relativa a un run (`runs:`); se resuelve contra el backend store.
    Runs,
    /// Relativa a un modelo registrado (`models:`); se resuelve contra el
    /// registry.
    Models,
}

impl RepositoryScheme {
    pub fn for_uri(uri: &str) -> Result<Self, TrackingError> {
        match scheme(uri) {
            None | Some("file") => Ok(RepositoryScheme::LocalFile),
            Some("dfs") => Ok(RepositoryScheme::Dfs),
            Some("s3") => Ok(RepositoryScheme::ObjectStore),
            Some("runs") => Ok(RepositoryScheme::Runs),
            Some("models") => Ok(RepositoryScheme::Models),
            Some(other) => Err(TrackingError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Repositorio concreto, una variante por esquema. Las variantes indirectas
/// (`Runs`, `Models`) envuelven el repositorio del destino ya resuelto.
#[derive(Debug, Clone)]
pub enum ArtifactRepository {
    Local(LocalArtifactRepository),
    Dfs(DfsArtifactRepository),
    ObjectStore(ObjectStoreArtifactRepository),
    Runs(RunsArtifactRepository),
    Models(ModelsArtifactRepository),
}

impl ArtifactRepository {
    /// URI con la que se construyó el repositorio (para `runs:`/`models:`
    /// es la URI original, no la resuelta).
    pub fn artifact_uri(&self) -> &str {
        match self {
            ArtifactRepository::Local(r) => r.artifact_uri(),
            ArtifactRepository::Dfs(r) => r.artifact_uri(),
            ArtifactRepository::ObjectStore(r) => r.artifact_uri(),
            ArtifactRepository::Runs(r) => r.artifact_uri(),
            ArtifactRepository::Models(r) => r.artifact_uri(),
        }
    }

    /// URI absoluta de un artifact bajo la raíz efectiva del repositorio.
    pub fn resolve(&self, artifact_path: Option<&str>) -> String {
        match self {
            ArtifactRepository::Local(r) => r.resolve(artifact_path),
            ArtifactRepository::Dfs(r) => r.resolve(artifact_path),
            ArtifactRepository::ObjectStore(r) => r.resolve(artifact_path),
            ArtifactRepository::Runs(r) => r.resolve(artifact_path),
            ArtifactRepository::Models(r) => r.resolve(artifact_path),
        }
    }

    /// Repositorio subyacente de una variante indirecta.
    pub fn underlying(&self) -> Option<&ArtifactRepository> {
        match self {
            ArtifactRepository::Runs(r) => Some(r.repo()),
            ArtifactRepository::Models(r) => Some(r.repo()),
            _ => None,
        }
    }
}

/// Resolución de URIs a repositorios contra los colaboradores inyectados.
///
/// La resolución completa (registry, credenciales, store) ocurre una sola
/// vez, al construir el repositorio; el handle resultante no consulta nada
/// más.
pub struct ArtifactResolver<'a> {
    store: &'a dyn BackendStore,
    registry: &'a dyn ModelRegistry,
    registry_uri: Option<String>,
}

impl<'a> ArtifactResolver<'a> {
    pub fn new(store: &'a dyn BackendStore, registry: &'a dyn ModelRegistry) -> Self {
        Self { store, registry, registry_uri: None }
    }

    /// URI de registry configurada en el proceso; su autoridad se propaga a
    /// las URIs dfs resueltas cuando la URI de modelo no trae una propia.
    pub fn with_registry_uri(mut self, uri: impl Into<String>) -> Self {
        self.registry_uri = Some(uri.into());
        self
    }

    pub(crate) fn store(&self) -> &'a dyn BackendStore {
        self.store
    }

    pub(crate) fn registry(&self) -> &'a dyn ModelRegistry {
        self.registry
    }

    pub(crate) fn registry_authority(&self) -> Option<&str> {
        self.registry_uri.as_deref().and_then(authority_of)
    }

    /// Construye el repositorio para una URI, resolviendo las formas
    /// indirectas en el acto.
    pub fn repository_for(&self, uri: &str) -> Result<ArtifactRepository, TrackingError> {
        match RepositoryScheme::for_uri(uri)? {
            RepositoryScheme::LocalFile => Ok(ArtifactRepository::Local(LocalArtifactRepository::new(uri))),
            RepositoryScheme::Dfs => Ok(ArtifactRepository::Dfs(DfsArtifactRepository::new(uri))),
            RepositoryScheme::ObjectStore => {
                Ok(ArtifactRepository::ObjectStore(ObjectStoreArtifactRepository::new(uri)))
            }
            RepositoryScheme::Runs => RunsArtifactRepository::resolve_uri(uri, self).map(ArtifactRepository::Runs),
            RepositoryScheme::Models => ModelsArtifactRepository::resolve_uri(uri, self).map(ArtifactRepository::Models),
        }
    }
}

/// Raíz (o sub-ruta) absoluta de artifacts de un run, leída del store.
pub fn artifact_uri_for_run(store: &dyn BackendStore,
                            run_id: &str,
                            artifact_path: Option<&str>)
                            -> Result<String, TrackingError> {
    let run = store.get_run(run_id)?;
    Ok(append_path(&run.info.artifact_uri, artifact_path))
}
