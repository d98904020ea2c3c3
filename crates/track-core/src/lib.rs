//! track-core: ciclo de vida de runs y colaboradores del cliente de tracking.
//!
//! Contiene la máquina de estados de runs activos (`TrackingSession`), los
//! contratos de colaboración (`BackendStore`, `ModelRegistry`,
//! `ContextTagProvider`, `EnvVars`) con sus implementaciones en memoria, y
//! el paginador genérico usado por los listados.
pub mod constants;
pub mod context;
pub mod env;
pub mod errors;
pub mod paginate;
pub mod registry;
pub mod session;
pub mod store;

pub use context::{ContextTagProvider, ContextTagRegistry};
pub use env::{EnvVars, MapEnv, ProcessEnv};
pub use errors::TrackingError;
pub use paginate::paginate;
pub use registry::{InMemoryModelRegistry, ModelRegistry};
pub use session::{StartRunOptions, TrackingSession};
pub use store::{BackendStore, InMemoryStore};
