//! Contrato del backend store de tracking.
//!
//! La sesión y los repositorios de artifacts hablan con el store únicamente
//! a través de este trait. Las implementaciones reales (SQL/REST/archivo)
//! viven fuera de este workspace; aquí se provee la referencia en memoria
//! con la misma semántica observable.
mod memory;

pub use memory::InMemoryStore;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use track_domain::{Experiment, Metric, PagedList, Param, Run, RunInfo, RunStatus, RunTag, ViewType};

use crate::errors::TrackingError;

pub trait BackendStore {
    /// Crea un run bajo el experimento dado, con status RUNNING, start_time
    /// actual y los tags iniciales provistos. El store asigna `run_id` y
    /// `artifact_uri`.
    fn create_run(&mut self, experiment_id: &str, tags: &IndexMap<String, String>) -> Result<Run, TrackingError>;

    fn get_run(&self, run_id: &str) -> Result<Run, TrackingError>;

    /// Actualiza status y end_time. `end_time` se escribe tal cual: reanudar
    /// un run pasa aquí su end_time previo sin limpiarlo.
    fn update_run_info(&mut self,
                       run_id: &str,
                       status: RunStatus,
                       end_time: Option<DateTime<Utc>>)
                       -> Result<RunInfo, TrackingError>;

    /// Fija el status terminal y sella end_time con el reloj del store.
    fn set_terminated(&mut self, run_id: &str, status: RunStatus) -> Result<(), TrackingError>;

    /// Soft delete: lifecycle_stage pasa a Deleted.
    fn delete_run(&mut self, run_id: &str) -> Result<(), TrackingError>;

    fn get_experiment(&self, experiment_id: &str) -> Result<Experiment, TrackingError>;

    /// Búsqueda por nombre entre experimentos no borrados. Ausencia no es un
    /// error: el llamador decide si crear.
    fn get_experiment_by_name(&self, name: &str) -> Result<Option<Experiment>, TrackingError>;

    /// Crea un experimento y devuelve su id. Falla si el nombre ya está en
    /// uso por un experimento no borrado.
    fn create_experiment(&mut self, name: &str, artifact_location: Option<&str>) -> Result<String, TrackingError>;

    fn delete_experiment(&mut self, experiment_id: &str) -> Result<(), TrackingError>;

    /// Escritura agrupada de métricas, params y tags sobre un run activo.
    /// Los params son write-once por clave (reescribir el mismo valor es
    /// aceptado; uno distinto falla).
    fn log_batch(&mut self,
                 run_id: &str,
                 metrics: &[Metric],
                 params: &[Param],
                 tags: &[RunTag])
                 -> Result<(), TrackingError>;

    fn delete_tag(&mut self, run_id: &str, key: &str) -> Result<(), TrackingError>;

    /// Listado paginado de runs de los experimentos dados. `filter` y
    /// `order_by` se pasan opacos a la implementación; el contrato mínimo es
    /// el orden por defecto start_time desc, luego run_id.
    fn list_runs(&self,
                 experiment_ids: &[String],
                 filter: &str,
                 view_type: ViewType,
                 max_results: usize,
                 order_by: &[String],
                 page_token: Option<&str>)
                 -> Result<PagedList<Run>, TrackingError>;
}
