//! Sesión de tracking: ciclo de vida de runs activos.
//!
//! `TrackingSession` es dueña del estado que en otros clientes suele ser
//! global de proceso: la pila de runs activos y el experimento activo. Toda
//! llamada de logging pasa por `get_or_start_run`, que garantiza que al
//! retornar hay un run en el tope de la pila.
//!
//! La finalización automática al salir del proceso se modela como un
//! `shutdown()` explícito e idempotente que el host invoca de forma
//! determinista; es best-effort y sólo cierra el tope de la pila.
mod stack;

pub use stack::RunStack;

use chrono::Utc;
use indexmap::IndexMap;
use track_domain::{Experiment, Metric, Param, Run, RunStatus, RunTag, ViewType};

use crate::constants::{EXPERIMENT_ID_ENV_VAR, EXPERIMENT_NAME_ENV_VAR, DEFAULT_EXPERIMENT_ID, PARENT_RUN_ID_TAG,
                       RUNS_PER_PAGE_DEFAULT, RUN_ID_ENV_VAR, RUN_NAME_TAG, SEARCH_MAX_RESULTS_DEFAULT};
use crate::context::ContextTagRegistry;
use crate::env::EnvVars;
use crate::errors::TrackingError;
use crate::paginate::paginate;
use crate::store::BackendStore;

/// Argumentos de `start_run`. El default crea un run nuevo, no anidado,
/// bajo el experimento resuelto por precedencia.
#[derive(Debug, Default, Clone)]
pub struct StartRunOptions {
    pub run_id: Option<String>,
    pub experiment_id: Option<String>,
    pub run_name: Option<String>,
    pub nested: bool,
}

impl StartRunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reanuda un run existente por id (el resto de opciones se ignora).
    pub fn resume(run_id: impl Into<String>) -> Self {
        Self { run_id: Some(run_id.into()),
               ..Self::default() }
    }

    pub fn experiment_id(mut self, experiment_id: impl Into<String>) -> Self {
        self.experiment_id = Some(experiment_id.into());
        self
    }

    pub fn run_name(mut self, run_name: impl Into<String>) -> Self {
        self.run_name = Some(run_name.into());
        self
    }

    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }
}

pub struct TrackingSession<S, V>
    where S: BackendStore,
          V: EnvVars
{
    store: S,
    env: V,
    context: ContextTagRegistry,
    stack: RunStack,
    active_experiment_id: Option<String>,
    shutdown_fired: bool,
}

impl<S, V> TrackingSession<S, V>
    where S: BackendStore,
          V: EnvVars
{
    pub fn new(store: S, env: V) -> Self {
        Self { store,
               env,
               context: ContextTagRegistry::default(),
               stack: RunStack::new(),
               active_experiment_id: None,
               shutdown_fired: false }
    }

    /// Reemplaza los proveedores de tags de contexto.
    pub fn with_context_registry(mut self, context: ContextTagRegistry) -> Self {
        self.context = context;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume la sesión devolviendo el store (útil para encadenar sesiones
    /// sobre los mismos datos en tests y demos).
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn env_mut(&mut self) -> &mut V {
        &mut self.env
    }

    /// Run actual (tope de la pila), sin efectos secundarios.
    pub fn active_run(&self) -> Option<&Run> {
        self.stack.active()
    }

    pub fn active_experiment_id(&self) -> Option<&str> {
        self.active_experiment_id.as_deref()
    }

    /// Inicia (o reanuda) un run y lo convierte en el actual.
    ///
    /// Precedencia de reanudación: `run_id` explícito, luego la variable de
    /// entorno one-shot, y si no hay ninguno se crea un run nuevo. Con la
    /// pila no vacía el llamador debe optar explícitamente por `nested`.
    pub fn start_run(&mut self, options: StartRunOptions) -> Result<Run, TrackingError> {
        if !self.stack.is_empty() && !options.nested {
            let active_run_id = self.stack.root().map(|r| r.info.run_id.clone()).unwrap_or_default();
            return Err(TrackingError::NestedRunConflict { active_run_id });
        }

        let existing_run_id = match options.run_id {
            Some(id) => Some(id),
            None => self.env.take(RUN_ID_ENV_VAR),
        };

        let run = if let Some(run_id) = existing_run_id {
            self.resume_run(&run_id)?
        } else {
            self.create_run(options.experiment_id.as_deref(), options.run_name.as_deref())?
        };
        self.stack.push(run.clone());
        Ok(run)
    }

    fn resume_run(&mut self, run_id: &str) -> Result<Run, TrackingError> {
        validate_run_id(run_id)?;
        let run = self.store.get_run(run_id)?;
        if let Some(active) = &self.active_experiment_id {
            if active != &run.info.experiment_id {
                return Err(TrackingError::ExperimentMismatch { run_id: run_id.to_string(),
                                                               active_experiment_id: active.clone(),
                                                               run_experiment_id: run.info.experiment_id.clone() });
            }
        }
        if run.info.lifecycle_stage == track_domain::LifecycleStage::Deleted {
            return Err(TrackingError::DeletedRun(run_id.to_string()));
        }
        // Reanudar no limpia un end_time previo: se reescribe tal cual.
        self.store.update_run_info(run_id, RunStatus::Running, run.info.end_time)?;
        self.store.get_run(run_id)
    }

    fn create_run(&mut self, experiment_id: Option<&str>, run_name: Option<&str>) -> Result<Run, TrackingError> {
        let parent_run_id = self.stack.active().map(|r| r.info.run_id.clone());
        let experiment_id = match experiment_id {
            Some(id) => id.to_string(),
            None => self.resolve_experiment_id()?,
        };

        let mut user_tags: IndexMap<String, String> = IndexMap::new();
        if let Some(parent) = parent_run_id {
            user_tags.insert(PARENT_RUN_ID_TAG.to_string(), parent);
        }
        if let Some(name) = run_name {
            user_tags.insert(RUN_NAME_TAG.to_string(), name.to_string());
        }
        let tags = self.context.resolve_tags(&user_tags, &self.env);

        self.store.create_run(&experiment_id, &tags)
    }

    /// Id de experimento efectivo: experimento activo de la sesión, luego la
    /// variable de nombre (si está presente y no resuelve NO se consulta la
    /// de id), luego la variable de id, luego el experimento por defecto.
    fn resolve_experiment_id(&self) -> Result<String, TrackingError> {
        if let Some(active) = &self.active_experiment_id {
            return Ok(active.clone());
        }
        let from_env = if let Some(name) = self.env.get(EXPERIMENT_NAME_ENV_VAR) {
            self.store.get_experiment_by_name(&name)?.map(|e| e.experiment_id)
        } else {
            self.env.get(EXPERIMENT_ID_ENV_VAR)
        };
        Ok(from_env.unwrap_or_else(|| DEFAULT_EXPERIMENT_ID.to_string()))
    }

    /// Termina el run actual con FINISHED.
    pub fn end_run(&mut self) -> Result<(), TrackingError> {
        self.end_run_with_status(RunStatus::Finished)
    }

    /// Termina el run actual con el status dado. Sin run activo es un no-op
    /// (ni error ni llamada al store).
    pub fn end_run_with_status(&mut self, status: RunStatus) -> Result<(), TrackingError> {
        if self.stack.is_empty() {
            return Ok(());
        }
        self.env.unset(RUN_ID_ENV_VAR);
        let run = self.stack.pop()?;
        self.store.set_terminated(&run.info.run_id, status)
    }

    /// Run actual, o uno recién creado bajo el experimento por defecto si la
    /// pila estaba vacía. Invariante: al retornar Ok la pila no está vacía.
    pub fn get_or_start_run(&mut self) -> Result<Run, TrackingError> {
        if let Some(run) = self.stack.active() {
            return Ok(run.clone());
        }
        self.start_run(StartRunOptions::default())
    }

    /// Ejecuta `f` dentro de un run con alcance: FINISHED al salir con Ok,
    /// FAILED si `f` devolvió error (el error se propaga).
    pub fn with_run<T, F>(&mut self, options: StartRunOptions, f: F) -> Result<T, TrackingError>
        where F: FnOnce(&mut Self, &Run) -> Result<T, TrackingError>
    {
        let run = self.start_run(options)?;
        match f(self, &run) {
            Ok(value) => {
                self.end_run()?;
                Ok(value)
            }
            Err(e) => {
                self.end_run_with_status(RunStatus::Failed)?;
                Err(e)
            }
        }
    }

    /// Cierre determinista al final de la vida del proceso: termina el run
    /// del tope como FINISHED. Dispara a lo sumo una vez, no cierra runs
    /// anidados por debajo del tope y es best-effort (errores del store se
    /// descartan porque el host está saliendo).
    pub fn shutdown(&mut self) {
        if self.shutdown_fired {
            return;
        }
        self.shutdown_fired = true;
        let _ = self.end_run();
    }

    /// Activa (creando si hace falta) el experimento con ese nombre.
    pub fn set_experiment(&mut self, name: &str) -> Result<(), TrackingError> {
        // La presencia se decide por el objeto: el id "0" es válido.
        let experiment_id = match self.store.get_experiment_by_name(name)? {
            Some(experiment) => {
                if !experiment.is_active() {
                    return Err(TrackingError::DeletedExperiment(experiment.name));
                }
                experiment.experiment_id
            }
            None => {
                log::info!("experiment '{name}' does not exist, creating it");
                self.store.create_experiment(name, None)?
            }
        };
        self.active_experiment_id = Some(experiment_id);
        Ok(())
    }

    // ---- superficie fluida de logging ----

    pub fn log_param(&mut self, key: &str, value: &str) -> Result<(), TrackingError> {
        let run_id = self.get_or_start_run()?.info.run_id;
        let param = Param { key: key.to_string(), value: value.to_string() };
        self.store.log_batch(&run_id, &[], &[param], &[])
    }

    pub fn log_params(&mut self, params: &IndexMap<String, String>) -> Result<(), TrackingError> {
        let run_id = self.get_or_start_run()?.info.run_id;
        let params: Vec<Param> = params.iter()
                                       .map(|(k, v)| Param { key: k.clone(), value: v.clone() })
                                       .collect();
        self.store.log_batch(&run_id, &[], &params, &[])
    }

    pub fn log_metric(&mut self, key: &str, value: f64, step: Option<i64>) -> Result<(), TrackingError> {
        let run_id = self.get_or_start_run()?.info.run_id;
        let metric = Metric { key: key.to_string(),
                              value,
                              timestamp: Utc::now(),
                              step: step.unwrap_or(0) };
        self.store.log_batch(&run_id, &[metric], &[], &[])
    }

    /// Todas las métricas del lote comparten timestamp y step.
    pub fn log_metrics(&mut self, metrics: &IndexMap<String, f64>, step: Option<i64>) -> Result<(), TrackingError> {
        let run_id = self.get_or_start_run()?.info.run_id;
        let timestamp = Utc::now();
        let step = step.unwrap_or(0);
        let metrics: Vec<Metric> = metrics.iter()
                                          .map(|(k, v)| Metric { key: k.clone(),
                                                                 value: *v,
                                                                 timestamp,
                                                                 step })
                                          .collect();
        self.store.log_batch(&run_id, &metrics, &[], &[])
    }

    pub fn set_tag(&mut self, key: &str, value: &str) -> Result<(), TrackingError> {
        let run_id = self.get_or_start_run()?.info.run_id;
        let tag = RunTag { key: key.to_string(), value: value.to_string() };
        self.store.log_batch(&run_id, &[], &[], &[tag])
    }

    pub fn set_tags(&mut self, tags: &IndexMap<String, String>) -> Result<(), TrackingError> {
        let run_id = self.get_or_start_run()?.info.run_id;
        let tags: Vec<RunTag> = tags.iter()
                                    .map(|(k, v)| RunTag { key: k.clone(), value: v.clone() })
                                    .collect();
        self.store.log_batch(&run_id, &[], &[], &tags)
    }

    pub fn delete_tag(&mut self, key: &str) -> Result<(), TrackingError> {
        let run_id = self.get_or_start_run()?.info.run_id;
        self.store.delete_tag(&run_id, key)
    }

    /// URI absoluta de un artifact del run actual (raíz si `path` es None).
    pub fn artifact_uri(&mut self, path: Option<&str>) -> Result<String, TrackingError> {
        let run = self.get_or_start_run()?;
        Ok(match path {
            None => run.info.artifact_uri,
            Some(p) => format!("{}/{}", run.info.artifact_uri.trim_end_matches('/'), p.trim_start_matches('/')),
        })
    }

    // ---- passthroughs al store ----

    pub fn get_run(&self, run_id: &str) -> Result<Run, TrackingError> {
        self.store.get_run(run_id)
    }

    pub fn delete_run(&mut self, run_id: &str) -> Result<(), TrackingError> {
        self.store.delete_run(run_id)
    }

    pub fn get_experiment(&self, experiment_id: &str) -> Result<Experiment, TrackingError> {
        self.store.get_experiment(experiment_id)
    }

    pub fn get_experiment_by_name(&self, name: &str) -> Result<Option<Experiment>, TrackingError> {
        self.store.get_experiment_by_name(name)
    }

    pub fn create_experiment(&mut self, name: &str, artifact_location: Option<&str>) -> Result<String, TrackingError> {
        self.store.create_experiment(name, artifact_location)
    }

    pub fn delete_experiment(&mut self, experiment_id: &str) -> Result<(), TrackingError> {
        self.store.delete_experiment(experiment_id)
    }

    // ---- listados paginados ----

    /// Runs que satisfacen la búsqueda, acumulados a través de páginas. Con
    /// `experiment_ids` vacío se busca en el experimento efectivo actual.
    pub fn search_runs(&self,
                       experiment_ids: &[String],
                       filter: &str,
                       view_type: ViewType,
                       max_results: usize,
                       order_by: &[String])
                       -> Result<Vec<Run>, TrackingError> {
        let ids: Vec<String> = if experiment_ids.is_empty() {
            vec![self.resolve_experiment_id()?]
        } else {
            experiment_ids.to_vec()
        };
        let store = &self.store;
        paginate(|n, token| store.list_runs(&ids, filter, view_type, n, order_by, token),
                 RUNS_PER_PAGE_DEFAULT,
                 max_results)
    }

    /// Sólo los metadatos de los runs de un experimento.
    pub fn list_run_infos(&self,
                          experiment_id: &str,
                          view_type: ViewType,
                          max_results: usize)
                          -> Result<Vec<track_domain::RunInfo>, TrackingError> {
        let ids = vec![experiment_id.to_string()];
        let store = &self.store;
        let runs = paginate(|n, token| store.list_runs(&ids, "", view_type, n, &[], token),
                            SEARCH_MAX_RESULTS_DEFAULT,
                            max_results)?;
        Ok(runs.into_iter().map(|r| r.info).collect())
    }
}

/// Formato aceptado de run id: alfanumérico inicial, luego alfanuméricos,
/// '_' o '-'.
pub fn validate_run_id(run_id: &str) -> Result<(), TrackingError> {
    let mut chars = run_id.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(TrackingError::InvalidRunId(run_id.to_string()))
    }
}
