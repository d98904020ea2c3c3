//! Constantes del cliente de tracking.
//!
//! Agrupa los nombres de variables de entorno, las claves de tags de sistema
//! y los valores por defecto de experimento y paginación. Las claves de tags
//! forman parte del contrato observable con el backend: cambiarlas rompe la
//! correlación padre/hijo de runs ya registrados.

/// Variable de entorno con un run id a reanudar. Se consume one-shot: la
/// primera reanudación la borra del entorno.
pub const RUN_ID_ENV_VAR: &str = "TRACKFLOW_RUN_ID";
/// Variable de entorno con el id del experimento activo.
pub const EXPERIMENT_ID_ENV_VAR: &str = "TRACKFLOW_EXPERIMENT_ID";
/// Variable de entorno con el nombre del experimento activo. Tiene prioridad
/// sobre [`EXPERIMENT_ID_ENV_VAR`].
pub const EXPERIMENT_NAME_ENV_VAR: &str = "TRACKFLOW_EXPERIMENT_NAME";

/// Tag que enlaza un run anidado con su padre (tope de la pila al crearlo).
pub const PARENT_RUN_ID_TAG: &str = "trackflow.parentRunId";
/// Tag con el nombre legible del run.
pub const RUN_NAME_TAG: &str = "trackflow.runName";
/// Tag con el usuario que originó el run.
pub const USER_TAG: &str = "trackflow.user";
/// Tag con el nombre de la fuente (ejecutable) que originó el run.
pub const SOURCE_NAME_TAG: &str = "trackflow.source.name";
/// Tag con el tipo de fuente.
pub const SOURCE_TYPE_TAG: &str = "trackflow.source.type";

/// Experimento por defecto que el store siembra al inicializarse.
pub const DEFAULT_EXPERIMENT_ID: &str = "0";
pub const DEFAULT_EXPERIMENT_NAME: &str = "Default";

/// Tope por defecto de resultados en listados.
pub const SEARCH_MAX_RESULTS_DEFAULT: usize = 1000;
/// Tamaño de página por defecto al paginar listados de runs.
pub const RUNS_PER_PAGE_DEFAULT: usize = 1000;
