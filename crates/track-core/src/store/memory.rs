//! Backend store en memoria.
//!
//! Referencia de la semántica observable del contrato (ids, write-once de
//! params, soft delete, paginación por offset). No persiste nada: su rol es
//! servir de colaborador en tests, demos y CLI.
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use uuid::Uuid;

use track_domain::{Experiment, LifecycleStage, Metric, PagedList, Param, Run, RunData, RunInfo, RunStatus, RunTag,
                   ViewType};

use super::BackendStore;
use crate::constants::{DEFAULT_EXPERIMENT_ID, DEFAULT_EXPERIMENT_NAME};
use crate::errors::TrackingError;

pub struct InMemoryStore {
    experiments: IndexMap<String, Experiment>,
    runs: IndexMap<String, Run>,
    next_experiment_id: u64,
    artifact_root: String,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_artifact_root("file:///trackflow")
    }

    /// Raíz bajo la que se derivan las ubicaciones de artifacts
    /// (`<root>/<experiment_id>` y `<location>/<run_id>/artifacts`).
    pub fn with_artifact_root(artifact_root: &str) -> Self {
        let mut store = Self { experiments: IndexMap::new(),
                               runs: IndexMap::new(),
                               next_experiment_id: 1,
                               artifact_root: artifact_root.trim_end_matches('/').to_string() };
        let default = Experiment { experiment_id: DEFAULT_EXPERIMENT_ID.to_string(),
                                   name: DEFAULT_EXPERIMENT_NAME.to_string(),
                                   artifact_location: format!("{}/{}", store.artifact_root, DEFAULT_EXPERIMENT_ID),
                                   lifecycle_stage: LifecycleStage::Active };
        store.experiments.insert(default.experiment_id.clone(), default);
        store
    }

    fn run_mut(&mut self, run_id: &str) -> Result<&mut Run, TrackingError> {
        self.runs
            .get_mut(run_id)
            .ok_or_else(|| TrackingError::RunNotFound(run_id.to_string()))
    }

    fn active_run_mut(&mut self, run_id: &str) -> Result<&mut Run, TrackingError> {
        let run = self.run_mut(run_id)?;
        if run.info.lifecycle_stage == LifecycleStage::Deleted {
            return Err(TrackingError::DeletedRun(run_id.to_string()));
        }
        Ok(run)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendStore for InMemoryStore {
    fn create_run(&mut self, experiment_id: &str, tags: &IndexMap<String, String>) -> Result<Run, TrackingError> {
        let experiment = self.get_experiment(experiment_id)?;
        if experiment.lifecycle_stage == LifecycleStage::Deleted {
            return Err(TrackingError::DeletedExperiment(experiment.name));
        }
        let run_id = Uuid::new_v4().simple().to_string();
        let info = RunInfo { run_id: run_id.clone(),
                             experiment_id: experiment_id.to_string(),
                             status: RunStatus::Running,
                             lifecycle_stage: LifecycleStage::Active,
                             artifact_uri: format!("{}/{}/artifacts", experiment.artifact_location, run_id),
                             start_time: Utc::now(),
                             end_time: None };
        let run = Run { info,
                        data: RunData { params: IndexMap::new(),
                                        metrics: IndexMap::new(),
                                        tags: tags.clone() } };
        self.runs.insert(run_id, run.clone());
        Ok(run)
    }

    fn get_run(&self, run_id: &str) -> Result<Run, TrackingError> {
        self.runs
            .get(run_id)
            .cloned()
            .ok_or_else(|| TrackingError::RunNotFound(run_id.to_string()))
    }

    fn update_run_info(&mut self,
                       run_id: &str,
                       status: RunStatus,
                       end_time: Option<DateTime<Utc>>)
                       -> Result<RunInfo, TrackingError> {
        let run = self.run_mut(run_id)?;
        run.info.status = status;
        run.info.end_time = end_time;
        Ok(run.info.clone())
    }

    fn set_terminated(&mut self, run_id: &str, status: RunStatus) -> Result<(), TrackingError> {
        let run = self.run_mut(run_id)?;
        run.info.status = status;
        run.info.end_time = Some(Utc::now());
        Ok(())
    }

    fn delete_run(&mut self, run_id: &str) -> Result<(), TrackingError> {
        let run = self.run_mut(run_id)?;
        run.info.lifecycle_stage = LifecycleStage::Deleted;
        Ok(())
    }

    fn get_experiment(&self, experiment_id: &str) -> Result<Experiment, TrackingError> {
        self.experiments
            .get(experiment_id)
            .cloned()
            .ok_or_else(|| TrackingError::ExperimentNotFound(experiment_id.to_string()))
    }

    fn get_experiment_by_name(&self, name: &str) -> Result<Option<Experiment>, TrackingError> {
        // Un experimento borrado sigue siendo localizable por nombre (el
        // llamador decide si eso es un error); uno activo tiene prioridad.
        let mut deleted = None;
        for e in self.experiments.values().filter(|e| e.name == name) {
            if e.lifecycle_stage == LifecycleStage::Active {
                return Ok(Some(e.clone()));
            }
            deleted = Some(e.clone());
        }
        Ok(deleted)
    }

    fn create_experiment(&mut self, name: &str, artifact_location: Option<&str>) -> Result<String, TrackingError> {
        let name_taken = self.experiments
                             .values()
                             .any(|e| e.name == name && e.lifecycle_stage == LifecycleStage::Active);
        if name_taken {
            return Err(TrackingError::DuplicateExperimentName(name.to_string()));
        }
        let experiment_id = self.next_experiment_id.to_string();
        self.next_experiment_id += 1;
        let location = artifact_location.map(|l| l.to_string())
                                        .unwrap_or_else(|| format!("{}/{}", self.artifact_root, experiment_id));
        let experiment = Experiment { experiment_id: experiment_id.clone(),
                                      name: name.to_string(),
                                      artifact_location: location,
                                      lifecycle_stage: LifecycleStage::Active };
        self.experiments.insert(experiment_id.clone(), experiment);
        Ok(experiment_id)
    }

    fn delete_experiment(&mut self, experiment_id: &str) -> Result<(), TrackingError> {
        let experiment = self.experiments
                             .get_mut(experiment_id)
                             .ok_or_else(|| TrackingError::ExperimentNotFound(experiment_id.to_string()))?;
        experiment.lifecycle_stage = LifecycleStage::Deleted;
        Ok(())
    }

    fn log_batch(&mut self,
                 run_id: &str,
                 metrics: &[Metric],
                 params: &[Param],
                 tags: &[RunTag])
                 -> Result<(), TrackingError> {
        let run = self.active_run_mut(run_id)?;
        for p in params {
            match run.data.params.get(&p.key) {
                Some(existing) if existing != &p.value => {
                    return Err(TrackingError::ParamValueConflict { run_id: run_id.to_string(),
                                                                   key: p.key.clone(),
                                                                   old: existing.clone(),
                                                                   new: p.value.clone() });
                }
                Some(_) => {}
                None => {
                    run.data.params.insert(p.key.clone(), p.value.clone());
                }
            }
        }
        for m in metrics {
            run.data.metrics.entry(m.key.clone()).or_default().push(m.clone());
        }
        for t in tags {
            run.data.tags.insert(t.key.clone(), t.value.clone());
        }
        Ok(())
    }

    fn delete_tag(&mut self, run_id: &str, key: &str) -> Result<(), TrackingError> {
        let run = self.active_run_mut(run_id)?;
        run.data.tags.shift_remove(key);
        Ok(())
    }

    fn list_runs(&self,
                 experiment_ids: &[String],
                 filter: &str,
                 view_type: ViewType,
                 max_results: usize,
                 _order_by: &[String],
                 page_token: Option<&str>)
                 -> Result<PagedList<Run>, TrackingError> {
        if !filter.is_empty() {
            // El parseo de expresiones de filtrado pertenece a los stores
            // reales; la referencia en memoria sólo lista.
            log::warn!("in-memory store ignores filter expression: {filter}");
        }
        let mut matched: Vec<&Run> = self.runs
                                         .values()
                                         .filter(|r| experiment_ids.contains(&r.info.experiment_id))
                                         .filter(|r| view_type.matches(r.info.lifecycle_stage))
                                         .collect();
        matched.sort_by(|a, b| {
                   b.info
                    .start_time
                    .cmp(&a.info.start_time)
                    .then_with(|| a.info.run_id.cmp(&b.info.run_id))
               });

        let offset: usize = match page_token {
            None | Some("") => 0,
            Some(t) => t.parse()
                        .map_err(|_| TrackingError::InvalidPageToken(t.to_string()))?,
        };
        let end = (offset + max_results).min(matched.len());
        let items: Vec<Run> = matched.get(offset..end)
                                     .unwrap_or(&[])
                                     .iter()
                                     .map(|r| (*r).clone())
                                     .collect();
        let next = if end < matched.len() { Some(end.to_string()) } else { None };
        Ok(PagedList::new(items, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_the_default_experiment() {
        let store = InMemoryStore::new();
        let exp = store.get_experiment("0").unwrap();
        assert_eq!(exp.name, "Default");
        assert!(exp.is_active());
    }

    #[test]
    fn param_rewrite_with_same_value_is_accepted() {
        let mut store = InMemoryStore::new();
        let run = store.create_run("0", &IndexMap::new()).unwrap();
        let p = Param { key: "lr".into(), value: "0.1".into() };
        store.log_batch(&run.info.run_id, &[], &[p.clone()], &[]).unwrap();
        store.log_batch(&run.info.run_id, &[], &[p], &[]).unwrap();
        let changed = Param { key: "lr".into(), value: "0.2".into() };
        let err = store.log_batch(&run.info.run_id, &[], &[changed], &[]).unwrap_err();
        assert!(matches!(err, TrackingError::ParamValueConflict { .. }));
    }

    #[test]
    fn create_experiment_rejects_duplicate_names() {
        let mut store = InMemoryStore::new();
        store.create_experiment("exp", None).unwrap();
        let err = store.create_experiment("exp", None).unwrap_err();
        assert_eq!(err, TrackingError::DuplicateExperimentName("exp".into()));
        // Borrar libera el nombre.
        let exp = store.get_experiment_by_name("exp").unwrap().unwrap();
        store.delete_experiment(&exp.experiment_id).unwrap();
        store.create_experiment("exp", None).unwrap();
    }

    #[test]
    fn logging_to_a_deleted_run_fails() {
        let mut store = InMemoryStore::new();
        let run = store.create_run("0", &IndexMap::new()).unwrap();
        store.delete_run(&run.info.run_id).unwrap();
        let m = Metric { key: "m".into(), value: 1.0, timestamp: Utc::now(), step: 0 };
        let err = store.log_batch(&run.info.run_id, &[m], &[], &[]).unwrap_err();
        assert_eq!(err, TrackingError::DeletedRun(run.info.run_id.clone()));
    }

    #[test]
    fn list_runs_pages_with_offset_tokens() {
        let mut store = InMemoryStore::new();
        for _ in 0..5 {
            store.create_run("0", &IndexMap::new()).unwrap();
        }
        let ids = vec!["0".to_string()];
        let first = store.list_runs(&ids, "", ViewType::ActiveOnly, 2, &[], None).unwrap();
        assert_eq!(first.items.len(), 2);
        assert!(first.has_more());
        let second = store.list_runs(&ids, "", ViewType::ActiveOnly, 2, &[], first.next_page_token.as_deref())
                          .unwrap();
        assert_eq!(second.items.len(), 2);
        let third = store.list_runs(&ids, "", ViewType::ActiveOnly, 2, &[], second.next_page_token.as_deref())
                         .unwrap();
        assert_eq!(third.items.len(), 1);
        assert!(!third.has_more());
    }

    #[test]
    fn list_runs_respects_view_type() {
        let mut store = InMemoryStore::new();
        let keep = store.create_run("0", &IndexMap::new()).unwrap();
        let drop = store.create_run("0", &IndexMap::new()).unwrap();
        store.delete_run(&drop.info.run_id).unwrap();
        let ids = vec!["0".to_string()];
        let active = store.list_runs(&ids, "", ViewType::ActiveOnly, 10, &[], None).unwrap();
        assert_eq!(active.items.len(), 1);
        assert_eq!(active.items[0].info.run_id, keep.info.run_id);
        let deleted = store.list_runs(&ids, "", ViewType::DeletedOnly, 10, &[], None).unwrap();
        assert_eq!(deleted.items.len(), 1);
        assert_eq!(deleted.items[0].info.run_id, drop.info.run_id);
        let all = store.list_runs(&ids, "", ViewType::All, 10, &[], None).unwrap();
        assert_eq!(all.items.len(), 2);
    }

    #[test]
    fn bad_page_token_is_rejected() {
        let store = InMemoryStore::new();
        let err = store.list_runs(&["0".to_string()], "", ViewType::All, 10, &[], Some("nope"))
                       .unwrap_err();
        assert_eq!(err, TrackingError::InvalidPageToken("nope".into()));
    }
}
