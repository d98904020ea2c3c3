//! Integración de la fachada: ciclo de vida completo contra el store en
//! memoria, tal como lo consumiría una aplicación.
use trackflow_rust::{InMemoryStore, MapEnv, RunStatus, StartRunOptions, TrackingSession, ViewType};

#[test]
fn full_lifecycle_through_the_facade() {
    let mut session = TrackingSession::new(InMemoryStore::new(), MapEnv::new());
    session.set_experiment("integration").unwrap();
    let experiment_id = session.active_experiment_id().unwrap().to_string();

    let parent = session.start_run(StartRunOptions::new().run_name("outer")).unwrap();
    session.log_param("depth", "1").unwrap();

    let child = session.start_run(StartRunOptions::new().nested()).unwrap();
    session.log_metric("inner_metric", 3.14, None).unwrap();
    session.end_run().unwrap();

    assert_eq!(session.active_run().unwrap().info.run_id, parent.info.run_id);
    session.end_run().unwrap();
    assert!(session.active_run().is_none());

    let runs = session.search_runs(&[experiment_id.clone()], "", ViewType::ActiveOnly, 100, &[]).unwrap();
    assert_eq!(runs.len(), 2);
    for run in &runs {
        assert_eq!(run.info.status, RunStatus::Finished);
        assert_eq!(run.info.experiment_id, experiment_id);
    }

    let child_stored = session.get_run(&child.info.run_id).unwrap();
    assert_eq!(child_stored.data.latest_metric("inner_metric").unwrap().value, 3.14);
}

#[test]
fn deleted_runs_disappear_from_the_active_view() {
    let mut session = TrackingSession::new(InMemoryStore::new(), MapEnv::new());
    let run = session.start_run(StartRunOptions::default()).unwrap();
    session.end_run().unwrap();
    session.delete_run(&run.info.run_id).unwrap();

    let active = session.search_runs(&["0".to_string()], "", ViewType::ActiveOnly, 10, &[]).unwrap();
    assert!(active.is_empty());
    let deleted = session.search_runs(&["0".to_string()], "", ViewType::DeletedOnly, 10, &[]).unwrap();
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].info.run_id, run.info.run_id);
}

#[test]
fn artifact_uri_of_the_current_run() {
    let mut session = TrackingSession::new(InMemoryStore::new(), MapEnv::new());
    let run = session.start_run(StartRunOptions::default()).unwrap();
    let root = session.artifact_uri(None).unwrap();
    assert_eq!(root, run.info.artifact_uri);
    let nested = session.artifact_uri(Some("plots/roc.png")).unwrap();
    assert_eq!(nested, format!("{}/plots/roc.png", run.info.artifact_uri));
}
