//! Integración de la resolución de artifacts: un run real del store como
//! destino de URIs runs:/ y models:/.
use trackflow_rust::{ArtifactRepository, ArtifactResolver, InMemoryModelRegistry, InMemoryStore, MapEnv,
                     ModelVersion, StartRunOptions, TrackingError, TrackingSession};

#[test]
fn model_version_backed_by_a_run_resolves_to_its_artifacts() {
    let mut session = TrackingSession::new(InMemoryStore::new(), MapEnv::new());
    let run = session.start_run(StartRunOptions::default()).unwrap();
    session.end_run().unwrap();

    // La versión registrada apunta a los artifacts del run vía runs:/
    let registry = InMemoryModelRegistry::new()
        .with_version(ModelVersion { name: "classifier".into(),
                                     version: "1".into(),
                                     current_stage: "Production".into(),
                                     source: format!("runs:/{}/model", run.info.run_id),
                                     run_id: run.info.run_id.clone() });

    let store = session.into_store();
    let resolver = ArtifactResolver::new(&store, &registry);
    let repo = resolver.repository_for("models:/classifier/Production").unwrap();

    // models:/ -> runs:/ -> repositorio local del run, en una sola
    // construcción
    let runs_level = repo.underlying().expect("models wraps runs");
    assert!(matches!(runs_level, ArtifactRepository::Runs(_)));
    let concrete = runs_level.underlying().expect("runs wraps the concrete repo");
    assert!(matches!(concrete, ArtifactRepository::Local(_)));
    assert!(concrete.artifact_uri().ends_with("/artifacts/model"));
}

#[test]
fn unknown_scheme_fails_at_construction_not_at_use() {
    let store = InMemoryStore::new();
    let registry = InMemoryModelRegistry::new();
    let resolver = ArtifactResolver::new(&store, &registry);
    let err = resolver.repository_for("gopher://lost/in/time").unwrap_err();
    assert_eq!(err, TrackingError::UnsupportedScheme("gopher".into()));
}
