/// Recorrido de validación del ciclo de vida: experimento activo, runs
/// anidados, reanudación por id y búsqueda paginada.
fn run_lifecycle_walkthrough() -> Result<(), trackflow_rust::TrackingError> {
    use trackflow_rust::{InMemoryStore, MapEnv, StartRunOptions, TrackingSession, ViewType};

    let mut session = TrackingSession::new(InMemoryStore::new(), MapEnv::new());
    session.set_experiment("walkthrough")?;

    // Run raíz con un anidado que hereda el tag de parentesco.
    let parent = session.start_run(StartRunOptions::new().run_name("parent"))?;
    session.log_param("optimizer", "adam")?;
    let child = session.start_run(StartRunOptions::new().nested().run_name("child"))?;
    session.log_metric("loss", 0.42, Some(1))?;
    println!("child {} tags: {:?}", child.info.run_id, child.data.tags);
    session.end_run()?; // cierra child
    session.end_run()?; // cierra parent

    // Reanudar conserva el end_time previo y vuelve a RUNNING.
    let resumed = session.start_run(StartRunOptions::resume(parent.info.run_id.clone()))?;
    println!("resumed {} status={} end_time={:?}",
             resumed.info.run_id,
             resumed.info.status.as_str(),
             resumed.info.end_time);
    session.end_run()?;

    let experiment_id = session.active_experiment_id().expect("set_experiment fija el activo").to_string();
    let runs = session.search_runs(&[experiment_id], "", ViewType::ActiveOnly, 10, &[])?;
    println!("walkthrough runs: {}", runs.len());
    if let Some(run) = runs.first() {
        println!("{}", serde_json::to_string_pretty(&run.info).expect("RunInfo serializa"));
    }
    session.shutdown();
    Ok(())
}

/// Recorrido de resolución de artifacts: URIs runs:/, models:/ por versión y
/// por stage, y reescritura de credenciales desde la configuración.
fn artifact_resolution_walkthrough() -> Result<(), trackflow_rust::TrackingError> {
    use trackflow_rust::config::CONFIG;
    use trackflow_rust::{ArtifactResolver, InMemoryModelRegistry, InMemoryStore, MapEnv, ModelVersion,
                         StartRunOptions, TrackingSession};

    let mut session = TrackingSession::new(InMemoryStore::new(), MapEnv::new());
    let run = session.start_run(StartRunOptions::default())?;
    session.end_run()?;

    let registry = InMemoryModelRegistry::new()
        .with_version(ModelVersion { name: "classifier".into(),
                                     version: "3".into(),
                                     current_stage: "Production".into(),
                                     source: "dfs:/registry/classifier/3".into(),
                                     run_id: run.info.run_id.clone() });

    let store = session.into_store();
    let mut resolver = ArtifactResolver::new(&store, &registry);
    if let Some(registry_uri) = &CONFIG.tracking.registry_uri {
        resolver = resolver.with_registry_uri(registry_uri.clone());
    }

    for uri in [format!("runs:/{}/model", run.info.run_id),
                "models:/classifier/3".to_string(),
                "models:/classifier/Production".to_string()]
    {
        let repo = resolver.repository_for(&uri)?;
        match repo.underlying() {
            Some(inner) => println!("{uri} -> {}", inner.artifact_uri()),
            None => println!("{uri} -> (direct)"),
        }
    }
    Ok(())
}

fn main() {
    let _ = dotenvy::dotenv();
    println!("== lifecycle ==");
    if let Err(e) = run_lifecycle_walkthrough() {
        eprintln!("lifecycle walkthrough failed: {e}");
        std::process::exit(1);
    }
    println!("== artifact resolution ==");
    if let Err(e) = artifact_resolution_walkthrough() {
        eprintln!("artifact walkthrough failed: {e}");
        std::process::exit(1);
    }
}
