use track_adapters::ArtifactResolver;
use track_core::{InMemoryModelRegistry, InMemoryStore, ProcessEnv, StartRunOptions, TrackingSession};
use track_domain::{ModelVersion, ViewType};

fn main() {
    // Cargar .env si existe para las variables TRACKFLOW_*
    let _ = dotenvy::dotenv();
    // CLI mínima: `track-cli demo [--experiment <NOMBRE>] [--runs <N>]`
    //             `track-cli resolve <URI>`
    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && args[1] == "demo" {
        let mut experiment: Option<String> = None;
        let mut runs: usize = 3;
        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--experiment" => {
                    i += 1;
                    if i < args.len() {
                        experiment = Some(args[i].clone());
                    }
                }
                "--runs" => {
                    i += 1;
                    if i < args.len() {
                        runs = args[i].parse().unwrap_or(runs);
                    }
                }
                _ => {}
            }
            i += 1;
        }
        if let Err(e) = run_demo(experiment.as_deref(), runs) {
            eprintln!("demo failed: {e}");
            std::process::exit(1);
        }
        return;
    }
    if args.len() >= 3 && args[1] == "resolve" {
        if let Err(e) = resolve_demo(&args[2]) {
            eprintln!("resolve failed: {e}");
            std::process::exit(1);
        }
        return;
    }
    eprintln!("usage: track-cli demo [--experiment <NAME>] [--runs <N>] | track-cli resolve <URI>");
    std::process::exit(2);
}

/// Ejecuta unos cuantos runs contra el store en memoria y lista el resultado.
fn run_demo(experiment: Option<&str>, runs: usize) -> Result<(), track_core::TrackingError> {
    let mut session = TrackingSession::new(InMemoryStore::new(), ProcessEnv);
    if let Some(name) = experiment {
        session.set_experiment(name)?;
    }
    for i in 0..runs {
        session.with_run(StartRunOptions::new().run_name(format!("demo-{i}")), |s, _run| {
                   s.log_param("iteration", &i.to_string())?;
                   s.log_metric("score", 1.0 / (i + 1) as f64, Some(i as i64))
               })?;
    }
    let experiment_id = session.active_experiment_id().unwrap_or("0").to_string();
    let listed = session.list_run_infos(&experiment_id, ViewType::ActiveOnly, 100)?;
    println!("experiment {experiment_id}: {} runs", listed.len());
    for info in listed {
        match serde_json::to_string(&info) {
            Ok(line) => println!("  {line}"),
            Err(e) => eprintln!("  <unserializable run info: {e}>"),
        }
    }
    session.shutdown();
    Ok(())
}

/// Resuelve una URI de artifact contra colaboradores de demostración.
fn resolve_demo(uri: &str) -> Result<(), track_core::TrackingError> {
    let mut session = TrackingSession::new(InMemoryStore::new(), ProcessEnv);
    let run = session.start_run(StartRunOptions::default())?;
    session.end_run()?;
    let registry = InMemoryModelRegistry::new().with_version(ModelVersion { name: "demo".into(),
                                                                            version: "1".into(),
                                                                            current_stage: "Production".into(),
                                                                            source: "dfs:/registry/demo/1".into(),
                                                                            run_id: run.info.run_id.clone() });
    let store = session.into_store();
    let resolver = ArtifactResolver::new(&store, &registry);
    let repo = resolver.repository_for(uri)?;
    println!("uri: {}", repo.artifact_uri());
    println!("root: {}", repo.resolve(None));
    if let Some(inner) = repo.underlying() {
        println!("underlying: {}", inner.artifact_uri());
    }
    println!("(demo run available as runs:/{})", run.info.run_id);
    Ok(())
}
