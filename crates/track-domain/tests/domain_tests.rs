use chrono::{TimeZone, Utc};
use track_domain::{LifecycleStage, Metric, RunData, RunStatus, ViewType};

#[test]
fn run_status_string_forms_are_stable() {
    assert_eq!(RunStatus::Running.as_str(), "RUNNING");
    assert_eq!(RunStatus::Finished.as_str(), "FINISHED");
    assert_eq!(RunStatus::Failed.as_str(), "FAILED");
    assert_eq!(RunStatus::Killed.as_str(), "KILLED");
    assert_eq!(RunStatus::Scheduled.as_str(), "SCHEDULED");
}

#[test]
fn terminal_statuses() {
    assert!(RunStatus::Finished.is_terminal());
    assert!(RunStatus::Failed.is_terminal());
    assert!(RunStatus::Killed.is_terminal());
    assert!(!RunStatus::Running.is_terminal());
    assert!(!RunStatus::Scheduled.is_terminal());
}

#[test]
fn view_type_matches_lifecycle_stage() {
    assert!(ViewType::ActiveOnly.matches(LifecycleStage::Active));
    assert!(!ViewType::ActiveOnly.matches(LifecycleStage::Deleted));
    assert!(ViewType::DeletedOnly.matches(LifecycleStage::Deleted));
    assert!(ViewType::All.matches(LifecycleStage::Active));
    assert!(ViewType::All.matches(LifecycleStage::Deleted));
}

#[test]
fn latest_metric_prefers_greatest_step_then_timestamp() {
    let mut data = RunData::default();
    let t0 = Utc.timestamp_millis_opt(1_000).unwrap();
    let t1 = Utc.timestamp_millis_opt(2_000).unwrap();
    data.metrics.insert(
        "loss".to_string(),
        vec![
            Metric { key: "loss".into(), value: 0.9, timestamp: t0, step: 0 },
            Metric { key: "loss".into(), value: 0.5, timestamp: t1, step: 2 },
            Metric { key: "loss".into(), value: 0.7, timestamp: t1, step: 1 },
        ],
    );
    let latest = data.latest_metric("loss").expect("metric history present");
    assert_eq!(latest.value, 0.5);
    assert_eq!(latest.step, 2);
    assert!(data.latest_metric("acc").is_none());
}
