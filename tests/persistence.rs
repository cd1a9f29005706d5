// tests/persistence.rs

use std::path::Path;
use std::sync::Arc;

use jobdag::errors::JobdagError;
use jobdag::fs::mock::MockFileSystem;
use jobdag::fs::{FileSystem, RealFileSystem};
use jobdag::manager::{DagManager, JobManager};
use jobdag::model::DagJob;
use jobdag::store::{Store, TableStore};
use jobdag_test_utils::builders::{DagPayloadBuilder, JobPayloadBuilder, dag_job_payload};
use jobdag_test_utils::init_tracing;

const DIR: &str = "/state";

fn open(fs: &MockFileSystem) -> Arc<dyn Store> {
    Arc::new(TableStore::open(Arc::new(fs.clone()), Path::new(DIR)).unwrap())
}

#[test]
fn snapshots_survive_reopening() {
    init_tracing();
    let fs = MockFileSystem::new();

    {
        let store = open(&fs);
        let jobs = JobManager::new(store.clone());
        let dags = DagManager::new(store);
        jobs.create_job(&JobPayloadBuilder::new("a").command("echo a").build())
            .unwrap();
        jobs.create_job(&JobPayloadBuilder::new("b").build()).unwrap();
        jobs.remove_job("b").unwrap();
        dags.create_dag(&DagPayloadBuilder::new("etl").root("a").build())
            .unwrap();
        dags.add_dag_job("etl", &dag_job_payload("b", "a")).unwrap();
    }

    assert!(fs.exists(&Path::new(DIR).join(TableStore::JOBS_FILE)));
    assert!(fs.exists(&Path::new(DIR).join(TableStore::DAGS_FILE)));

    let store = open(&fs);
    let jobs = JobManager::new(store.clone());
    let dags = DagManager::new(store);

    let listed = jobs.list_jobs();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "a");

    let dag = dags.get_dag("etl").unwrap();
    assert_eq!(dag.dag_jobs, vec![DagJob::root("a"), DagJob::new("b", "a")]);

    // Ids keep counting from where the previous process stopped.
    let c = jobs.create_job(&JobPayloadBuilder::new("c").build()).unwrap();
    assert_eq!(c.id, 3);
}

#[test]
fn failed_write_is_a_persist_error_and_changes_nothing() {
    init_tracing();
    let fs = MockFileSystem::new();
    let store = open(&fs);
    let jobs = JobManager::new(store.clone());
    let dags = DagManager::new(store);

    let job = jobs.create_job(&JobPayloadBuilder::new("a").command("v1").build()).unwrap();
    let dag = dags
        .create_dag(&DagPayloadBuilder::new("etl").root("a").build())
        .unwrap();

    fs.fail_writes(true);

    assert!(matches!(
        jobs.create_job(&JobPayloadBuilder::new("b").build()),
        Err(JobdagError::Persist(_))
    ));
    assert!(matches!(
        jobs.update_job("a", &JobPayloadBuilder::new("a").command("v2").build()),
        Err(JobdagError::Persist(_))
    ));
    assert!(matches!(jobs.remove_job("a"), Err(JobdagError::Persist(_))));
    assert!(matches!(
        dags.add_dag_job("etl", &dag_job_payload("b", "a")),
        Err(JobdagError::Persist(_))
    ));
    assert!(matches!(dags.remove_dag("etl"), Err(JobdagError::Persist(_))));

    assert_eq!(jobs.list_jobs(), vec![job]);
    assert_eq!(dags.list_dags(), vec![dag.clone()]);

    fs.fail_writes(false);
    let added = dags.add_dag_job("etl", &dag_job_payload("b", "a")).unwrap();
    assert_eq!(added, DagJob::new("b", "a"));
    assert_eq!(dags.get_dag("etl").unwrap().dag_jobs.len(), dag.dag_jobs.len() + 1);
}

#[test]
fn corrupt_snapshot_is_reported_on_open() {
    let fs = MockFileSystem::new();
    fs.add_file(Path::new(DIR).join(TableStore::JOBS_FILE), "{ definitely not json");

    let err = TableStore::open(Arc::new(fs), Path::new(DIR)).unwrap_err();
    match err {
        JobdagError::Persist(msg) => assert!(msg.contains("corrupt job snapshot")),
        other => panic!("Expected Persist, got: {:?}", other),
    }
}

#[test]
fn in_memory_store_writes_nothing() {
    let fs = MockFileSystem::new();
    let jobs = JobManager::new(Arc::new(TableStore::in_memory()));
    jobs.create_job(&JobPayloadBuilder::new("a").build()).unwrap();
    assert!(fs.is_empty());
}

#[test]
fn real_filesystem_round_trip() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let state_dir = dir.path().join("nested").join("state");

    {
        let store: Arc<dyn Store> =
            Arc::new(TableStore::open(Arc::new(RealFileSystem), &state_dir).unwrap());
        let dags = DagManager::new(store);
        dags.create_dag(br#"{"name": "etl", "jobs": "a\nb,a"}"#).unwrap();
    }

    let raw = RealFileSystem
        .read_to_string(&state_dir.join(TableStore::DAGS_FILE))
        .unwrap();
    assert!(raw.contains("\"etl\""));
    assert!(!state_dir.join("dags.tmp").exists());

    let store: Arc<dyn Store> =
        Arc::new(TableStore::open(Arc::new(RealFileSystem), &state_dir).unwrap());
    let dags = DagManager::new(store);
    assert_eq!(
        dags.get_dag("etl").unwrap().dag_jobs,
        vec![DagJob::root("a"), DagJob::new("b", "a")]
    );
}
