// tests/cli_commands.rs

use std::sync::Arc;

use clap::Parser;
use jobdag::cli::CliArgs;
use jobdag::config::ConfigFile;
use jobdag::fs::mock::MockFileSystem;
use jobdag::fs::{FileSystem, RealFileSystem};
use jobdag::types::StoreBackend;
use jobdag::api::ControlPlane;
use jobdag::{execute, open_store};
use jobdag_test_utils::{init_tracing, memory_plane};
use serde_json::json;

fn parse(args: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("jobdag").chain(args.iter().copied())).unwrap()
}

#[tokio::test]
async fn commands_drive_the_control_plane() {
    init_tracing();
    let plane = memory_plane();
    let fs = MockFileSystem::new();
    fs.add_file("/payloads/dag.json", r#"{"name": "etl", "jobs": "a\nb,a"}"#);

    let env = execute(
        &plane,
        &fs,
        parse(&["job", "new", "--data", r#"{"name": "a", "command": "echo a"}"#]).command,
    )
    .await
    .unwrap();
    assert!(env.is_success());

    let env = execute(&plane, &fs, parse(&["dag", "new", "--file", "/payloads/dag.json"]).command)
        .await
        .unwrap();
    assert_eq!(env.data().unwrap()["dag_jobs"][1], json!({"job_name": "b", "parent_name": "a"}));

    let env = execute(
        &plane,
        &fs,
        parse(&["dag", "add-job", "etl", "--data", r#"{"job_name": "c", "parent_name": "b"}"#]).command,
    )
    .await
    .unwrap();
    assert!(env.is_success());

    let env = execute(&plane, &fs, parse(&["dag", "check", "etl"]).command).await.unwrap();
    assert_eq!(env.data().unwrap()["order"], json!(["a", "b", "c"]));

    let env = execute(&plane, &fs, parse(&["run", "etl"]).command).await.unwrap();
    assert_eq!(env.ret(), -3);

    let env = execute(&plane, &fs, parse(&["dag", "remove-job", "etl"]).command).await.unwrap();
    assert!(env.is_success());
    let env = execute(&plane, &fs, parse(&["dag", "list"]).command).await.unwrap();
    assert_eq!(env.data(), Some(&json!([])));
}

#[tokio::test]
async fn missing_payload_file_is_an_error() {
    let plane = memory_plane();
    let fs = MockFileSystem::new();
    let result = execute(&plane, &fs, parse(&["job", "new", "--file", "/nope.json"]).command).await;
    assert!(result.is_err());
}

#[test]
fn payload_requires_exactly_one_source() {
    let base = ["jobdag", "job", "new"];
    assert!(CliArgs::try_parse_from(base).is_err());
    assert!(CliArgs::try_parse_from(["jobdag", "job", "new", "--data", "{}", "--file", "x"]).is_err());
}

#[test]
fn global_flags_parse_anywhere() {
    let args = parse(&["dag", "list", "--store", "file", "--log-level", "debug"]);
    assert_eq!(args.store, Some(StoreBackend::File));
    assert!(args.log_level.is_some());
}

#[tokio::test]
async fn file_store_persists_between_invocations() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = ConfigFile::default();
    cfg.store.backend = StoreBackend::File;
    cfg.store.dir = dir.path().to_path_buf();
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    {
        let plane = ControlPlane::new(open_store(&cfg, fs.clone()).unwrap(), None);
        let env = execute(&plane, fs.as_ref(), parse(&["job", "new", "--data", r#"{"name": "a"}"#]).command)
            .await
            .unwrap();
        assert!(env.is_success());
    }

    let plane = ControlPlane::new(open_store(&cfg, fs.clone()).unwrap(), None);
    let env = execute(&plane, fs.as_ref(), parse(&["job", "get", "a"]).command).await.unwrap();
    assert_eq!(env.data().unwrap()["id"], json!(1));
}
