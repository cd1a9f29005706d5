// tests/job_lifecycle.rs

use std::sync::Arc;

use jobdag::errors::JobdagError;
use jobdag::manager::JobManager;
use jobdag::store::TableStore;
use jobdag::types::EntityKind;
use jobdag_test_utils::builders::JobPayloadBuilder;
use jobdag_test_utils::init_tracing;
use serde_json::json;

fn manager() -> JobManager {
    init_tracing();
    JobManager::new(Arc::new(TableStore::in_memory()))
}

#[test]
fn list_is_empty_without_jobs() {
    let jobs = manager();
    assert!(jobs.list_jobs().is_empty());
}

#[test]
fn create_assigns_id_and_timestamp_and_keeps_definition() {
    let jobs = manager();

    let job = jobs
        .create_job(
            &JobPayloadBuilder::new("backup")
                .command("tar czf /tmp/b.tgz /srv")
                .schedule("0 3 * * *")
                .create_ts(12)
                .build(),
        )
        .unwrap();

    assert_eq!(job.name, "backup");
    assert!(job.id > 0);
    assert!(job.create_ts > 12, "create_ts must be stamped, not taken from the payload");
    assert_eq!(job.field("command"), Some(&json!("tar czf /tmp/b.tgz /srv")));
    assert_eq!(job.field("schedule"), Some(&json!("0 3 * * *")));

    assert_eq!(jobs.list_jobs(), vec![job]);
}

#[test]
fn create_ignores_payload_id() {
    let jobs = manager();
    let first = jobs.create_job(&JobPayloadBuilder::new("a").build()).unwrap();
    let second = jobs
        .create_job(&JobPayloadBuilder::new("b").id(first.id).build())
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(jobs.list_jobs().len(), 2);
}

#[test]
fn duplicate_name_is_rejected_and_first_job_survives() {
    let jobs = manager();
    let first = jobs
        .create_job(&JobPayloadBuilder::new("backup").command("v1").build())
        .unwrap();

    let err = jobs
        .create_job(&JobPayloadBuilder::new("backup").command("v2").build())
        .unwrap_err();

    match err {
        JobdagError::UniqueConstraint { kind, name } => {
            assert_eq!(kind, EntityKind::Job);
            assert_eq!(name, "backup");
        }
        other => panic!("Expected UniqueConstraint, got: {:?}", other),
    }
    assert_eq!(jobs.list_jobs(), vec![first]);
}

#[test]
fn malformed_or_unnamed_payload_is_a_decode_error() {
    let jobs = manager();

    assert!(matches!(
        jobs.create_job(b"{not json"),
        Err(JobdagError::Decode(_))
    ));
    assert!(matches!(
        jobs.create_job(&JobPayloadBuilder::unnamed().command("x").build()),
        Err(JobdagError::Decode(_))
    ));
    assert!(matches!(
        jobs.create_job(&JobPayloadBuilder::new("   ").build()),
        Err(JobdagError::Decode(_))
    ));
    assert!(jobs.list_jobs().is_empty());
}

#[test]
fn update_of_missing_job_fails_without_creating_it() {
    let jobs = manager();

    let err = jobs
        .update_job("ghost", &JobPayloadBuilder::new("ghost").build())
        .unwrap_err();

    assert!(matches!(err, JobdagError::NotFound { kind: EntityKind::Job, .. }));
    assert!(jobs.list_jobs().is_empty());
}

#[test]
fn update_keeps_identity_even_when_payload_claims_another_id() {
    let jobs = manager();
    let created = jobs
        .create_job(&JobPayloadBuilder::new("report").command("v1").build())
        .unwrap();

    let updated = jobs
        .update_job(
            "report",
            &JobPayloadBuilder::new("report")
                .id(created.id + 41)
                .create_ts(1)
                .command("v2")
                .build(),
        )
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.create_ts, created.create_ts);
    assert_eq!(updated.field("command"), Some(&json!("v2")));
    assert_eq!(jobs.get_job("report").unwrap(), updated);
}

#[test]
fn update_without_name_keeps_current_name() {
    let jobs = manager();
    let created = jobs.create_job(&JobPayloadBuilder::new("report").build()).unwrap();

    let updated = jobs
        .update_job("report", &JobPayloadBuilder::unnamed().command("v2").build())
        .unwrap();

    assert_eq!(updated.name, "report");
    assert_eq!(updated.id, created.id);
}

#[test]
fn update_can_rename_but_not_onto_another_job() {
    let jobs = manager();
    let a = jobs.create_job(&JobPayloadBuilder::new("a").build()).unwrap();
    jobs.create_job(&JobPayloadBuilder::new("b").build()).unwrap();

    let err = jobs
        .update_job("a", &JobPayloadBuilder::new("b").build())
        .unwrap_err();
    assert!(matches!(err, JobdagError::UniqueConstraint { .. }));
    assert_eq!(jobs.get_job("a").unwrap(), a);

    let renamed = jobs
        .update_job("a", &JobPayloadBuilder::new("c").build())
        .unwrap();
    assert_eq!(renamed.id, a.id);
    assert!(jobs.get_job("a").is_err());
    assert_eq!(jobs.get_job("c").unwrap().id, a.id);
}

#[test]
fn update_with_bad_payload_leaves_job_untouched() {
    let jobs = manager();
    let created = jobs
        .create_job(&JobPayloadBuilder::new("report").command("v1").build())
        .unwrap();

    let err = jobs.update_job("report", br#"{"name": 5}"#).unwrap_err();

    assert!(matches!(err, JobdagError::Decode(_)));
    assert_eq!(jobs.get_job("report").unwrap(), created);
}

#[test]
fn remove_returns_the_removed_job() {
    let jobs = manager();
    let created = jobs.create_job(&JobPayloadBuilder::new("tmp").build()).unwrap();

    let removed = jobs.remove_job("tmp").unwrap();

    assert_eq!(removed, created);
    assert!(jobs.list_jobs().is_empty());
    assert!(matches!(
        jobs.remove_job("tmp"),
        Err(JobdagError::NotFound { .. })
    ));
}

#[test]
fn removed_name_can_be_reused_with_a_new_id() {
    let jobs = manager();
    let first = jobs.create_job(&JobPayloadBuilder::new("tmp").build()).unwrap();
    jobs.remove_job("tmp").unwrap();

    let second = jobs.create_job(&JobPayloadBuilder::new("tmp").build()).unwrap();
    assert!(second.id > first.id);
}
