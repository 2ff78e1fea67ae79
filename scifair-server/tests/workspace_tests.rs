//! Service-level tests: which store writes each operation issues
//!
//! Every operation runs against a `RecordingStore`, so the tests can assert
//! that a mutation writes the full field exactly once and that no-ops and
//! validation failures write nothing.

mod helpers;

use helpers::{volcano_idea, AdvisorCall, RecordingStore, ScriptedAdvisor, StoreWrite};
use scifair_common::db::init_memory_database;
use scifair_common::models::{ExperimentResults, NewProject, Project};
use scifair_common::{Direction, ProjectStatus, ProjectStore};
use scifair_server::advisor::AgeGroup;
use scifair_server::blobs::BlobStore;
use scifair_server::error::ApiError;
use scifair_server::workspace::{self, GenerateRequest};
use uuid::Uuid;

async fn setup() -> (RecordingStore, Uuid) {
    let pool = init_memory_database().await.unwrap();
    (RecordingStore::new(pool), Uuid::new_v4())
}

/// Insert a project directly (unrecorded) in the given state
async fn seed_project(
    store: &RecordingStore,
    user_id: Uuid,
    status: ProjectStatus,
    results: &[(&str, f64)],
) -> Project {
    let project = store
        .inner()
        .insert_project(&NewProject::from_idea(user_id, volcano_idea()))
        .await
        .unwrap();

    if status != ProjectStatus::Draft {
        store
            .inner()
            .update_status(user_id, project.id, status)
            .await
            .unwrap();
    }

    if !results.is_empty() {
        let map: ExperimentResults = results
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect();
        store
            .inner()
            .update_results(user_id, project.id, &map)
            .await
            .unwrap();
    }

    store
        .inner()
        .get_project(user_id, project.id)
        .await
        .unwrap()
        .unwrap()
}

// =============================================================================
// Generation
// =============================================================================

#[tokio::test]
async fn test_generate_inserts_exactly_one_draft() {
    let (store, user) = setup().await;
    let advisor = ScriptedAdvisor::new();
    let request = GenerateRequest {
        interests: "volcanoes".to_string(),
        age_group: Some(AgeGroup::Middle),
    };

    let project = workspace::generate_project(&store, &advisor, user, &request)
        .await
        .unwrap();

    let idea = volcano_idea();
    let writes = store.writes();
    assert_eq!(writes.len(), 1);
    match &writes[0] {
        StoreWrite::InsertProject(new) => {
            assert_eq!(new.status, ProjectStatus::Draft);
            assert_eq!(new.user_id, user);
            assert_eq!(new.title, idea.title);
            assert_eq!(new.description, idea.description);
            assert_eq!(new.category, idea.category);
            assert_eq!(new.hypothesis.as_deref(), Some(idea.hypothesis.as_str()));
            assert_eq!(new.materials, idea.materials);
        }
        other => panic!("unexpected write {:?}", other),
    }

    assert_eq!(project.status, ProjectStatus::Draft);
    assert_eq!(
        advisor.calls(),
        vec![AdvisorCall::Generate("volcanoes".to_string(), Some(AgeGroup::Middle))]
    );
}

#[tokio::test]
async fn test_generate_blank_hypothesis_is_stored_as_none() {
    let (store, user) = setup().await;
    let mut idea = volcano_idea();
    idea.hypothesis = "  ".to_string();
    let advisor = ScriptedAdvisor::with_idea(idea);
    let request = GenerateRequest {
        interests: "plants".to_string(),
        age_group: None,
    };

    let project = workspace::generate_project(&store, &advisor, user, &request)
        .await
        .unwrap();
    assert_eq!(project.hypothesis, None);
}

#[tokio::test]
async fn test_generate_advisor_failure_writes_nothing() {
    let (store, user) = setup().await;
    let advisor = ScriptedAdvisor::failing();
    let request = GenerateRequest {
        interests: "volcanoes".to_string(),
        age_group: None,
    };

    let result = workspace::generate_project(&store, &advisor, user, &request).await;
    assert!(matches!(result, Err(ApiError::Advisor(_))));
    assert!(store.writes().is_empty());
}

// =============================================================================
// Status
// =============================================================================

#[tokio::test]
async fn test_advance_in_progress_to_completed() {
    let (store, user) = setup().await;
    let project = seed_project(&store, user, ProjectStatus::InProgress, &[]).await;

    let advance = workspace::advance_status(&store, user, project.id, Direction::Next)
        .await
        .unwrap();

    assert_eq!(
        store.writes(),
        vec![StoreWrite::UpdateStatus(project.id, ProjectStatus::Completed)]
    );
    assert!(advance.changed);
    assert_eq!(advance.project.status, ProjectStatus::Completed);
    assert_eq!(advance.progress, 100.0);

    let stored = store.get_project(user, project.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ProjectStatus::Completed);
}

#[tokio::test]
async fn test_advance_at_boundaries_is_noop() {
    let (store, user) = setup().await;
    let completed = seed_project(&store, user, ProjectStatus::Completed, &[]).await;
    let draft = seed_project(&store, user, ProjectStatus::Draft, &[]).await;

    let advance = workspace::advance_status(&store, user, completed.id, Direction::Next)
        .await
        .unwrap();
    assert!(!advance.changed);
    assert_eq!(advance.project.status, ProjectStatus::Completed);

    let advance = workspace::advance_status(&store, user, draft.id, Direction::Prev)
        .await
        .unwrap();
    assert!(!advance.changed);
    assert_eq!(advance.project.status, ProjectStatus::Draft);

    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn test_advance_store_failure_leaves_row_unchanged() {
    let (store, user) = setup().await;
    let project = seed_project(&store, user, ProjectStatus::Draft, &[]).await;
    store.fail_writes(true);

    let result = workspace::advance_status(&store, user, project.id, Direction::Next).await;
    assert!(matches!(result, Err(ApiError::Common(_))));

    let stored = store.get_project(user, project.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ProjectStatus::Draft);
}

#[tokio::test]
async fn test_advance_other_users_project_is_not_found() {
    let (store, user) = setup().await;
    let project = seed_project(&store, user, ProjectStatus::Draft, &[]).await;

    let result =
        workspace::advance_status(&store, Uuid::new_v4(), project.id, Direction::Next).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
    assert!(store.writes().is_empty());
}

// =============================================================================
// Experiment results
// =============================================================================

#[tokio::test]
async fn test_add_result_writes_full_map_once() {
    let (store, user) = setup().await;
    let project = seed_project(&store, user, ProjectStatus::Draft, &[("weight", 10.0)]).await;

    workspace::add_result(&store, user, project.id, "temperature", "25.5")
        .await
        .unwrap();

    let mut expected = ExperimentResults::new();
    expected.insert("weight".to_string(), 10.0);
    expected.insert("temperature".to_string(), 25.5);
    assert_eq!(
        store.writes(),
        vec![StoreWrite::UpdateResults(project.id, expected)]
    );
}

#[tokio::test]
async fn test_add_result_non_numeric_writes_nothing() {
    let (store, user) = setup().await;
    let project = seed_project(&store, user, ProjectStatus::Draft, &[("weight", 10.0)]).await;

    for raw in ["heavy", "12abc", "", "NaN"] {
        let result = workspace::add_result(&store, user, project.id, "weight", raw).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))), "accepted {:?}", raw);
    }

    assert!(store.writes().is_empty());
    let stored = store.get_project(user, project.id).await.unwrap().unwrap();
    assert_eq!(stored.experiment_results.get("weight"), Some(&10.0));
}

#[tokio::test]
async fn test_add_result_same_name_overwrites() {
    let (store, user) = setup().await;
    let project = seed_project(&store, user, ProjectStatus::Draft, &[("weight", 10.0)]).await;

    let updated = workspace::add_result(&store, user, project.id, " weight ", "12")
        .await
        .unwrap();
    assert_eq!(updated.experiment_results.len(), 1);
    assert_eq!(updated.experiment_results.get("weight"), Some(&12.0));
}

#[tokio::test]
async fn test_delete_missing_result_is_noop() {
    let (store, user) = setup().await;
    let project = seed_project(&store, user, ProjectStatus::Draft, &[("weight", 10.0)]).await;

    let unchanged = workspace::delete_result(&store, user, project.id, "height")
        .await
        .unwrap();
    assert_eq!(unchanged.experiment_results.len(), 1);
    assert!(store.writes().is_empty());

    let updated = workspace::delete_result(&store, user, project.id, "weight")
        .await
        .unwrap();
    assert!(updated.experiment_results.is_empty());
    assert_eq!(
        store.writes(),
        vec![StoreWrite::UpdateResults(project.id, ExperimentResults::new())]
    );
}

#[tokio::test]
async fn test_delete_result_trims_name_like_add() {
    let (store, user) = setup().await;
    let project = seed_project(&store, user, ProjectStatus::Draft, &[("weight", 10.0)]).await;

    let updated = workspace::delete_result(&store, user, project.id, " weight ")
        .await
        .unwrap();
    assert!(updated.experiment_results.is_empty());
    assert_eq!(
        store.writes(),
        vec![StoreWrite::UpdateResults(project.id, ExperimentResults::new())]
    );

    store.clear();
    let blank = workspace::delete_result(&store, user, project.id, "   ").await;
    assert!(matches!(blank, Err(ApiError::BadRequest(_))));
    assert!(store.writes().is_empty());
}

// =============================================================================
// Notes
// =============================================================================

#[tokio::test]
async fn test_notes_append_and_noop_delete() {
    let (store, user) = setup().await;
    let project = seed_project(&store, user, ProjectStatus::Draft, &[]).await;

    workspace::add_note(&store, user, project.id, "First observation")
        .await
        .unwrap();
    workspace::add_note(&store, user, project.id, "Second observation")
        .await
        .unwrap();

    let writes = store.writes();
    assert_eq!(writes.len(), 2);
    assert_eq!(
        writes[1],
        StoreWrite::UpdateNotes(
            project.id,
            vec!["First observation".to_string(), "Second observation".to_string()]
        )
    );

    store.clear();
    let blank = workspace::add_note(&store, user, project.id, "  ").await;
    assert!(matches!(blank, Err(ApiError::BadRequest(_))));
    let unchanged = workspace::delete_note(&store, user, project.id, 5)
        .await
        .unwrap();
    assert_eq!(unchanged.observation_notes.len(), 2);
    assert!(store.writes().is_empty());
}

// =============================================================================
// Detail, files, data points
// =============================================================================

#[tokio::test]
async fn test_load_detail_returns_fresh_row_and_files() {
    let (store, user) = setup().await;
    let project = seed_project(&store, user, ProjectStatus::Draft, &[]).await;
    let blob_dir = tempfile::tempdir().unwrap();
    let blobs = BlobStore::new(blob_dir.path().to_path_buf(), "http://localhost:5740");

    workspace::upload_file(&store, &blobs, user, project.id, "a.txt", "text/plain", b"a")
        .await
        .unwrap();
    workspace::upload_file(&store, &blobs, user, project.id, "b.txt", "text/plain", b"b")
        .await
        .unwrap();
    workspace::add_note(&store, user, project.id, "changed elsewhere")
        .await
        .unwrap();

    let detail = workspace::load_detail(&store, user, project.id).await.unwrap();
    assert_eq!(detail.project.observation_notes, vec!["changed elsewhere".to_string()]);
    let names: Vec<&str> = detail.files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, vec!["b.txt", "a.txt"]);
    assert!((detail.progress - 100.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_upload_blob_failure_writes_no_row() {
    let (store, user) = setup().await;
    let project = seed_project(&store, user, ProjectStatus::Draft, &[]).await;

    // A regular file as the blob root makes directory creation fail
    let not_a_dir = tempfile::NamedTempFile::new().unwrap();
    let blobs = BlobStore::new(not_a_dir.path().to_path_buf(), "http://localhost:5740");

    let result =
        workspace::upload_file(&store, &blobs, user, project.id, "a.txt", "text/plain", b"a")
            .await;
    assert!(matches!(result, Err(ApiError::Io(_))));
    assert!(store.writes().is_empty());
    assert!(store.list_files(project.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_data_point_insert_only() {
    let (store, user) = setup().await;
    let project = seed_project(&store, user, ProjectStatus::Draft, &[]).await;

    let point = workspace::add_data_point(&store, user, project.id, " height ", "3.25")
        .await
        .unwrap();
    assert_eq!(point.metric_name, "height");
    assert_eq!(point.value, 3.25);

    let writes = store.writes();
    assert_eq!(writes.len(), 1);
    assert!(matches!(writes[0], StoreWrite::InsertDataPoint(_)));

    // Data points do not touch the results map
    let stored = store.get_project(user, project.id).await.unwrap().unwrap();
    assert!(stored.experiment_results.is_empty());
}

#[tokio::test]
async fn test_delete_project_removes_row_only() {
    let (store, user) = setup().await;
    let project = seed_project(&store, user, ProjectStatus::Draft, &[]).await;
    let blob_dir = tempfile::tempdir().unwrap();
    let blobs = BlobStore::new(blob_dir.path().to_path_buf(), "http://localhost:5740");
    workspace::upload_file(&store, &blobs, user, project.id, "a.txt", "text/plain", b"a")
        .await
        .unwrap();

    workspace::delete_project(&store, user, project.id).await.unwrap();

    assert!(store.get_project(user, project.id).await.unwrap().is_none());
    assert_eq!(store.list_files(project.id).await.unwrap().len(), 1);

    let again = workspace::delete_project(&store, user, project.id).await;
    assert!(matches!(again, Err(ApiError::NotFound(_))));
}
