//! Integration tests for the inquiry persistence store.

mod test_utils;

use chrono::{Duration, Utc};
use interiors_vision::{
    config::AppConfig,
    db::init_and_migrate,
    repositories::{InquiryRepository, InquiryStore},
};
use sea_orm::{ConnectionTrait, Statement};
use std::sync::Arc;
use tempfile::TempDir;
use test_utils::{kitchen_inquiry, living_room_inquiry, setup_test_db, setup_test_repository};

#[tokio::test]
async fn first_insert_is_assigned_id_one() {
    let repo = setup_test_repository().await.unwrap();
    let before = Utc::now();

    let inquiry = repo.insert(kitchen_inquiry()).await.unwrap();

    assert_eq!(inquiry.id, 1);
    assert_eq!(inquiry.name, "Jane Doe");
    assert_eq!(inquiry.email, "jane@example.com");
    assert_eq!(inquiry.phone, "9876543210");
    assert_eq!(inquiry.message, "I would like a kitchen renovation quote.");
    // Stored with millisecond precision.
    assert!(inquiry.created_at >= before - Duration::milliseconds(1));
    assert!(inquiry.created_at <= Utc::now());
}

#[tokio::test]
async fn sequential_inserts_are_distinct_and_retrievable() {
    let repo = setup_test_repository().await.unwrap();

    let first = repo.insert(kitchen_inquiry()).await.unwrap();
    let second = repo.insert(living_room_inquiry()).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert!(second.created_at >= first.created_at);

    assert_eq!(repo.find_by_id(first.id).await.unwrap(), Some(first));
    assert_eq!(repo.find_by_id(second.id).await.unwrap(), Some(second));
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn identical_payloads_create_separate_rows() {
    let repo = setup_test_repository().await.unwrap();

    let first = repo.insert(kitchen_inquiry()).await.unwrap();
    let second = repo.insert(kitchen_inquiry()).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn created_at_is_stamped_per_insert() {
    let repo = setup_test_repository().await.unwrap();

    let first = repo.insert(kitchen_inquiry()).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let second = repo.insert(kitchen_inquiry()).await.unwrap();

    assert!(second.created_at > first.created_at);
}

#[tokio::test]
async fn find_by_id_returns_none_for_unknown_id() {
    let repo = setup_test_repository().await.unwrap();
    assert_eq!(repo.find_by_id(42).await.unwrap(), None);
}

#[tokio::test]
async fn list_recent_returns_newest_first_up_to_limit() {
    let repo = setup_test_repository().await.unwrap();
    for _ in 0..3 {
        repo.insert(kitchen_inquiry()).await.unwrap();
    }

    let ids: Vec<i32> = repo
        .list_recent(2)
        .await
        .unwrap()
        .into_iter()
        .map(|inquiry| inquiry.id)
        .collect();
    assert_eq!(ids, vec![3, 2]);
}

#[tokio::test]
async fn created_at_column_holds_iso_8601_text() {
    let db = setup_test_db().await.unwrap();
    let repo = InquiryRepository::new(Arc::new(db.clone()));
    repo.insert(kitchen_inquiry()).await.unwrap();

    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT created_at FROM inquiries WHERE id = 1".to_string(),
        ))
        .await
        .unwrap()
        .expect("row exists");
    let raw: String = row.try_get("", "created_at").unwrap();

    assert!(raw.ends_with('Z'), "unexpected timestamp {raw}");
    assert!(chrono::DateTime::parse_from_rfc3339(&raw).is_ok());
}

#[tokio::test]
async fn file_backed_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inquiries.db");
    let config = AppConfig {
        profile: "test".to_string(),
        database_url: format!("sqlite://{}?mode=rwc", path.display()),
        ..Default::default()
    };

    {
        let db = init_and_migrate(&config).await.unwrap();
        let journal = db
            .query_one(Statement::from_string(
                db.get_database_backend(),
                "PRAGMA journal_mode".to_string(),
            ))
            .await
            .unwrap()
            .expect("pragma row");
        let mode: String = journal.try_get("", "journal_mode").unwrap();
        assert_eq!(mode.to_lowercase(), "wal");

        let repo = InquiryRepository::new(Arc::new(db.clone()));
        repo.insert(kitchen_inquiry()).await.unwrap();
        repo.insert(living_room_inquiry()).await.unwrap();
        db.close().await.unwrap();
    }

    let db = init_and_migrate(&config).await.unwrap();
    let repo = InquiryRepository::new(Arc::new(db));
    assert_eq!(repo.count().await.unwrap(), 2);

    let stored = repo.find_by_id(2).await.unwrap().expect("second row persisted");
    assert_eq!(stored.name, "Arjun Mehta");

    let next = repo.insert(kitchen_inquiry()).await.unwrap();
    assert_eq!(next.id, 3);
}
