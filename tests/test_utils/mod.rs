//! Test utilities for database testing.
//!
//! This module provides utilities for setting up in-memory SQLite stores
//! with migrations applied, plus canned inquiry payloads.

use anyhow::Result;
use interiors_vision::{
    config::AppConfig,
    db::init_and_migrate,
    repositories::InquiryRepository,
    schema::InquiryInput,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Configuration pointing at a fresh in-memory SQLite database.
#[allow(dead_code)]
pub fn memory_config() -> AppConfig {
    AppConfig {
        profile: "test".to_string(),
        database_url: "sqlite::memory:".to_string(),
        ..Default::default()
    }
}

/// Sets up an in-memory SQLite database with all migrations applied.
#[allow(dead_code)]
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_and_migrate(&memory_config()).await
}

/// Sets up an in-memory store behind the repository used in production.
#[allow(dead_code)]
pub async fn setup_test_repository() -> Result<Arc<InquiryRepository>> {
    let db = setup_test_db().await?;
    Ok(Arc::new(InquiryRepository::new(Arc::new(db))))
}

/// The inquiry a visitor asking for a kitchen quote would submit.
#[allow(dead_code)]
pub fn kitchen_inquiry() -> InquiryInput {
    InquiryInput::new(
        "Jane Doe",
        "jane@example.com",
        "9876543210",
        "I would like a kitchen renovation quote.",
    )
}

#[allow(dead_code)]
pub fn living_room_inquiry() -> InquiryInput {
    InquiryInput::new(
        "Arjun Mehta",
        "arjun.mehta@example.in",
        "+91 98200 12345",
        "Looking to redo our living room with a modern theme.",
    )
}
