//! Inquiry repository for database operations
//!
//! This module provides the InquiryRepository struct which encapsulates
//! SeaORM operations for the inquiries table.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};
use std::sync::Arc;

use super::InquiryStore;
use crate::db;
use crate::error::StorageError;
use crate::models::inquiry::{self, Entity as InquiryEntity, format_created_at};
use crate::schema::{Inquiry, InquiryInput};

/// Repository for inquiry database operations
#[derive(Debug, Clone)]
pub struct InquiryRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl InquiryRepository {
    /// Creates a new InquiryRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InquiryStore for InquiryRepository {
    async fn insert(&self, input: InquiryInput) -> Result<Inquiry, StorageError> {
        // Stamped per call, never taken from a schema default.
        let created_at = format_created_at(Utc::now());

        let active = inquiry::ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            message: Set(input.message),
            created_at: Set(created_at),
            ..Default::default()
        };

        let model = active.insert(&*self.db).await?;
        tracing::debug!(inquiry_id = model.id, "Inserted inquiry row");

        Inquiry::try_from(model)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Inquiry>, StorageError> {
        InquiryEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Inquiry::try_from)
            .transpose()
    }

    async fn list_recent(&self, limit: u64) -> Result<Vec<Inquiry>, StorageError> {
        InquiryEntity::find()
            .order_by_desc(inquiry::Column::Id)
            .limit(limit)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(Inquiry::try_from)
            .collect()
    }

    async fn count(&self) -> Result<u64, StorageError> {
        Ok(InquiryEntity::find().count(&*self.db).await?)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        db::health_check(&self.db).await?;
        Ok(())
    }
}
