//! Inquiry entity model
//!
//! This module contains the SeaORM entity model for the inquiries table,
//! which stores contact-form submissions. Rows are only ever inserted.

use chrono::{DateTime, SecondsFormat, Utc};
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

use crate::error::StorageError;
use crate::schema::Inquiry;

/// Inquiry entity
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inquiries")]
pub struct Model {
    /// Auto-incremented identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub email: String,

    #[sea_orm(column_type = "Text")]
    pub phone: String,

    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// ISO 8601 timestamp with millisecond precision, always UTC
    #[sea_orm(column_type = "Text")]
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Formats a timestamp the way it is stored in `created_at`.
pub fn format_created_at(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl TryFrom<Model> for Inquiry {
    type Error = StorageError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let created_at = DateTime::parse_from_rfc3339(&model.created_at)
            .map_err(|err| StorageError::Corrupt {
                id: model.id,
                reason: format!("invalid created_at '{}': {}", model.created_at, err),
            })?
            .with_timezone(&Utc);

        Ok(Inquiry {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            message: model.message,
            created_at,
        })
    }
}
