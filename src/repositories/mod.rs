//! # Repository Layer
//!
//! Persistence for inquiries. The HTTP layer depends only on the
//! [`InquiryStore`] contract; [`InquiryRepository`] is the SeaORM-backed engine.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::schema::{Inquiry, InquiryInput};

pub mod inquiry;

pub use inquiry::InquiryRepository;

/// Append-only storage for inquiries.
///
/// Implementations assign `id` and `created_at` on insert. There is no
/// update or delete.
#[async_trait]
pub trait InquiryStore: Send + Sync {
    /// Persists a validated inquiry and returns the full record.
    async fn insert(&self, input: InquiryInput) -> Result<Inquiry, StorageError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Inquiry>, StorageError>;

    /// Most recent inquiries first.
    async fn list_recent(&self, limit: u64) -> Result<Vec<Inquiry>, StorageError>;

    async fn count(&self) -> Result<u64, StorageError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), StorageError>;
}
