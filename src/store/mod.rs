//! Record store abstraction for posts.
//!
//! The service only talks to `dyn PostStore`, so a database-backed store can
//! replace [`MemoryPostStore`] without touching the handlers.

mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewPost, PostChanges, PostRecord};

pub use memory::MemoryPostStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record '{0}' not found")]
    NotFound(String),
    #[error("record '{0}' already exists")]
    Conflict(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Arguments for an ordered range scan.
#[derive(Debug, Clone, Default)]
pub struct FindManyArgs {
    /// Maximum number of records to return.
    pub take: usize,
    /// Id of the record the scan starts at (inclusive).
    pub cursor: Option<String>,
}

/// Persistence capability used by the post service.
///
/// Every method is a single atomic store operation.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Inserts a new record, generating an id when none is given.
    async fn create(&self, post: NewPost) -> Result<PostRecord, StoreError>;

    async fn find_unique(&self, id: &str) -> Result<Option<PostRecord>, StoreError>;

    /// Records ordered by `created_at` descending, newest first.
    /// An unknown cursor yields an empty result.
    async fn find_many(&self, args: FindManyArgs) -> Result<Vec<PostRecord>, StoreError>;

    /// Merges `changes` into the record and refreshes `updated_at`.
    async fn update(&self, id: &str, changes: PostChanges) -> Result<PostRecord, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}
