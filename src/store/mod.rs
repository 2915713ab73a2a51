//! Article persistence.
//!
//! Handlers talk to an [`ArticleStore`] trait object so the HTTP layer
//! can be exercised against [`MemoryArticleStore`] while production runs
//! on [`MongoArticleStore`].

mod memory;
mod mongo;

pub use memory::MemoryArticleStore;
pub use mongo::MongoArticleStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Article, ArticleDraft};

/// One collection of articles keyed by an opaque identifier.
///
/// Each method maps to a single database operation; there are no
/// transactions, retries, or cross-call guarantees beyond what the
/// backing store provides.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// All articles, most recently updated first.
    async fn list(&self) -> Result<Vec<Article>, StoreError>;

    /// The article with the given identifier.
    async fn find(&self, id: &str) -> Result<Article, StoreError>;

    /// Store a new article, assigning its identifier and timestamps.
    /// Returns the assigned identifier.
    async fn insert(&self, draft: &ArticleDraft) -> Result<String, StoreError>;

    /// Rewrite title, body, and the updated timestamp.
    async fn update(&self, id: &str, draft: &ArticleDraft) -> Result<(), StoreError>;

    /// Remove the article with the given identifier.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no article with id {0:?}")]
    NotFound(String),

    #[error("malformed article id {0:?}")]
    InvalidId(String),

    #[error("database operation failed: {0}")]
    Database(#[from] mongodb::error::Error),
}
