pub mod servicedb;

pub use servicedb::ServiceDbClient;

use crate::domain::Review;
use async_trait::async_trait;
use thiserror::Error;

/// Any failure talking to servicedb other than "not found"
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("servicedb request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("servicedb returned {status} for {method} {path}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
    },
    #[error("servicedb sent an unreadable body for {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("servicedb sent an empty body for {path}")]
    EmptyBody { path: String },
}

/// Persistence capability the catalog runs on.
///
/// Not-found is part of the return value (`None` / `false`), so callers never
/// have to inspect an error to tell a missing record from a broken upstream.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn list_reviews(&self) -> Result<Vec<Review>, UpstreamError>;

    async fn fetch_review(&self, id: i64) -> Result<Option<Review>, UpstreamError>;

    async fn insert_review(&self, review: &Review) -> Result<Review, UpstreamError>;

    /// Full-entity replacement of the stored review, `Ok(false)` when no
    /// review had that id
    async fn replace_review(&self, id: i64, review: &Review) -> Result<bool, UpstreamError>;

    /// `Ok(false)` when no review had that id
    async fn delete_review(&self, id: i64) -> Result<bool, UpstreamError>;

    async fn user_exists(&self, id: i64) -> Result<bool, UpstreamError>;

    async fn film_exists(&self, id: i64) -> Result<bool, UpstreamError>;
}
