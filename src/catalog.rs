use crate::domain::{Review, ValidationError};
use crate::storage::{ReviewStore, UpstreamError};
use chrono::Local;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Review not found with ID: {0}")]
    NotFound(i64),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Clone, Copy)]
enum Reaction {
    Like,
    Dislike,
}

/// Review workflow on top of servicedb.
///
/// Holds no state of its own. Every mutation is a full read-then-write against
/// the store with no concurrency token, so two concurrent likes on the same
/// review can collapse into one (last write wins).
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ReviewStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self { store }
    }

    pub async fn list_reviews(&self) -> CatalogResult<Vec<Review>> {
        info!("Fetching all reviews from servicedb");
        let reviews = self.store.list_reviews().await.inspect_err(log_upstream)?;
        debug!(count = reviews.len(), "Retrieved reviews");
        Ok(reviews)
    }

    pub async fn get_review(&self, id: i64) -> CatalogResult<Option<Review>> {
        info!(review_id = id, "Fetching review from servicedb");
        let review = self.store.fetch_review(id).await.inspect_err(log_upstream)?;
        if review.is_none() {
            warn!(review_id = id, "Review not found");
        }
        Ok(review)
    }

    pub async fn create_review(&self, mut review: Review) -> CatalogResult<Review> {
        info!(film_id = ?review.film_id(), "Creating new review");
        self.check_review(&review).await?;

        if review.publication_date.is_none() {
            review.publication_date = Some(Local::now().date_naive());
        }

        let created = self
            .store
            .insert_review(&review)
            .await
            .inspect_err(log_upstream)?;
        debug!(review_id = ?created.id, "Created review");
        Ok(created)
    }

    pub async fn update_review(&self, id: i64, details: Review) -> CatalogResult<Review> {
        info!(review_id = id, "Updating review");
        validate(&details)?;

        if self.get_review(id).await?.is_none() {
            warn!(review_id = id, "Review not found for update");
            return Err(CatalogError::NotFound(id));
        }

        self.verify_references(&details).await?;
        let updated = self.write_and_reload(id, &details).await?;
        debug!(review_id = id, "Updated review");
        Ok(updated)
    }

    pub async fn delete_review(&self, id: i64) -> CatalogResult<()> {
        info!(review_id = id, "Deleting review");
        if !self.store.delete_review(id).await.inspect_err(log_upstream)? {
            warn!(review_id = id, "Review not found for deletion");
            return Err(CatalogError::NotFound(id));
        }
        debug!(review_id = id, "Deleted review");
        Ok(())
    }

    pub async fn add_like(&self, id: i64) -> CatalogResult<Review> {
        self.react(id, Reaction::Like).await
    }

    pub async fn add_dislike(&self, id: i64) -> CatalogResult<Review> {
        self.react(id, Reaction::Dislike).await
    }

    async fn react(&self, id: i64, reaction: Reaction) -> CatalogResult<Review> {
        info!(review_id = id, ?reaction, "Adding reaction to review");
        let Some(mut review) = self.get_review(id).await? else {
            warn!(review_id = id, ?reaction, "Review not found for reaction");
            return Err(CatalogError::NotFound(id));
        };

        match reaction {
            Reaction::Like => review.number_of_likes = review.number_of_likes.saturating_add(1),
            Reaction::Dislike => {
                review.number_of_dislikes = review.number_of_dislikes.saturating_add(1)
            }
        }

        let updated = self.write_and_reload(id, &review).await?;
        debug!(
            review_id = id,
            likes = updated.number_of_likes,
            dislikes = updated.number_of_dislikes,
            "Reaction recorded"
        );
        Ok(updated)
    }

    /// Validation, then user and film existence, in that order
    async fn check_review(&self, review: &Review) -> CatalogResult<()> {
        validate(review)?;
        self.verify_references(review).await
    }

    async fn verify_references(&self, review: &Review) -> CatalogResult<()> {
        if let Some(user_id) = review.user_id() {
            if !self.store.user_exists(user_id).await.inspect_err(log_upstream)? {
                warn!(user_id, "User not found");
                return Err(ValidationError::UnknownUser(user_id).into());
            }
        }
        if let Some(film_id) = review.film_id() {
            if !self.store.film_exists(film_id).await.inspect_err(log_upstream)? {
                warn!(film_id, "Film not found");
                return Err(ValidationError::UnknownFilm(film_id).into());
            }
        }
        Ok(())
    }

    /// PUT the full review, then read back what servicedb stored
    async fn write_and_reload(&self, id: i64, review: &Review) -> CatalogResult<Review> {
        let replaced = self
            .store
            .replace_review(id, review)
            .await
            .inspect_err(log_upstream)?;
        if !replaced {
            warn!(review_id = id, "Review disappeared before write");
            return Err(CatalogError::NotFound(id));
        }

        self.store
            .fetch_review(id)
            .await
            .inspect_err(log_upstream)?
            .ok_or(CatalogError::NotFound(id))
    }
}

fn validate(review: &Review) -> Result<(), ValidationError> {
    review.validate().inspect_err(|e| warn!(error = %e, "Invalid review"))
}

fn log_upstream(e: &UpstreamError) {
    error!(error = %e, "servicedb call failed");
}
