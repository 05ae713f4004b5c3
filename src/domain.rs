use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 10;

/// A film review as exchanged with clients and with servicedb
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub number_of_likes: i32,
    #[serde(default)]
    pub number_of_dislikes: i32,
    #[serde(default)]
    pub review_text: Option<String>,
    #[serde(default)]
    pub publication_date: Option<NaiveDate>,
    #[serde(default)]
    pub user: Option<EntityRef>,
    #[serde(default)]
    pub film: Option<EntityRef>,
}

/// Reference to a user or film owned by servicedb.
///
/// Only `id` is interpreted here. Everything else upstream sends along is kept
/// in `attributes` so a full-entity write puts it back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl EntityRef {
    pub fn new(id: i64) -> Self {
        Self {
            id: Some(id),
            attributes: Map::new(),
        }
    }
}

/// Rule a review broke. Only the first violation is ever reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Rating must be between 1 and 10, got {0}")]
    RatingOutOfRange(i32),
    #[error("User ID is required")]
    MissingUser,
    #[error("Film ID is required")]
    MissingFilm,
    #[error("Review text is required")]
    MissingReviewText,
    #[error("User with ID {0} not found")]
    UnknownUser(i64),
    #[error("Film with ID {0} not found")]
    UnknownFilm(i64),
}

impl Review {
    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().and_then(|u| u.id)
    }

    pub fn film_id(&self) -> Option<i64> {
        self.film.as_ref().and_then(|f| f.id)
    }

    /// Structural checks, in order: rating, user, film, review text
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ValidationError::RatingOutOfRange(self.rating));
        }
        if self.user_id().is_none() {
            return Err(ValidationError::MissingUser);
        }
        if self.film_id().is_none() {
            return Err(ValidationError::MissingFilm);
        }
        if self
            .review_text
            .as_deref()
            .is_none_or(|text| text.trim().is_empty())
        {
            return Err(ValidationError::MissingReviewText);
        }
        Ok(())
    }
}
