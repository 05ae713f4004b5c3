use crate::api::models::*;
use crate::domain::Review;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

pub async fn list_reviews_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Review>>, AppError> {
    info!("Fetching all reviews");
    let reviews = state.catalog.list_reviews().await?;
    debug!(count = reviews.len(), "Reviews listed");
    Ok(Json(reviews))
}

pub async fn get_review_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Review>, AppError> {
    info!(review_id = id, "Fetching review");
    state
        .catalog
        .get_review(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Review not found with ID: {id}")))
}

pub async fn create_review_handler(
    State(state): State<AppState>,
    Json(review): Json<Review>,
) -> Result<Json<Review>, AppError> {
    info!(film_id = ?review.film_id(), user_id = ?review.user_id(), "Creating review");
    let created = state.catalog.create_review(review).await?;
    info!(review_id = ?created.id, "Review created");
    Ok(Json(created))
}

pub async fn update_review_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(details): Json<Review>,
) -> Result<Json<Review>, AppError> {
    info!(review_id = id, "Updating review");
    let updated = state.catalog.update_review(id, details).await?;
    Ok(Json(updated))
}

pub async fn delete_review_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    info!(review_id = id, "Deleting review");
    state.catalog.delete_review(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn like_review_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Review>, AppError> {
    info!(review_id = id, "Liking review");
    let review = state.catalog.add_like(id).await?;
    Ok(Json(review))
}

pub async fn dislike_review_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Review>, AppError> {
    info!(review_id = id, "Disliking review");
    let review = state.catalog.add_dislike(id).await?;
    Ok(Json(review))
}
