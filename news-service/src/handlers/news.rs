use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use service_core::error::AppError;

use crate::dtos::CreateNewsRequest;
use crate::models::NewsEntry;
use crate::startup::AppState;

#[tracing::instrument(skip(state))]
pub async fn list_news(State(state): State<AppState>) -> Result<Json<Vec<NewsEntry>>, AppError> {
    let entries = state.feed.list().await?;

    tracing::debug!(count = entries.len(), "Listed news entries");
    Ok(Json(entries))
}

/// The body is read raw so that a missing or malformed JSON payload
/// degrades to "no title" instead of an extractor rejection.
#[tracing::instrument(skip(state, body))]
pub async fn create_news(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<NewsEntry>), AppError> {
    let entry = CreateNewsRequest::from_body(&body).into_entry()?;

    state.feed.publish(&entry).await?;

    tracing::info!(
        title = %entry.title,
        timestamp = entry.timestamp,
        "News entry created"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}
