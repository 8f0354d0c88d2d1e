use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{GalleryEntry, RecommendationResponse},
    services::engine::{self, RESULT_COUNT},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    title: String,
}

/// Handler for the recommendations endpoint
///
/// Resolves the selected title, ranks the catalog by similarity, and
/// enriches the top results with poster art before responding.
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    if params.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }

    let picks = engine::recommend(&state.store, &params.title, RESULT_COUNT)?;

    let movie_ids: Vec<u64> = picks.iter().map(|pick| pick.id).collect();
    let posters = state.posters.fetch_poster_batch(movie_ids).await;

    let results: Vec<GalleryEntry> = picks
        .into_iter()
        .zip(posters)
        .map(|(pick, poster_url)| GalleryEntry {
            title: pick.title,
            poster_url,
        })
        .collect();

    tracing::info!(
        query = %params.title,
        results = results.len(),
        "Recommendations served"
    );

    Ok(Json(RecommendationResponse {
        query: params.title,
        results,
    }))
}
