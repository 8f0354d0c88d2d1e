use axum::{extract::State, Json};

use crate::state::AppState;

/// Handler for the title list endpoint
///
/// Returns every catalog title in row order; the UI populates its
/// selection control from this.
pub async fn list(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.catalog().titles())
}
