use std::sync::Arc;

use crate::services::providers::PosterProvider;
use crate::store::SimilarityStore;

/// Shared application state
///
/// The store is read-only after startup, so handlers share it behind
/// plain `Arc`s with no locking.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SimilarityStore>,
    pub posters: Arc<dyn PosterProvider>,
}

impl AppState {
    /// Creates application state from a loaded store and a poster provider
    pub fn new(store: SimilarityStore, posters: impl PosterProvider + 'static) -> Self {
        Self {
            store: Arc::new(store),
            posters: Arc::new(posters),
        }
    }
}
