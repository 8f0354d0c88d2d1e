/// Poster metadata provider abstraction
///
/// Poster lookups are best-effort enrichment: the gallery renders a
/// placeholder for anything that cannot be resolved, so batch fetches
/// never fail as a whole.
use async_trait::async_trait;

use crate::error::AppResult;

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for poster metadata providers
#[async_trait]
pub trait PosterProvider: Send + Sync {
    /// Looks up the poster image URL for one movie
    ///
    /// `Ok(None)` means the service answered but has no poster on file.
    /// Errors cover transport failures, non-success statuses, and
    /// undecodable bodies; rendering callers substitute the placeholder
    /// for both outcomes.
    async fn fetch_poster(&self, movie_id: u64) -> AppResult<Option<String>>;

    /// URL rendered when a poster cannot be resolved
    fn placeholder_url(&self) -> &str;

    /// Clone provider for parallel task execution
    ///
    /// Required because providers need to be moved into tokio tasks.
    fn clone_for_task(&self) -> Box<dyn PosterProvider>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;

    /// Fetches poster URLs for multiple movies in parallel
    ///
    /// Spawns one task per movie and awaits them in spawn order, so the
    /// output lines up with `movie_ids`. Every failure mode degrades to
    /// the placeholder; one dead poster never takes down the gallery.
    async fn fetch_poster_batch(&self, movie_ids: Vec<u64>) -> Vec<String> {
        let mut tasks = Vec::with_capacity(movie_ids.len());

        for movie_id in movie_ids {
            let provider = self.clone_for_task();
            let task = tokio::spawn(async move { provider.fetch_poster(movie_id).await });
            tasks.push(task);
        }

        let mut urls = Vec::with_capacity(tasks.len());
        let mut fallbacks = 0;

        for task in tasks {
            let url = match task.await {
                Ok(Ok(Some(url))) => url,
                Ok(Ok(None)) => {
                    fallbacks += 1;
                    self.placeholder_url().to_string()
                }
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, provider = self.name(), "Poster fetch failed");
                    fallbacks += 1;
                    self.placeholder_url().to_string()
                }
                Err(e) => {
                    tracing::error!(error = %e, "Task join error");
                    fallbacks += 1;
                    self.placeholder_url().to_string()
                }
            };
            urls.push(url);
        }

        if fallbacks > 0 {
            tracing::warn!(
                resolved = urls.len() - fallbacks,
                fallbacks,
                provider = self.name(),
                "Some posters fell back to the placeholder"
            );
        }

        urls
    }
}
