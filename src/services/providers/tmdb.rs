/// TMDB metadata provider
///
/// Resolves posters through TMDB's movie details endpoint and rewrites the
/// returned `poster_path` onto the image CDN base.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::MovieDetails,
    services::providers::PosterProvider,
};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
    placeholder_url: String,
}

impl TmdbProvider {
    /// Creates a provider with an explicit per-request timeout
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.poster_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
            image_base_url: config.image_base_url.clone(),
            placeholder_url: config.placeholder_url.clone(),
        })
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbProvider {
    async fn fetch_poster(&self, movie_id: u64) -> AppResult<Option<String>> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", "en-US"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {} for movie {}",
                status, movie_id
            )));
        }

        let details: MovieDetails = response.json().await?;

        let poster_url = details
            .poster_path
            .filter(|path| !path.is_empty())
            .map(|path| format!("{}{}", self.image_base_url, path));

        tracing::debug!(
            movie_id,
            resolved = poster_url.is_some(),
            provider = "tmdb",
            "Poster lookup completed"
        );

        Ok(poster_url)
    }

    fn placeholder_url(&self) -> &str {
        &self.placeholder_url
    }

    fn clone_for_task(&self) -> Box<dyn PosterProvider> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
