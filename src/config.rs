use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key used for poster lookups
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// CDN base prepended to TMDB poster paths
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Image shown when a poster cannot be resolved
    #[serde(default = "default_placeholder_url")]
    pub placeholder_url: String,

    /// Per-request timeout for poster lookups, in seconds
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Path to the serialized catalog artifact
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Path to the serialized similarity matrix artifact
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Directory holding the static UI page
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_placeholder_url() -> String {
    "https://via.placeholder.com/300x450?text=No+Image".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_catalog_path() -> String {
    "model/movie_list.json".to_string()
}

fn default_similarity_path() -> String {
    "model/similarity.json".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
