use anyhow::Context;

use cinematch_api::{
    config::Config, routes::create_router, services::providers::TmdbProvider, state::AppState,
    store::SimilarityStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinematch_api=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let store = SimilarityStore::load(&config.catalog_path, &config.similarity_path)
        .with_context(|| {
            format!(
                "failed to load recommendation artifacts '{}' and '{}'; \
                 run the offline training pipeline to regenerate them",
                config.catalog_path, config.similarity_path
            )
        })?;
    tracing::info!(movies = store.len(), "Catalog and similarity matrix loaded");

    let posters = TmdbProvider::new(&config)?;
    let app = create_router(AppState::new(store, posters), &config.static_dir);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
