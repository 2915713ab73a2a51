//! scrawl server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use scrawl::config::AppConfig;
use scrawl::render::{self, Renderer};
use scrawl::store::MongoArticleStore;
use scrawl::web::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("scrawl=info".parse()?))
        .init();

    let config = AppConfig::from_env()?;

    // An incomplete or malformed template set aborts startup here,
    // before the listener binds.
    let store = render::load(&config.templates)?;
    tracing::info!(
        pages = store.len(),
        mode = ?config.run_mode,
        "templates compiled"
    );
    let renderer = Renderer::new(store, config.run_mode);

    let articles = MongoArticleStore::connect(&config.mongodb_uri, &config.mongodb_database).await?;
    tracing::info!(database = %config.mongodb_database, "connected to MongoDB");

    let state = AppState {
        renderer: Arc::new(renderer),
        articles: Arc::new(articles),
    };
    let app = web::router(state, &config.public_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
