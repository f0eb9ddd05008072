use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use faq_api::cache::Cache;
use faq_api::config::Config;
use faq_api::db::Database;
use faq_api::routes::{self, AppState};
use faq_api::service::FaqService;
use faq_api::translation::Translator;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("faq_api=info".parse()?),
        )
        .init();

    info!("Starting FAQ API");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Construct the shared adapters once at startup
    let db = Database::new(&config.database_path)?;
    let cache = Cache::new(Duration::from_secs(config.cache_ttl_secs));
    let translator = Translator::new(&config)?;
    let service = Arc::new(FaqService::new(db, cache, translator));

    let state = AppState {
        service,
        api_token: config.api_token.clone(),
        operator_id: config.operator_id.clone(),
    };
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
