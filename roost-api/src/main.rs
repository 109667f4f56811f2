use anyhow::Context;
use roost_api::{app, AppState};
use roost_store::app_config::Config;
use roost_store::{MemoryStore, SeedData};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roost_api=debug,roost_core=info,roost_store=info,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Roost API on port {}", config.server.port);

    let store = match &config.store.seed_path {
        Some(path) => {
            let seed = SeedData::load(path).await?;
            MemoryStore::from_seed(seed)
        }
        None => {
            tracing::warn!("No seed file configured, starting with an empty store");
            MemoryStore::new()
        }
    };

    let app_state = AppState::new(store, config.ranking.clone(), config.business_rules.clone());
    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
