//! # Taskboard API Server
//!
//! Multi-tenant task-management API: users own boards, boards hold tasks.
//! Reads are accelerated by a per-user read-through Redis cache; writes
//! invalidate exactly the entries they may have changed.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskboard-api
//! ```

use taskboard_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskboard_shared::{
    cache::Cache,
    db::{
        migrations::run_migrations,
        pool::{create_pool, DatabaseConfig},
    },
    redis::client::{RedisClient, RedisConfig},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard_api=info,taskboard_shared=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("taskboard API v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let redis = RedisClient::new(RedisConfig::from_env()?).await?;
    let cache = Cache::redis(redis);

    let bind_address = config.bind_address();
    let state = AppState::new(pool, cache, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
