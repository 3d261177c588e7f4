use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use riskroad_api::{build_router, AppState};
use riskroad_core::catalog::source::catalog_source_from_settings;
use riskroad_core::engine::AllocationEngine;
use riskroad_core::storage::accounts::PgAccountStore;
use riskroad_core::storage::AccountStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = riskroad_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    // A bad catalog is fatal: never serve recommendations from a partial universe.
    let source = catalog_source_from_settings(&settings)?;
    let catalog = source
        .load()
        .await
        .with_context(|| format!("failed to load catalog from {}", source.source_name()))?;
    tracing::info!(
        source = source.source_name(),
        instruments = catalog.len(),
        "catalog loaded"
    );

    let pool: Option<PgPool> = match settings.require_database_url() {
        Ok(db_url) => match sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .connect(db_url)
            .await
        {
            Ok(pool) => match riskroad_core::storage::migrate(&pool).await {
                Ok(()) => Some(pool),
                Err(e) => {
                    sentry_anyhow::capture_anyhow(&e);
                    tracing::error!(error = %e, "db migrations failed; starting API in degraded mode");
                    None
                }
            },
            Err(e) => {
                let err = anyhow::Error::new(e);
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %err, "db connect failed; starting API in degraded mode");
                None
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "DATABASE_URL missing; signups and investments disabled");
            None
        }
    };

    let accounts = pool.map(|pool| Arc::new(PgAccountStore::new(pool)) as Arc<dyn AccountStore>);

    let state = AppState {
        engine: AllocationEngine::new(Arc::new(catalog)),
        accounts,
    };
    let app = build_router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &riskroad_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
