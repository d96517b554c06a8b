use std::sync::Arc;

use anyhow::Context;
use chrono::TimeDelta;
use tracing_subscriber::{EnvFilter, fmt};

use bookshop::config::Config;
use bookshop::modules::accounts::adapters::outbound::token_resolver_in_memory::InMemoryTokenResolver;
use bookshop::modules::accounts::adapters::outbound::user_store_in_memory::InMemoryUserStore;
use bookshop::modules::accounts::adapters::outbound::user_store_postgres::PgUserStore;
use bookshop::modules::accounts::core::password::Passwords;
use bookshop::modules::carts::adapters::outbound::cart_store_in_memory::InMemoryCartStore;
use bookshop::modules::carts::adapters::outbound::cart_store_postgres::PgCartStore;
use bookshop::modules::catalog::adapters::outbound::inventory_in_memory::InMemoryInventoryStore;
use bookshop::modules::catalog::adapters::outbound::inventory_postgres::PgInventoryStore;
use bookshop::modules::categories::adapters::outbound::category_store_in_memory::InMemoryCategoryStore;
use bookshop::modules::categories::adapters::outbound::category_store_postgres::PgCategoryStore;
use bookshop::shared::infrastructure::database::in_memory::InMemoryDatabase;
use bookshop::shared::infrastructure::database::postgres::PgDatabase;
use bookshop::shell::http::router;
use bookshop::shell::state::{AppState, Sessions, Stores};
use bookshop::shell::workers::spawn_cart_sweeper;

const BOOTSTRAP_ADMIN_USERNAME: &str = "admin";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    _ = dotenvy::dotenv();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let tokens = Arc::new(InMemoryTokenResolver::new());
    let sessions = Sessions {
        passwords: Passwords::new(),
        tokens: tokens.clone(),
        token_ttl: TimeDelta::from_std(config.token_ttl)
            .context("TOKEN_TTL_SECS is out of range")?,
    };

    let state = match &config.dsn {
        Some(dsn) => {
            let db = PgDatabase::connect(dsn)
                .await
                .context("failed to connect to postgres")?;
            db.migrate().await.context("failed to migrate schema")?;
            tracing::info!("using postgres backing store");
            AppState::from_stores(
                Stores {
                    db: Arc::new(db),
                    users: Arc::new(PgUserStore::new()),
                    categories: Arc::new(PgCategoryStore::new()),
                    inventory: Arc::new(PgInventoryStore::new()),
                    carts: Arc::new(PgCartStore::new()),
                },
                sessions,
            )
        }
        None => {
            tracing::warn!("DSN not set, using the in memory backing store");
            AppState::from_stores(
                Stores {
                    db: Arc::new(InMemoryDatabase::new()),
                    users: Arc::new(InMemoryUserStore::new()),
                    categories: Arc::new(InMemoryCategoryStore::new()),
                    inventory: Arc::new(InMemoryInventoryStore::new()),
                    carts: Arc::new(InMemoryCartStore::new()),
                },
                sessions,
            )
        }
    };

    if let Some(token) = &config.admin_token {
        let admin = state
            .accounts
            .bootstrap_admin(BOOTSTRAP_ADMIN_USERNAME.to_string())
            .await
            .context("failed to bootstrap the admin account")?;
        tokens.register(token.clone(), admin, TimeDelta::MAX).await;
        tracing::info!("bootstrap admin token registered");
    }

    let sweeper = spawn_cart_sweeper(
        state.carts.clone(),
        config.sweep_interval,
        config.cart_max_age,
    );

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(config.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.http_addr))?;
    tracing::info!("Book shop API listening on http://{}", config.http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
