//! GymDesk API server binary
//!
//! Startup order: tracing, configuration, database pool, migrations,
//! bootstrap admin, router, listener.

use anyhow::Context;
use gymdesk_api::{
    app::{build_router, AppState},
    config::Config,
};
use gymdesk_shared::{
    auth::password::hash_password,
    clock::SystemClock,
    db::{migrations::run_migrations, pool},
    models::admin::{Admin, AdminRole, CreateAdmin},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gymdesk_api=debug,gymdesk_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    let clock = SystemClock::from_east_hours(config.gym.utc_offset_hours)
        .context("GYM_UTC_OFFSET_HOURS is out of range")?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await
    .context("failed to connect to database")?;

    run_migrations(&db)
        .await
        .context("failed to run database migrations")?;

    bootstrap_admin(&db)
        .await
        .context("failed to seed the default admin account")?;

    let addr = config.bind_address();
    let state = AppState {
        db,
        config: Arc::new(config),
        clock: Arc::new(clock),
    };
    let app = build_router(state);

    tracing::info!("GymDesk API listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Seeds the default `admin`/`admin123` account when no admin exists yet
async fn bootstrap_admin(db: &PgPool) -> anyhow::Result<()> {
    if Admin::count(db).await? > 0 {
        return Ok(());
    }

    let password_hash = hash_password("admin123")?;
    Admin::create(
        db,
        CreateAdmin {
            username: "admin".to_string(),
            password_hash,
            role: AdminRole::SuperAdmin,
        },
    )
    .await?;

    tracing::warn!("seeded default admin account 'admin'; change its password immediately");
    Ok(())
}
