use adapter::{database::connect_database_with, redis::RedisClient};
use anyhow::{Context, Result};
use api::handler::staff::provision_staff;
use api::route::app_router;
use kernel::model::role::Role;
use kernel::model::staff::event::CreateStaff;
use registry::AppRegistry;
use shared::config::{AppConfig, BootstrapAdminConfig};
use shared::env::{which, Environment};
use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    bootstrap().await
}

fn init_logger() -> Result<()> {
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

async fn bootstrap() -> Result<()> {
    let app_config = AppConfig::new()?;
    let pool = connect_database_with(&app_config.database);
    let kv = Arc::new(RedisClient::new(&app_config.redis)?);

    let bootstrap_admin = app_config.bootstrap_admin.clone();
    let registry = AppRegistry::new(pool, kv, app_config);

    seed_bootstrap_admin(&registry, bootstrap_admin).await;

    let app = app_router(registry).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    );

    let addr = SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 8080);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Unexpected error happened in server")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e,error.message = %e, "Unexpected error"
            )
        })
}

/// The seed admin goes through the same provisioning path as accounts
/// created over the API; the only difference is the admin role. A rerun
/// on an already-seeded database fails at the provider with a duplicate
/// email, which is logged and ignored.
async fn seed_bootstrap_admin(registry: &AppRegistry, admin: Option<BootstrapAdminConfig>) {
    let Some(admin) = admin else {
        return;
    };

    let event = CreateStaff {
        email: admin.email,
        password: admin.password,
        name: admin.name,
        phone: None,
        location: None,
        role: Role::Admin,
    };
    match provision_staff(
        registry.identity_provider(),
        registry.role_repository(),
        registry.staff_repository(),
        registry.provisioning(),
        event,
    )
    .await
    {
        Ok(provisioned) => {
            tracing::info!(user_id = %provisioned.user_id, "bootstrap admin provisioned")
        }
        Err(e) => {
            tracing::warn!(
                error.message = %e,
                "bootstrap admin not provisioned (may already exist)"
            )
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
