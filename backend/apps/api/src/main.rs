//! API server
//!
//! Wires the identity, likes, blogs and comments routers onto one axum app.
//! Startup failures (missing signing key, unreachable database) are `anyhow`
//! errors and stop the process before the listener binds.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use axum::{
    Router,
    http::{self, Method, header},
    routing::get,
};
use blogs::{PgBlogRepository, PgCommentRepository, blogs_router, comments_router};
use identity::{IdentityConfig, IdentityState, PgUserRepository, users_router, visitors_router};
use likes::{PgBlogLikeRepository, likes_router};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "api=info,identity=info,likes=info,blogs=info,tower_http=info".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Signing key and cookie policy; fatal before anything is bound
    let identity_config =
        IdentityConfig::from_env().context("Failed to load identity configuration")?;
    tracing::info!(mode = %identity_config.mode, "Identity configuration loaded");

    let identity = IdentityState::from_config(&identity_config);

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = connect_database(&database_url).await?;

    tracing::info!("Connected to database");

    // Build router
    let app = Router::new()
        .route("/", get(health_check))
        .nest(
            "/api/users",
            users_router(PgUserRepository::new(pool.clone()), identity.clone()),
        )
        .nest("/api/visitors", visitors_router(identity.clone()))
        .nest(
            "/api/blog-likes",
            likes_router(PgBlogLikeRepository::new(pool.clone()), identity.clone()),
        )
        .nest(
            "/api/blogs",
            blogs_router(PgBlogRepository::new(pool.clone()), identity.clone()),
        )
        .nest(
            "/api/comments",
            comments_router(PgCommentRepository::new(pool.clone()), identity),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer());

    // Start server
    let port = match env::var("PORT") {
        Ok(port) => port.parse::<u16>().context("PORT must be a port number")?,
        Err(_) => DEFAULT_PORT,
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Pool of up to 10 connections, checked with a round trip before serving
async fn connect_database(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .idle_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("Database ping failed")?;

    Ok(pool)
}

/// Credentialed CORS for the configured frontend origins
fn cors_layer() -> CorsLayer {
    let frontend_origins =
        env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

/// GET /
async fn health_check() -> &'static str {
    "Service is running"
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
