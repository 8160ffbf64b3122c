use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assetrack_api::auth::password::{hash_password, validate_password_strength};
use assetrack_api::config::ServerConfig;
use assetrack_api::{background, router, state, ws};
use assetrack_core::roles::ROLE_ADMIN;
use assetrack_db::models::user::CreateUser;
use assetrack_db::repositories::UserRepo;
use assetrack_db::DbPool;

use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "assetrack_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = assetrack_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    assetrack_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    assetrack_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    bootstrap_admin(&pool).await;

    // --- WebSocket manager + heartbeat ---
    let ws_manager = Arc::new(ws::WsManager::new());
    let cancel = CancellationToken::new();
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager), cancel.clone());

    // --- Event bus ---
    let event_bus = Arc::new(assetrack_events::EventBus::default());

    // Persist every change to the change log.
    let persistence_handle = tokio::spawn(assetrack_events::ChangePersistence::run(
        pool.clone(),
        event_bus.subscribe(),
    ));

    // Fan changes out to realtime subscribers.
    let feed = ws::ChangeFeed::new(Arc::clone(&ws_manager));
    let feed_handle = tokio::spawn(feed.run(event_bus.subscribe()));

    let scanner_handle = tokio::spawn(background::expiry_scanner::run(
        pool.clone(),
        Arc::clone(&event_bus),
        Duration::from_secs(config.expiry_scan_interval_secs),
        cancel.clone(),
    ));

    tracing::info!("Event services started (persistence, realtime feed, expiry scanner)");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        event_bus: Arc::clone(&event_bus),
    };

    let app = router::build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");
    let grace = Duration::from_secs(config.shutdown_timeout_secs);

    cancel.cancel();
    let _ = tokio::time::timeout(grace, scanner_handle).await;
    let _ = tokio::time::timeout(grace, heartbeat_handle).await;

    // Dropping the last sender closes the bus; persistence and the feed drain and exit.
    drop(event_bus);
    let _ = tokio::time::timeout(grace, persistence_handle).await;
    let _ = tokio::time::timeout(grace, feed_handle).await;
    tracing::info!("Event services shut down");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining realtime connections");
    ws_manager.shutdown_all().await;

    tracing::info!("Graceful shutdown complete");
}

/// Create the first admin from `ADMIN_USERNAME` / `ADMIN_EMAIL` /
/// `ADMIN_PASSWORD` when all three are set and the username is free.
async fn bootstrap_admin(pool: &DbPool) {
    let (Ok(username), Ok(email), Ok(password)) = (
        std::env::var("ADMIN_USERNAME"),
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) else {
        return;
    };

    match UserRepo::find_by_username(pool, &username).await {
        Ok(Some(_)) => {
            tracing::debug!(%username, "Admin user already exists");
            return;
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "Admin bootstrap lookup failed");
            return;
        }
    }

    if let Err(reason) = validate_password_strength(&password) {
        tracing::error!(%username, %reason, "ADMIN_PASSWORD rejected; admin not created");
        return;
    }

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!(error = %e, "Failed to hash admin password");
            return;
        }
    };

    let input = CreateUser {
        username: username.clone(),
        email,
        password_hash,
        role: ROLE_ADMIN.to_string(),
    };
    match UserRepo::create(pool, &input).await {
        Ok(user) => tracing::info!(user_id = user.id, %username, "Admin user created"),
        Err(e) => tracing::error!(error = %e, "Failed to create admin user"),
    }
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
