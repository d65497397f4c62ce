//! Server startup and shutdown logic

use anyhow::{Context, Result};
use axum::{middleware, routing::any, Router};
use std::net::SocketAddr;
use testdummy_config::TestDummyConfig;
use testdummy_core::{arm_faults, DelayedActionScheduler, HealthState, VERSION};
use testdummy_web::request_logging_middleware;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::handlers;
use crate::state::AppState;

/// Server application struct
pub struct Server {
    config: TestDummyConfig,
    health: HealthState,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: TestDummyConfig) -> Self {
        let health = HealthState::new(config.faults.initial_health());
        Self { config, health }
    }

    pub fn config(&self) -> &TestDummyConfig {
        &self.config
    }

    pub fn health(&self) -> &HealthState {
        &self.health
    }

    /// Build the complete application router
    pub fn build_app(&self) -> Router {
        build_router(&self.config, AppState::from_config(&self.config, self.health.clone()))
    }

    /// Bind the configured address and serve until shutdown
    pub async fn start(self) -> Result<()> {
        let addr = self.config.server.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Unable to start server on {}", addr))?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let _faults = arm_faults(
            &self.config.faults,
            &self.health,
            &DelayedActionScheduler::new(),
        );
        let app = self.build_app();

        if self.config.server.enable_env {
            warn!("WARNING: /env is enabled. This may expose sensitive information.");
        }
        info!("TestDummy {}", VERSION);
        info!("Listening on {}", listener.local_addr()?);

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        info!("Server shutdown complete");
        Ok(())
    }
}

/// Join `path` onto the root prefix. An empty path yields the root itself.
pub fn join_route(root: &str, path: &str) -> String {
    let root = root.trim().trim_end_matches('/');
    let joined = match (root.is_empty(), path.is_empty()) {
        (true, true) => return "/".to_string(),
        (true, false) => format!("/{}", path),
        (false, true) => root.to_string(),
        (false, false) => format!("{}/{}", root, path),
    };

    if joined.starts_with('/') {
        joined
    } else {
        format!("/{}", joined)
    }
}

fn is_root_prefix(root: &str) -> bool {
    root.trim().trim_end_matches('/').is_empty()
}

/// Mount every endpoint under the configured root prefix
pub fn build_router(config: &TestDummyConfig, state: AppState) -> Router {
    let root = config.server.root_path.as_str();
    let route = |path: &str| join_route(root, path);

    let mut app = Router::new()
        .route(&route(""), any(handlers::ping))
        .route(&route("ping"), any(handlers::ping))
        .route(&route("echo"), any(handlers::echo))
        .route(&route("health"), any(handlers::health))
        .route(&route("healthcheck"), any(handlers::healthcheck))
        .route(&route("version"), any(handlers::version))
        .route(&route("exit"), any(handlers::exit))
        .route(&route("status"), any(handlers::status))
        .route(&route("chat"), any(handlers::chat));

    if config.server.enable_env {
        app = app.route(&route("env"), any(handlers::env));
    }

    // The bare root answers for its whole subtree
    if is_root_prefix(root) {
        app = app.fallback(handlers::ping);
    }

    let mut app = app.with_state(state);

    if config.server.enable_request_logging {
        app = app.layer(middleware::from_fn(request_logging_middleware));
    }

    app.layer(TraceLayer::new_for_http())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
