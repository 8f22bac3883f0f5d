//! HTTP layer - JSON routes over the core operations.
//!
//! Handlers only translate between the wire format and [`crate::core`]; every
//! rule lives in the core functions. Failures are rendered by the
//! [`axum::response::IntoResponse`] impl for [`crate::errors::Error`].

/// OpenAPI document
pub mod docs;
/// Mapping from domain errors to status codes and `{"mensagem": ...}` bodies
pub mod error;
/// Request extractors that reject into the domain error type
pub mod extract;
/// Route handlers grouped by resource
pub mod routes;

use crate::{config::AppConfig, core::TransitionPolicy, errors::Result};
use axum::{
    Json, Router,
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Shared state handed to every handler.
///
/// The connection sits behind an `Arc` because `DatabaseConnection` is not
/// `Clone` when SeaORM's `mock` feature is enabled.
#[derive(Clone)]
pub struct AppState {
    /// Store connection
    pub db: Arc<DatabaseConnection>,
    /// Runtime configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Creates the handler state.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: Arc<AppConfig>) -> Self {
        Self {
            db: Arc::new(db),
            config,
        }
    }

    /// Status update policy in effect.
    #[must_use]
    pub fn status_policy(&self) -> TransitionPolicy {
        self.config.status_policy
    }
}

/// Builds the full route table.
///
/// Requests no route claims fall through to the configured static directory,
/// which is where the front-end lives.
pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health))
        .route("/api-docs", get(docs::openapi))
        .route("/api-docs/openapi.json", get(docs::openapi))
        .route("/registro", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route(
            "/livros",
            get(routes::books::list).post(routes::books::create),
        )
        .route("/livros/disponiveis", get(routes::books::list_available))
        .route(
            "/livros/:id",
            get(routes::books::show)
                .put(routes::books::update)
                .delete(routes::books::remove),
        )
        .route("/estatisticas", get(routes::statistics::show))
        .route(
            "/favoritos",
            post(routes::favorites::add).delete(routes::favorites::remove),
        )
        .route("/favoritos/:user_id", get(routes::favorites::list))
        .route(
            "/arrendamentos",
            get(routes::leases::list).post(routes::leases::create),
        )
        .route("/arrendamentos/me", get(routes::leases::mine))
        .route(
            "/arrendamentos/:id/status",
            put(routes::leases::update_status),
        )
        .route(
            "/compras",
            get(routes::purchases::list).post(routes::purchases::create),
        )
        .route("/compras/me", get(routes::purchases::mine))
        .route("/compras/:id/status", put(routes::purchases::update_status))
        .route("/usuarios", get(routes::users::list))
        .route(
            "/usuarios/:id",
            put(routes::users::update).delete(routes::users::remove),
        )
        .fallback_service(static_files)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Binds `addr` and serves until `shutdown` resolves.
///
/// # Errors
/// Returns [`crate::errors::Error::Io`] if the listener cannot be bound or the
/// server fails.
pub async fn serve<F>(addr: SocketAddr, state: AppState, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Library API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
