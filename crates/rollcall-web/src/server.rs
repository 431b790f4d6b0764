//! Axum server setup and router construction.

use std::io;
use std::net::SocketAddr;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{self, AppState};

/// Build the full axum router.
///
/// The router serves:
/// - Record CRUD at `/students` and `/students/{id}`
/// - Generated summaries at `/students/{id}/summary`
/// - Liveness at `/health`
pub fn build_router(app_state: AppState) -> Router {
    // Browser clients (form UIs) usually run on another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/students",
            get(api::list_students).post(api::create_student),
        )
        .route(
            "/students/{id}",
            get(api::get_student)
                .put(api::update_student)
                .delete(api::delete_student),
        )
        .route("/students/{id}/summary", get(api::get_summary))
        .route("/health", get(api::health))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind the listener, start serving on a Tokio task, and return the bound
/// address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;
    info!("listening on http://{addr}");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!("server error: {e}");
        }
    });

    Ok(addr)
}
