//! HTTP API for the `rollcall` student record store.
//!
//! `rollcall-web` wraps a [`RecordStore`] and a [`SummaryFormatter`] in an
//! axum router. The core decides what succeeds and fails; this crate only
//! maps those outcomes onto routes, JSON bodies, and status codes.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use rollcall::prelude::*;
//! use rollcall_web::{WebConfig, spawn_web};
//!
//! let store = Arc::new(RecordStore::new());
//! let formatter = SummaryFormatter::new(OllamaClient::new(GeneratorConfig::default())?);
//!
//! let addr = spawn_web(store, formatter, WebConfig::default()).await?;
//! println!("API: http://{addr}/students");
//! ```
//!
//! # Routes
//!
//! | Method | Path | Result |
//! |--------|------|--------|
//! | `POST` | `/students` | created record |
//! | `GET` | `/students` | all records |
//! | `GET` | `/students/{id}` | one record or 404 |
//! | `PUT` | `/students/{id}` | partially updated record, 404, or 422 |
//! | `DELETE` | `/students/{id}` | confirmation or 404 |
//! | `GET` | `/students/{id}/summary` | generated summary, 404, 500, or 503 |
//! | `GET` | `/health` | status and record count |

pub mod api;
mod server;

pub use api::{ApiError, AppState};
pub use server::build_router;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use rollcall::store::RecordStore;
use rollcall::summary::SummaryFormatter;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:8000`.
    pub bind_addr: SocketAddr,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down. Bind with port `0`
/// to let the OS pick a free port.
pub async fn spawn_web(
    store: Arc<RecordStore>,
    summaries: SummaryFormatter,
    config: WebConfig,
) -> io::Result<SocketAddr> {
    let router = build_router(AppState { store, summaries });
    server::start_server(router, config.bind_addr).await
}
