//! Student record API server.
//!
//! Serves the `rollcall` record store over HTTP and generates summaries
//! through an Ollama-compatible endpoint.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p rollcall-web
//! cargo run -p rollcall-web -- --port 9000 --model mistral
//! RUST_LOG=rollcall=debug cargo run -p rollcall-web -- --generator-url http://gpu-box:11434/api/generate
//! ```
//!
//! Then:
//!
//! ```bash
//! curl -X POST localhost:8000/students -H 'content-type: application/json' \
//!     -d '{"name":"Ada","age":36,"email":"ada@example.com"}'
//! curl localhost:8000/students/1/summary
//! ```

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use rollcall::prelude::*;
use rollcall::{DEFAULT_GENERATE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use rollcall_web::{WebConfig, spawn_web};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Student record API server.
#[derive(Parser)]
#[command(name = "rollcall-web", about = "In-memory student record API with generated summaries")]
struct Args {
    /// Interface to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Ollama-compatible generate endpoint used for summaries.
    #[arg(long, default_value = DEFAULT_GENERATE_URL)]
    generator_url: String,

    /// Model name sent to the generator.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Upper bound on one summary request, in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 1. Generator client for summaries.
    let generator_config = GeneratorConfig::default()
        .with_endpoint(args.generator_url)
        .with_model(args.model)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let client = OllamaClient::new(generator_config)
        .map_err(|e| format!("failed to create generator client: {e}"))?;
    let generator = client.config();
    info!(
        "summaries via {} (model {}, timeout {}s)",
        generator.endpoint,
        generator.model,
        generator.timeout.as_secs()
    );

    // 2. One store for the whole process.
    let store = Arc::new(RecordStore::new());

    // 3. Serve.
    let web_config = WebConfig {
        bind_addr: (args.host, args.port).into(),
    };
    let addr = spawn_web(store, SummaryFormatter::new(client), web_config)
        .await
        .map_err(|e| format!("failed to bind {}:{}: {e}", args.host, args.port))?;
    println!("Student API: http://{addr}/students");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for shutdown signal: {e}"))?;
    info!("shutting down");
    Ok(())
}
