//! In-memory student records with LLM-generated summaries.
//!
//! `rollcall` is the core of a small record-management service. It has two
//! parts:
//!
//! - [`RecordStore`](store::RecordStore) — a concurrency-safe table of
//!   [`Record`](record::Record)s keyed by an auto-incrementing id, with
//!   create/get/list/update/delete and partial-update merge.
//! - [`SummaryFormatter`](summary::SummaryFormatter) — builds a prompt from a
//!   record, sends it to an external text [`Generator`](generator::Generator)
//!   (an Ollama server in production), and sanitizes the reply into plain
//!   text.
//!
//! HTTP routing lives in the `rollcall-web` crate; nothing here knows about
//! status codes or JSON request shapes.
//!
//! # Getting started
//!
//! ```ignore
//! use rollcall::prelude::*;
//!
//! let store = RecordStore::new();
//! let ada = store.create(NewRecord::new("Ada", 36, "ada@example.com"))?;
//! store.update(ada.id, &RecordPatch::new().with_age(37))?;
//!
//! let client = OllamaClient::new(GeneratorConfig::default())?;
//! let formatter = SummaryFormatter::new(client);
//! let summary = formatter.format(&store.get(ada.id)?).await?;
//! println!("{}", summary.text);
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`record`] | `Record`, `NewRecord`, `RecordPatch`, and the shared field validation |
//! | [`store`] | `RecordStore`, one lock over the whole table |
//! | [`summary`] | Prompt template, sanitation pipeline, `SummaryFormatter` |
//! | [`generator`] | `Generator` trait and the Ollama HTTP client |
//! | [`config`] | `GeneratorConfig` |
//! | [`error`] | `Error` taxonomy and `Result` alias |

pub mod config;
pub mod error;
pub mod generator;
pub mod prelude;
pub mod record;
pub mod store;
pub mod summary;

pub use error::{Error, Result};

// ── Constants ──────────────────────────────────────────────────────

/// Default Ollama generate endpoint.
pub const DEFAULT_GENERATE_URL: &str = "http://localhost:11434/api/generate";

/// Default model for summary generation.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Default bound on a single generate call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
