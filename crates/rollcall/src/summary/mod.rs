//! Human-readable record summaries produced by an external text generator.
//!
//! [`SummaryFormatter::format`] is the entry point: it builds a prompt from
//! the record ([`prompt`]), asks the [`Generator`] for text, and runs the
//! result through [`sanitize`]. Generator failures propagate unchanged; there
//! is no retry and no fallback text.
//!
//! The formatter holds no mutable state and never touches the record store,
//! so a cancelled or timed-out summary has no side effects.

pub mod prompt;
pub mod sanitize;

pub use prompt::build_prompt;
pub use sanitize::sanitize;

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::generator::Generator;
use crate::record::Record;

/// A sanitized summary ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    #[serde(rename = "student_id")]
    pub id: u64,
    pub name: String,
    #[serde(rename = "formatted_summary")]
    pub text: String,
}

/// Turns records into sanitized summaries.
#[derive(Clone)]
pub struct SummaryFormatter {
    generator: Arc<dyn Generator>,
}

impl SummaryFormatter {
    pub fn new(generator: impl Generator + 'static) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }

    pub fn from_arc(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Ask the generator for raw text. Errors are returned as-is.
    pub async fn request_summary(&self, prompt: &str) -> Result<String> {
        self.generator.generate(prompt).await
    }

    /// Build the prompt, generate, and sanitize.
    pub async fn format(&self, record: &Record) -> Result<Summary> {
        let prompt = build_prompt(record);
        let raw = self.request_summary(&prompt).await?;
        let text = sanitize(&raw);
        debug!(
            id = record.id,
            "summary generated: {} raw chars, {} clean chars",
            raw.len(),
            text.len()
        );
        Ok(Summary {
            id: record.id,
            name: record.name.clone(),
            text,
        })
    }
}
