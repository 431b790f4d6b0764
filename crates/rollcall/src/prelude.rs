//! Convenience re-exports for common `rollcall` types.
//!
//! ```ignore
//! use rollcall::prelude::*;
//! ```

pub use crate::config::GeneratorConfig;
pub use crate::error::Error;
pub use crate::generator::{GenerateFuture, Generator, OllamaClient};
pub use crate::record::{NewRecord, Record, RecordPatch};
pub use crate::store::RecordStore;
pub use crate::summary::{Summary, SummaryFormatter};
