//! Error taxonomy shared by the record store and the summary pipeline.
//!
//! Every failure is surfaced as a distinct [`Error`] variant so callers can
//! map it to their own presentation (HTTP status, CLI message, ...). Nothing
//! in this crate retries or swallows an error.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A field constraint was violated (empty name, age out of range,
    /// malformed email).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation referenced an id that is not in the store.
    #[error("record {0} not found")]
    NotFound(u64),

    /// The text generator could not be reached (connection refused, DNS
    /// failure, timeout).
    #[error("text generator unavailable: {0}")]
    GenerationUnavailable(String),

    /// The text generator answered, but not with a usable result.
    #[error("text generation failed (status {status}): {message}")]
    GenerationFailed { status: u16, message: String },
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Whether this error originated in the external text generator.
    pub fn is_generation(&self) -> bool {
        matches!(
            self,
            Error::GenerationUnavailable(_) | Error::GenerationFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        assert_eq!(Error::NotFound(7).to_string(), "record 7 not found");
        let err = Error::GenerationFailed {
            status: 500,
            message: "model not loaded".into(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("model not loaded"));
    }

    #[test]
    fn generation_errors_are_classified() {
        assert!(Error::GenerationUnavailable("refused".into()).is_generation());
        assert!(
            Error::GenerationFailed {
                status: 502,
                message: String::new()
            }
            .is_generation()
        );
        assert!(!Error::NotFound(1).is_generation());
        assert!(!Error::validation("age").is_generation());
    }
}
