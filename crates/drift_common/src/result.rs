//! Common result and error types for the Drift driver.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates an unrecoverable defect in the driver itself (a graph
/// invariant violation, an unhandled mode option), never a user-input
/// problem. User errors are reported through the diagnostics sink and
/// the operation still returns `Ok`.
pub type DriftResult<T> = Result<T, InternalError>;

/// An internal driver error indicating a bug in Drift, not bad user input.
///
/// These are loud by design: they should never occur in a correct build,
/// and when one does it means a planning or graph invariant was broken.
#[derive(Debug, thiserror::Error)]
#[error("internal driver error: {message}")]
pub struct InternalError {
    /// Description of the invariant that was violated.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("node missing from finder");
        assert_eq!(
            format!("{err}"),
            "internal driver error: node missing from finder"
        );
    }

    #[test]
    fn from_string() {
        let err: InternalError = "duplicate node".to_string().into();
        assert_eq!(err.message, "duplicate node");
    }
}
