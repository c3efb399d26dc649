/// Resource operation errors
///
/// Three outcomes cover every failure in the resource layer:
///
/// - `Validation`: the input was malformed; raised before any database or
///   cache call.
/// - `NotFound`: the resource is absent *or* owned by another principal. The
///   two causes are deliberately one signal so the existence of other
///   tenants' resources never leaks through error shape.
/// - `Backend`: the database call itself failed.
///
/// Cache failures never appear here: reads degrade to misses and
/// invalidations are best-effort inside [`crate::cache::Cache`].

use thiserror::Error;

/// Error type for resource operations
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Malformed input, rejected before touching any backend
    #[error("invalid input: {0}")]
    Validation(String),

    /// Resource absent or not owned by the acting principal
    #[error("{0} not found or access denied")]
    NotFound(&'static str),

    /// Unexpected database failure
    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_never_distinguishes_causes() {
        // One message for both "does not exist" and "owned by someone else".
        let err = ResourceError::NotFound("Board");
        assert_eq!(err.to_string(), "Board not found or access denied");
    }

    #[test]
    fn test_validation_display() {
        let err = ResourceError::Validation("title must not be empty".to_string());
        assert_eq!(err.to_string(), "invalid input: title must not be empty");
    }
}
