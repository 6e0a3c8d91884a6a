use thiserror::Error;

/// Failure taxonomy of the query client.
///
/// Every failure is converted to one of these at the client boundary; the
/// session state machine never sees a raw transport or parse error.
/// `Cancelled` is internal plumbing: the client maps it to the cancelled
/// outcome before anything reaches the session, because a cancellation is a
/// third terminal outcome, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The service rejected the configured credential or model. Fatal for
    /// the session; not worth retrying unchanged.
    #[error("the search service rejected the configured credentials")]
    AuthFailure,

    /// Network trouble or service overload. The user may retry by
    /// resubmitting; the client never retries on its own.
    #[error("the search service is unavailable: {0}")]
    Transient(String),

    /// The operation observed its cancellation token. Never surfaced.
    #[error("the search was cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert!(SearchError::AuthFailure.to_string().contains("credentials"));
        assert!(SearchError::Transient("timeout".to_string()).to_string().contains("timeout"));
    }
}
