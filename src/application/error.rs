// Tool-level error type, rendered to text or JSON only at the HTTP boundary
use crate::domain::date_range::DateRangeError;
use crate::domain::station::InvalidTriplet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The caller's arguments were rejected before any request was made
    InvalidArgument,
    /// AWDB could not be reached or answered with a failure
    Upstream,
    Internal,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ToolError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ToolError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub fn upstream(err: anyhow::Error) -> Self {
        tracing::warn!("AWDB request failed: {:#}", err);
        Self::new(ErrorKind::Upstream, format!("{:#}", err))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl From<InvalidTriplet> for ToolError {
    fn from(err: InvalidTriplet) -> Self {
        Self::invalid_argument(err.to_string())
    }
}

impl From<DateRangeError> for ToolError {
    fn from(err: DateRangeError) -> Self {
        Self::invalid_argument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_keeps_context_chain() {
        let err = anyhow::anyhow!("connection refused").context("Failed to send request to AWDB");
        let tool_err = ToolError::upstream(err);
        assert_eq!(tool_err.kind, ErrorKind::Upstream);
        assert_eq!(tool_err.message, "Failed to send request to AWDB: connection refused");
    }

    #[test]
    fn test_argument_errors_convert() {
        let err: ToolError = InvalidTriplet.into();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert!(err.message.contains("id:state:network"));
    }
}
