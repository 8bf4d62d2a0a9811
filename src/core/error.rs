use std::fmt;

/// Errors surfaced synchronously by session operations.
///
/// All three are local and recoverable. An operation that returns one of
/// these has not touched session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Malformed input: empty id, name, or message body.
    Validation(String),
    /// The operation referenced a participant id that is not in the roster.
    NotFound(String),
    /// A non-host attempted a host-only mutation, or the room refused entry.
    Permission(String),
}

impl SessionError {
    pub fn validation(msg: impl Into<String>) -> Self {
        SessionError::Validation(msg.into())
    }

    pub fn not_found(id: &str) -> Self {
        SessionError::NotFound(format!("no participant with id '{id}'"))
    }

    pub fn permission(msg: impl Into<String>) -> Self {
        SessionError::Permission(msg.into())
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Validation(msg) => write!(f, "validation error: {msg}"),
            SessionError::NotFound(msg) => write!(f, "not found: {msg}"),
            SessionError::Permission(msg) => write!(f, "permission denied: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_the_id() {
        let err = SessionError::not_found("42");
        assert_eq!(err.to_string(), "not found: no participant with id '42'");
    }

    #[test]
    fn test_display_prefixes() {
        assert!(SessionError::validation("x").to_string().starts_with("validation error"));
        assert!(SessionError::permission("x").to_string().starts_with("permission denied"));
    }
}
