//! Error taxonomy shared by the fetcher, registry, and timeline layers.
//!
//! Every variant is local to the single operation that raised it; none of
//! them should terminate the session. There is no retry layer: callers decide
//! whether to repeat a failed operation.

/// Errors surfaced by ghrt operations.
#[derive(Debug)]
pub enum Error {
    /// Malformed input (repository URL or date range) rejected before any
    /// network call.
    Parse(String),
    /// Authentication failed or access is forbidden (HTTP 401/403).
    Auth(String),
    /// Repository or resource does not exist or is not visible (HTTP 404).
    NotFound(String),
    /// API rate limit exhausted (HTTP 429, or 403 with a zeroed quota).
    /// Carries the server's retry-after hint in seconds when one was sent.
    RateLimit {
        message: String,
        retry_after: Option<u64>,
    },
    /// Connectivity problem or unexpected HTTP status.
    Network(String),
    /// Response body could not be decoded as the expected JSON shape.
    Decode(String),
    /// Repository is already tracked by the registry.
    Duplicate(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(msg) => write!(f, "Invalid input: {}", msg),
            Error::Auth(msg) => {
                write!(f, "Authentication failed: {}. Check your GITHUB_TOKEN.", msg)
            }
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::RateLimit {
                message,
                retry_after,
            } => match retry_after {
                Some(secs) => write!(
                    f,
                    "Rate limit exceeded: {}. Retry after {} seconds.",
                    message, secs
                ),
                None => write!(
                    f,
                    "Rate limit exceeded: {}. Try again later or set GITHUB_TOKEN.",
                    message
                ),
            },
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Decode(msg) => write!(f, "Unexpected API response: {}", msg),
            Error::Duplicate(msg) => write!(f, "Already tracked: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_display_mentions_token() {
        let err = Error::Auth("bad credentials".to_string());
        assert!(err.to_string().contains("Authentication"));
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn test_rate_limit_display_with_hint() {
        let err = Error::RateLimit {
            message: "API rate limit exceeded".to_string(),
            retry_after: Some(42),
        };
        assert!(err.to_string().contains("42 seconds"));
    }

    #[test]
    fn test_rate_limit_display_without_hint() {
        let err = Error::RateLimit {
            message: "too many requests".to_string(),
            retry_after: None,
        };
        assert!(err.to_string().contains("Try again later"));
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::NotFound("owner/repo is not tracked".to_string());
        assert!(err.to_string().contains("Not found"));
    }

    #[test]
    fn test_duplicate_display() {
        let err = Error::Duplicate("owner/repo".to_string());
        assert!(err.to_string().contains("Already tracked"));
        assert!(err.to_string().contains("owner/repo"));
    }

    #[test]
    fn test_parse_display() {
        let err = Error::Parse("not a repository URL".to_string());
        assert!(err.to_string().contains("Invalid input"));
    }
}
