pub mod cache;
pub mod client;
pub mod payload;
pub mod range;

/// Failure of a single upstream fetch.
///
/// Every variant is terminal for the render request that triggered it:
/// this layer never retries. Retry policy, if any, belongs to the caller.
#[derive(Debug)]
pub enum FetchError {
    /// Network-level failure (DNS, connect, timeout) reaching the API.
    Transport(String),
    /// Upstream responded with a non-2xx status.
    Http(u16),
    /// Response body was not a JSON object.
    Decode(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "Upstream request failed: {msg}"),
            Self::Http(code) => write!(f, "Upstream request failed (HTTP {code})"),
            Self::Decode(msg) => write!(f, "Could not parse upstream response as JSON: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_http() {
        let err = FetchError::Http(503);
        assert_eq!(format!("{err}"), "Upstream request failed (HTTP 503)");
    }

    #[test]
    fn test_display_transport() {
        let err = FetchError::Transport("connection refused".to_string());
        assert_eq!(
            format!("{err}"),
            "Upstream request failed: connection refused"
        );
    }
}
