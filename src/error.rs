//! Crate-wide error types.
//!
//! `FetchError` is the remote-layer taxonomy: the controller inspects it to
//! decide between silent discard and local fallback. `OmnibarError` is the
//! surface the binary and config/fixture loaders report through.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OmnibarError>;

#[derive(Debug, Error)]
pub enum OmnibarError {
    #[error("config error: {0}")]
    Config(String),

    #[error("fixture error: {0}")]
    Fixture(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// What went wrong talking to the remote data source.
///
/// An empty result array is *not* represented here: a 2xx `[]` is a
/// legitimate zero-result response and comes back as `Ok(vec![])`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Transport-level failure: no response was received at all.
    #[error("network error: {0}")]
    Network(String),

    /// A response arrived but was unusable: non-2xx status, or a 2xx body
    /// that is not a JSON array of items.
    #[error("server error (status {status}): {message}")]
    Server { status: u16, message: String },
}

impl FetchError {
    /// True when the failure warrants substituting locally ranked fixtures.
    /// Both arms do today; the method exists so call sites read as intent.
    pub fn triggers_fallback(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_display_includes_status() {
        let err = FetchError::Server {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn both_fetch_arms_trigger_fallback() {
        assert!(FetchError::Network("refused".into()).triggers_fallback());
        assert!(
            FetchError::Server {
                status: 503,
                message: "unavailable".into()
            }
            .triggers_fallback()
        );
    }

    #[test]
    fn fetch_error_converts_into_crate_error() {
        let err: OmnibarError = FetchError::Network("refused".to_string()).into();
        assert!(matches!(err, OmnibarError::Fetch(_)));
    }
}
