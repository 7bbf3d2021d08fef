use thiserror::Error;

/// Failures a remote provider can surface. The aggregator treats every variant
/// as a soft, per-source failure; the taxonomy exists for logging and tests.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("remote returned HTTP {0}")]
    Http(u16),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Other(String),
}
