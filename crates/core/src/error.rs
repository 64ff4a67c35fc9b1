use thiserror::Error;

pub type RelayResult<T> = Result<T, RelayError>;

/// Error taxonomy of the adapter. Variants carry owned strings only, so the
/// outcome of the shared initialization future can be cloned to every caller
/// awaiting it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Rejection of the shared initialization future: `init()` was first
    /// called with no tracking id configured.
    #[error("Tracking ID not given")]
    TrackingIdMissing,

    /// The collection library never became observable within the configured
    /// deadline. Only raised when a deadline is configured.
    #[error("Analytics library not ready after {waited_ms} ms")]
    InitTimeout { waited_ms: u64 },

    #[error("Configuration error: {0}")]
    Config(String),
}
