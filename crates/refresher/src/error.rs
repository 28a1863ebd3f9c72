use thiserror::Error;

/// Failure of a single refresh cycle.
///
/// Cycle errors are logged and swallowed by the scheduler; none of them
/// stop the job or surface to API clients.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("feed payload is not valid CSV: {0}")]
    Parse(#[from] csv::Error),

    #[error("store replace failed: {0}")]
    Store(#[from] mongodb::error::Error),
}
