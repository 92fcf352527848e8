use thiserror::Error;

/// Reasons the activities document could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("activities document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("activities document must be a JSON array, found {found}")]
    NotAnArray { found: &'static str },
}
