use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("malformed response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode catalog query: {0}")]
    Query(#[source] serde_json::Error),
}

pub const NOTICE: &str = "Could not load from the course catalog. Try again.";

impl CatalogError {
    /// Message shown to the user. The detail goes to the logs only.
    pub fn notice(&self) -> &'static str {
        NOTICE
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
