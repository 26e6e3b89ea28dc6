use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API error {status} for {url}")]
    Status { status: u16, url: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reasons a chapter ends up "unavailable".
#[derive(Error, Debug)]
pub enum ChapterError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("no txt or items field in response for {0}")]
    NoContent(String),
}
