use thiserror::Error;

/// Failure to obtain a merchant page.
///
/// Missing markup is never an error: extractors return empty results or
/// fallback values instead.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}
