use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to fetch feed {url}: {reason}")]
    FeedFetch {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn fetch(url: &str, status: Option<u16>, reason: impl Into<String>) -> Self {
        Error::FeedFetch {
            url: url.to_string(),
            status,
            reason: reason.into(),
        }
    }

    /// Whether the failure happened while retrieving a feed over the network.
    /// The caller may try the aggregation again later.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Error::FeedFetch { .. })
    }

    /// HTTP status carried by a fetch failure, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::FeedFetch { status, .. } => *status,
            _ => None,
        }
    }
}
