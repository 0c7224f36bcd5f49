//! Classified failures for scraping stages

/// Why a fetch or extraction step produced less than requested.
///
/// Stages never propagate these past their public boundary; they log the
/// error and degrade to a partial or empty result. The variants exist so the
/// degrade path can be matched on and tested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    /// Network failure, timeout or non-2xx response
    Transport {
        status: Option<u16>,
        message: String,
    },
    /// Expected markup substructure (or URL component) is missing
    Structure(String),
    /// Text was found but could not be interpreted (e.g. a non-numeric year)
    Semantic(String),
    /// Caller-supplied index outside the available range
    OutOfRange { index: i64, len: usize },
}

impl std::fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Transport {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::Structure(what) => write!(f, "missing markup: {what}"),
            Self::Semantic(what) => write!(f, "unparseable value: {what}"),
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range (have {len})")
            }
        }
    }
}

impl std::error::Error for ScrapeError {}

impl ScrapeError {
    /// Create transport error from reqwest error
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        Self::Transport {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }

    pub fn structure(what: impl Into<String>) -> Self {
        Self::Structure(what.into())
    }

    pub fn semantic(what: impl Into<String>) -> Self {
        Self::Semantic(what.into())
    }

    /// HTTP status code, if the upstream answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}
