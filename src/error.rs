// src/error.rs
use thiserror::Error;

/// Every failure the pipeline can surface.
///
/// An empty scrape is *not* an error: `build_weeks` returns no weeks and the
/// runner turns that into a 404.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Invalid {label} color: expected 3 or 6 hex characters.")]
    ColorFormat { label: &'static str },

    #[error("Invalid subject {subject:?}: it cannot be addressed as a path segment.")]
    Subject { subject: String },

    #[error("Invalid origin base {base:?}: expected an absolute http(s) URL.")]
    BaseUrl { base: String },

    #[error("GitHub responded with {status}")]
    Origin { status: u16 },

    #[error("Origin returned 304 but no cached body exists for {key}")]
    StaleCache { key: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cache entry is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cache I/O: {0}")]
    Io(#[from] std::io::Error),
}

impl ChartError {
    /// Status a transport wrapper should answer with.
    pub fn status(&self) -> u16 {
        match self {
            ChartError::ColorFormat { .. } | ChartError::Subject { .. } => 400,
            _ => 500,
        }
    }
}
