//! Error types for TheTVDB client operations
//!
//! Every failure a caller may want to branch on has its own variant. Transport
//! failures (connectivity, malformed bodies) are kept apart from the catalog
//! conditions reported by the service itself.

use crate::catalog::{ImageType, SeriesId};
use thiserror::Error;

/// Errors that can occur while talking to TheTVDB.
#[derive(Debug, Error)]
pub enum TvdbError {
    /// The login exchange was rejected, or no api key was configured
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// A caller-supplied argument failed validation before any request was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The search endpoint reported no candidates for the name
    #[error("Show not found: {0}")]
    ShowNotFound(String),

    /// The search returned candidates but none matched within the requested
    /// accuracy
    #[error("No show matched: {0}")]
    InvalidShowId(String),

    /// Neither the direct query nor the full episode scan found the episode
    #[error("No episode {season}x{episode} for series {series_id}")]
    NoSuchEpisode {
        series_id: SeriesId,
        season: i32,
        episode: i32,
    },

    /// The actors endpoint reported an error for the series
    #[error("No actors found for series {0}")]
    NoActorsFound(SeriesId),

    /// The images endpoint reported an error for the series and image type
    #[error("No {image_type} images found for series {series_id}")]
    NoImagesFound {
        series_id: SeriesId,
        image_type: ImageType,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not valid JSON
    #[error("Failed to parse API response: {0}")]
    Parse(String),

    /// The API returned JSON of an unexpected shape
    #[error("API returned invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for TheTVDB client operations
pub type Result<T> = std::result::Result<T, TvdbError>;
