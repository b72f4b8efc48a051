//! TheTVDB v3 response types for deserialization.
//!
//! These structures mirror the JSON bodies returned by the REST API. Nearly
//! every field may be `null` upstream, hence the liberal use of `Option`.

use serde::{Deserialize, Serialize};

/// Body sent to `POST /login`.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub apikey: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userkey: Option<&'a str>,
}

/// Successful answer of `POST /login`.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: Option<String>,
}

/// Generic `{"data": ...}` envelope used by every read endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: Option<T>,
}

/// A candidate returned by `GET /search/series`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TvdbSeries {
    pub id: u64,
    pub series_name: Option<String>,
    pub aliases: Option<Vec<String>>,
    pub banner: Option<String>,
    pub first_aired: Option<String>,
    pub network: Option<String>,
    pub overview: Option<String>,
    pub slug: Option<String>,
    pub status: Option<String>,
}

/// Pagination block of `GET /series/{id}/episodes`.
#[derive(Debug, Deserialize)]
pub(crate) struct TvdbLinks {
    pub last: Option<u32>,
}

/// One page of `GET /series/{id}/episodes`.
#[derive(Debug, Deserialize)]
pub(crate) struct TvdbEpisodePage {
    pub links: Option<TvdbLinks>,
    pub data: Option<Vec<TvdbEpisode>>,
}

/// A single episode record.
///
/// DVD numbering is reported as a float upstream (e.g. `1.0`), aired numbering
/// as an integer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TvdbEpisode {
    pub id: u64,
    pub aired_season: Option<u32>,
    pub aired_episode_number: Option<u32>,
    pub dvd_season: Option<u32>,
    pub dvd_episode_number: Option<f64>,
    pub absolute_number: Option<u32>,
    pub episode_name: Option<String>,
    pub overview: Option<String>,
    pub first_aired: Option<String>,
}

/// A cast member from `GET /series/{id}/actors`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TvdbActor {
    pub id: u64,
    pub name: Option<String>,
    pub role: Option<String>,
    pub sort_order: Option<i32>,
    pub image: Option<String>,
}

/// An image record from `GET /series/{id}/images/query`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TvdbImage {
    pub file_name: String,
}
