//! Data structures describing TheTVDB catalog entries.
//!
//! This module provides structures to represent series, episodes, cast members
//! and image categories as the client hands them out, together with the
//! conversions from the raw API records.

pub(crate) mod matching;
pub(crate) mod tvdb_types;

use crate::error::{Result, TvdbError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tvdb_types::{TvdbActor, TvdbEpisode, TvdbSeries};

/// Accuracy used when the caller does not pick one
pub const DEFAULT_ACCURACY: f64 = 0.8;

/// Opaque identifier of a series on TheTVDB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(pub u64);

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SeriesId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A series as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// The series identifier
    pub id: SeriesId,
    /// The display name of the series
    pub name: String,
    /// Alternate titles (translations, regional names)
    pub aliases: Vec<String>,
    /// Broadcasting network
    pub network: Option<String>,
    /// Airing status, e.g. "Continuing" or "Ended"
    pub status: Option<String>,
    /// Date of the first broadcast (YYYY-MM-DD)
    pub first_aired: Option<String>,
    /// Short description
    pub overview: Option<String>,
    /// Banner path relative to the image base URL
    pub banner: Option<String>,
    /// URL slug
    pub slug: Option<String>,
}

impl From<TvdbSeries> for Series {
    fn from(series: TvdbSeries) -> Self {
        Self {
            id: SeriesId(series.id),
            name: series.series_name.unwrap_or_default(),
            aliases: series.aliases.unwrap_or_default(),
            network: series.network,
            status: series.status,
            first_aired: series.first_aired,
            overview: series.overview,
            banner: series.banner,
            slug: series.slug,
        }
    }
}

/// A season/episode pair in one numbering scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeNumber {
    /// Season number (0 holds specials)
    pub season: u32,
    /// Episode number within the season
    pub episode: u32,
}

/// Represents a single episode of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// The episode identifier
    pub id: u64,
    /// Numbering in broadcast order
    pub aired: Option<EpisodeNumber>,
    /// Numbering on the DVD release, if one exists
    pub dvd: Option<EpisodeNumber>,
    /// Running number across the whole series
    pub absolute_number: Option<u32>,
    /// The episode title as delivered by the service
    pub name: String,
    /// A brief summary of the episode
    pub overview: Option<String>,
    /// Date of the first broadcast (YYYY-MM-DD)
    pub first_aired: Option<String>,
}

impl Episode {
    /// Returns the numbering of this episode in the given scheme.
    pub fn number(&self, order: EpisodeOrder) -> Option<EpisodeNumber> {
        match order {
            EpisodeOrder::Aired => self.aired,
            EpisodeOrder::Dvd => self.dvd,
        }
    }
}

impl From<TvdbEpisode> for Episode {
    fn from(episode: TvdbEpisode) -> Self {
        let aired = episode
            .aired_season
            .zip(episode.aired_episode_number)
            .map(|(season, episode)| EpisodeNumber { season, episode });
        let dvd = episode
            .dvd_season
            .zip(episode.dvd_episode_number.and_then(whole_number))
            .map(|(season, episode)| EpisodeNumber { season, episode });

        Self {
            id: episode.id,
            aired,
            dvd,
            absolute_number: episode.absolute_number,
            name: episode.episode_name.unwrap_or_default(),
            overview: episode.overview,
            first_aired: episode.first_aired,
        }
    }
}

/// Converts a float episode number to an integer if it has no fraction.
///
/// Split DVD episodes are numbered `1.1`, `1.2`, ... and cannot be addressed
/// by an integer episode number.
fn whole_number(value: f64) -> Option<u32> {
    if value.fract() == 0.0 && value >= 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

/// A cast member of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// The actor record identifier
    pub id: u64,
    /// The actor's name
    pub name: String,
    /// The character played
    pub role: Option<String>,
    /// Billing position, lower is more prominent
    pub sort_order: Option<i32>,
    /// Portrait path relative to the image base URL
    pub image: Option<String>,
}

impl Actor {
    /// Resolves the portrait path against the image base URL.
    pub fn image_url(&self, image_base: &str) -> Option<String> {
        self.image
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{image_base}{path}"))
    }
}

impl From<TvdbActor> for Actor {
    fn from(actor: TvdbActor) -> Self {
        Self {
            id: actor.id,
            name: actor.name.unwrap_or_default(),
            role: actor.role.filter(|role| !role.is_empty()),
            sort_order: actor.sort_order,
            image: actor.image.filter(|image| !image.is_empty()),
        }
    }
}

/// Image categories understood by the images endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    /// Background artwork
    Fanart,
    /// Series poster
    #[default]
    Poster,
    /// Per-season poster
    Season,
    /// Per-season banner
    SeasonWide,
    /// Series banner
    Series,
}

impl ImageType {
    /// The `keyType` value sent upstream.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fanart => "fanart",
            Self::Poster => "poster",
            Self::Season => "season",
            Self::SeasonWide => "seasonwide",
            Self::Series => "series",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numbering scheme used to address an episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpisodeOrder {
    /// Broadcast order
    #[default]
    Aired,
    /// DVD release order
    Dvd,
}

impl EpisodeOrder {
    /// Query parameter names for season and episode in this scheme.
    pub(crate) fn query_keys(self) -> (&'static str, &'static str) {
        match self {
            Self::Aired => ("airedSeason", "airedEpisode"),
            Self::Dvd => ("dvdSeason", "dvdEpisode"),
        }
    }
}

/// Anything other than "dvd" selects aired order.
impl From<&str> for EpisodeOrder {
    fn from(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("dvd") {
            Self::Dvd
        } else {
            Self::Aired
        }
    }
}

/// How an operation identifies the series it works on.
///
/// A name is resolved through the search endpoint on every call. An id skips
/// both validation and resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShowRef<'a> {
    /// Free-text name, matched against titles and aliases
    Name {
        /// The name to search for
        name: &'a str,
        /// Minimum similarity ratio in `[0, 1]` for a fuzzy match
        accuracy: f64,
    },
    /// An already known series identifier
    Id(SeriesId),
}

impl<'a> ShowRef<'a> {
    /// Refers to a series by name with the default accuracy.
    pub fn name(name: &'a str) -> Self {
        Self::Name {
            name,
            accuracy: DEFAULT_ACCURACY,
        }
    }

    /// Sets the accuracy of a name reference; ids are left untouched.
    #[must_use]
    pub fn with_accuracy(self, accuracy: f64) -> Self {
        match self {
            Self::Name { name, .. } => Self::Name { name, accuracy },
            id @ Self::Id(_) => id,
        }
    }
}

impl<'a> From<&'a str> for ShowRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::name(name)
    }
}

impl From<SeriesId> for ShowRef<'_> {
    fn from(id: SeriesId) -> Self {
        Self::Id(id)
    }
}

/// Rejects names that cannot be searched for.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(TvdbError::InvalidInput(
            "show name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Rejects accuracies outside `[0, 1]`, including NaN.
pub(crate) fn validate_accuracy(accuracy: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&accuracy) {
        return Err(TvdbError::InvalidInput(format!(
            "accuracy must be between 0 and 1, got {accuracy}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_episode(json: &str) -> TvdbEpisode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_episode_conversion_with_dvd_numbering() {
        let episode = Episode::from(raw_episode(
            r#"{"id": 1, "airedSeason": 2003, "airedEpisodeNumber": 1,
                "dvdSeason": 1, "dvdEpisodeNumber": 2.0,
                "episodeName": "Jaws Special", "absoluteNumber": 3}"#,
        ));
        assert_eq!(
            episode.number(EpisodeOrder::Aired),
            Some(EpisodeNumber {
                season: 2003,
                episode: 1
            })
        );
        assert_eq!(
            episode.number(EpisodeOrder::Dvd),
            Some(EpisodeNumber {
                season: 1,
                episode: 2
            })
        );
        assert_eq!(episode.name, "Jaws Special");
        assert_eq!(episode.absolute_number, Some(3));
    }

    #[test]
    fn test_episode_conversion_split_dvd_number() {
        let episode = Episode::from(raw_episode(
            r#"{"id": 1, "airedSeason": 1, "airedEpisodeNumber": 1,
                "dvdSeason": 1, "dvdEpisodeNumber": 1.5, "episodeName": null}"#,
        ));
        assert_eq!(episode.dvd, None);
        assert_eq!(episode.name, "");
    }

    #[test]
    fn test_episode_order_from_label() {
        assert_eq!(EpisodeOrder::from("dvd"), EpisodeOrder::Dvd);
        assert_eq!(EpisodeOrder::from(" DVD "), EpisodeOrder::Dvd);
        assert_eq!(EpisodeOrder::from("aired"), EpisodeOrder::Aired);
        assert_eq!(EpisodeOrder::from(""), EpisodeOrder::Aired);
        assert_eq!(EpisodeOrder::from("absolute"), EpisodeOrder::Aired);
        assert_eq!(EpisodeOrder::default(), EpisodeOrder::Aired);
    }

    #[test]
    fn test_show_ref_accuracy() {
        assert_eq!(
            ShowRef::from("Mythbusters"),
            ShowRef::Name {
                name: "Mythbusters",
                accuracy: DEFAULT_ACCURACY
            }
        );
        assert_eq!(
            ShowRef::name("Mythbusters").with_accuracy(0.5),
            ShowRef::Name {
                name: "Mythbusters",
                accuracy: 0.5
            }
        );
        assert_eq!(
            ShowRef::from(SeriesId(1)).with_accuracy(0.5),
            ShowRef::Id(SeriesId(1))
        );
    }

    #[test]
    fn test_validate_accuracy_bounds() {
        assert!(validate_accuracy(0.0).is_ok());
        assert!(validate_accuracy(1.0).is_ok());
        assert!(matches!(
            validate_accuracy(1.5),
            Err(TvdbError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_accuracy(f64::NAN),
            Err(TvdbError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_name_rejects_blank() {
        assert!(validate_name("Mythbusters").is_ok());
        assert!(matches!(validate_name("  "), Err(TvdbError::InvalidInput(_))));
    }

    #[test]
    fn test_actor_image_url() {
        let actor = Actor {
            id: 1,
            name: "Adam Savage".to_string(),
            role: None,
            sort_order: Some(0),
            image: Some("actors/1.jpg".to_string()),
        };
        assert_eq!(
            actor.image_url("https://thetvdb.com/banners/").as_deref(),
            Some("https://thetvdb.com/banners/actors/1.jpg")
        );
    }

    #[test]
    fn test_image_type_key() {
        assert_eq!(ImageType::default().as_str(), "poster");
        assert_eq!(ImageType::SeasonWide.to_string(), "seasonwide");
    }
}
