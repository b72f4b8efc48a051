//! tvdb_client - Blocking client for TheTVDB REST API
//!
//! This library resolves free-text show names to TheTVDB series, even when the
//! name is only an alias or a differently romanised title, and looks up
//! episode listings, file-name safe episode titles, cast and artwork for them.
//!
//! ```no_run
//! use tvdb_client::{EpisodeOrder, ImageType, ShowRef, TvdbClient, TvdbConfig};
//!
//! let mut client = TvdbClient::new(TvdbConfig::from_env()?)?;
//!
//! let title = client.episode_title("Mythbusters", 2003, 1, EpisodeOrder::Aired)?;
//! let id = client.resolve_show_id("Toaru Majutsu no Index", 0.8)?;
//! let episodes = client.list_episodes(id)?;
//! let posters = client.images(ShowRef::name("Firefly").with_accuracy(0.9), ImageType::Poster)?;
//! # Ok::<(), tvdb_client::TvdbError>(())
//! ```

mod catalog;
mod client;
mod config;
mod error;
mod file_name;
mod session;
mod transport;

pub use catalog::matching::similarity;
pub use catalog::{
    Actor, DEFAULT_ACCURACY, Episode, EpisodeNumber, EpisodeOrder, ImageType, Series, SeriesId,
    ShowRef,
};
pub use client::TvdbClient;
pub use config::TvdbConfig;
pub use error::{Result, TvdbError};
pub use file_name::sanitize_title;
pub use transport::{HttpTransport, Transport};
