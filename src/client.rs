//! TheTVDB client
//!
//! [`TvdbClient`] resolves free-text show names to series ids and looks up
//! episodes, cast and artwork for them. It logs in lazily on the first
//! request and keeps the token for its own lifetime.

use crate::catalog::matching::best_match;
use crate::catalog::tvdb_types::{
    DataEnvelope, TvdbActor, TvdbEpisode, TvdbEpisodePage, TvdbImage, TvdbSeries,
};
use crate::catalog::{
    Actor, Episode, EpisodeOrder, ImageType, Series, SeriesId, ShowRef, validate_accuracy,
    validate_name,
};
use crate::config::TvdbConfig;
use crate::error::{Result, TvdbError};
use crate::file_name::sanitize_title;
use crate::session::Session;
use crate::transport::{HttpTransport, Transport, upstream_error};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Blocking client for TheTVDB REST API.
///
/// One instance owns one session. It is not meant to be shared between
/// threads; create one client per thread instead.
#[derive(Debug)]
pub struct TvdbClient<T = HttpTransport> {
    config: TvdbConfig,
    transport: T,
    session: Session,
}

impl TvdbClient<HttpTransport> {
    /// Creates a client talking HTTP to the configured API root.
    ///
    /// No request is made until the first lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the configured
    /// language is not a valid header value.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tvdb_client::{EpisodeOrder, TvdbClient, TvdbConfig};
    ///
    /// let mut client = TvdbClient::new(TvdbConfig::new("MY_API_KEY")).unwrap();
    /// let title = client
    ///     .episode_title("Mythbusters", 2003, 1, EpisodeOrder::Aired)
    ///     .unwrap();
    /// println!("{title}");
    /// ```
    pub fn new(config: TvdbConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> TvdbClient<T> {
    /// Creates a client on top of an arbitrary transport.
    ///
    /// # Errors
    ///
    /// Returns `TvdbError::InvalidInput` if the configured language is not a
    /// valid header value.
    pub fn with_transport(config: TvdbConfig, transport: T) -> Result<Self> {
        let session = Session::new(&config)?;
        Ok(Self {
            config,
            transport,
            session,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &TvdbConfig {
        &self.config
    }

    /// Whether the api key has already been exchanged for a token.
    pub fn is_authorized(&self) -> bool {
        self.session.is_authorized()
    }

    /// Logs in unless already authorized.
    ///
    /// Every lookup calls this itself, so calling it up front is only useful
    /// to surface bad credentials early.
    ///
    /// # Errors
    ///
    /// Returns `TvdbError::InvalidCredentials` if the service rejects the key.
    #[instrument(skip_all)]
    pub fn ensure_authorized(&mut self) -> Result<()> {
        self.session.ensure_authorized(&self.transport, &self.config)
    }

    /// Searches for series by name and returns every candidate.
    ///
    /// # Errors
    ///
    /// - `TvdbError::InvalidInput` if `name` is blank
    /// - `TvdbError::ShowNotFound` if the search yields no candidates
    #[instrument(skip(self))]
    pub fn get_show(&mut self, name: &str) -> Result<Vec<Series>> {
        validate_name(name)?;

        let url = self.config.search_url();
        let body = self.get(&url, &[("name", name.to_string())])?;
        if let Some(message) = upstream_error(&body) {
            debug!(upstream = message, "Search returned no candidates");
            return Err(TvdbError::ShowNotFound(name.to_string()));
        }

        let candidates: Vec<Series> = decode::<DataEnvelope<Vec<TvdbSeries>>>(body, "search")?
            .data
            .unwrap_or_default()
            .into_iter()
            .map(Series::from)
            .collect();

        if candidates.is_empty() {
            return Err(TvdbError::ShowNotFound(name.to_string()));
        }
        Ok(candidates)
    }

    /// Looks up the id of the series best matching `name`.
    ///
    /// `Ok(None)` means the search returned candidates but none of their
    /// titles or aliases reached `accuracy`.
    ///
    /// # Errors
    ///
    /// - `TvdbError::InvalidInput` if `name` is blank or `accuracy` is outside `[0, 1]`
    /// - `TvdbError::ShowNotFound` if the search yields no candidates
    #[instrument(skip(self))]
    pub fn find_show_id(&mut self, name: &str, accuracy: f64) -> Result<Option<SeriesId>> {
        validate_name(name)?;
        validate_accuracy(accuracy)?;

        let candidates = self.get_show(name)?;
        let id = best_match(name, &candidates, accuracy);
        match id {
            Some(id) => info!(%id, "Resolved show"),
            None => debug!(candidates = candidates.len(), "No candidate within accuracy"),
        }
        Ok(id)
    }

    /// Resolves `name` to a series id.
    ///
    /// # Errors
    ///
    /// Same as [`Self::find_show_id`], plus `TvdbError::InvalidShowId` if no
    /// candidate matched within `accuracy`.
    #[instrument(skip(self))]
    pub fn resolve_show_id(&mut self, name: &str, accuracy: f64) -> Result<SeriesId> {
        self.find_show_id(name, accuracy)?
            .ok_or_else(|| TvdbError::InvalidShowId(name.to_string()))
    }

    /// Retrieves every episode of a series, page by page.
    ///
    /// Pages are fetched one after another in increasing order and their
    /// records concatenated in response order. A series without episodes
    /// yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `TvdbError::InvalidData` if a page after the first reports an
    /// error or has an unexpected shape.
    #[instrument(skip(self), fields(series_id = %id))]
    pub fn list_episodes(&mut self, id: SeriesId) -> Result<Vec<Episode>> {
        let url = self.config.series_url(&format!("{id}/episodes"));

        let first = self.get(&url, &[("page", "1".to_string())])?;
        if let Some(message) = upstream_error(&first) {
            debug!(upstream = message, "Series has no episode listing");
            return Ok(Vec::new());
        }
        let first: TvdbEpisodePage = decode(first, "episode page")?;
        let last_page = first
            .links
            .and_then(|links| links.last)
            .unwrap_or(1)
            .max(1);

        let mut episodes = to_episodes(first.data);
        for page in 2..=last_page {
            let body = self.get(&url, &[("page", page.to_string())])?;
            if let Some(message) = upstream_error(&body) {
                return Err(TvdbError::InvalidData(format!(
                    "episode page {page} of {last_page} for series {id}: {message}"
                )));
            }
            let records: TvdbEpisodePage = decode(body, "episode page")?;
            episodes.extend(to_episodes(records.data));
        }

        debug!(pages = last_page, count = episodes.len(), "Listed episodes");
        Ok(episodes)
    }

    /// Retrieves every episode of a series given by name or id.
    ///
    /// # Errors
    ///
    /// Name resolution errors as in [`Self::resolve_show_id`], then those of
    /// [`Self::list_episodes`].
    #[instrument(skip_all)]
    pub fn episodes<'a>(&mut self, show: impl Into<ShowRef<'a>>) -> Result<Vec<Episode>> {
        let id = self.series_id(show.into())?;
        self.list_episodes(id)
    }

    /// Returns the title of an episode, stripped of characters that are
    /// illegal in file names.
    ///
    /// The episode is first requested directly by season and episode number in
    /// the chosen order. If the service does not find it, every episode of the
    /// series is listed and the first one whose episode number matches is
    /// taken, regardless of its season.
    ///
    /// # Errors
    ///
    /// - `TvdbError::InvalidInput` if `season` is negative, `episode` is below 1,
    ///   or the show name/accuracy is invalid
    /// - name resolution errors as in [`Self::resolve_show_id`]
    /// - `TvdbError::NoSuchEpisode` if neither lookup finds the episode
    #[instrument(skip(self, show))]
    pub fn episode_title<'a>(
        &mut self,
        show: impl Into<ShowRef<'a>>,
        season: i32,
        episode: i32,
        order: EpisodeOrder,
    ) -> Result<String> {
        let season_number = u32::try_from(season).map_err(|_| {
            TvdbError::InvalidInput(format!("season must not be negative, got {season}"))
        })?;
        let episode_number = u32::try_from(episode)
            .ok()
            .filter(|number| *number >= 1)
            .ok_or_else(|| {
                TvdbError::InvalidInput(format!("episode must be at least 1, got {episode}"))
            })?;

        let id = self.series_id(show.into())?;

        if let Some(title) = self.query_episode_name(id, season_number, episode_number, order)? {
            return Ok(sanitize_title(&title));
        }

        warn!(
            series_id = %id,
            season,
            episode,
            "Direct episode query found nothing, scanning all episodes"
        );
        let episodes = self.list_episodes(id)?;
        episodes
            .iter()
            .find(|candidate| {
                candidate
                    .number(order)
                    .is_some_and(|number| number.episode == episode_number)
            })
            .map(|found| sanitize_title(&found.name))
            .ok_or(TvdbError::NoSuchEpisode {
                series_id: id,
                season,
                episode,
            })
    }

    /// Retrieves the cast of a series.
    ///
    /// # Errors
    ///
    /// Returns `TvdbError::NoActorsFound` if the service reports an error.
    #[instrument(skip(self), fields(series_id = %id))]
    pub fn list_actors(&mut self, id: SeriesId) -> Result<Vec<Actor>> {
        let url = self.config.series_url(&format!("{id}/actors"));
        let body = self.get(&url, &[])?;
        if upstream_error(&body).is_some() {
            return Err(TvdbError::NoActorsFound(id));
        }

        let actors = decode::<DataEnvelope<Vec<TvdbActor>>>(body, "actors")?
            .data
            .unwrap_or_default()
            .into_iter()
            .map(Actor::from)
            .collect();
        Ok(actors)
    }

    /// Retrieves the cast of a series given by name or id.
    ///
    /// # Errors
    ///
    /// Name resolution errors as in [`Self::resolve_show_id`], then those of
    /// [`Self::list_actors`].
    #[instrument(skip_all)]
    pub fn actors<'a>(&mut self, show: impl Into<ShowRef<'a>>) -> Result<Vec<Actor>> {
        let id = self.series_id(show.into())?;
        self.list_actors(id)
    }

    /// Retrieves absolute URLs of all images of one type for a series.
    ///
    /// # Errors
    ///
    /// Returns `TvdbError::NoImagesFound` if the service reports an error.
    #[instrument(skip(self), fields(series_id = %id))]
    pub fn list_images(&mut self, id: SeriesId, image_type: ImageType) -> Result<Vec<String>> {
        let url = self.config.series_url(&format!("{id}/images/query"));
        let body = self.get(&url, &[("keyType", image_type.as_str().to_string())])?;
        if upstream_error(&body).is_some() {
            return Err(TvdbError::NoImagesFound {
                series_id: id,
                image_type,
            });
        }

        let urls = decode::<DataEnvelope<Vec<TvdbImage>>>(body, "images")?
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|image| format!("{}{}", self.config.image_url, image.file_name))
            .collect();
        Ok(urls)
    }

    /// Retrieves image URLs for a series given by name or id.
    ///
    /// # Errors
    ///
    /// Name resolution errors as in [`Self::resolve_show_id`], then those of
    /// [`Self::list_images`].
    #[instrument(skip(self, show))]
    pub fn images<'a>(
        &mut self,
        show: impl Into<ShowRef<'a>>,
        image_type: ImageType,
    ) -> Result<Vec<String>> {
        let id = self.series_id(show.into())?;
        self.list_images(id, image_type)
    }

    /// Turns a show reference into an id, resolving names on every call.
    fn series_id(&mut self, show: ShowRef<'_>) -> Result<SeriesId> {
        match show {
            ShowRef::Id(id) => Ok(id),
            ShowRef::Name { name, accuracy } => self.resolve_show_id(name, accuracy),
        }
    }

    /// Asks the service for one episode; `None` if it reports no match.
    fn query_episode_name(
        &mut self,
        id: SeriesId,
        season: u32,
        episode: u32,
        order: EpisodeOrder,
    ) -> Result<Option<String>> {
        let url = self.config.series_url(&format!("{id}/episodes/query"));
        let (season_key, episode_key) = order.query_keys();
        let body = self.get(
            &url,
            &[(season_key, season.to_string()), (episode_key, episode.to_string())],
        )?;
        if upstream_error(&body).is_some() {
            return Ok(None);
        }

        let name = decode::<DataEnvelope<Vec<TvdbEpisode>>>(body, "episode query")?
            .data
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|found| found.episode_name.unwrap_or_default());
        Ok(name)
    }

    /// Authorizes if needed, then issues a GET with the session headers.
    fn get(&mut self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        self.ensure_authorized()?;
        self.transport.get(url, query, self.session.headers())
    }
}

fn to_episodes(records: Option<Vec<TvdbEpisode>>) -> Vec<Episode> {
    records
        .unwrap_or_default()
        .into_iter()
        .map(Episode::from)
        .collect()
}

fn decode<D: DeserializeOwned>(body: Value, what: &str) -> Result<D> {
    serde_json::from_value(body)
        .map_err(|e| TvdbError::InvalidData(format!("unexpected {what} response: {e}")))
}
