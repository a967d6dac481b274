//! Per-track lyric acquisition.
//!
//! A [`LyricLoader`] turns a [`Track`] and a [`LyricSourceMode`] into a fresh
//! [`LyricDocument`] and publishes every state change on a `watch` channel so
//! the render side can keep resolving against whatever is current without
//! waiting on the load.
//!
//! ```text
//! Idle ──load──▶ Loading ──ok──────────▶ Loaded | UnsupportedFormat
//!                   │
//!                   ├──fetch/mode error──▶ Error
//!                   └──future dropped───▶ Idle
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::lyrics::providers::LyricFetcher;
use crate::lyrics::types::{DEFAULT_USER_AGENT, LyricDocument, LyricsError};

/// Where a track's lyric text comes from. Numeric codes follow the player's `lrcType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum LyricSourceMode {
    /// Lyrics disabled; always an empty document.
    None,
    /// `lrc`/`tlrc` on the track hold the text itself.
    Inline,
    /// `lrc`/`tlrc` on the track are references handed to the fetcher.
    Remote,
}

impl TryFrom<i64> for LyricSourceMode {
    type Error = LyricsError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Inline),
            3 => Ok(Self::Remote),
            other => Err(LyricsError::IllegalSourceMode(other)),
        }
    }
}

impl From<LyricSourceMode> for i64 {
    fn from(mode: LyricSourceMode) -> Self {
        match mode {
            LyricSourceMode::None => 0,
            LyricSourceMode::Inline => 1,
            LyricSourceMode::Remote => 3,
        }
    }
}

/// The subset of the player's audio object the loader reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub artist: String,
    pub lrc: Option<String>,
    pub tlrc: Option<String>,
}

impl Track {
    /// Parse the player's audio object.
    pub fn from_json(json: &str) -> Result<Self, LyricsError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Primary text arrived but contained no timed lines.
    UnsupportedFormat,
    Error,
}

/// What happens when a load finishes after a newer one was started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Only the most recently started load may publish its result.
    #[default]
    DiscardStale,
    /// Whichever load finishes last overwrites the document.
    LastSettleWins,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub user_agent: String,
    /// No timeout when unset; a hung fetch keeps the loader in `Loading`.
    pub fetch_timeout_ms: Option<u64>,
    pub stale_policy: StalePolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout_ms: None,
            stale_policy: StalePolicy::default(),
        }
    }
}

/// Published view of the loader: current state and the document to render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoaderSnapshot {
    pub state: LoadState,
    pub document: Arc<LyricDocument>,
    pub track_id: Option<String>,
    /// Generation of the most recently started load.
    pub generation: u64,
}

impl LoaderSnapshot {
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }
}

pub struct LyricLoader<F> {
    fetcher: F,
    policy: StalePolicy,
    next_generation: AtomicU64,
    tx: watch::Sender<LoaderSnapshot>,
}

impl<F: LyricFetcher> LyricLoader<F> {
    pub fn new(fetcher: F, config: &LoaderConfig) -> Self {
        let (tx, _rx) = watch::channel(LoaderSnapshot::default());
        Self {
            fetcher,
            policy: config.stale_policy,
            next_generation: AtomicU64::new(0),
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LoaderSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> LoaderSnapshot {
        self.tx.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().is_loading()
    }

    /// Load lyrics for `track`, replacing the published document.
    ///
    /// Fetch failures are returned unchanged and leave an empty document in
    /// the `Error` state. Nothing is retried.
    pub async fn load(
        &self,
        track: &Track,
        mode: LyricSourceMode,
    ) -> Result<Arc<LyricDocument>, LyricsError> {
        self.run(track, Ok(mode)).await
    }

    /// Like [`load`](Self::load) but takes the raw `lrcType` code; an unknown
    /// code fails the load with [`LyricsError::IllegalSourceMode`].
    pub async fn load_code(
        &self,
        track: &Track,
        lrc_type: i64,
    ) -> Result<Arc<LyricDocument>, LyricsError> {
        self.run(track, LyricSourceMode::try_from(lrc_type)).await
    }

    async fn run(
        &self,
        track: &Track,
        mode: Result<LyricSourceMode, LyricsError>,
    ) -> Result<Arc<LyricDocument>, LyricsError> {
        let generation = self.begin(track);
        let _guard = LoadingGuard {
            tx: &self.tx,
            generation,
            policy: self.policy,
        };

        let acquired = match mode {
            Ok(mode) => self.acquire(track, mode).await,
            Err(err) => Err(Partial::nothing(err)),
        };

        match acquired {
            Ok((primary, translation)) => {
                let document = Arc::new(LyricDocument::from_sources(&primary, &translation));
                let state = if document.is_empty() && !primary.is_empty() {
                    LoadState::UnsupportedFormat
                } else {
                    LoadState::Loaded
                };
                tracing::debug!(
                    generation,
                    lines = document.len(),
                    translated = document.translation.len(),
                    ?state,
                    "lyrics loaded"
                );
                self.settle(generation, state, Arc::clone(&document));
                Ok(document)
            }
            Err(Partial { primary, error }) => {
                // Whatever primary text arrived stays on screen.
                let document = Arc::new(LyricDocument::from_sources(&primary, ""));
                tracing::warn!(
                    generation,
                    error = %error,
                    kept = document.len(),
                    "lyric load failed"
                );
                self.settle(generation, LoadState::Error, document);
                Err(error)
            }
        }
    }

    fn begin(&self, track: &Track) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed) + 1;
        self.tx.send_modify(|snap| {
            snap.state = LoadState::Loading;
            snap.document = Arc::default();
            snap.track_id = track.id.clone();
            snap.generation = generation;
        });
        tracing::debug!(generation, track = %track.name, "lyric load started");
        generation
    }

    async fn acquire(
        &self,
        track: &Track,
        mode: LyricSourceMode,
    ) -> Result<(String, String), Partial> {
        match mode {
            LyricSourceMode::None => Ok((String::new(), String::new())),
            LyricSourceMode::Inline => Ok((
                track.lrc.clone().unwrap_or_default(),
                track.tlrc.clone().unwrap_or_default(),
            )),
            LyricSourceMode::Remote => {
                // Translation is only requested once the primary has settled.
                let primary = self
                    .fetch_present(track.lrc.as_deref())
                    .await
                    .map_err(Partial::nothing)?;
                match self.fetch_present(track.tlrc.as_deref()).await {
                    Ok(translation) => Ok((primary, translation)),
                    Err(error) => Err(Partial { primary, error }),
                }
            }
        }
    }

    async fn fetch_present(&self, source: Option<&str>) -> Result<String, LyricsError> {
        match source.filter(|s| !s.is_empty()) {
            Some(source) => self.fetcher.fetch(source).await,
            None => Ok(String::new()),
        }
    }

    /// Publish a finished load unless the stale policy rejects it.
    fn settle(&self, generation: u64, state: LoadState, document: Arc<LyricDocument>) {
        let policy = self.policy;
        self.tx.send_if_modified(|snap| {
            if policy == StalePolicy::DiscardStale && snap.generation != generation {
                tracing::debug!(
                    generation,
                    current = snap.generation,
                    "discarding stale lyric load"
                );
                return false;
            }
            snap.state = state;
            snap.document = document;
            true
        });
    }
}

/// A failed acquisition and the primary text fetched before it failed.
struct Partial {
    primary: String,
    error: LyricsError,
}

impl Partial {
    fn nothing(error: LyricsError) -> Self {
        Self {
            primary: String::new(),
            error,
        }
    }
}

/// Releases the `Loading` state however the load future ends, including
/// being dropped mid-fetch.
struct LoadingGuard<'a> {
    tx: &'a watch::Sender<LoaderSnapshot>,
    generation: u64,
    policy: StalePolicy,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let generation = self.generation;
        let policy = self.policy;
        self.tx.send_if_modified(|snap| {
            let owned = policy == StalePolicy::LastSettleWins || snap.generation == generation;
            if owned && snap.state == LoadState::Loading {
                snap.state = LoadState::Idle;
                true
            } else {
                false
            }
        });
    }
}
