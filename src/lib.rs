//! Synchronized LRC lyrics for an embeddable music player.
//!
//! Raw lyric text is turned into a time-sorted [`LyricDocument`]; on every
//! playback update the caller re-resolves the active line and the scroll
//! offset of the lyric window. Loading is asynchronous and published through
//! [`LyricLoader::subscribe`].

pub mod lyrics;
pub mod state;
pub mod timer;
pub mod ui;

pub use lyrics::{
    ActiveLine, HttpFetcher, LoadState, LoaderConfig, LoaderSnapshot, LyricDocument, LyricFetcher,
    LyricLine, LyricLoader, LyricSourceMode, LyricsError, StalePolicy, Track, parse_lrc, resolve,
};
pub use state::{FrameState, LyricFrame, PlaybackPosition, compose_frame};
pub use ui::{DisplayMode, Geometry, Placeholder, ReloadTrigger, ScrollOffset, compute_offset};
