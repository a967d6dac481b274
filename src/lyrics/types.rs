use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

// Shared HTTP client; no request timeout unless a fetcher is built with one.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .expect("failed to build HTTP client")
});

pub const DEFAULT_USER_AGENT: &str = "lrcsync/0.1";

/// A single timestamped lyric line. `time_ms` already includes the document offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LyricLine {
    pub time_ms: i64,
    pub text: String,
}

/// Parsed lyrics for one track: primary lines, translation lines and the
/// offset that was applied to both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LyricDocument {
    pub primary: Vec<LyricLine>,
    pub translation: Vec<LyricLine>,
    pub offset_ms: i64,
}

impl LyricDocument {
    /// Build a document from raw primary and translation text.
    ///
    /// The `[offset:N]` directive is read from the primary text only and
    /// shifts both sequences, so translation lines keep pairing with the
    /// primary lines they were written against.
    pub fn from_sources(primary: &str, translation: &str) -> Self {
        let offset_ms = crate::lyrics::parse::find_offset(primary);
        Self {
            primary: crate::lyrics::parse::parse_with_offset(primary, offset_ms),
            translation: crate::lyrics::parse::parse_with_offset(translation, offset_ms),
            offset_ms,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    pub fn len(&self) -> usize {
        self.primary.len()
    }
}

#[derive(Error, Debug)]
pub enum LyricsError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP {status} fetching {url}")]
    Http { status: u16, url: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Illegal lrcType: {0}")]
    IllegalSourceMode(i64),
}

pub(crate) fn http_client() -> &'static Client {
    &HTTP_CLIENT
}
