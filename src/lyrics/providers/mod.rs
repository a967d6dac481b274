pub mod http;

use std::future::Future;

use crate::lyrics::types::LyricsError;

pub use http::HttpFetcher;

/// Retrieves raw lyric text for a source reference taken from a track.
///
/// The loader calls this once per present reference and never retries;
/// a failure is handed back to whoever asked for the load.
pub trait LyricFetcher: Send + Sync {
    fn fetch(&self, source: &str) -> impl Future<Output = Result<String, LyricsError>> + Send;
}

impl<F: LyricFetcher> LyricFetcher for std::sync::Arc<F> {
    fn fetch(&self, source: &str) -> impl Future<Output = Result<String, LyricsError>> + Send {
        (**self).fetch(source)
    }
}
