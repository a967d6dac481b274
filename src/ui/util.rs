//! Lyric source identity for reload detection.
//!
//! The player reloads lyrics whenever the mode or either source reference of
//! the current track changes. Other track fields (name, cover, audio url) do
//! not trigger a reload.

use crate::lyrics::Track;

/// Everything a lyric load depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub lrc_type: i64,
    pub lrc: Option<String>,
    pub tlrc: Option<String>,
}

/// Types that can name the lyric source they would load from.
pub trait AsSourceKey {
    fn as_source_key(&self, lrc_type: i64) -> SourceKey;
}

impl AsSourceKey for Track {
    fn as_source_key(&self, lrc_type: i64) -> SourceKey {
        SourceKey {
            lrc_type,
            lrc: self.lrc.clone(),
            tlrc: self.tlrc.clone(),
        }
    }
}

pub fn source_key<T: AsSourceKey>(t: &T, lrc_type: i64) -> SourceKey {
    t.as_source_key(lrc_type)
}

/// Remembers the last observed source and reports when it changes.
#[derive(Debug, Default)]
pub struct ReloadTrigger {
    last: Option<SourceKey>,
}

impl ReloadTrigger {
    /// Returns true on the first observation and whenever the key differs
    /// from the previous one.
    pub fn observe<T: AsSourceKey>(&mut self, track: &T, lrc_type: i64) -> bool {
        let key = source_key(track, lrc_type);
        if self.last.as_ref() == Some(&key) {
            return false;
        }
        self.last = Some(key);
        true
    }
}
