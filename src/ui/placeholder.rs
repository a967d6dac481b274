use serde::Serialize;

use crate::lyrics::{LoadState, LoaderSnapshot};

/// Message shown in place of the lyric column when there is nothing to scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    NoTrack,
    Loading,
    UnsupportedFormat,
    NoLyrics,
}

impl Placeholder {
    /// `None` while the document has lines to show.
    pub fn select(snapshot: &LoaderSnapshot) -> Option<Self> {
        if !snapshot.document.is_empty() {
            return None;
        }
        Some(if snapshot.track_id.is_none() {
            Self::NoTrack
        } else {
            match snapshot.state {
                LoadState::Loading => Self::Loading,
                LoadState::UnsupportedFormat => Self::UnsupportedFormat,
                LoadState::Idle | LoadState::Loaded | LoadState::Error => Self::NoLyrics,
            }
        })
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::NoTrack => "(ಗ ‸ ಗ ) 未加载音频",
            Self::Loading => "(*ゝω・) 少女祈祷中..",
            Self::UnsupportedFormat => "(・∀・*) 抱歉，该歌词格式不支持",
            Self::NoLyrics => "(,,•́ . •̀,,) 抱歉，当前歌曲暂无歌词",
        }
    }
}
