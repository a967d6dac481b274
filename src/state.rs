// state.rs: Render-side state derived from the loader and the playback position

use serde::Serialize;

use crate::lyrics::{LoaderSnapshot, resolve};
use crate::timer::sanitize_position;
use crate::ui::placeholder::Placeholder;
use crate::ui::scroll::{DisplayMode, Geometry, ScrollOffset};

/// Playback position as reported by the media element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaybackPosition {
    /// Fraction of the track already played, nominally 0..=1.
    pub played: f64,
    pub duration_ms: f64,
}

impl PlaybackPosition {
    pub fn new(played: f64, duration_ms: f64) -> Self {
        Self {
            played,
            duration_ms,
        }
    }

    pub fn current_time_ms(&self) -> f64 {
        sanitize_position(self.played) * sanitize_position(self.duration_ms)
    }
}

/// Everything the lyric widget needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LyricFrame {
    pub active_index: Option<usize>,
    pub active_text: Option<String>,
    pub translation: Option<String>,
    pub scroll: ScrollOffset,
    pub placeholder: Option<Placeholder>,
    pub loading: bool,
}

impl LyricFrame {
    pub fn placeholder_message(&self) -> Option<&'static str> {
        self.placeholder.map(Placeholder::message)
    }
}

/// Build the frame for the current loader snapshot and playback position.
///
/// Pure: call it again whenever any input changes.
pub fn compose_frame(
    snapshot: &LoaderSnapshot,
    position: PlaybackPosition,
    mode: DisplayMode,
    geometry: &Geometry,
) -> LyricFrame {
    let document = &snapshot.document;
    let active = resolve(document, position.current_time_ms());
    let scroll = active
        .map(|a| geometry.offset(a.index, document.len(), mode))
        .unwrap_or_default();
    LyricFrame {
        active_index: active.map(|a| a.index),
        active_text: active.map(|a| a.line.text.clone()),
        translation: active.and_then(|a| a.translation).map(str::to_string),
        scroll,
        placeholder: Placeholder::select(snapshot),
        loading: snapshot.is_loading(),
    }
}

/// Holds the last composed frame and bumps a version when it changes, so
/// consumers can skip redundant redraws.
#[derive(Debug, Default)]
pub struct FrameState {
    pub frame: LyricFrame,
    pub version: u64,
}

impl FrameState {
    pub fn update(&mut self, frame: LyricFrame) -> bool {
        if frame == self.frame {
            return false;
        }
        self.frame = frame;
        self.version += 1;
        true
    }
}
