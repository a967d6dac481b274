use crate::lyrics::types::{LyricDocument, LyricLine};

/// The line currently being sung, with its translation if one shares its timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveLine<'a> {
    pub index: usize,
    pub line: &'a LyricLine,
    pub translation: Option<&'a str>,
}

/// Pick the active line for a playback position in milliseconds.
///
/// The active line is the last one whose timestamp lies strictly before
/// `current_time_ms`. Before the first timestamp (or for a NaN position) the
/// first line is returned. `None` only when the document has no lines.
pub fn resolve(document: &LyricDocument, current_time_ms: f64) -> Option<ActiveLine<'_>> {
    let index = active_index(&document.primary, current_time_ms)?;
    let line = &document.primary[index];
    Some(ActiveLine {
        index,
        line,
        translation: translation_for(&document.translation, line.time_ms),
    })
}

/// Index of the active line in a time-sorted slice.
pub fn active_index(lines: &[LyricLine], current_time_ms: f64) -> Option<usize> {
    if lines.is_empty() {
        return None;
    }
    let passed = lines.partition_point(|line| (line.time_ms as f64) < current_time_ms);
    Some(passed.saturating_sub(1))
}

/// First translation line with exactly the given timestamp.
pub fn translation_for(translation: &[LyricLine], time_ms: i64) -> Option<&str> {
    let start = translation.partition_point(|line| line.time_ms < time_ms);
    translation
        .get(start)
        .filter(|line| line.time_ms == time_ms)
        .map(|line| line.text.as_str())
}
