use serde::{Deserialize, Serialize};

/// Number of line slots the lyric window shows at once.
pub const VISIBLE_SLOTS: u32 = 5;
/// Lines kept above the active one in expanded mode.
pub const CONTEXT_LINES: usize = 3;
pub const TRANSITION_MS: u32 = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Single-line strip under the title; no context lines.
    #[default]
    Compact,
    /// Full lyric panel with context above the active line.
    Expanded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScrollOffset {
    pub translate_y_px: i64,
    pub transition_duration_ms: u32,
}

/// Vertical offset of the lyric column for the given active line.
///
/// Each slot is `line_box_height_px + line_margin_px` tall. In expanded mode
/// the window stays pinned at the top for the first three lines and stops
/// one line early at the end so it never scrolls into empty space.
pub fn compute_offset(
    active_index: usize,
    line_count: usize,
    line_box_height_px: u32,
    line_margin_px: u32,
    mode: DisplayMode,
) -> ScrollOffset {
    let transition_duration_ms = if line_count > 1 { TRANSITION_MS } else { 0 };
    if line_count == 0 {
        return ScrollOffset::default();
    }

    let pitch = i64::from(line_box_height_px) + i64::from(line_margin_px);
    let index = active_index as i64;
    let scrolled_lines = match mode {
        DisplayMode::Compact => index,
        DisplayMode::Expanded if active_index < CONTEXT_LINES => 0,
        DisplayMode::Expanded => {
            let is_last = index == line_count as i64 - CONTEXT_LINES as i64;
            if is_last { index - 3 } else { index - 2 }
        }
    };

    ScrollOffset {
        translate_y_px: -(scrolled_lines * pitch),
        transition_duration_ms,
    }
}

/// Per-mode sizing of the lyric window as drawn by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    pub line_height_px: u32,
    /// Height of one line box; doubled when a translation is shown underneath.
    pub line_box_height_px: u32,
    pub line_margin_px: u32,
    pub font_size_px: u32,
    pub window_height_px: u32,
}

impl Geometry {
    pub fn for_mode(mode: DisplayMode, has_translation: bool) -> Self {
        let (line_height_px, font_size_px, line_margin_px) = match mode {
            DisplayMode::Expanded => (20, 16, 20),
            DisplayMode::Compact => (16, 12, 0),
        };
        let line_box_height_px = if has_translation {
            line_height_px * 2
        } else {
            line_height_px
        };
        let window_height_px = match mode {
            DisplayMode::Expanded => (line_box_height_px + line_margin_px) * VISIBLE_SLOTS,
            DisplayMode::Compact => 32,
        };
        Self {
            line_height_px,
            line_box_height_px,
            line_margin_px,
            font_size_px,
            window_height_px,
        }
    }

    pub fn offset(&self, active_index: usize, line_count: usize, mode: DisplayMode) -> ScrollOffset {
        compute_offset(
            active_index,
            line_count,
            self.line_box_height_px,
            self.line_margin_px,
            mode,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: u32 = 20;
    const M: u32 = 20;

    fn expanded(index: usize, count: usize) -> i64 {
        compute_offset(index, count, H, M, DisplayMode::Expanded).translate_y_px
    }

    #[test]
    fn expanded_pins_first_three_lines() {
        for index in 0..3 {
            assert_eq!(expanded(index, 10), 0);
        }
    }

    #[test]
    fn expanded_keeps_active_line_centered() {
        assert_eq!(expanded(5, 10), -3 * 40);
        assert_eq!(expanded(3, 10), -40);
    }

    #[test]
    fn expanded_terminal_position_stops_early() {
        // index == count - 3 scrolls one line less than the centered formula.
        assert_eq!(expanded(7, 10), -4 * 40);
        assert_eq!(expanded(8, 10), -6 * 40);
    }

    #[test]
    fn compact_scrolls_every_line() {
        let offset = |index| compute_offset(index, 10, 16, 0, DisplayMode::Compact).translate_y_px;
        assert_eq!(offset(0), 0);
        assert_eq!(offset(1), -16);
        assert_eq!(offset(9), -144);
    }

    #[test]
    fn transition_only_with_multiple_lines() {
        assert_eq!(
            compute_offset(0, 2, H, M, DisplayMode::Expanded).transition_duration_ms,
            TRANSITION_MS
        );
        assert_eq!(
            compute_offset(0, 1, H, M, DisplayMode::Expanded).transition_duration_ms,
            0
        );
        assert_eq!(
            compute_offset(0, 0, H, M, DisplayMode::Compact),
            ScrollOffset::default()
        );
    }

    #[test]
    fn geometry_presets() {
        let g = Geometry::for_mode(DisplayMode::Expanded, false);
        assert_eq!(
            (g.line_box_height_px, g.line_margin_px, g.font_size_px, g.window_height_px),
            (20, 20, 16, 200)
        );
        let g = Geometry::for_mode(DisplayMode::Expanded, true);
        assert_eq!((g.line_box_height_px, g.window_height_px), (40, 300));
        let g = Geometry::for_mode(DisplayMode::Compact, true);
        assert_eq!(
            (g.line_box_height_px, g.line_margin_px, g.window_height_px),
            (32, 0, 32)
        );
    }

    #[test]
    fn geometry_offset_uses_box_pitch() {
        let g = Geometry::for_mode(DisplayMode::Expanded, true);
        assert_eq!(g.offset(5, 10, DisplayMode::Expanded).translate_y_px, -3 * 60);
    }
}
