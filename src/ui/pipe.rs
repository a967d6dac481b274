use std::io::{self, Write};
use std::time::Duration;

use crate::lyrics::{LyricDocument, LyricFetcher, LyricLoader, Track};
use crate::state::{FrameState, LyricFrame, compose_frame};
use crate::timer::PlaybackTimer;
use crate::ui::placeholder::Placeholder;
use crate::ui::scroll::{DisplayMode, Geometry};

/// Extra playback time after the last line when no duration is given.
const TAIL_MS: f64 = 5_000.0;

#[derive(Debug, Clone)]
pub struct PipeOptions {
    pub mode: DisplayMode,
    pub tick: Duration,
    pub start_ms: f64,
    pub duration_ms: Option<f64>,
    /// Also print the scroll offset for each new line.
    pub show_offset: bool,
}

/// Load lyrics for `track`, then print each newly active line to stdout
/// while a simulated clock plays the track through.
pub async fn display_lyrics_pipe<F: LyricFetcher>(
    loader: &LyricLoader<F>,
    track: &Track,
    lrc_type: i64,
    opts: PipeOptions,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let document = loader.load_code(track, lrc_type).await?;
    let duration_ms = opts
        .duration_ms
        .unwrap_or_else(|| default_duration_ms(&document));
    let geometry = Geometry::for_mode(opts.mode, track.tlrc.is_some());
    tracing::info!(lines = document.len(), duration_ms, "starting playback");

    let mut timer = PlaybackTimer::new(duration_ms);
    timer.seek(opts.start_ms);
    timer.play();

    let mut state = FrameState::default();
    let mut last_shown = None;
    let mut ticker = tokio::time::interval(opts.tick);
    loop {
        ticker.tick().await;
        let frame = compose_frame(&loader.snapshot(), timer.position(), opts.mode, &geometry);
        if state.update(frame) {
            write_frame(&mut io::stdout(), &state.frame, &mut last_shown, opts.show_offset)?;
        }
        if timer.finished() {
            break;
        }
    }
    Ok(())
}

/// What the pipe printed last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shown {
    Line(usize),
    Placeholder(Placeholder),
}

/// Print the frame if it shows something other than `last`.
pub fn write_frame<W: Write>(
    out: &mut W,
    frame: &LyricFrame,
    last: &mut Option<Shown>,
    show_offset: bool,
) -> io::Result<()> {
    let shown = match (frame.placeholder, frame.active_index) {
        (Some(placeholder), _) => Shown::Placeholder(placeholder),
        (None, Some(index)) => Shown::Line(index),
        (None, None) => return Ok(()),
    };
    if *last == Some(shown) {
        return Ok(());
    }
    *last = Some(shown);

    if let Some(message) = frame.placeholder_message() {
        return writeln!(out, "{message}");
    }
    if let Some(text) = &frame.active_text {
        if show_offset {
            writeln!(out, "[{:>6}px] {text}", frame.scroll.translate_y_px)?;
        } else {
            writeln!(out, "{text}")?;
        }
    }
    if let Some(translation) = &frame.translation {
        writeln!(out, "{translation}")?;
    }
    Ok(())
}

fn default_duration_ms(document: &LyricDocument) -> f64 {
    document
        .primary
        .last()
        .map(|line| line.time_ms.max(0) as f64 + TAIL_MS)
        .unwrap_or(TAIL_MS)
}
