use std::time::Instant;

use crate::state::PlaybackPosition;

/// Monotonic playback clock for driving the engine without a media element.
#[derive(Debug, PartialEq, Default)]
pub struct PlaybackTimer {
    /// Anchor position in milliseconds (finite, >= 0).
    anchor_ms: f64,
    /// Instant corresponding to `anchor_ms` while playing.
    anchor_instant: Option<Instant>,
    duration_ms: f64,
}

impl PlaybackTimer {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms: sanitize_position(duration_ms),
            ..Self::default()
        }
    }

    /// Jump to `position_ms`. Keeps running if the clock was running.
    pub fn seek(&mut self, position_ms: f64) {
        self.anchor_ms = sanitize_position(position_ms).min(self.duration_ms);
        if self.anchor_instant.is_some() {
            self.anchor_instant = Some(Instant::now());
        }
    }

    pub fn play(&mut self) {
        if self.anchor_instant.is_none() {
            self.anchor_instant = Some(Instant::now());
        }
    }

    pub fn pause(&mut self) {
        self.anchor_ms = self.elapsed_ms();
        self.anchor_instant = None;
    }

    pub fn is_playing(&self) -> bool {
        self.anchor_instant.is_some()
    }

    pub fn elapsed_ms(&self) -> f64 {
        let base = self.anchor_ms;
        let Some(inst) = self.anchor_instant else {
            return base;
        };
        let val = base + inst.elapsed().as_secs_f64() * 1000.0;
        if val.is_finite() {
            val.min(self.duration_ms)
        } else {
            base
        }
    }

    pub fn finished(&self) -> bool {
        self.elapsed_ms() >= self.duration_ms
    }

    /// Position in the shape the media element reports it.
    pub fn position(&self) -> PlaybackPosition {
        let played = if self.duration_ms > 0.0 {
            self.elapsed_ms() / self.duration_ms
        } else {
            0.0
        };
        PlaybackPosition::new(played, self.duration_ms)
    }
}

pub fn sanitize_position(p: f64) -> f64 {
    if p.is_nan() || !p.is_finite() || p < 0.0 {
        0.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_clock_holds_position() {
        let mut timer = PlaybackTimer::new(10_000.0);
        timer.seek(2_500.0);
        assert!(!timer.is_playing());
        assert_eq!(timer.elapsed_ms(), 2_500.0);
        assert_eq!(timer.position().played, 0.25);
        assert!((timer.position().current_time_ms() - 2_500.0).abs() < 1e-6);
    }

    #[test]
    fn running_clock_advances() {
        let mut timer = PlaybackTimer::new(10_000.0);
        timer.play();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(timer.elapsed_ms() > 0.0);
        timer.pause();
        let held = timer.elapsed_ms();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(timer.elapsed_ms(), held);
    }

    #[test]
    fn seek_is_clamped() {
        let mut timer = PlaybackTimer::new(1_000.0);
        timer.seek(5_000.0);
        assert!(timer.finished());
        timer.seek(-3.0);
        assert_eq!(timer.elapsed_ms(), 0.0);
    }

    #[test]
    fn sanitize() {
        assert_eq!(sanitize_position(f64::NAN), 0.0);
        assert_eq!(sanitize_position(f64::INFINITY), 0.0);
        assert_eq!(sanitize_position(-1.0), 0.0);
        assert_eq!(sanitize_position(3.5), 3.5);
    }
}
