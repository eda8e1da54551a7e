//! Frame timing and the per-frame state the overlay can edit.

use std::{
    collections::VecDeque,
    ops::RangeInclusive,
    time::{Duration, Instant},
};

/// Bounds of the vertical offset the overlay slider edits.
pub const OFFSET_RANGE: RangeInclusive<f32> = -0.3..=0.3;

/// Number of frame deltas the FPS average spans.
const FPS_WINDOW: usize = 60;

/// Times of one frame, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTiming {
    /// Since the clock started; drives the animation.
    pub elapsed: f32,
    /// Since the previous tick; drives movement.
    pub delta: f32,
}

/// Measures elapsed and per-frame time and keeps a rolling FPS average.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    deltas: VecDeque<Duration>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            deltas: VecDeque::with_capacity(FPS_WINDOW),
        }
    }

    pub fn tick(&mut self) -> FrameTiming {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`. Instants earlier than the previous tick count as zero delta.
    pub fn tick_at(&mut self, now: Instant) -> FrameTiming {
        let delta = now.saturating_duration_since(self.last);
        self.last = self.last.max(now);

        if self.deltas.len() == FPS_WINDOW {
            self.deltas.pop_front();
        }
        self.deltas.push_back(delta);

        FrameTiming {
            elapsed: self.last.duration_since(self.start).as_secs_f32(),
            delta: delta.as_secs_f32(),
        }
    }

    /// Frames per second averaged over the recent window, zero until time has passed.
    pub fn fps(&self) -> f32 {
        let total: Duration = self.deltas.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.deltas.len() as f32 / total.as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// State carried from one frame to the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameState {
    user_offset: f32,
}

impl Default for FrameState {
    fn default() -> Self {
        Self { user_offset: -0.1 }
    }
}

impl FrameState {
    pub fn user_offset(&self) -> f32 {
        self.user_offset
    }

    /// Stores an edited offset, clamped to [`OFFSET_RANGE`]. NaN leaves the offset unchanged.
    pub fn set_user_offset(&mut self, value: f32) {
        if value.is_nan() {
            return;
        }
        self.user_offset = value.clamp(*OFFSET_RANGE.start(), *OFFSET_RANGE.end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_and_elapsed_follow_supplied_instants() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let first = clock.tick_at(start + Duration::from_millis(16));
        assert!((first.delta - 0.016).abs() < 1e-6);
        assert!((first.elapsed - 0.016).abs() < 1e-6);

        let second = clock.tick_at(start + Duration::from_millis(50));
        assert!((second.delta - 0.034).abs() < 1e-6);
        assert!((second.elapsed - 0.050).abs() < 1e-6);
    }

    #[test]
    fn fps_averages_the_recent_window() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        assert_eq!(clock.fps(), 0.0);

        // A slow frame followed by a full window of 10ms frames is forgotten.
        let mut now = start + Duration::from_millis(500);
        clock.tick_at(now);
        for _ in 0..FPS_WINDOW {
            now += Duration::from_millis(10);
            clock.tick_at(now);
        }
        assert!((clock.fps() - 100.0).abs() < 0.01);
    }

    #[test]
    fn earlier_instants_do_not_rewind() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        clock.tick_at(start + Duration::from_millis(20));

        let timing = clock.tick_at(start + Duration::from_millis(10));
        assert_eq!(timing.delta, 0.0);
        assert!((timing.elapsed - 0.020).abs() < 1e-6);
    }

    #[test]
    fn offset_starts_below_center_and_is_clamped() {
        let mut state = FrameState::default();
        assert_eq!(state.user_offset(), -0.1);

        state.set_user_offset(0.9);
        assert_eq!(state.user_offset(), 0.3);
        state.set_user_offset(-4.0);
        assert_eq!(state.user_offset(), -0.3);
        state.set_user_offset(0.25);
        assert_eq!(state.user_offset(), 0.25);
        state.set_user_offset(f32::NAN);
        assert_eq!(state.user_offset(), 0.25);
    }
}
