//! Frame pacing
//!
//! The loop asks a scheduler how many simulation ticks to run for each
//! frame and when the next frame is due. Collision and update code only
//! ever sees whole ticks, so pacing can change without touching them.

use std::time::{Duration, Instant};

pub trait FrameScheduler {
    /// Start a frame at `now`; returns the number of ticks to simulate
    fn begin_frame(&mut self, now: Instant) -> u32;

    /// When the next frame should start
    fn next_frame_at(&self) -> Instant;
}

/// One tick per frame, frames spaced by a fixed delay.
///
/// Game speed follows the frame rate: a slow frame slows the game down.
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
    next: Instant,
}

impl FixedDelay {
    pub fn new(delay: Duration, now: Instant) -> Self {
        Self { delay, next: now }
    }
}

impl FrameScheduler for FixedDelay {
    fn begin_frame(&mut self, now: Instant) -> u32 {
        self.next = now + self.delay;
        1
    }

    fn next_frame_at(&self) -> Instant {
        self.next
    }
}

/// Accumulates real elapsed time and runs as many fixed ticks as fit
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    max_substeps: u32,
    accumulator: Duration,
    last: Instant,
}

impl FixedTimestep {
    pub fn new(step: Duration, max_substeps: u32, now: Instant) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: Duration::ZERO,
            last: now,
        }
    }
}

impl FrameScheduler for FixedTimestep {
    fn begin_frame(&mut self, now: Instant) -> u32 {
        // Clamp long stalls (window drag, breakpoint) to the substep budget
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        self.accumulator = (self.accumulator + elapsed).min(self.step * self.max_substeps);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    fn next_frame_at(&self) -> Instant {
        self.last + self.step.saturating_sub(self.accumulator)
    }
}
