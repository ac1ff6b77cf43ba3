//! Platform abstraction layer
//!
//! Handles what the core needs from the outside world:
//! - Logical input intents (device mapping happens elsewhere)
//! - Fixed-step timing for the driver loop

use std::time::Duration;

use crate::consts::MAX_SUBSTEPS;

/// Menu navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A logical input intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Jump,
    /// Pause/resume toggle
    Pause,
    Confirm,
    Back,
    Navigate(Direction),
    Quit,
}

/// Intents gathered for one frame, in arrival order
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub intents: Vec<Intent>,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    pub fn with(mut self, intent: Intent) -> Self {
        self.push(intent);
        self
    }
}

impl From<Intent> for FrameInput {
    fn from(intent: Intent) -> Self {
        Self {
            intents: vec![intent],
        }
    }
}

/// Fixed-step accumulator for the driver loop
#[derive(Debug, Clone)]
pub struct FixedClock {
    step: Duration,
    accumulator: Duration,
}

impl FixedClock {
    pub fn new(rate_hz: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / rate_hz.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add elapsed wall time and return how many ticks are due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            substeps += 1;
        }

        // Drop backlog we could not catch up on
        if substeps == MAX_SUBSTEPS && self.accumulator >= self.step {
            log::debug!("Frame overran, dropping {:?} of simulation time", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        substeps
    }

    /// Time left until the next tick is due
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_accumulates() {
        let mut clock = FixedClock::new(60);
        let step = clock.step();

        assert_eq!(clock.advance(step / 2), 0);
        assert_eq!(clock.advance(step / 2), 1);
        assert_eq!(clock.advance(step * 3), 3);
    }

    #[test]
    fn test_clock_caps_substeps() {
        let mut clock = FixedClock::new(60);
        assert_eq!(clock.advance(Duration::from_secs(5)), MAX_SUBSTEPS);
        assert_eq!(clock.until_next(), clock.step());
    }

    #[test]
    fn test_frame_input_keeps_arrival_order() {
        let input = FrameInput::new().with(Intent::Jump).with(Intent::Pause);
        assert_eq!(input.intents, vec![Intent::Jump, Intent::Pause]);
        assert_eq!(FrameInput::from(Intent::Quit).intents, vec![Intent::Quit]);
    }
}
