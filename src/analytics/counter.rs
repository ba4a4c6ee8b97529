//! Counting-up animation for dashboard counters
//!
//! Counters climb from zero to their target in equal increments. Each frame
//! shows the floored running value; the final frame is the exact target.

use std::time::Duration;

/// Default number of increments
pub const DEFAULT_STEPS: u32 = 50;

/// Default delay between frames
pub const FRAME_INTERVAL: Duration = Duration::from_millis(20);

/// Iterator over the values a counter displays while animating
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: f64,
    increment: f64,
    current: f64,
    done: bool,
}

impl CounterAnimation {
    /// Animate towards `target` in `steps` increments
    pub fn new(target: f64, steps: u32) -> Self {
        let target = if target.is_finite() { target } else { 0.0 };
        let steps = steps.max(1);
        Self {
            target,
            increment: target / f64::from(steps),
            current: 0.0,
            done: false,
        }
    }

    /// Animate with the default step count
    pub fn with_default_steps(target: f64) -> Self {
        Self::new(target, DEFAULT_STEPS)
    }

    /// Final value shown once the animation settles
    pub fn target(&self) -> f64 {
        self.target
    }
}

impl Iterator for CounterAnimation {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }

        self.current += self.increment;
        // Zero and negative targets never climb; settle on the first frame.
        if self.increment <= 0.0 || self.current >= self.target {
            self.done = true;
            return Some(self.target);
        }
        Some(self.current.floor())
    }
}
