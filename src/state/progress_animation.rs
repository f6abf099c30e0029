//! Progress bar easing between sections

use std::time::{Duration, Instant};

/// Eased transition of the progress bar fill
#[derive(Debug, Clone, Copy)]
pub struct ProgressAnimation {
    from: f64,
    to: f64,
    /// When the current transition started; `None` once settled
    started: Option<Instant>,
}

impl Default for ProgressAnimation {
    fn default() -> Self {
        Self::settled(0.0)
    }
}

impl ProgressAnimation {
    /// Duration of one transition (300ms)
    const DURATION: Duration = Duration::from_millis(300);

    pub fn settled(ratio: f64) -> Self {
        Self {
            from: ratio,
            to: ratio,
            started: None,
        }
    }

    /// Start easing from the currently shown fill toward `ratio`
    pub fn retarget(&mut self, ratio: f64) {
        if (ratio - self.to).abs() < f64::EPSILON {
            return;
        }
        self.from = self.value();
        self.to = ratio;
        self.started = Some(Instant::now());
    }

    /// Fill to draw now
    pub fn value(&self) -> f64 {
        match self.started {
            Some(start) => self.value_at(start.elapsed()),
            None => self.to,
        }
    }

    fn value_at(&self, elapsed: Duration) -> f64 {
        if elapsed >= Self::DURATION {
            return self.to;
        }
        let progress = elapsed.as_secs_f32() / Self::DURATION.as_secs_f32();
        // Cubic ease-out for smooth deceleration
        let eased = f64::from(simple_easing::cubic_out(progress));
        self.from + (self.to - self.from) * eased
    }

    /// Clear the transition once it has run its course
    pub fn update(&mut self) {
        if self
            .started
            .is_some_and(|start| start.elapsed() >= Self::DURATION)
        {
            self.from = self.to;
            self.started = None;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.started.is_some()
    }
}
