use crate::animation::ease::Ease;
use crate::foundation::core::Millis;

/// Timing of one tween: delay, cycle duration, easing and repetition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub delay: Millis,
    pub duration: Millis,
    pub ease: Ease,
    /// Number of cycles; `None` repeats forever.
    pub cycles: Option<u32>,
    /// Reverse direction on every odd cycle.
    pub alternate: bool,
}

/// Result of sampling a tween at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenSample {
    /// Still inside the delay; nothing should be written.
    Pending,
    /// Running with eased progress.
    Active(f64),
    /// Done; carries the final eased progress.
    Finished(f64),
}

impl Tween {
    /// Single forward cycle, no delay.
    pub fn once(duration: Millis, ease: Ease) -> Self {
        Self {
            delay: 0.0,
            duration,
            ease,
            cycles: Some(1),
            alternate: false,
        }
    }

    pub fn with_delay(mut self, delay: Millis) -> Self {
        self.delay = delay;
        self
    }

    /// Sample at `elapsed` milliseconds since the tween was started.
    pub fn sample(&self, elapsed: Millis) -> TweenSample {
        let local = elapsed - self.delay;
        if local < 0.0 {
            return TweenSample::Pending;
        }
        if self.duration <= 0.0 {
            return TweenSample::Finished(self.final_progress());
        }

        let cycle = (local / self.duration).floor();
        let exhausted = self
            .cycles
            .is_some_and(|total| cycle >= f64::from(total.max(1)));
        if exhausted {
            return TweenSample::Finished(self.final_progress());
        }

        let mut raw = (local - cycle * self.duration) / self.duration;
        if self.alternate && cycle % 2.0 == 1.0 {
            raw = 1.0 - raw;
        }
        TweenSample::Active(self.ease.apply(raw))
    }

    /// Eased progress the tween rests at once finished.
    pub fn final_progress(&self) -> f64 {
        let total = self.cycles.unwrap_or(1).max(1);
        if self.alternate && total % 2 == 0 {
            self.ease.apply(0.0)
        } else {
            self.ease.apply(1.0)
        }
    }

    /// Delay plus all cycles. Infinite tweens count a single cycle.
    pub fn span(&self) -> Millis {
        let cycles = f64::from(self.cycles.unwrap_or(1).max(1));
        self.delay + self.duration.max(0.0) * cycles
    }

    pub fn is_infinite(&self) -> bool {
        self.cycles.is_none()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/tween.rs"]
mod tests;
