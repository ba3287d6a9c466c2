use crate::document::store::ElementStore;
use crate::foundation::core::Millis;

/// Shared time source for every animated draw.
///
/// The host samples it once per frame through [`GlobalClock::advance`]; readers never subscribe.
/// Time only moves forward.
#[derive(Clone, Debug, Default)]
pub struct GlobalClock {
    now: Millis,
    force_continuous: bool,
}

impl GlobalClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Move the clock to `timestamp`. Older timestamps are ignored.
    pub fn advance(&mut self, timestamp: Millis) -> Millis {
        if timestamp >= self.now {
            self.now = timestamp;
        } else {
            tracing::debug!(
                now = self.now,
                timestamp,
                "ignoring clock sample older than current time"
            );
        }
        self.now
    }

    /// Whether frames must keep coming even with no runner in flight.
    pub fn force_continuous(&self) -> bool {
        self.force_continuous
    }

    pub fn set_force_continuous(&mut self, enabled: bool) {
        self.force_continuous = enabled;
    }

    /// Recompute the continuous flag from the elements with a perpetual flow effect. Returns
    /// whether the flag changed.
    pub fn refresh_continuous(&mut self, store: &dyn ElementStore) -> bool {
        let wanted = store.elements().iter().any(|el| el.flow_animation);
        let changed = wanted != self.force_continuous;
        if changed {
            tracing::debug!(enabled = wanted, "continuous ticking toggled");
            self.force_continuous = wanted;
        }
        changed
    }

    /// Whether the host should schedule another frame.
    pub fn needs_frame(&self, active_runners: usize) -> bool {
        active_runners > 0 || self.force_continuous
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/clock.rs"]
mod tests;
