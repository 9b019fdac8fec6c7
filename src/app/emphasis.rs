//! Per-truck transient marker emphasis.
//!
//! A pulse springs a marker's scale up to [`PEAK_SCALE`], holds the target for
//! [`HOLD`], then springs it back to [`REST_SCALE`]. The hold is a plain timer
//! started with the pulse; it does not wait for the spring to settle.
//!
//! Scale is keyed by [`TruckId`], never by list position, so reordering or
//! filtering the list cannot move an emphasis onto another truck.

use crate::domain::TruckId;
use std::collections::HashMap;
use std::time::Duration;

/// Scale of a marker at rest.
pub const REST_SCALE: f64 = 1.0;

/// Scale a pulsed marker springs up to.
pub const PEAK_SCALE: f64 = 1.5;

/// Time between a pulse and the start of its return to rest.
pub const HOLD: Duration = Duration::from_millis(300);

const SUBSTEP: Duration = Duration::from_millis(1);
const REST_EPSILON: f64 = 1e-3;
const VELOCITY_EPSILON: f64 = 1e-2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Spring {
    stiffness: f64,
    damping: f64,
    mass: f64,
}

const PULSE_SPRING: Spring = Spring {
    stiffness: 100.0,
    damping: 5.0,
    mass: 1.0,
};

const SETTLE_SPRING: Spring = Spring {
    stiffness: 100.0,
    damping: 10.0,
    mass: 1.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pulse {
    value: f64,
    velocity: f64,
    target: f64,
    revert_at: Option<Duration>,
    updated_at: Duration,
}

impl Pulse {
    const fn start(now: Duration) -> Self {
        Self {
            value: REST_SCALE,
            velocity: 0.0,
            target: PEAK_SCALE,
            revert_at: Some(now.saturating_add(HOLD)),
            updated_at: now,
        }
    }

    fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_EPSILON && self.velocity.abs() < VELOCITY_EPSILON
    }

    fn is_finished(&self) -> bool {
        self.revert_at.is_none() && self.is_settled()
    }

    fn step_to(&mut self, now: Duration) {
        while self.updated_at < now {
            self.apply_revert();

            if self.is_settled() {
                self.value = self.target;
                self.velocity = 0.0;
                match self.revert_at {
                    Some(revert_at) => {
                        self.updated_at = revert_at.min(now);
                        continue;
                    }
                    None => break,
                }
            }

            let dt = now.saturating_sub(self.updated_at).min(SUBSTEP);
            self.integrate(dt.as_secs_f64());
            self.updated_at += dt;
        }

        self.apply_revert();
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
        self.updated_at = self.updated_at.max(now);
    }

    fn apply_revert(&mut self) {
        if self.revert_at.is_some_and(|revert_at| self.updated_at >= revert_at) {
            self.target = REST_SCALE;
            self.revert_at = None;
        }
    }

    fn integrate(&mut self, dt: f64) {
        let spring = if self.revert_at.is_some() { PULSE_SPRING } else { SETTLE_SPRING };
        let force = (-spring.stiffness).mul_add(self.value - self.target, -spring.damping * self.velocity);
        self.velocity += force / spring.mass * dt;
        self.value += self.velocity * dt;

        if self.value >= PEAK_SCALE {
            self.value = PEAK_SCALE;
            self.velocity = self.velocity.min(0.0);
        } else if self.value <= REST_SCALE {
            self.value = REST_SCALE;
            self.velocity = self.velocity.max(0.0);
        }
    }
}

/// Identity-keyed scale animations for map markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmphasisAnimator {
    pulses: HashMap<TruckId, Pulse>,
}

impl EmphasisAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the pulse for `id` at `now`.
    ///
    /// A pulse already in flight keeps its current value and velocity; only
    /// its target and hold timer are reset.
    pub fn pulse(&mut self, id: TruckId, now: Duration) {
        match self.pulses.get_mut(&id) {
            Some(pulse) => {
                pulse.step_to(now);
                pulse.target = PEAK_SCALE;
                pulse.revert_at = Some(now.saturating_add(HOLD));
                tracing::debug!(truck_id = %id, value = pulse.value, "emphasis pulse restarted");
            }
            None => {
                self.pulses.insert(id, Pulse::start(now));
                tracing::debug!(truck_id = %id, "emphasis pulse started");
            }
        }
    }

    /// Steps every pulse to `now` and drops the ones back at rest.
    ///
    /// Returns `true` if any scale may have changed.
    pub fn advance(&mut self, now: Duration) -> bool {
        if self.pulses.is_empty() {
            return false;
        }
        for pulse in self.pulses.values_mut() {
            pulse.step_to(now);
        }
        self.pulses.retain(|_, pulse| !pulse.is_finished());
        true
    }

    /// Current scale for `id`; [`REST_SCALE`] for trucks never pulsed.
    #[must_use]
    pub fn scale(&self, id: TruckId) -> f64 {
        self.pulses.get(&id).map_or(REST_SCALE, |pulse| pulse.value)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.pulses.is_empty()
    }

    /// Trucks with a pulse in flight, in id order.
    #[must_use]
    pub fn active_pulses(&self) -> Vec<TruckId> {
        let mut ids: Vec<TruckId> = self.pulses.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn untouched_trucks_stay_at_rest() {
        let mut animator = EmphasisAnimator::new();
        animator.pulse(TruckId(2), Duration::ZERO);

        for t in (0..=1500).step_by(10) {
            animator.advance(ms(t));
            assert!((animator.scale(TruckId(1)) - REST_SCALE).abs() < f64::EPSILON);
            assert!((animator.scale(TruckId(3)) - REST_SCALE).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn pulse_reaches_peak_then_returns_to_rest() {
        let mut animator = EmphasisAnimator::new();
        animator.pulse(TruckId(2), Duration::ZERO);

        let mut peak = REST_SCALE;
        for t in (0..=250).step_by(10) {
            animator.advance(ms(t));
            let scale = animator.scale(TruckId(2));
            assert!((REST_SCALE..=PEAK_SCALE).contains(&scale));
            peak = peak.max(scale);
        }
        assert!((peak - PEAK_SCALE).abs() < f64::EPSILON);

        animator.advance(ms(290));
        assert!((animator.scale(TruckId(2)) - PEAK_SCALE).abs() < f64::EPSILON);

        animator.advance(ms(1500));
        assert!((animator.scale(TruckId(2)) - REST_SCALE).abs() < f64::EPSILON);
        assert!(!animator.is_animating());
    }

    #[test]
    fn scale_rises_gradually() {
        let mut animator = EmphasisAnimator::new();
        animator.pulse(TruckId(2), Duration::ZERO);
        animator.advance(ms(50));
        let early = animator.scale(TruckId(2));
        assert!(early > REST_SCALE && early < PEAK_SCALE);
    }

    #[test]
    fn coarse_ticks_match_fine_ticks() {
        let mut fine = EmphasisAnimator::new();
        let mut coarse = EmphasisAnimator::new();
        fine.pulse(TruckId(2), Duration::ZERO);
        coarse.pulse(TruckId(2), Duration::ZERO);

        for t in 1..=400 {
            fine.advance(ms(t));
        }
        coarse.advance(ms(400));
        assert!((fine.scale(TruckId(2)) - coarse.scale(TruckId(2))).abs() < 1e-9);
    }

    #[test]
    fn retrigger_restarts_from_current_value() {
        let mut animator = EmphasisAnimator::new();
        animator.pulse(TruckId(2), Duration::ZERO);
        animator.advance(ms(400));
        let before = animator.scale(TruckId(2));
        assert!(before < PEAK_SCALE);

        animator.pulse(TruckId(2), ms(400));
        assert!((animator.scale(TruckId(2)) - before).abs() < f64::EPSILON);

        animator.advance(ms(690));
        assert!((animator.scale(TruckId(2)) - PEAK_SCALE).abs() < f64::EPSILON);
        animator.advance(ms(3000));
        assert!(!animator.is_animating());
    }

    #[test]
    fn concurrent_pulses_are_independent() {
        let mut animator = EmphasisAnimator::new();
        animator.pulse(TruckId(1), Duration::ZERO);
        animator.pulse(TruckId(3), ms(200));
        assert_eq!(animator.active_pulses(), vec![TruckId(1), TruckId(3)]);

        animator.advance(ms(700));
        assert_eq!(animator.active_pulses(), vec![TruckId(3)]);
        assert!((animator.scale(TruckId(1)) - REST_SCALE).abs() < f64::EPSILON);
    }
}
