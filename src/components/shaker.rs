//! Decaying positional jitter.
//!
//! A [`Shaker`] nests a short repeating `offset_cycle` inside a longer
//! `full_shake` envelope. Each time the cycle starts it picks a random offset
//! scaled by `(1 - full_shake.alpha)^2.5`; each time it ends it zeroes the
//! offset and restarts itself while the envelope is still running. The jitter
//! therefore decays and stops on its own when the envelope completes.

use std::cell::Cell;
use std::rc::Rc;

use raylib::prelude::Vector2;
use serde::{Deserialize, Serialize};

use crate::components::animation::AnimationF;

/// Tunables for a [`Shaker`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeParams {
    /// Maximum horizontal offset in pixels.
    pub magnitude_x: f32,
    /// Maximum vertical offset in pixels.
    pub magnitude_y: f32,
    /// Seconds each random offset is held.
    pub cycle: f32,
    /// Seconds of the whole decaying shake.
    pub duration: f32,
}

impl Default for ShakeParams {
    fn default() -> Self {
        Self {
            magnitude_x: 15.0,
            magnitude_y: 15.0,
            cycle: 0.025,
            duration: 0.5,
        }
    }
}

/// Amplitude multiplier for a given envelope progress.
pub(crate) fn envelope(alpha: f32) -> f32 {
    (1.0 - alpha).max(0.0).powf(2.5)
}

pub struct Shaker {
    offset_cycle: AnimationF,
    full_shake: AnimationF,
    offset: Rc<Cell<Vector2>>,
}

impl Shaker {
    pub fn new(params: ShakeParams, mut rng: fastrand::Rng) -> Self {
        let offset_cycle = AnimationF::new().with_duration(params.cycle);
        let full_shake = AnimationF::new().with_duration(params.duration);
        let offset = Rc::new(Cell::new(Vector2::zero()));

        {
            let offset = offset.clone();
            let envelope_anim = full_shake.downgrade();
            offset_cycle.on_start(move || {
                let a = envelope(envelope_anim.alpha().unwrap_or(1.0));
                let x = (rng.f32() * 2.0 * params.magnitude_x - params.magnitude_x) * a;
                let y = (rng.f32() * 2.0 * params.magnitude_y - params.magnitude_y) * a;
                offset.set(Vector2 { x, y });
            });
        }
        {
            let offset = offset.clone();
            let envelope_anim = full_shake.downgrade();
            let cycle = offset_cycle.downgrade();
            offset_cycle.on_end(move || {
                offset.set(Vector2::zero());
                if envelope_anim.is_active() {
                    cycle.start();
                }
            });
        }

        Self {
            offset_cycle,
            full_shake,
            offset,
        }
    }

    /// Restart the shake from full amplitude.
    pub fn shake(&self) {
        self.full_shake.reset();
        self.offset_cycle.reset();

        self.full_shake.start();
        self.offset_cycle.start();
    }

    pub fn update(&self, dt: f32, t: f32) {
        self.full_shake.update(dt, t);
        self.offset_cycle.update(dt, t);
    }

    /// Current jitter offset in pixels.
    pub fn offset(&self) -> Vector2 {
        self.offset.get()
    }

    pub fn is_shaking(&self) -> bool {
        self.full_shake.is_active()
    }

    pub fn full_shake(&self) -> &AnimationF {
        &self.full_shake
    }

    pub fn offset_cycle(&self) -> &AnimationF {
        &self.offset_cycle
    }
}
