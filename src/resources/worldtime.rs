//! Frame clock resource.
//!
//! [`WorldTime`] is advanced once per frame by
//! [`update_world_time`](crate::systems::time::update_world_time). The raw
//! frame delta is clamped to `[0, max_delta]` so a stall (window drag, a
//! debugger pause) does not make every animation jump ahead at once.

use bevy_ecs::prelude::Resource;
use log::warn;

/// Default ceiling for a single frame delta, in seconds.
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Running timeline time in seconds; the `now` passed to animations.
    pub elapsed: f32,
    /// Clamped delta of the current frame.
    pub delta: f32,
    /// Upper bound applied to each frame delta.
    pub max_delta: f32,
    pub frame_count: u64,
    /// Number of frames whose delta hit the ceiling.
    pub clamped_frames: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            max_delta: DEFAULT_MAX_DELTA,
            frame_count: 0,
            clamped_frames: 0,
        }
    }
}

impl WorldTime {
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Fold one raw frame delta into the clock and return the clamped delta.
    pub fn advance(&mut self, raw_dt: f32) -> f32 {
        let mut dt = raw_dt.max(0.0);
        if dt > self.max_delta {
            warn!(
                "frame time {:.3}s exceeds {:.3}s, clamping",
                raw_dt, self.max_delta
            );
            dt = self.max_delta;
            self.clamped_frames += 1;
        }
        self.elapsed += dt;
        self.delta = dt;
        self.frame_count += 1;
        dt
    }
}
