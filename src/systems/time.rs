//! Time update system.
//!
//! Folds the raw frame delta into the shared
//! [`WorldTime`](crate::resources::worldtime::WorldTime) resource once per
//! frame, before the schedule runs.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance `WorldTime` by the raw frame delta `dt`, in seconds.
///
/// The delta is clamped to `[0, max_delta]`; the clamped value is written to
/// both `elapsed` and `delta` and returned.
pub fn update_world_time(world: &mut World, dt: f32) -> f32 {
    world.resource_mut::<WorldTime>().advance(dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_world_time_clamps_through_the_resource() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_max_delta(0.05));
        assert_eq!(update_world_time(&mut world, 0.02), 0.02);
        assert_eq!(update_world_time(&mut world, 1.0), 0.05);

        let wt = world.resource::<WorldTime>();
        assert!((wt.elapsed - 0.07).abs() < 1e-6);
        assert_eq!(wt.frame_count, 2);
        assert_eq!(wt.clamped_frames, 1);
    }
}
