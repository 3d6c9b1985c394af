//! Scene systems.
//!
//! - [`music_input_system`] toggles the background music on its key.
//! - [`scene_update_system`] advances every animated object by the frame's
//!   clamped delta, at the current timeline time.
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::input::InputState;
use crate::resources::scene::Scene;
use crate::resources::worldtime::WorldTime;

pub fn music_input_system(input: Res<InputState>, mut scene: NonSendMut<Scene>) {
    if input.toggle_music.just_pressed {
        scene.toggle_music();
        debug!(
            "music toggled, {}",
            if scene.music.fading().is_active() {
                "fading out"
            } else {
                "playing"
            }
        );
    }
}

pub fn scene_update_system(time: Res<WorldTime>, mut scene: NonSendMut<Scene>) {
    scene.update(time.delta, time.elapsed);
}
