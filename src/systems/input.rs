//! Input systems.
//!
//! [`update_input_state`] reads hardware input from Raylib each frame and
//! writes the results into [`crate::resources::input::InputState`].
use bevy_ecs::prelude::*;

use crate::resources::input::{BoolState, InputState};

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(mut input: ResMut<InputState>, rl: NonSend<raylib::RaylibHandle>) {
    let poll = |state: &mut BoolState| {
        let key = state.key_binding;
        state.active = rl.is_key_down(key);
        state.just_pressed = rl.is_key_pressed(key);
        state.just_released = rl.is_key_released(key);
    };

    poll(&mut input.advance_dialogue);
    poll(&mut input.toggle_music);
    input.cursor = rl.get_mouse_position();
}
