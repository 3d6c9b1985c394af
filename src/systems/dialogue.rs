//! Dialogue input system.
//!
//! Advances the conversation when the dialogue key is pressed. Each press is
//! logged with the timeline time and the cursor position, which is handy
//! when placing new bubbles.
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::input::InputState;
use crate::resources::scene::Scene;
use crate::resources::worldtime::WorldTime;

pub fn dialogue_input_system(
    input: Res<InputState>,
    time: Res<WorldTime>,
    mut scene: NonSendMut<Scene>,
) {
    if !input.advance_dialogue.just_pressed {
        return;
    }

    debug!(
        "dialogue press at t={:.3}s, cursor=({}, {})",
        time.elapsed, input.cursor.x as i32, input.cursor.y as i32
    );

    match scene.advance_dialogue() {
        Some(msg) => debug!("textbox {} says {:?}", msg.textbox, msg.text),
        None => debug!("dialogue finished, rewinding"),
    }
}
