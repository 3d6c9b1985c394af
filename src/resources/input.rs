//! Per-frame keyboard input resource.
//!
//! Captures the two keys the scene reacts to: SPACE advances the dialogue and
//! M toggles the music. The mouse cursor position is kept as well; it is
//! logged on every dialogue press to help lay out new bubbles.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently held down.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            key_binding,
            ..Self::default()
        }
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

/// Resource capturing the per-frame input relevant to the scene.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub advance_dialogue: BoolState,
    pub toggle_music: BoolState,
    /// Cursor position in screen pixels.
    pub cursor: Vector2,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            advance_dialogue: BoolState::bound_to(KeyboardKey::KEY_SPACE),
            toggle_music: BoolState::bound_to(KeyboardKey::KEY_M),
            cursor: Vector2::zero(),
        }
    }
}
