//! Screen size resource.
//!
//! Stores the window dimensions in pixels. The scene is laid out for this
//! size and the kittens' background is stretched to fill it.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;

/// Current screen size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenSize {
    pub fn as_vector2(&self) -> Vector2 {
        Vector2 {
            x: self.w as f32,
            y: self.h as f32,
        }
    }
}
