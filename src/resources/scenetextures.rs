//! GPU-side assets of the scene.
//!
//! A non-send resource: raylib textures and fonts must stay on the main
//! thread. Insert with `insert_non_send_resource` and access through
//! `NonSend<SceneTextures>` / `NonSendMut<SceneTextures>`.

use raylib::prelude::{Font, Texture2D, Vector2};

use crate::resources::framecache::FrameCache;

pub struct SceneTextures {
    /// Textbox font; `None` draws with raylib's default font.
    pub font: Option<Font>,
    /// Every mouse frame, indexed by display index.
    pub mouse_frames: Vec<Texture2D>,
    /// Kitten background frames, loaded on demand.
    pub kitten_frames: FrameCache<Texture2D>,
}

impl SceneTextures {
    pub fn new(font: Option<Font>, mouse_frames: Vec<Texture2D>, kitten_range: (usize, usize)) -> Self {
        Self {
            font,
            mouse_frames,
            kitten_frames: FrameCache::new(kitten_range.0, kitten_range.1),
        }
    }

    pub fn mouse_frame(&self, index: usize) -> Option<&Texture2D> {
        self.mouse_frames.get(index)
    }

    /// Pixel size of the first mouse frame.
    pub fn mouse_sprite_size(&self) -> Vector2 {
        self.mouse_frames
            .first()
            .map(|t| Vector2 {
                x: t.width as f32,
                y: t.height as f32,
            })
            .unwrap_or_else(Vector2::zero)
    }
}
