//! Kitten background frame sync.
//!
//! Keeps the kitten [`FrameCache`](crate::resources::framecache::FrameCache)
//! showing the frame the look cycle currently points at, loading it from disk
//! on first use and dropping the previous one.
use bevy_ecs::prelude::*;
use log::warn;

use crate::game::load_texture;
use crate::resources::gameconfig::GameConfig;
use crate::resources::scene::Scene;
use crate::resources::scenescript::SceneScript;
use crate::resources::scenetextures::SceneTextures;

pub fn kitten_frame_system(
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    scene: NonSend<Scene>,
    mut textures: NonSendMut<SceneTextures>,
    config: Res<GameConfig>,
    script: Res<SceneScript>,
    mut last_failed: Local<Option<usize>>,
) {
    let id = scene.kittens.current_frame();
    if textures.kitten_frames.current_id() == Some(id) {
        return;
    }

    let shown = textures.kitten_frames.show(id, |id| {
        let path = config.asset_path(script.assets.kitten_frame(id));
        load_texture(&mut rl, &th, &path)
    });

    match shown {
        Ok(_) => *last_failed = None,
        Err(e) => {
            // the failed id is retried every frame, only report it once
            if *last_failed != Some(id) {
                warn!("kitten frame {} unavailable, keeping previous: {}", id, e);
                *last_failed = Some(id);
            }
        }
    }
}
