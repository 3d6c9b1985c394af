//! Scene setup: asset loading and object construction.

use crossbeam_channel::Sender;
use log::{info, warn};
use raylib::ffi;
use raylib::prelude::*;

use crate::error::{AssetError, SceneResult};
use crate::events::audio::AudioCmd;
use crate::resources::gameconfig::GameConfig;
use crate::resources::scene::{MUSIC_ID, Scene, textbox_fx_id};
use crate::resources::scenescript::SceneScript;
use crate::resources::scenetextures::SceneTextures;
use crate::resources::screensize::ScreenSize;

/// Load a texture from `path` with bilinear filtering.
pub fn load_texture(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    path: &str,
) -> Result<Texture2D, AssetError> {
    let texture = rl
        .load_texture(th, path)
        .map_err(|e| AssetError::Texture {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
    unsafe {
        ffi::SetTextureFilter(
            *texture.as_ref(),
            TextureFilter::TEXTURE_FILTER_BILINEAR as i32,
        );
    }
    Ok(texture)
}

/// Load a font, falling back to raylib's default font on failure.
fn load_font(rl: &mut RaylibHandle, th: &RaylibThread, path: &str) -> Option<Font> {
    match rl.load_font(th, path) {
        Ok(font) => {
            info!("loaded font '{}'", path);
            Some(font)
        }
        Err(e) => {
            let err = AssetError::Font {
                path: path.to_string(),
                reason: e.to_string(),
            };
            warn!("{}, using the default font", err);
            None
        }
    }
}

/// Queue the music track and every textbox sound for loading.
fn queue_audio_loads(config: &GameConfig, script: &SceneScript, audio: &Sender<AudioCmd>) {
    let _ = audio.send(AudioCmd::LoadMusic {
        id: MUSIC_ID.to_string(),
        path: config.asset_path(&script.music.path),
    });
    for (i, layout) in script.textboxes.iter().enumerate() {
        if layout.sound.is_empty() {
            continue;
        }
        let _ = audio.send(AudioCmd::LoadFx {
            id: textbox_fx_id(i),
            path: config.asset_path(&layout.sound),
        });
    }
}

/// Validate the script, load the scene's textures and build the [`Scene`].
///
/// Missing mouse frames or a missing first kitten frame abort setup; a
/// missing font falls back to the default one. Audio loads are only queued
/// here, their failures surface when the queue is drained.
pub fn setup(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    config: &GameConfig,
    script: &SceneScript,
    screen: ScreenSize,
    audio: &Sender<AudioCmd>,
    rng: &mut fastrand::Rng,
) -> SceneResult<(Scene, SceneTextures)> {
    script.validate()?;

    let font = load_font(rl, th, &config.asset_path(&script.assets.font));

    let mouse_frames = script
        .assets
        .mouse_frame_ids
        .iter()
        .map(|&id| load_texture(rl, th, &config.asset_path(script.assets.mouse_frame(id))))
        .collect::<Result<Vec<_>, _>>()?;
    info!("loaded {} mouse frames", mouse_frames.len());

    queue_audio_loads(config, script, audio);

    let kittens = &script.kittens;
    let mut textures = SceneTextures::new(
        font,
        mouse_frames,
        (kittens.first_frame, kittens.first_frame + kittens.frame_span),
    );

    let scene = Scene::new(
        script,
        screen.as_vector2(),
        textures.mouse_sprite_size(),
        audio.clone(),
        rng,
    );

    textures
        .kitten_frames
        .show(scene.kittens.current_frame(), |id| {
            load_texture(rl, th, &config.asset_path(script.assets.kitten_frame(id)))
        })?;

    Ok((scene, textures))
}
