//! Audio playback on the main thread, backed by Raylib.
//!
//! Scene objects never touch Raylib audio directly. They queue
//! [`AudioCmd`](crate::events::audio::AudioCmd) messages on the
//! [`AudioBridge`](crate::resources::audio::AudioBridge), and once per frame
//! [`forward_audio_cmds`] drains that queue into the [`AudioPlayer`], which
//! owns every `Music` and `Sound` handle. Stream state changes travel back as
//! [`AudioMessage`](crate::events::audio::AudioMessage)s and are applied to
//! the scene by [`poll_audio_messages`] at the start of the next frame.
//!
//! Notes
//! - Raylib music handles borrow the audio device, so the player cannot be a
//!   `'static` world resource. It lives on the stack of `main`, next to the
//!   `RaylibAudio` device it borrows from.
//! - Music streaming requires periodic `update_stream()` calls; [`AudioPlayer::pump`]
//!   takes care of it while tracks are playing.
//! - A failed load is logged and the id stays silent; commands for unknown
//!   ids are logged and ignored.

use bevy_ecs::prelude::*;
use crossbeam_channel::Sender;
use log::{debug, info, warn};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::AssetError;
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use crate::resources::scene::Scene;

/// Owner of all loaded music streams and sound effects.
pub struct AudioPlayer<'aud> {
    device: &'aud RaylibAudio,
    musics: FxHashMap<String, Music<'aud>>,
    playing: FxHashSet<String>,
    sounds: FxHashMap<String, Sound<'aud>>,
    tx_msg: Sender<AudioMessage>,
}

impl<'aud> AudioPlayer<'aud> {
    pub fn new(device: &'aud RaylibAudio, tx_msg: Sender<AudioMessage>) -> Self {
        Self {
            device,
            musics: FxHashMap::default(),
            playing: FxHashSet::default(),
            sounds: FxHashMap::default(),
            tx_msg,
        }
    }

    fn reply(&self, msg: AudioMessage) {
        let _ = self.tx_msg.send(msg);
    }

    /// Execute one command.
    pub fn apply(&mut self, cmd: AudioCmd) -> Result<(), AssetError> {
        match cmd {
            AudioCmd::LoadMusic { id, path } => {
                let music = self
                    .device
                    .new_music(&path)
                    .map_err(|e| AssetError::Music {
                        id: id.clone(),
                        path: path.clone(),
                        reason: e.to_string(),
                    })?;
                info!("loaded music id='{}' path='{}'", id, path);
                self.musics.insert(id, music);
            }
            AudioCmd::PlayMusic { id } => {
                let music = self.music(&id)?;
                debug!("play music id='{}'", id);
                music.play_stream();
                self.playing.insert(id.clone());
                self.reply(AudioMessage::MusicPlayStarted { id });
            }
            AudioCmd::StopMusic { id } => {
                let music = self.music(&id)?;
                music.stop_stream();
                self.playing.remove(&id);
                self.reply(AudioMessage::MusicStopped { id });
            }
            AudioCmd::VolumeMusic { id, vol } => {
                self.music(&id)?.set_volume(vol.clamp(0.0, 1.0));
            }
            AudioCmd::LoadFx { id, path } => {
                let sound = self
                    .device
                    .new_sound(&path)
                    .map_err(|e| AssetError::Sound {
                        id: id.clone(),
                        path: path.clone(),
                        reason: e.to_string(),
                    })?;
                info!("loaded fx id='{}' path='{}'", id, path);
                self.sounds.insert(id, sound);
            }
            AudioCmd::PlayFx { id } => {
                let sound = self
                    .sounds
                    .get(&id)
                    .ok_or(AssetError::UnknownAudio { id: id.clone() })?;
                debug!("play fx id='{}'", id);
                sound.play();
            }
            AudioCmd::UnloadAll => {
                info!("unloading all audio");
                for id in self.playing.drain() {
                    let _ = self.tx_msg.send(AudioMessage::MusicStopped { id });
                }
                self.musics.clear();
                self.sounds.clear();
            }
        }
        Ok(())
    }

    fn music(&self, id: &str) -> Result<&Music<'aud>, AssetError> {
        self.musics
            .get(id)
            .ok_or_else(|| AssetError::UnknownAudio { id: id.to_string() })
    }

    /// Feed the streams of every playing track.
    ///
    /// A track that stopped on its own (reached its end) is dropped from the
    /// playing set and reported as [`AudioMessage::MusicFinished`].
    pub fn pump(&mut self) {
        let musics = &self.musics;
        let tx_msg = &self.tx_msg;
        self.playing.retain(|id| match musics.get(id) {
            Some(music) if music.is_stream_playing() => {
                music.update_stream();
                true
            }
            _ => {
                debug!("music id='{}' finished", id);
                let _ = tx_msg.send(AudioMessage::MusicFinished { id: id.clone() });
                false
            }
        });
    }
}

/// Drain the bridge's command queue into `player`, then pump the streams.
///
/// Failures are logged and do not stop the remaining commands. Without a
/// player (no audio device) the queue is simply emptied.
pub fn forward_audio_cmds(world: &World, player: Option<&mut AudioPlayer<'_>>) {
    let Some(bridge) = world.get_resource::<AudioBridge>() else {
        return;
    };
    let Some(player) = player else {
        bridge.rx_cmd.try_iter().for_each(drop);
        return;
    };
    for cmd in bridge.rx_cmd.try_iter() {
        if let Err(e) = player.apply(cmd) {
            warn!("audio command failed: {}", e);
        }
    }
    player.pump();
}

/// Apply the audio player's replies from the previous frame to the scene.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut scene: NonSendMut<Scene>) {
    for msg in bridge.rx_msg.try_iter() {
        scene.handle_audio_message(&msg);
    }
}
