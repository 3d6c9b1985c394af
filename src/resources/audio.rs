//! ECS resource that bridges the scene with the audio player.
//!
//! Use [`setup_audio`] once during initialization to create the channels and
//! insert the [`AudioBridge`]. Scene objects keep clones of
//! [`AudioBridge::tx_cmd`]; the main loop drains [`AudioBridge::rx_cmd`] into
//! the [`AudioPlayer`](crate::systems::audio::AudioPlayer) after every frame,
//! and the player reports stream state back through [`AudioBridge::tx_msg`].
//! Call [`shutdown_audio`] during teardown to free every loaded sound.

use crate::events::audio::{AudioCmd, AudioMessage};
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// Both ends of the command queue and of the reply queue.
#[derive(Resource, Clone)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (scene -> audio player).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver drained by the audio player once per frame.
    pub rx_cmd: Receiver<AudioCmd>,
    /// Sender for [`AudioMessage`] messages (audio player -> scene).
    pub tx_msg: Sender<AudioMessage>,
    /// Receiver polled by [`poll_audio_messages`](crate::systems::audio::poll_audio_messages).
    pub rx_msg: Receiver<AudioMessage>,
}

impl AudioBridge {
    pub fn new() -> Self {
        let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
        let (tx_msg, rx_msg) = unbounded::<AudioMessage>();
        Self {
            tx_cmd,
            rx_cmd,
            tx_msg,
            rx_msg,
        }
    }

    /// Queue a command, ignoring a closed channel.
    pub fn send(&self, cmd: AudioCmd) {
        let _ = self.tx_cmd.send(cmd);
    }
}

impl Default for AudioBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the channels, register the bridge and return a command sender for
/// scene construction.
pub fn setup_audio(world: &mut World) -> Sender<AudioCmd> {
    let bridge = AudioBridge::new();
    let tx = bridge.tx_cmd.clone();
    world.insert_resource(bridge);
    tx
}

/// Queue [`AudioCmd::UnloadAll`] so the next drain releases every stream
/// and sound.
pub fn shutdown_audio(world: &World) {
    if let Some(bridge) = world.get_resource::<AudioBridge>() {
        bridge.send(AudioCmd::UnloadAll);
    }
}
