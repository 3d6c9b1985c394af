//! Audio commands and replies.
//!
//! Scene objects never touch raylib audio handles directly. They queue
//! [`AudioCmd`] values on the channel held by
//! [`AudioBridge`](crate::resources::audio::AudioBridge), and the main loop
//! forwards them to [`AudioPlayer`](crate::systems::audio::AudioPlayer) once
//! per frame on the main thread. The player answers with [`AudioMessage`]s
//! on the same bridge, which are polled at the start of the next frame.

/// Commands sent *to* the audio player.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCmd {
    LoadMusic { id: String, path: String },
    PlayMusic { id: String },
    StopMusic { id: String },
    VolumeMusic { id: String, vol: f32 },
    LoadFx { id: String, path: String },
    PlayFx { id: String },
    UnloadAll,
}

/// Messages sent *from* the audio player.
///
/// Only state changes of a music stream are reported; a command that fails
/// produces no message.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioMessage {
    MusicPlayStarted { id: String },
    MusicStopped { id: String },
    /// The stream reached its end on its own.
    MusicFinished { id: String },
}
