//! Background music with a fade-out.
//!
//! [`MusicPlayer`] keeps one streamed track and a `fading` animation. While
//! the fade runs, every update lowers the volume to `1 - alpha`; when it
//! completes its end callback stops the track. This is the one place where an
//! animation's progress is sampled as a continuous control value.
//!
//! Whether the track is playing is what the audio player last reported, not
//! what was last requested: a track that failed to load never counts as
//! playing, and one that ran to its end stops counting.

use crossbeam_channel::Sender;
use log::debug;

use crate::components::animation::AnimationF;
use crate::events::audio::{AudioCmd, AudioMessage};

pub struct MusicPlayer {
    id: String,
    fading: AnimationF,
    playing: bool,
    audio: Sender<AudioCmd>,
}

impl MusicPlayer {
    pub fn new(id: impl Into<String>, fade_duration: f32, audio: Sender<AudioCmd>) -> Self {
        let id = id.into();
        let fading = AnimationF::new().with_duration(fade_duration);
        {
            let audio = audio.clone();
            let id = id.clone();
            fading.on_end(move || {
                debug!("music '{}' faded out", id);
                let _ = audio.send(AudioCmd::StopMusic { id: id.clone() });
            });
        }
        Self {
            id,
            fading,
            playing: false,
            audio,
        }
    }

    /// Stop playback, restore full volume and cancel any fade.
    pub fn reset(&mut self) {
        self.stop();
        let _ = self.audio.send(AudioCmd::VolumeMusic {
            id: self.id.clone(),
            vol: 1.0,
        });
        self.fading.reset();
    }

    /// Play from the beginning at full volume.
    pub fn start(&mut self) {
        self.reset();
        let _ = self.audio.send(AudioCmd::PlayMusic {
            id: self.id.clone(),
        });
    }

    /// Playing state as last reported by the audio player.
    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn fade(&self) {
        self.fading.start();
    }

    pub fn stop(&self) {
        let _ = self.audio.send(AudioCmd::StopMusic {
            id: self.id.clone(),
        });
    }

    /// Fade out if playing, otherwise start.
    pub fn toggle(&mut self) {
        if self.playing() {
            self.fade();
        } else {
            self.start();
        }
    }

    /// Track the stream state reported for this player's id.
    pub fn handle_audio_message(&mut self, msg: &AudioMessage) {
        match msg {
            AudioMessage::MusicPlayStarted { id } if *id == self.id => self.playing = true,
            AudioMessage::MusicStopped { id } | AudioMessage::MusicFinished { id }
                if *id == self.id =>
            {
                self.playing = false
            }
            _ => {}
        }
    }

    pub fn update(&mut self, dt: f32, t: f32) {
        self.fading.update(dt, t);

        if self.fading.is_active() {
            let _ = self.audio.send(AudioCmd::VolumeMusic {
                id: self.id.clone(),
                vol: 1.0 - self.fading.alpha(),
            });
        }
    }

    pub fn fading(&self) -> &AnimationF {
        &self.fading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{Receiver, unbounded};

    fn player() -> (MusicPlayer, Receiver<AudioCmd>) {
        let (tx, rx) = unbounded();
        (MusicPlayer::new("theme", 1.0, tx), rx)
    }

    fn drain(rx: &Receiver<AudioCmd>) -> Vec<AudioCmd> {
        rx.try_iter().collect()
    }

    /// Answer queued commands the way a working audio player would.
    fn ack(p: &mut MusicPlayer, rx: &Receiver<AudioCmd>) -> Vec<AudioCmd> {
        let cmds = drain(rx);
        for cmd in cmds.iter() {
            match cmd {
                AudioCmd::PlayMusic { id } => {
                    p.handle_audio_message(&AudioMessage::MusicPlayStarted { id: id.clone() })
                }
                AudioCmd::StopMusic { id } => {
                    p.handle_audio_message(&AudioMessage::MusicStopped { id: id.clone() })
                }
                _ => {}
            }
        }
        cmds
    }

    #[test]
    fn test_start_resets_then_plays() {
        let (mut p, rx) = player();
        p.start();
        assert!(!p.playing());
        assert_eq!(
            ack(&mut p, &rx),
            vec![
                AudioCmd::StopMusic { id: "theme".into() },
                AudioCmd::VolumeMusic {
                    id: "theme".into(),
                    vol: 1.0
                },
                AudioCmd::PlayMusic { id: "theme".into() },
            ]
        );
        assert!(p.playing());
    }

    #[test]
    fn test_update_without_fade_is_silent() {
        let (mut p, rx) = player();
        p.start();
        ack(&mut p, &rx);
        p.update(0.1, 0.1);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_fade_lowers_volume_then_stops() {
        let (mut p, rx) = player();
        p.start();
        ack(&mut p, &rx);

        p.fade();
        p.update(0.25, 0.25);
        assert_eq!(
            drain(&rx),
            vec![AudioCmd::VolumeMusic {
                id: "theme".into(),
                vol: 0.75
            }]
        );
        assert!(p.playing());

        p.update(0.5, 0.75);
        p.update(0.5, 1.25);
        let cmds = ack(&mut p, &rx);
        assert_eq!(
            cmds.last(),
            Some(&AudioCmd::StopMusic { id: "theme".into() })
        );
        assert!(!p.playing());
        assert!(!p.fading().is_active());
    }

    #[test]
    fn test_toggle_starts_then_fades() {
        let (mut p, rx) = player();
        p.toggle();
        assert!(!p.fading().is_active());
        ack(&mut p, &rx);
        assert!(p.playing());

        p.toggle();
        assert!(p.fading().is_active());
        assert!(p.playing());
    }

    #[test]
    fn test_toggle_retries_start_when_track_never_played() {
        let (mut p, rx) = player();
        p.toggle();
        // no reply: the track failed to load
        drain(&rx);
        assert!(!p.playing());

        p.toggle();
        assert!(!p.fading().is_active());
        assert!(drain(&rx).contains(&AudioCmd::PlayMusic { id: "theme".into() }));
    }

    #[test]
    fn test_track_that_ends_on_its_own_is_started_again() {
        let (mut p, rx) = player();
        p.toggle();
        ack(&mut p, &rx);
        p.handle_audio_message(&AudioMessage::MusicFinished { id: "theme".into() });
        assert!(!p.playing());

        p.toggle();
        assert!(!p.fading().is_active());
        assert!(drain(&rx).contains(&AudioCmd::PlayMusic { id: "theme".into() }));
    }

    #[test]
    fn test_messages_for_other_ids_are_ignored() {
        let (mut p, _rx) = player();
        p.handle_audio_message(&AudioMessage::MusicPlayStarted { id: "other".into() });
        assert!(!p.playing());
    }

    #[test]
    fn test_start_during_fade_cancels_it() {
        let (mut p, rx) = player();
        p.start();
        p.fade();
        p.update(0.5, 0.5);
        p.start();
        assert!(!p.fading().is_active());
        ack(&mut p, &rx);
        assert!(p.playing());
        p.update(0.6, 1.1);
        assert!(drain(&rx).is_empty());
        assert!(p.playing());
    }

    #[test]
    fn test_stop() {
        let (mut p, rx) = player();
        p.start();
        ack(&mut p, &rx);
        p.stop();
        assert_eq!(ack(&mut p, &rx), vec![AudioCmd::StopMusic { id: "theme".into() }]);
        assert!(!p.playing());
    }
}
