//! The scene aggregate.
//!
//! [`Scene`] owns every animated object and wires the one cross-object
//! dependency: the kittens turning their heads sends the mouse walking. It
//! holds `Rc`-based animation handles, so it lives in the world as a
//! non-send resource.

use crossbeam_channel::Sender;
use log::{debug, info};
use raylib::prelude::Vector2;

use crate::components::dialogue::{Dialogue, Message};
use crate::components::kittens::Kittens;
use crate::components::mouse::Mouse;
use crate::components::musicplayer::MusicPlayer;
use crate::components::shaker::Shaker;
use crate::components::textbox::Textbox;
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::scenescript::SceneScript;

/// Audio id of the background track.
pub const MUSIC_ID: &str = "music";

/// Audio id of the sound effect that belongs to textbox `index`.
pub fn textbox_fx_id(index: usize) -> String {
    format!("textbox{index}")
}

pub struct Scene {
    pub kittens: Kittens,
    pub mouse: Mouse,
    pub textboxes: Vec<Textbox>,
    pub dialogue: Dialogue,
    pub music: MusicPlayer,
}

impl Scene {
    /// Build the scene from `script` and start the kittens' look cycle.
    ///
    /// `mouse_sprite` is the pixel size of one mouse frame; the walk bounds
    /// are derived from it. Every textbox gets its own random stream forked
    /// from `rng`.
    pub fn new(
        script: &SceneScript,
        screen: Vector2,
        mouse_sprite: Vector2,
        audio: Sender<AudioCmd>,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let kittens = Kittens::new(script.kittens);
        let mouse = Mouse::new(&script.mouse, mouse_sprite, screen);

        let textboxes = script
            .textboxes
            .iter()
            .enumerate()
            .map(|(i, layout)| {
                let shaker = Shaker::new(script.shake, rng.fork());
                Textbox::new(layout, textbox_fx_id(i), shaker, audio.clone())
            })
            .collect::<Vec<_>>();

        let music = MusicPlayer::new(MUSIC_ID, script.music.fade_duration, audio);

        {
            let walk = mouse.left_walk().downgrade();
            kittens.left_look().on_start(move || {
                debug!("kittens look left, mouse walks left");
                walk.start();
            });
        }
        {
            let walk = mouse.right_walk().downgrade();
            kittens.right_look().on_start(move || {
                debug!("kittens look right, mouse walks right");
                walk.start();
            });
        }

        info!(
            "Scene ready: {} textboxes, {} messages",
            textboxes.len(),
            script.messages.len()
        );

        let scene = Self {
            kittens,
            mouse,
            textboxes,
            dialogue: Dialogue::new(script.messages.clone()),
            music,
        };
        scene.kittens.left_look().start();
        scene
    }

    /// Advance every object by one frame, in a fixed order.
    pub fn update(&mut self, dt: f32, t: f32) {
        self.kittens.update(dt, t);
        for textbox in self.textboxes.iter_mut() {
            textbox.update(dt, t);
        }
        self.mouse.update(dt, t);
        self.music.update(dt, t);
    }

    /// Show the next line of the conversation, if any.
    pub fn advance_dialogue(&mut self) -> Option<&Message> {
        self.dialogue.advance(&mut self.textboxes)
    }

    pub fn toggle_music(&mut self) {
        self.music.toggle();
    }

    /// Feed one reply from the audio player to the objects that track it.
    pub fn handle_audio_message(&mut self, msg: &AudioMessage) {
        self.music.handle_audio_message(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mouse::Facing;
    use crossbeam_channel::{Receiver, unbounded};

    const SCREEN: Vector2 = Vector2 {
        x: 1024.0,
        y: 576.0,
    };
    const SPRITE: Vector2 = Vector2 { x: 200.0, y: 100.0 };

    fn scene() -> (Scene, Receiver<AudioCmd>) {
        let (tx, rx) = unbounded();
        let mut rng = fastrand::Rng::with_seed(7);
        let scene = Scene::new(&SceneScript::default(), SCREEN, SPRITE, tx, &mut rng);
        (scene, rx)
    }

    #[test]
    fn test_construction_starts_left_look_and_left_walk() {
        let (scene, _rx) = scene();
        assert!(scene.kittens.left_look().is_active());
        assert!(scene.mouse.left_walk().is_active());
        assert!(!scene.mouse.right_walk().is_active());
    }

    #[test]
    fn test_right_look_sends_mouse_right() {
        let (mut scene, _rx) = scene();
        let mut t = 0.0;
        // 8 s of look plus one frame to cross over
        for _ in 0..81 {
            t += 0.1;
            scene.update(0.1, t);
        }
        assert!(scene.kittens.right_look().is_active());
        assert!(scene.mouse.right_walk().is_active());
        assert_eq!(scene.mouse.facing, Facing::Right);
    }

    #[test]
    fn test_mouse_crosses_screen_in_step_with_kittens() {
        let (mut scene, _rx) = scene();
        scene.update(4.0, 4.0);
        let half = (scene.mouse.x_max + scene.mouse.x_min) / 2.0;
        assert!((scene.mouse.x - half).abs() < 1e-3);
        assert_eq!(scene.kittens.current_frame(), 12 + 31);
    }

    #[test]
    fn test_jump_starts_at_its_trigger_time() {
        let (mut scene, _rx) = scene();
        scene.update(0.5, 0.5);
        assert!(!scene.mouse.jump_cycle().is_active());
        scene.update(0.1, 0.6);
        assert!(scene.mouse.jump_cycle().is_active());
        assert!(scene.mouse.jump_cycle().is_triggered());
    }

    #[test]
    fn test_dialogue_plays_textbox_sound() {
        let (mut scene, rx) = scene();
        let msg = scene.advance_dialogue().cloned();
        assert_eq!(msg.map(|m| m.textbox), Some(0));
        assert!(scene.textboxes[0].visible);
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![AudioCmd::PlayFx {
                id: textbox_fx_id(0)
            }]
        );
    }

    #[test]
    fn test_dialogue_shakes_only_the_speaking_box() {
        let (mut scene, _rx) = scene();
        scene.advance_dialogue();
        scene.advance_dialogue();
        assert!(!scene.textboxes[0].visible);
        assert!(scene.textboxes[1].visible);
        assert!(scene.textboxes[1].shaker().is_shaking());
        assert!(!scene.textboxes[2].shaker().is_shaking());
    }

    #[test]
    fn test_toggle_music_starts_then_fades() {
        let (mut scene, rx) = scene();
        let started = AudioMessage::MusicPlayStarted {
            id: MUSIC_ID.to_string(),
        };
        scene.toggle_music();
        assert!(rx.try_iter().any(|c| c
            == AudioCmd::PlayMusic {
                id: MUSIC_ID.to_string()
            }));
        scene.handle_audio_message(&started);
        assert!(scene.music.playing());

        scene.toggle_music();
        assert!(scene.music.fading().is_active());
        scene.update(0.5, 0.5);
        scene.update(0.6, 1.1);
        assert!(rx.try_iter().any(|c| c
            == AudioCmd::StopMusic {
                id: MUSIC_ID.to_string()
            }));
        scene.handle_audio_message(&AudioMessage::MusicStopped {
            id: MUSIC_ID.to_string(),
        });
        assert!(!scene.music.playing());
    }
}
