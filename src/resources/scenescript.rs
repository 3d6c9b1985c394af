//! Scene script resource.
//!
//! Everything that describes *this* particular scene, as opposed to how the
//! effects behave, lives in [`SceneScript`]: bubble layouts and colours, the
//! conversation, the kittens' and the mouse's tunables, music and asset
//! paths. [`SceneScript::default`] is the stock scene; a JSON file with the
//! same shape can replace any part of it (missing fields keep their
//! defaults).

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::info;
use raylib::prelude::Color;
use serde::{Deserialize, Serialize};

use crate::components::dialogue::Message;
use crate::components::kittens::KittenParams;
use crate::components::mouse::MouseParams;
use crate::components::shaker::ShakeParams;
use crate::components::textbox::{TextboxLayout, Triangle, rgba};
use crate::error::ScriptError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicParams {
    /// Music stream path, relative to the asset root.
    pub path: String,
    /// Seconds the fade-out takes.
    pub fade_duration: f32,
}

impl Default for MusicParams {
    fn default() -> Self {
        Self {
            path: "sneaky-adventure.mp3".to_string(),
            fade_duration: 1.0,
        }
    }
}

/// Asset locations, relative to the asset root. `{id}` in a frame pattern is
/// replaced by the frame id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub font: String,
    pub kitten_frames: String,
    pub mouse_frames: String,
    /// Mouse frame ids to load, in display-index order.
    pub mouse_frame_ids: Vec<usize>,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            font: "font/press-start.ttf".to_string(),
            kitten_frames: "kittens/frames/kittens_{id}.png".to_string(),
            mouse_frames: "mouse/frames/mouse_{id}.png".to_string(),
            mouse_frame_ids: (1..=10).collect(),
        }
    }
}

impl AssetPaths {
    pub fn kitten_frame(&self, id: usize) -> String {
        frame_path(&self.kitten_frames, id)
    }

    pub fn mouse_frame(&self, id: usize) -> String {
        frame_path(&self.mouse_frames, id)
    }
}

fn frame_path(pattern: &str, id: usize) -> String {
    pattern.replace("{id}", &id.to_string())
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneScript {
    pub textboxes: Vec<TextboxLayout>,
    pub messages: Vec<Message>,
    pub shake: ShakeParams,
    pub kittens: KittenParams,
    pub mouse: MouseParams,
    pub music: MusicParams,
    pub assets: AssetPaths,
}

impl Default for SceneScript {
    fn default() -> Self {
        let base = TextboxLayout::default();

        let left_kitten = TextboxLayout {
            x: base.x - 25.0,
            w: base.w + 25.0,
            decoration: vec![Triangle {
                p1: [340.0, 160.0],
                p2: [340.0, 185.0],
                p3: [365.0, 175.0],
            }],
            sound: "kittens/meow1.wav".to_string(),
            ..base.clone()
        };
        let right_kitten = TextboxLayout {
            x: 760.0 - 35.0,
            y: 310.0,
            w: base.w + 35.0,
            color: rgba(Color::YELLOW),
            decoration: vec![Triangle {
                p1: [754.375, 310.0],
                p2: [783.75, 310.0],
                p3: [775.0, 285.0],
            }],
            sound: "kittens/meow2.wav".to_string(),
            ..base.clone()
        };
        let sleepy_kitten = TextboxLayout {
            x: 30.0,
            y: 270.0,
            color: rgba(Color::GOLD),
            decoration: vec![Triangle {
                p1: [230.0, 350.0],
                p2: [230.0, 375.0],
                p3: [255.0, 365.0],
            }],
            sound: "kittens/meow3.wav".to_string(),
            ..base
        };

        Self {
            textboxes: vec![left_kitten, right_kitten, sleepy_kitten],
            messages: vec![
                Message::new(0, "WHAT  IS\nTHIS GUY\nDOING?"),
                Message::new(1, "LOOKS LIKE\nHE'S AFTER\nTHE CHEESE"),
                Message::new(2, "*YAAWWWN*"),
                Message::new(0, "SHOULD WE\nSTOP HIM?\n"),
                Message::new(1, "NAH, LET'S\nWAIT FOR\nMOM"),
                Message::new(2, "I'LL GO\nBACK TO\nSLEEP"),
            ],
            shake: ShakeParams::default(),
            kittens: KittenParams::default(),
            mouse: MouseParams::default(),
            music: MusicParams::default(),
            assets: AssetPaths::default(),
        }
    }
}

impl SceneScript {
    /// Read a script from a JSON file. The result is not validated.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ScriptError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let script: SceneScript = serde_json::from_str(&text).map_err(|e| ScriptError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        info!(
            "Loaded scene script {:?}: {} textboxes, {} messages",
            path,
            script.textboxes.len(),
            script.messages.len()
        );
        Ok(script)
    }

    /// Write the script as pretty-printed JSON.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), ScriptError> {
        let path = path.as_ref();
        let write_err = |reason: String| ScriptError::Write {
            path: path.display().to_string(),
            reason,
        };
        let text = serde_json::to_string_pretty(self).map_err(|e| write_err(e.to_string()))?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        std::fs::write(path, text).map_err(|e| write_err(e.to_string()))
    }

    /// Check the script describes a scene that can actually run.
    pub fn validate(&self) -> Result<(), ScriptError> {
        for (index, msg) in self.messages.iter().enumerate() {
            if msg.textbox >= self.textboxes.len() {
                return Err(ScriptError::UnknownTextbox {
                    index,
                    textbox: msg.textbox,
                    count: self.textboxes.len(),
                });
            }
        }

        let durations = [
            ("shake.cycle", self.shake.cycle),
            ("shake.duration", self.shake.duration),
            ("kittens.look_duration", self.kittens.look_duration),
            ("mouse.walk_duration", self.mouse.walk_duration),
            ("mouse.jump_duration", self.mouse.jump_duration),
            ("music.fade_duration", self.music.fade_duration),
        ];
        for (name, value) in durations {
            // written so NaN is rejected too
            if !(value > 0.0) {
                return Err(ScriptError::NonPositiveDuration {
                    name: name.to_string(),
                    value,
                });
            }
        }

        let sequences = self
            .mouse
            .left_sequences
            .iter()
            .enumerate()
            .map(|(i, s)| (format!("mouse.left_sequences[{i}]"), s))
            .chain(
                self.mouse
                    .right_sequences
                    .iter()
                    .enumerate()
                    .map(|(i, s)| (format!("mouse.right_sequences[{i}]"), s)),
            );
        for (name, seq) in sequences {
            if seq.is_empty() {
                return Err(ScriptError::EmptySequence { name });
            }
            let count = self.assets.mouse_frame_ids.len();
            if let Some(&index) = seq.iter().find(|&&f| f >= count) {
                return Err(ScriptError::UnknownMouseFrame { name, index, count });
            }
        }

        if self.kittens.frame_span == 0 {
            return Err(ScriptError::EmptyFrameRange);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_script_is_valid() {
        let s = SceneScript::default();
        assert_eq!(s.textboxes.len(), 3);
        assert_eq!(s.messages.len(), 6);
        assert_eq!(s.validate(), Ok(()));
    }

    #[test]
    fn test_default_layouts_match_stock_scene() {
        let s = SceneScript::default();
        assert_eq!((s.textboxes[0].x, s.textboxes[0].w), (115.0, 225.0));
        assert_eq!(
            (s.textboxes[1].x, s.textboxes[1].y, s.textboxes[1].w),
            (725.0, 310.0, 235.0)
        );
        assert_eq!((s.textboxes[2].x, s.textboxes[2].y), (30.0, 270.0));
        assert_eq!(s.textboxes[2].color, rgba(Color::GOLD));
    }

    #[test]
    fn test_frame_paths() {
        let a = AssetPaths::default();
        assert_eq!(a.kitten_frame(12), "kittens/frames/kittens_12.png");
        assert_eq!(a.mouse_frame(10), "mouse/frames/mouse_10.png");
    }

    #[test]
    fn test_unknown_textbox_is_rejected() {
        let mut s = SceneScript::default();
        s.messages.push(Message::new(3, "WHO?"));
        assert_eq!(
            s.validate(),
            Err(ScriptError::UnknownTextbox {
                index: 6,
                textbox: 3,
                count: 3
            })
        );
    }

    #[test]
    fn test_non_positive_duration_is_rejected() {
        let mut s = SceneScript::default();
        s.mouse.jump_duration = 0.0;
        assert!(matches!(
            s.validate(),
            Err(ScriptError::NonPositiveDuration { name, .. }) if name == "mouse.jump_duration"
        ));
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let mut s = SceneScript::default();
        s.mouse.right_sequences[1].clear();
        assert!(matches!(s.validate(), Err(ScriptError::EmptySequence { .. })));
    }

    #[test]
    fn test_sequence_index_beyond_mouse_frames_is_rejected() {
        let mut s = SceneScript::default();
        s.assets.mouse_frame_ids = (1..=5).collect();
        assert_eq!(
            s.validate(),
            Err(ScriptError::UnknownMouseFrame {
                name: "mouse.right_sequences[0]".to_string(),
                index: 5,
                count: 5,
            })
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s: SceneScript =
            serde_json::from_str(r#"{ "messages": [{ "textbox": 1, "text": "HI" }] }"#).unwrap();
        assert_eq!(s.messages, vec![Message::new(1, "HI")]);
        assert_eq!(s.textboxes.len(), 3);
        assert_eq!(s.kittens, KittenParams::default());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scripts/scene.json");
        let s = SceneScript::default();
        s.write_to_file(&path).unwrap();
        assert_eq!(SceneScript::load_from_file(&path).unwrap(), s);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            SceneScript::load_from_file(&path),
            Err(ScriptError::Parse { .. })
        ));
    }
}
