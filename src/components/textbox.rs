//! Speech bubbles.
//!
//! A [`Textbox`] is a filled rectangle plus optional decoration triangles
//! (the bubble's tail), an outlined text string and a [`Shaker`] that jolts
//! the whole bubble whenever new text is displayed. Showing text also queues
//! the bubble's sound effect on the audio channel.

use crossbeam_channel::Sender;
use raylib::prelude::{Color, Vector2};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::components::shaker::Shaker;
use crate::events::audio::AudioCmd;
use crate::math::quantize;

/// Pixel grid the shake offset is snapped to.
const SHAKE_STEP: f32 = 2.0;

/// Decoration triangle in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub p1: [f32; 2],
    pub p2: [f32; 2],
    pub p3: [f32; 2],
}

impl Triangle {
    /// Vertices displaced by `offset`.
    pub fn shifted(&self, offset: Vector2) -> [Vector2; 3] {
        [self.p1, self.p2, self.p3].map(|[x, y]| Vector2 {
            x: x + offset.x,
            y: y + offset.y,
        })
    }
}

/// Static description of a textbox, as found in the scene script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextboxLayout {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Fill colour as RGBA.
    pub color: [u8; 4],
    pub text_front: [u8; 4],
    pub text_back: [u8; 4],
    pub decoration: Vec<Triangle>,
    /// Sound effect path, relative to the asset root.
    pub sound: String,
}

impl Default for TextboxLayout {
    fn default() -> Self {
        Self {
            x: 140.0,
            y: 80.0,
            w: 200.0,
            h: 120.0,
            color: rgba(Color::ORANGE),
            text_front: rgba(Color::GREEN),
            text_back: rgba(Color::DARKGREEN),
            decoration: Vec::new(),
            sound: String::new(),
        }
    }
}

pub(crate) fn rgba(c: Color) -> [u8; 4] {
    [c.r, c.g, c.b, c.a]
}

fn color([r, g, b, a]: [u8; 4]) -> Color {
    Color::new(r, g, b, a)
}

pub struct Textbox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: Color,
    pub text_color_front: Color,
    pub text_color_back: Color,
    pub visible: bool,
    pub text_on: bool,
    pub text: String,
    pub decoration: SmallVec<[Triangle; 2]>,
    /// Sound effect id played by [`Textbox::display_text`].
    pub sound_id: String,
    shaker: Shaker,
    audio: Sender<AudioCmd>,
}

impl Textbox {
    pub fn new(
        layout: &TextboxLayout,
        sound_id: impl Into<String>,
        shaker: Shaker,
        audio: Sender<AudioCmd>,
    ) -> Self {
        Self {
            x: layout.x,
            y: layout.y,
            w: layout.w,
            h: layout.h,
            color: color(layout.color),
            text_color_front: color(layout.text_front),
            text_color_back: color(layout.text_back),
            visible: false,
            text_on: false,
            text: String::new(),
            decoration: layout.decoration.iter().copied().collect(),
            sound_id: sound_id.into(),
            shaker,
            audio,
        }
    }

    /// Show `text`, shake the bubble and play its sound.
    pub fn display_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.visible = true;
        self.text_on = true;

        self.shaker.shake();
        let _ = self.audio.send(AudioCmd::PlayFx {
            id: self.sound_id.clone(),
        });
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn update(&mut self, dt: f32, t: f32) {
        self.shaker.update(dt, t);
    }

    /// Shake offset snapped to the bubble's pixel grid.
    pub fn draw_offset(&self) -> Vector2 {
        let o = self.shaker.offset();
        Vector2 {
            x: quantize(o.x, SHAKE_STEP),
            y: quantize(o.y, SHAKE_STEP),
        }
    }

    pub fn shaker(&self) -> &Shaker {
        &self.shaker
    }
}
