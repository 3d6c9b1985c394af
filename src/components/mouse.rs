//! The mouse walking across the bottom of the screen.
//!
//! Movement is driven by two animations, `left_walk` and `right_walk`, which
//! the scene starts from the kittens' look-direction callbacks. A third,
//! short `jump_cycle` animation bobs the sprite and picks the displayed
//! frame; it restarts itself on completion and flips between two frame
//! sequence variants each time around.

use std::cell::Cell;
use std::f32::consts::PI;
use std::rc::Rc;

use raylib::prelude::Vector2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::components::animation::AnimationF;
use crate::math::{lerp_f32, quantize};

/// Pixel grid the mouse is drawn on.
const POSITION_STEP: f32 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseParams {
    /// Seconds to cross the screen in either direction.
    pub walk_duration: f32,
    /// Seconds of one hop.
    pub jump_duration: f32,
    /// Timeline time at which the hopping starts.
    pub jump_trigger_at: f32,
    /// Sprite scale factor.
    pub scale: f32,
    /// Horizontal distance kept off-screen at both ends of the walk.
    pub offscreen_margin: f32,
    /// Gap between the sprite and the bottom of the screen.
    pub ground_margin: f32,
    /// Peak hop height in pixels.
    pub bob_height: f32,
    /// Frame sequences used while walking left, alternated per hop.
    pub left_sequences: [Vec<usize>; 2],
    /// Frame sequences used while walking right, alternated per hop.
    pub right_sequences: [Vec<usize>; 2],
}

impl Default for MouseParams {
    fn default() -> Self {
        Self {
            walk_duration: 8.0,
            jump_duration: 0.5,
            jump_trigger_at: 0.55,
            scale: 0.35,
            offscreen_margin: 15.0,
            ground_margin: 5.0,
            bob_height: 9.0,
            left_sequences: [vec![0, 1, 2], vec![0, 3, 4]],
            right_sequences: [vec![5, 6, 7], vec![5, 8, 9]],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

type FrameSeq = SmallVec<[usize; 4]>;

pub struct Mouse {
    left_walk: AnimationF,
    right_walk: AnimationF,
    jump_cycle: AnimationF,
    seq_turn: Rc<Cell<usize>>,
    left_sequences: [FrameSeq; 2],
    right_sequences: [FrameSeq; 2],
    pub facing: Facing,
    pub x: f32,
    pub y: f32,
    pub x_min: f32,
    pub x_max: f32,
    pub scale: f32,
    pub bob_height: f32,
    pub current_frame: usize,
}

impl Mouse {
    /// Build the mouse for a sprite of `sprite_size` on a `screen` sized canvas.
    ///
    /// The mouse starts just off the right edge, facing left.
    pub fn new(params: &MouseParams, sprite_size: Vector2, screen: Vector2) -> Self {
        let left_walk = AnimationF::new().with_duration(params.walk_duration);
        let right_walk = AnimationF::new().with_duration(params.walk_duration);
        let jump_cycle = AnimationF::new().with_duration(params.jump_duration);
        jump_cycle.set_trigger_at(params.jump_trigger_at);

        let seq_turn = Rc::new(Cell::new(0));
        {
            let seq_turn = seq_turn.clone();
            let jump = jump_cycle.downgrade();
            jump_cycle.on_end(move || {
                seq_turn.set(1 - seq_turn.get());
                jump.start();
            });
        }

        let x_max = screen.x + params.offscreen_margin;
        Self {
            left_walk,
            right_walk,
            jump_cycle,
            seq_turn,
            left_sequences: params.left_sequences.clone().map(FrameSeq::from_vec),
            right_sequences: params.right_sequences.clone().map(FrameSeq::from_vec),
            facing: Facing::Left,
            x: x_max,
            y: screen.y - sprite_size.y * params.scale - params.ground_margin,
            x_min: -sprite_size.x * params.scale - params.offscreen_margin,
            x_max,
            scale: params.scale,
            bob_height: params.bob_height,
            current_frame: 0,
        }
    }

    pub fn update(&mut self, dt: f32, t: f32) {
        self.left_walk.update(dt, t);
        self.right_walk.update(dt, t);
        self.jump_cycle.update(dt, t);

        if self.left_walk.is_active() {
            self.facing = Facing::Left;
        } else if self.right_walk.is_active() {
            self.facing = Facing::Right;
        } else {
            return;
        }

        let turn = self.seq_turn.get();
        let seq = match self.facing {
            Facing::Left => &self.left_sequences[turn],
            Facing::Right => &self.right_sequences[turn],
        };
        let len = seq.len();
        if len > 0 {
            self.current_frame = seq[(self.bob() * len as f32) as usize % len];
        }

        self.x = match self.facing {
            Facing::Left => lerp_f32(self.x_max, self.x_min, self.left_walk.alpha()),
            Facing::Right => lerp_f32(self.x_min, self.x_max, self.right_walk.alpha()),
        };
    }

    /// Hop phase in [0, 1]: 0 on the ground, 1 at the top of the hop.
    pub fn bob(&self) -> f32 {
        (self.jump_cycle.alpha() * PI).sin()
    }

    /// Where to draw the sprite this frame, snapped to the pixel grid.
    pub fn draw_position(&self) -> Vector2 {
        Vector2 {
            x: quantize(self.x, POSITION_STEP),
            y: quantize(self.y - self.bob() * self.bob_height, POSITION_STEP),
        }
    }

    /// Which of the two sequence variants is in use (0 or 1).
    pub fn seq_turn(&self) -> usize {
        self.seq_turn.get()
    }

    pub fn left_walk(&self) -> &AnimationF {
        &self.left_walk
    }

    pub fn right_walk(&self) -> &AnimationF {
        &self.right_walk
    }

    pub fn jump_cycle(&self) -> &AnimationF {
        &self.jump_cycle
    }
}
