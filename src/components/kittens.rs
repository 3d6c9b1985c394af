//! The kittens' look-direction cycle.
//!
//! Two animations, `left_look` and `right_look`, are chained to each other:
//! when one completes it starts the other, so once either side is started
//! the kittens keep turning their heads back and forth forever. The displayed
//! background frame is sampled from whichever side is active.

use serde::{Deserialize, Serialize};

use crate::components::animation::AnimationF;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KittenParams {
    /// Seconds for one sweep in either direction.
    pub look_duration: f32,
    /// Frame id shown at the start of a left look.
    pub first_frame: usize,
    /// Number of frame ids covered by one sweep.
    pub frame_span: usize,
}

impl Default for KittenParams {
    fn default() -> Self {
        Self {
            look_duration: 8.0,
            first_frame: 12,
            frame_span: 62,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookDirection {
    Left,
    Right,
}

pub struct Kittens {
    left_look: AnimationF,
    right_look: AnimationF,
    first_frame: usize,
    frame_span: usize,
    current_frame: usize,
}

impl Kittens {
    pub fn new(params: KittenParams) -> Self {
        let left_look = AnimationF::new().with_duration(params.look_duration);
        let right_look = AnimationF::new().with_duration(params.look_duration);

        left_look.chain(&right_look);
        right_look.chain(&left_look);

        Self {
            left_look,
            right_look,
            first_frame: params.first_frame,
            frame_span: params.frame_span,
            current_frame: params.first_frame,
        }
    }

    pub fn update(&mut self, dt: f32, t: f32) {
        self.left_look.update(dt, t);
        self.right_look.update(dt, t);

        if self.left_look.is_active() {
            self.current_frame = self.frame_at(self.left_look.alpha());
        } else if self.right_look.is_active() {
            self.current_frame = self.frame_at(1.0 - self.right_look.alpha());
        }
    }

    fn frame_at(&self, progress: f32) -> usize {
        self.first_frame + (progress * self.frame_span as f32) as usize
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Inclusive range of frame ids this cycle can display.
    pub fn frame_range(&self) -> (usize, usize) {
        (self.first_frame, self.first_frame + self.frame_span)
    }

    pub fn direction(&self) -> Option<LookDirection> {
        if self.left_look.is_active() {
            Some(LookDirection::Left)
        } else if self.right_look.is_active() {
            Some(LookDirection::Right)
        } else {
            None
        }
    }

    pub fn left_look(&self) -> &AnimationF {
        &self.left_look
    }

    pub fn right_look(&self) -> &AnimationF {
        &self.right_look
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_kittens_show_first_frame() {
        let mut k = Kittens::new(KittenParams::default());
        k.update(1.0, 1.0);
        assert_eq!(k.current_frame(), 12);
        assert_eq!(k.direction(), None);
        assert_eq!(k.frame_range(), (12, 74));
    }

    #[test]
    fn test_left_look_sweeps_frames_forward() {
        let mut k = Kittens::new(KittenParams::default());
        k.left_look().start();
        k.update(4.0, 4.0);
        assert_eq!(k.direction(), Some(LookDirection::Left));
        assert_eq!(k.current_frame(), 12 + 31);
        k.update(4.0, 8.0);
        assert_eq!(k.current_frame(), 74);
    }

    #[test]
    fn test_left_hands_over_to_right() {
        let mut k = Kittens::new(KittenParams::default());
        k.left_look().start();
        k.update(4.0, 4.0);
        k.update(4.5, 8.5);
        assert_eq!(k.direction(), Some(LookDirection::Right));
        assert!(!k.left_look().is_active());
        // right_look started and advanced by the same frame's dt
        assert!((k.right_look().alpha() - 4.5 / 8.0).abs() < 1e-6);
        assert_eq!(k.current_frame(), 12 + ((1.0 - 4.5 / 8.0) * 62.0) as usize);
    }

    #[test]
    fn test_right_look_sweeps_frames_backward() {
        let mut k = Kittens::new(KittenParams::default());
        k.right_look().start();
        k.update(2.0, 2.0);
        assert_eq!(k.current_frame(), 12 + (0.75 * 62.0) as usize);
        k.update(4.0, 6.0);
        assert_eq!(k.current_frame(), 12 + (0.25 * 62.0) as usize);
    }

    #[test]
    fn test_directions_alternate_forever() {
        let mut k = Kittens::new(KittenParams {
            look_duration: 1.0,
            ..KittenParams::default()
        });
        k.left_look().start();
        let mut seen = Vec::new();
        let mut t = 0.0;
        for _ in 0..1000 {
            t += 0.05;
            k.update(0.05, t);
            let dir = k.direction();
            assert!(dir.is_some());
            if seen.last() != Some(&dir) {
                seen.push(dir);
            }
            let (first, last) = k.frame_range();
            assert!(k.current_frame() >= first && k.current_frame() <= last);
        }
        assert!(seen.len() >= 40);
        for pair in seen.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }
}
