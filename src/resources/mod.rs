//! Resources made available to systems.
//!
//! Overview
//! - `audio` – command queue between the scene and the audio player
//! - `framecache` – lazily loaded frame sequence with single-frame residency
//! - `gameconfig` – window, timing and asset settings from `config.ini`
//! - `input` – per-frame state of the keys the scene reacts to
//! - `scene` – the animated objects and their cross wiring (non-send)
//! - `scenescript` – data describing the scene, loadable from JSON
//! - `scenetextures` – font and sprite textures (non-send)
//! - `screensize` – framebuffer dimensions in pixels
//! - `worldtime` – timeline time and clamped frame delta
pub mod audio;
pub mod framecache;
pub mod gameconfig;
pub mod input;
pub mod scene;
pub mod scenescript;
pub mod scenetextures;
pub mod screensize;
pub mod worldtime;
