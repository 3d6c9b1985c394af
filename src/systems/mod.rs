//! Per-frame systems.
//!
//! Submodules overview
//! - [`audio`] – audio player fed from the command queue
//! - [`dialogue`] – advance the conversation on key press
//! - [`framecache`] – keep the kitten background frame loaded
//! - [`input`] – read hardware input into [`crate::resources::input::InputState`]
//! - [`render`] – draw the scene with Raylib
//! - [`scene`] – music toggle and the scene update
//! - [`time`] – fold the frame delta into [`crate::resources::worldtime::WorldTime`]

pub mod audio;
pub mod dialogue;
pub mod framecache;
pub mod input;
pub mod render;
pub mod scene;
pub mod time;
