//! Messages exchanged between the scene and the rest of the program.
//!
//! Submodules:
//! - [`audio`] – playback commands for the audio player and its replies
pub mod audio;
