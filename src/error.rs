//! Error types.
//!
//! Asset failures are reported as [`AssetError`] so callers can decide
//! whether to fall back (missing font, missing sound) or abort (missing
//! sprite sheets). Scene scripts and the INI config have their own kinds.

use thiserror::Error;

/// Failure to load or look up an asset.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("failed to load texture '{path}': {reason}")]
    Texture { path: String, reason: String },

    #[error("failed to load font '{path}': {reason}")]
    Font { path: String, reason: String },

    #[error("failed to load sound '{id}' from '{path}': {reason}")]
    Sound {
        id: String,
        path: String,
        reason: String,
    },

    #[error("failed to load music '{id}' from '{path}': {reason}")]
    Music {
        id: String,
        path: String,
        reason: String,
    },

    #[error("no audio asset registered under '{id}'")]
    UnknownAudio { id: String },

    #[error("frame id {id} is outside the cached range {first}..={last}")]
    FrameOutOfRange { id: usize, first: usize, last: usize },
}

/// Invalid or unreadable scene script.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("failed to read scene script '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("failed to parse scene script '{path}': {reason}")]
    Parse { path: String, reason: String },

    #[error("failed to write scene script '{path}': {reason}")]
    Write { path: String, reason: String },

    #[error("message {index} targets textbox {textbox}, but the scene has {count}")]
    UnknownTextbox {
        index: usize,
        textbox: usize,
        count: usize,
    },

    #[error("frame sequence '{name}' is empty")]
    EmptySequence { name: String },

    #[error("frame sequence '{name}' uses frame index {index}, but only {count} mouse frames exist")]
    UnknownMouseFrame {
        name: String,
        index: usize,
        count: usize,
    },

    #[error("duration '{name}' must be positive, got {value}")]
    NonPositiveDuration { name: String, value: f32 },

    #[error("kitten frame range is empty")]
    EmptyFrameRange,
}

/// Failure to read or write the INI configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("config file '{path}' not found")]
    NotFound { path: String },

    #[error("failed to load config file '{path}': {reason}")]
    Load { path: String, reason: String },

    #[error("failed to save config file '{path}': {reason}")]
    Save { path: String, reason: String },
}

/// Anything that can stop the scene from being set up.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Script(#[from] ScriptError),
}

pub type SceneResult<T> = Result<T, SceneError>;
