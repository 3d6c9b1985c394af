//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1024
//! height = 576
//! target_fps = 60
//! title = Lazy Kittens VS Brave Mouse
//!
//! [time]
//! max_frame_time = 0.1
//!
//! [assets]
//! root = ./assets
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::resources::worldtime::DEFAULT_MAX_DELTA;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1024;
const DEFAULT_WINDOW_HEIGHT: u32 = 576;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_TITLE: &str = "Lazy Kittens VS Brave Mouse";
const DEFAULT_ASSET_ROOT: &str = "./assets";
pub const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Window title.
    pub title: String,
    /// Ceiling for a single frame delta, in seconds.
    pub max_frame_time: f32,
    /// Directory every asset path is resolved against.
    pub asset_root: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            title: DEFAULT_TITLE.to_string(),
            max_frame_time: DEFAULT_MAX_DELTA,
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns [`ConfigError::NotFound`] when there is no file, and
    /// [`ConfigError::Load`] when it exists but cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound {
                path: self.config_path.display().to_string(),
            });
        }

        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|reason| ConfigError::Load {
                path: self.config_path.display().to_string(),
                reason,
            })?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(title) = config.get("window", "title") {
            self.title = title;
        }

        // [time] section
        if let Some(max) = config.getfloat("time", "max_frame_time").ok().flatten() {
            if max > 0.0 {
                self.max_frame_time = max as f32;
            }
        }

        // [assets] section
        if let Some(root) = config.get("assets", "root") {
            self.asset_root = PathBuf::from(root);
        }

        info!(
            "Loaded config: {}x{} window, fps={}, max_frame_time={}, assets={:?}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.max_frame_time,
            self.asset_root
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "title", Some(self.title.clone()));

        // [time] section
        config.set(
            "time",
            "max_frame_time",
            Some(self.max_frame_time.to_string()),
        );

        // [assets] section
        config.set(
            "assets",
            "root",
            Some(self.asset_root.display().to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| ConfigError::Save {
                path: self.config_path.display().to_string(),
                reason: e.to_string(),
            })?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Resolve an asset path relative to the configured asset root.
    pub fn asset_path(&self, relative: impl AsRef<Path>) -> String {
        self.asset_root.join(relative).display().to_string()
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
