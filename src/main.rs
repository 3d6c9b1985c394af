//! Lazy Kittens VS Brave Mouse, main entry point.
//!
//! Two kittens turn their heads back and forth while a mouse sneaks past
//! them, three speech bubbles carry a short conversation and the background
//! music can be faded out. Built with:
//! - **raylib** for windowing, graphics, and audio
//! - **bevy_ecs** for resources, systems and the per-frame schedule
//!
//! # Main Loop
//!
//! 1. Load `config.ini` and the scene script (built in, or JSON via `--script`)
//! 2. Initialize the raylib window and audio device, load textures, build the scene
//! 3. Each frame:
//!    - Fold the clamped frame delta into `WorldTime`
//!    - Poll input and audio replies, advance the dialogue, toggle music
//!    - Update the scene, sync the kitten background frame, render
//!    - Drain queued audio commands into the audio player
//!
//! # Controls
//!
//! - `SPACE` shows the next line of dialogue
//! - `M` starts the music, or fades it out while playing
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config ./config.ini
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use bevy_ecs::prelude::*;
use clap::Parser;
use lazykittens::error::ConfigError;
use lazykittens::game;
use lazykittens::resources::audio::{AudioBridge, setup_audio, shutdown_audio};
use lazykittens::resources::gameconfig::GameConfig;
use lazykittens::resources::input::InputState;
use lazykittens::resources::scenescript::SceneScript;
use lazykittens::resources::screensize::ScreenSize;
use lazykittens::resources::worldtime::WorldTime;
use lazykittens::systems::audio::{AudioPlayer, forward_audio_cmds, poll_audio_messages};
use lazykittens::systems::dialogue::dialogue_input_system;
use lazykittens::systems::framecache::kitten_frame_system;
use lazykittens::systems::input::update_input_state;
use lazykittens::systems::render::render_system;
use lazykittens::systems::scene::{music_input_system, scene_update_system};
use lazykittens::systems::time::update_world_time;
use log::{error, info, warn};
use raylib::core::audio::RaylibAudio;
use raylib::ffi;
use std::path::PathBuf;

const DEFAULT_SCRIPT_DUMP_PATH: &str = "scene.json";

/// Lazy Kittens VS Brave Mouse
#[derive(Parser)]
#[command(version, about = "Two lazy kittens watch a brave mouse sneak by.")]
struct Cli {
    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Scene script in JSON. The built-in scene is used when omitted.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Write the effective scene script as JSON and exit.
    /// Optionally provide a path (default: scene.json).
    #[arg(long, value_name = "PATH")]
    dump_script: Option<Option<PathBuf>>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let script = match &cli.script {
        Some(path) => match SceneScript::load_from_file(path) {
            Ok(script) => script,
            Err(e) => {
                error!("{e}");
                std::process::exit(1);
            }
        },
        None => SceneScript::default(),
    };

    // Early-exit: dump the scene script and quit (no window/audio needed)
    if let Some(maybe_path) = cli.dump_script {
        let path = maybe_path.unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPT_DUMP_PATH));
        if let Err(e) = script.write_to_file(&path) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Scene script written to {}", path.display());
        return;
    }

    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    match config.load_from_file() {
        Ok(()) => {}
        Err(e @ ConfigError::NotFound { .. }) => info!("{e}; using default settings"),
        Err(e) => warn!("{e}; using default settings"),
    }

    // --------------- Raylib window & audio ---------------
    unsafe {
        ffi::SetTraceLogLevel(ffi::TraceLogLevel::LOG_WARNING as i32);
    }

    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .title(&config.title)
        .build();
    rl.set_target_fps(config.target_fps);

    let audio_device = match RaylibAudio::init_audio_device() {
        Ok(device) => Some(device),
        Err(e) => {
            warn!("audio device unavailable, running silent: {e}");
            None
        }
    };

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    let audio_tx = setup_audio(&mut world);

    let screen = ScreenSize {
        w: window_width as i32,
        h: window_height as i32,
    };
    let mut rng = fastrand::Rng::new();
    let (scene, textures) =
        match game::setup(&mut rl, &thread, &config, &script, screen, &audio_tx, &mut rng) {
            Ok(loaded) => loaded,
            Err(e) => {
                error!("scene setup failed: {e}");
                std::process::exit(1);
            }
        };

    world.insert_resource(WorldTime::default().with_max_delta(config.max_frame_time));
    world.insert_resource(InputState::default());
    world.insert_resource(screen);
    world.insert_resource(config);
    world.insert_resource(script);
    world.insert_non_send_resource(scene);
    world.insert_non_send_resource(textures);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    let mut update = Schedule::default();
    update.add_systems(
        (
            update_input_state,
            poll_audio_messages,
            dialogue_input_system,
            music_input_system,
            scene_update_system,
            kitten_frame_system,
            render_system,
        )
            .chain(),
    );

    if let Err(e) = update.initialize(&mut world) {
        error!("failed to initialize schedule: {e}");
        std::process::exit(1);
    }

    let tx_msg = world.resource::<AudioBridge>().tx_msg.clone();
    let mut player = audio_device
        .as_ref()
        .map(|device| AudioPlayer::new(device, tx_msg));

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();

        forward_audio_cmds(&world, player.as_mut());
    }

    shutdown_audio(&world);
    forward_audio_cmds(&world, player.as_mut());

    let frames = world.resource::<WorldTime>().frame_count;
    info!("Bye! {frames} frames rendered");
}
