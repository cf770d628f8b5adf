//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: includes DefaultPlugins (window/render/audio) + game plugins.
//! - `configure_headless`: minimal configuration for integration tests.

use bevy::prelude::*;
use bevy::window::{MonitorSelection, WindowMode, WindowResolution};

use crate::common::state::GameState;
use crate::plugins;

// Only compile these imports on Windows.
#[cfg(target_os = "windows")]
use bevy::render::{
    settings::{Backends, PowerPreference, WgpuSettings},
    RenderPlugin,
};

/// Set to run in a 1280x720 window instead of borderless fullscreen.
pub const WINDOWED_VAR: &str = "VOLLEY_WINDOWED";

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

fn primary_window() -> Window {
    let mut window = Window {
        title: "Volleyball".into(),
        ..default()
    };
    if std::env::var_os(WINDOWED_VAR).is_some() {
        window.resolution = WindowResolution::new(1280, 720);
    } else {
        window.mode = WindowMode::BorderlessFullscreen(MonitorSelection::Primary);
    }
    window
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(primary_window()),
        ..default()
    });

    // Windows renders through DX12.
    #[cfg(target_os = "windows")]
    let default_plugins = default_plugins.set(RenderPlugin {
        render_creation: WgpuSettings {
            backends: Some(Backends::DX12),
            power_preference: PowerPreference::HighPerformance,
            ..default()
        }
        .into(),
        ..default()
    });

    app.add_plugins(default_plugins);

    configure_game(app);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add render-only plugins (camera/HUD meshes).
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}
