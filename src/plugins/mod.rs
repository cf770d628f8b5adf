//! Feature plugins.

use bevy::prelude::*;

pub mod ai;
pub mod audio;
pub mod ball;
pub mod core;
pub mod court;
pub mod input;
pub mod menu;
pub mod physics;
pub mod player;
pub mod rules;

// Render-only
pub mod camera;
pub mod hud;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    rules::plugin(app);
    court::plugin(app);
    player::plugin(app);
    ball::plugin(app);
    input::plugin(app);
    ai::plugin(app);
    menu::plugin(app);
    audio::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    hud::plugin(app);
}
