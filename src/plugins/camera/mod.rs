//! Camera plugin (render-only).
//!
//! One `Camera2d` for the whole app. World space is already centred on the
//! screen by `CourtLayout::to_world`, so the camera never moves.

use bevy::prelude::*;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera);
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        MainCamera,
        Camera2d,
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));
}
