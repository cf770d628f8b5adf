//! Physics plugin.
//!
//! The rally is integrated by the rules engine, not by avian. Avian is kept for
//! its transform interpolation so 120 Hz court positions render smoothly at any
//! frame rate; no rigid bodies exist, and gravity is off.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let length_unit = app
        .world()
        .get_resource::<Tunables>()
        .map(|t| t.player_radius * 2.0)
        .unwrap_or(80.0);
    app.add_plugins(PhysicsPlugins::default().with_length_unit(length_unit));
    app.insert_resource(Gravity(Vec2::ZERO));
}
