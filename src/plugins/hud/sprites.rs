//! Meshes for the players, the ball and its trail.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{palette, side::Side, state::GameState};
use crate::plugins::ball::Ball;
use crate::plugins::player::Player;
use crate::plugins::rules::RulesEngine;

/// White outline shown while a player is off the ground.
#[derive(Component)]
pub(super) struct AirborneRing;

/// Trail sample slot; `0` is the oldest.
#[derive(Component, Debug, Clone, Copy)]
pub(super) struct TrailDot(pub usize);

/// Radius and grey level of trail dot `index` out of `len` samples.
pub fn trail_style(index: usize, len: usize, ball_radius: f32) -> (f32, u8) {
    let k = index as f32 / (len.max(2) - 1) as f32;
    let radius = (ball_radius * (0.4 + 0.6 * k)).max(2.0);
    let shade = (40.0 + 150.0 * (1.0 - k)) as u8;
    (radius, shade)
}

pub(super) fn dress_players(
    mut commands: Commands,
    engine: Option<Res<RulesEngine>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    q: Query<(Entity, &Player), Added<Player>>,
) {
    let Some(engine) = engine else {
        return;
    };
    let scale = engine.layout().scale;
    let radius = scale.px(engine.tunables().player_radius);

    for (e, player) in &q {
        let color = match player.side() {
            Side::Left => palette::PLAYER_LEFT,
            Side::Right => palette::PLAYER_RIGHT,
        };
        commands
            .entity(e)
            .insert((
                Mesh2d(meshes.add(Circle::new(radius))),
                MeshMaterial2d(materials.add(color)),
            ))
            .with_children(|p| {
                p.spawn((
                    AirborneRing,
                    Mesh2d(meshes.add(Annulus::new(radius, radius + scale.px(2.0)))),
                    MeshMaterial2d(materials.add(Color::WHITE)),
                    Transform::from_xyz(0.0, 0.0, 0.1),
                    Visibility::Hidden,
                ));
            });
    }
}

pub(super) fn dress_ball(
    mut commands: Commands,
    engine: Option<Res<RulesEngine>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    q: Query<Entity, Added<Ball>>,
) {
    let Some(engine) = engine else {
        return;
    };
    let scale = engine.layout().scale;
    let radius = scale.px(engine.tunables().ball_radius);

    for e in &q {
        commands.entity(e).insert((
            Mesh2d(meshes.add(Annulus::new(radius - scale.px(2.0), radius))),
            MeshMaterial2d(materials.add(palette::BALL)),
        ));
    }
}

pub(super) fn show_airborne_ring(
    engine: Option<Res<RulesEngine>>,
    players: Query<&Player>,
    mut rings: Query<(&ChildOf, &mut Visibility), With<AirborneRing>>,
) {
    let Some(engine) = engine else {
        return;
    };
    for (parent, mut vis) in &mut rings {
        let Ok(player) = players.get(parent.parent()) else {
            continue;
        };
        vis.set_if_neq(if player.on_ground(engine.tunables()) {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        });
    }
}

pub(super) fn spawn_trail(
    mut commands: Commands,
    engine: Option<Res<RulesEngine>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let Some(engine) = engine else {
        return;
    };
    let ring = meshes.add(Annulus::new(0.85, 1.0));

    for i in 0..engine.tunables().trail_len {
        commands.spawn((
            Name::new("TrailDot"),
            TrailDot(i),
            Mesh2d(ring.clone()),
            MeshMaterial2d(materials.add(palette::BALL)),
            Transform::from_xyz(0.0, 0.0, 2.5),
            Visibility::Hidden,
            DespawnOnExit(GameState::InGame),
        ));
    }
}

pub(super) fn draw_trail(
    engine: Option<Res<RulesEngine>>,
    balls: Query<&Ball>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut dots: Query<(&TrailDot, &mut Transform, &mut Visibility, &MeshMaterial2d<ColorMaterial>)>,
) {
    let Some(engine) = engine else {
        return;
    };
    let Ok(ball) = balls.single() else {
        return;
    };
    let court = engine.layout();
    let samples: Vec<_> = ball.trail().copied().collect();

    for (dot, mut tf, mut vis, material) in &mut dots {
        let Some(sample) = samples.get(dot.0) else {
            vis.set_if_neq(Visibility::Hidden);
            continue;
        };
        let (radius, shade) = trail_style(dot.0, samples.len(), engine.tunables().ball_radius);
        let pos = court.to_world(sample.pos);
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;
        tf.scale = Vec3::splat(court.scale.px(radius));
        vis.set_if_neq(Visibility::Inherited);

        if let Some(mat) = materials.get_mut(&material.0) {
            mat.color = Color::srgb_u8(shade, shade, shade);
        }
    }
}
