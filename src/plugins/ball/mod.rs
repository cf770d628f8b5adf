//! Ball plugin.
//!
//! The ball is a gravitated point mass. It bounces off the outer walls, ends the
//! rally when it reaches the floor line, and keeps the per-rally bookkeeping the
//! rules engine needs: touch counts per side and a short re-touch cooldown.
//!
//! The trail is presentation-only; collision logic never reads it.

use std::collections::VecDeque;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{
    side::{PerSide, Side},
    state::GameState,
};
use crate::plugins::core::RallySet;
use crate::plugins::court::CourtLayout;
use crate::plugins::rules::RulesEngine;

/// One trail sample: position plus a speed-derived intensity in `[0.2, 0.9]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSample {
    pub pos: Vec2,
    pub intensity: f32,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub prev: Vec2,
    pub touches: PerSide<u8>,
    pub cooldown: f32,
    trail: VecDeque<TrailSample>,
}

impl Ball {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            prev: pos,
            touches: PerSide::splat(0),
            cooldown: 0.0,
            trail: VecDeque::new(),
        }
    }

    /// Put the ball at rest at `pos` and forget everything about the last rally.
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.prev = pos;
        self.vel = Vec2::ZERO;
        self.cooldown = 0.0;
        self.trail.clear();
        self.reset_touches();
    }

    #[inline]
    pub fn reset_touches(&mut self) {
        self.touches = PerSide::splat(0);
    }

    pub fn trail(&self) -> impl ExactSizeIterator<Item = &TrailSample> + '_ {
        self.trail.iter()
    }

    /// Integrate one step of flight under `gravity`.
    pub fn update(&mut self, dt: f32, gravity: f32, trail_len: usize) {
        if dt <= 0.0 {
            return;
        }

        self.prev = self.pos;
        self.vel.y += gravity * dt;
        self.pos += self.vel * dt;

        if self.cooldown > 0.0 {
            self.cooldown -= dt;
        }

        let intensity = (self.vel.length() / 1500.0).clamp(0.2, 0.9);
        self.trail.push_back(TrailSample { pos: self.pos, intensity });
        while self.trail.len() > trail_len {
            self.trail.pop_front();
        }
    }

    /// Reflect off the outer walls. Returns `true` if a wall was hit.
    pub fn collide_walls(&mut self, court: &CourtLayout, radius: f32, damping: f32) -> bool {
        if self.pos.x - radius < 0.0 {
            self.pos.x = radius;
            self.vel.x = self.vel.x.abs() * damping;
            return true;
        }
        if self.pos.x + radius > court.width {
            self.pos.x = court.width - radius;
            self.vel.x = -self.vel.x.abs() * damping;
            return true;
        }
        false
    }

    /// Whether the ball's lower edge has reached the floor line.
    #[inline]
    pub fn touches_floor(&self, court: &CourtLayout, radius: f32) -> bool {
        self.pos.y + radius >= court.floor_y
    }

    /// Whether the last step carried the ball across the net plane.
    #[inline]
    pub fn crossed_net(&self, net_x: f32) -> bool {
        (self.prev.x < net_x && net_x <= self.pos.x) || (self.prev.x > net_x && net_x >= self.pos.x)
    }

    /// Side of the court the ball is currently over.
    #[inline]
    pub fn side(&self, court: &CourtLayout) -> Side {
        Side::of_x(self.pos.x, court.net_x)
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, sync_ball_transform.in_set(RallySet::Sync));
}

pub fn spawn_ball(commands: &mut Commands, court: &CourtLayout, ball: Ball) -> Entity {
    let pos = court.to_world(ball.pos);
    commands
        .spawn((
            Name::new("Ball"),
            ball,
            Transform::from_translation(pos.extend(3.0)),
            TranslationInterpolation,
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

fn sync_ball_transform(engine: Option<Res<RulesEngine>>, mut q: Query<(&Ball, &mut Transform)>) {
    let Some(engine) = engine else {
        return;
    };
    let court = engine.layout();

    for (ball, mut tf) in &mut q {
        let pos = court.to_world(ball.pos);
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;
    }
}
