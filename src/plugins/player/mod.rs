//! Player plugin.
//!
//! A player is a point mass that walks along its own half of the court and jumps
//! under its own gravity. Both the human and the AI use this one type; only the
//! source of their `Intent` differs.
//!
//! Pipeline:
//! - FixedUpdate (Simulate): the rules engine calls `jump` / `update`
//! - FixedUpdate (Sync): copy court-space position into `Transform`

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{side::Side, state::GameState, tunables::Tunables};
use crate::plugins::core::RallySet;
use crate::plugins::court::{Bounds, CourtLayout};
use crate::plugins::rules::RulesEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    Human,
    Ai,
}

impl Controller {
    /// Top horizontal speed in design units per second.
    pub fn speed(self, tunables: &Tunables) -> f32 {
        match self {
            Controller::Human => tunables.player_speed,
            Controller::Ai => tunables.player_speed * tunables.ai_move_speed_factor,
        }
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    side: Side,
    controller: Controller,
    speed: f32,
    bounds: Bounds,
    ground_y: f32,
}

impl Player {
    /// A player resting at the centre of its half.
    pub fn new(side: Side, controller: Controller, court: &CourtLayout, tunables: &Tunables) -> Self {
        let bounds = court.bounds(side);
        Self {
            x: bounds.mid(),
            y: court.ground_y,
            vy: 0.0,
            side,
            controller,
            speed: controller.speed(tunables),
            bounds,
            ground_y: court.ground_y,
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn controller(&self) -> Controller {
        self.controller
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn on_ground(&self, tunables: &Tunables) -> bool {
        (self.y - self.ground_y).abs() < tunables.ground_tolerance && self.vy == 0.0
    }

    /// Start a jump. Only works while resting on the ground.
    pub fn jump(&mut self, tunables: &Tunables) -> bool {
        if !self.on_ground(tunables) {
            return false;
        }
        self.vy = tunables.player_jump_velocity;
        true
    }

    /// Place the player on the ground at `x` (clamped to its half).
    pub fn place(&mut self, x: f32) {
        self.x = self.bounds.clamp(x);
        self.y = self.ground_y;
        self.vy = 0.0;
    }

    pub fn update(&mut self, dt: f32, move_dir: f32, tunables: &Tunables) {
        if dt <= 0.0 {
            return;
        }

        let dir = if move_dir.is_finite() { move_dir.clamp(-1.0, 1.0) } else { 0.0 };
        self.x = self.bounds.clamp(self.x + dir * self.speed * dt);

        if !self.on_ground(tunables) || self.vy != 0.0 {
            self.vy += tunables.player_gravity * dt;
            self.y += self.vy * dt;
            if self.y > self.ground_y {
                self.y = self.ground_y;
                self.vy = 0.0;
            }
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, sync_player_transforms.in_set(RallySet::Sync));
}

/// Spawn a player entity carrying `player`.
pub fn spawn_player(commands: &mut Commands, court: &CourtLayout, player: Player) -> Entity {
    let side = player.side();
    let name = match side {
        Side::Left => "PlayerLeft",
        Side::Right => "PlayerRight",
    };
    let pos = court.to_world(player.pos());

    commands
        .spawn((
            Name::new(name),
            player,
            side,
            Transform::from_translation(pos.extend(2.0)),
            TranslationInterpolation,
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

fn sync_player_transforms(
    engine: Option<Res<RulesEngine>>,
    mut q: Query<(&Player, &mut Transform)>,
) {
    let Some(engine) = engine else {
        return;
    };
    let court = engine.layout();

    for (player, mut tf) in &mut q {
        let pos = court.to_world(player.pos());
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;
    }
}
