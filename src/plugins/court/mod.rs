//! Court plugin: court geometry and the static court sprites.
//!
//! The simulation lives in *court space*: design units, origin at the top-left
//! of the screen, +y pointing down. `CourtLayout` owns the mapping from court
//! space to Bevy world space (centred, +y up, scaled to the display).

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{palette, scale::Scale, side::Side, state::GameState, tunables::Tunables};
use crate::plugins::rules::{setup_match, RulesEngine};

/// Horizontal range a player may occupy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    #[inline]
    pub fn clamp(self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    #[inline]
    pub fn mid(self) -> f32 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn contains(self, x: f32) -> bool {
        (self.min..=self.max).contains(&x)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtLayout {
    pub width: f32,
    pub height: f32,
    /// Resting centre height of a player.
    pub ground_y: f32,
    /// Line the ball's lower edge must not reach.
    pub floor_y: f32,
    pub net_x: f32,
    pub net_top_y: f32,
    pub left: Bounds,
    pub right: Bounds,
    pub scale: Scale,
}

impl CourtLayout {
    pub fn new(design: Vec2, scale: Scale, tunables: &Tunables) -> Self {
        let width = design.x;
        let height = design.y;
        let ground_y = height - tunables.control_pad_height - tunables.ground_gap;
        let net_x = width * 0.5;

        Self {
            width,
            height,
            ground_y,
            floor_y: ground_y + tunables.player_radius,
            net_x,
            net_top_y: tunables.net_top_y,
            left: Bounds {
                min: tunables.court_margin,
                max: net_x - tunables.net_margin,
            },
            right: Bounds {
                min: net_x + tunables.net_margin,
                max: width - tunables.court_margin,
            },
            scale,
        }
    }

    /// Layout for a display of the given pixel size.
    pub fn for_display(display: Vec2, tunables: &Tunables) -> Self {
        let scale = Scale::from_display_height(display.y);
        Self::new(scale.design_size(display), scale, tunables)
    }

    #[inline]
    pub fn bounds(&self, side: Side) -> Bounds {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Court space to world space.
    #[inline]
    pub fn to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.scale.px(p.x - self.width * 0.5),
            self.scale.px(self.height * 0.5 - p.y),
        )
    }

    /// Sprite + transform covering the court-space rectangle `min..max`.
    pub fn rect(&self, min: Vec2, max: Vec2, color: Color, z: f32) -> (Sprite, Transform) {
        let size = (max - min).abs() * self.scale.factor();
        let centre = self.to_world((min + max) * 0.5);
        (
            Sprite::from_color(color, size),
            Transform::from_translation(centre.extend(z)),
        )
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_court.after(setup_match));
}

fn spawn_court(mut commands: Commands, engine: Option<Res<RulesEngine>>) {
    let Some(engine) = engine else {
        return;
    };
    let court = engine.layout();

    let band_top = court.ground_y - 200.0;
    let band_bottom = court.ground_y + 100.0;
    let mut spawn_rect = |name: &'static str, min: Vec2, max: Vec2, color: Color, z: f32| {
        commands.spawn((
            Name::new(name),
            court.rect(min, max, color, z),
            DespawnOnExit(GameState::InGame),
        ));
    };

    spawn_rect(
        "CourtLeft",
        Vec2::new(0.0, band_top),
        Vec2::new(court.net_x, band_bottom),
        palette::COURT_LEFT,
        0.0,
    );
    spawn_rect(
        "CourtRight",
        Vec2::new(court.net_x, band_top),
        Vec2::new(court.width, band_bottom),
        palette::COURT_RIGHT,
        0.0,
    );
    spawn_rect(
        "FloorLine",
        Vec2::new(0.0, court.floor_y - 1.0),
        Vec2::new(court.width, court.floor_y + 1.0),
        palette::LINE,
        0.1,
    );
    spawn_rect(
        "NetPole",
        Vec2::new(court.net_x - 3.0, court.net_top_y),
        Vec2::new(court.net_x + 3.0, court.floor_y),
        palette::NET,
        0.2,
    );
    spawn_rect(
        "NetTop",
        Vec2::new(court.net_x - 22.0, court.net_top_y - 3.0),
        Vec2::new(court.net_x + 22.0, court.net_top_y + 3.0),
        palette::NET_TOP,
        0.3,
    );
}

#[cfg(test)]
mod tests;
