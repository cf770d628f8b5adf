//! HUD plugin (render-only): score, on-screen controls, rally visuals, flash.
//!
//! ```text
//! OnEnter(InGame): score text, control pad, trail dots, flash overlay
//! Update:          dress new players/ball, trail, airborne ring,
//!                  score text, button faces, flash fade
//! ```

mod controls;
mod sprites;

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{palette, side::PerSide, state::GameState};
use crate::plugins::rules::{setup_match, MatchState, RallyEvent, RulesEngine};

/// Seconds the point flash stays on screen.
pub const FLASH_DURATION: f32 = 0.12;
/// Peak overlay alpha, out of 255.
pub const FLASH_PEAK_ALPHA: f32 = 180.0;

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
struct FlashOverlay;

/// White full-screen flash after each point.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct FlashFx {
    remaining: f32,
}

impl FlashFx {
    pub fn trigger(&mut self) {
        self.remaining = FLASH_DURATION;
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Overlay alpha in `[0, 1]`.
    pub fn alpha(&self) -> f32 {
        FLASH_PEAK_ALPHA / 255.0 * (self.remaining / FLASH_DURATION).clamp(0.0, 1.0)
    }
}

pub fn score_label(score: PerSide<u32>) -> String {
    format!("{}  -  {}", score.left, score.right)
}

pub fn plugin(app: &mut App) {
    app.init_resource::<FlashFx>()
        .add_systems(
            OnEnter(GameState::InGame),
            (spawn_score, spawn_flash_overlay, controls::spawn_pad, sprites::spawn_trail)
                .after(setup_match),
        )
        .add_systems(OnExit(GameState::InGame), clear_flash)
        .add_systems(
            Update,
            (
                sprites::dress_players,
                sprites::dress_ball,
                sprites::show_airborne_ring,
                sprites::draw_trail,
                controls::shade_buttons,
                update_score,
                (trigger_flash, fade_flash).chain(),
            )
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_score(mut commands: Commands, engine: Option<Res<RulesEngine>>, state: Res<MatchState>) {
    let Some(engine) = engine else {
        return;
    };
    let scale = engine.layout().scale;

    commands.spawn((
        Name::new("ScoreText"),
        ScoreText,
        Text::new(score_label(state.score)),
        TextFont::from_font_size(scale.px(64.0)),
        TextColor(palette::SCORE_TEXT),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(scale.px(24.0)),
            right: Val::Px(scale.px(60.0)),
            ..default()
        },
        DespawnOnExit(GameState::InGame),
    ));
}

fn update_score(state: Res<MatchState>, mut q: Query<&mut Text, With<ScoreText>>) {
    if !state.is_changed() {
        return;
    }
    for mut text in &mut q {
        **text = score_label(state.score);
    }
}

fn spawn_flash_overlay(mut commands: Commands) {
    commands.spawn((
        Name::new("FlashOverlay"),
        FlashOverlay,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::NONE),
        GlobalZIndex(100),
        DespawnOnExit(GameState::InGame),
    ));
}

fn trigger_flash(mut events: MessageReader<RallyEvent>, mut flash: ResMut<FlashFx>) {
    for event in events.read() {
        if matches!(event, RallyEvent::PointScored { .. }) {
            flash.trigger();
        }
    }
}

fn fade_flash(
    time: Res<Time>,
    mut flash: ResMut<FlashFx>,
    mut q: Query<&mut BackgroundColor, With<FlashOverlay>>,
) {
    let alpha = flash.alpha();
    for mut bg in &mut q {
        bg.0 = Color::WHITE.with_alpha(alpha);
    }
    flash.tick(time.delta_secs());
}

fn clear_flash(mut flash: ResMut<FlashFx>) {
    *flash = FlashFx::default();
}
