//! Rules plugin: match state, rally events and the fixed-step rules pipeline.
//!
//! ```text
//! OnEnter(InGame): setup_match -> RulesEngine + Roster + players + ball
//! FixedUpdate:     Control (intents, restart) -> Simulate (step_rally) -> Sync
//! Update:          MatchPhase::Over -> GameState::MatchOver
//! ```
//!
//! The engine itself is plain Rust (`engine.rs`); this module only adapts it to
//! the ECS by borrowing the cached entities out of their queries.

mod engine;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::common::{
    scale::FALLBACK_DISPLAY,
    side::{PerSide, Side},
    state::GameState,
    tunables::Tunables,
};
use crate::plugins::ball::{spawn_ball, Ball};
use crate::plugins::core::RallySet;
use crate::plugins::court::CourtLayout;
use crate::plugins::player::{spawn_player, Controller, Player};

pub use engine::{launch_velocity, ActionOutcome, HitKind, Rally, RulesEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Ball frozen above the server.
    Serving,
    InPlay,
    Over { winner: Side },
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MatchState {
    pub score: PerSide<u32>,
    pub serve: Side,
    pub serve_delay: f32,
    pub phase: MatchPhase,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            score: PerSide::splat(0),
            serve: Side::Left,
            serve_delay: 0.0,
            phase: MatchPhase::Serving,
        }
    }
}

impl MatchState {
    #[inline]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, MatchPhase::Over { .. })
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            MatchPhase::Over { winner } => Some(winner),
            _ => None,
        }
    }
}

/// Control signals for one side for the current tick.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Intent {
    /// Horizontal direction in `[-1, 1]`.
    pub move_dir: f32,
    pub jump: bool,
    /// Edge: arms `action_buffer` on the next step.
    pub action: bool,
    /// Seconds the pending action stays valid.
    pub action_buffer: f32,
}

#[derive(Resource, Debug, Default, Clone, Deref, DerefMut)]
pub struct Intents(pub PerSide<Intent>);

/// Entity handles cached once per match.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Roster {
    pub left: Entity,
    pub right: Entity,
    pub ball: Entity,
}

impl Roster {
    pub fn player(&self, side: Side) -> Entity {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Rules outcomes, consumed by presentation and audio.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum RallyEvent {
    Hit { side: Side, kind: HitKind },
    WallBounce,
    GroundContact { side: Side },
    PointScored { scorer: Side, score: PerSide<u32> },
    MatchOver { winner: Side, score: PerSide<u32> },
}

/// Re-serve the current rally (restart button).
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct RestartRally;

pub fn plugin(app: &mut App) {
    app.init_resource::<MatchState>()
        .init_resource::<Intents>()
        .add_message::<RallyEvent>()
        .add_message::<RestartRally>()
        .add_systems(OnEnter(GameState::InGame), setup_match)
        .add_systems(
            FixedUpdate,
            restart_rally
                .in_set(RallySet::Control)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            step_rally
                .in_set(RallySet::Simulate)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            enter_match_over.run_if(in_state(GameState::InGame)),
        );
}

/// Build the court for the current display and spawn a fresh match.
pub fn setup_match(
    mut commands: Commands,
    tunables: Res<Tunables>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut state: ResMut<MatchState>,
    mut intents: ResMut<Intents>,
) {
    let display = windows
        .single()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(FALLBACK_DISPLAY);
    let court = CourtLayout::for_display(display, &tunables);
    let engine = RulesEngine::new((*tunables).clone(), court);

    let mut left = Player::new(Side::Left, Controller::Human, &court, &tunables);
    let mut right = Player::new(Side::Right, Controller::Ai, &court, &tunables);
    let mut ball = Ball::new(Vec2::ZERO);
    engine.start_match(&mut Rally {
        left: &mut left,
        right: &mut right,
        ball: &mut ball,
        state: &mut *state,
    });
    intents.0 = PerSide::default();

    let roster = Roster {
        left: spawn_player(&mut commands, &court, left),
        right: spawn_player(&mut commands, &court, right),
        ball: spawn_ball(&mut commands, &court, ball),
    };

    info!(
        "match started on a {:.0}x{:.0} court (scale {:.2})",
        court.width,
        court.height,
        court.scale.factor()
    );
    commands.insert_resource(roster);
    commands.insert_resource(engine);
}

fn step_rally(
    time: Res<Time<Fixed>>,
    engine: Option<Res<RulesEngine>>,
    roster: Option<Res<Roster>>,
    mut state: ResMut<MatchState>,
    mut intents: ResMut<Intents>,
    mut players: Query<&mut Player>,
    mut balls: Query<&mut Ball>,
    mut writer: MessageWriter<RallyEvent>,
) {
    let (Some(engine), Some(roster)) = (engine, roster) else {
        return;
    };
    let Ok([mut left, mut right]) = players.get_many_mut([roster.left, roster.right]) else {
        return;
    };
    let Ok(mut ball) = balls.get_mut(roster.ball) else {
        return;
    };

    let mut events = Vec::new();
    engine.step(
        &mut Rally {
            left: &mut *left,
            right: &mut *right,
            ball: &mut *ball,
            state: &mut *state,
        },
        &mut intents.0,
        time.delta_secs(),
        &mut events,
    );

    for event in events {
        writer.write(event);
    }
}

pub fn restart_rally(
    mut requests: MessageReader<RestartRally>,
    engine: Option<Res<RulesEngine>>,
    roster: Option<Res<Roster>>,
    mut state: ResMut<MatchState>,
    mut players: Query<&mut Player>,
    mut balls: Query<&mut Ball>,
) {
    if requests.read().count() == 0 {
        return;
    }
    let (Some(engine), Some(roster)) = (engine, roster) else {
        return;
    };
    let Ok([mut left, mut right]) = players.get_many_mut([roster.left, roster.right]) else {
        return;
    };
    let Ok(mut ball) = balls.get_mut(roster.ball) else {
        return;
    };
    if state.is_over() {
        return;
    }

    info!("rally restarted, {} serves", state.serve.label());
    engine.reset_serve(&mut Rally {
        left: &mut *left,
        right: &mut *right,
        ball: &mut *ball,
        state: &mut *state,
    });
}

fn enter_match_over(state: Res<MatchState>, mut next: ResMut<NextState<GameState>>) {
    if state.is_over() {
        next.set(GameState::MatchOver);
    }
}
