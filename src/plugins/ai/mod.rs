//! AI plugin: drives the right player.
//!
//! The brain samples the ball every `ai_reaction_time` seconds and walks toward
//! a noisy prediction of where the ball will come down to contact height.
//! Hit decisions look at the live ball but can fail at random, after which the
//! brain sits out for one action-buffer window.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::common::{side::Side, state::GameState, tunables::Tunables};
use crate::plugins::ball::Ball;
use crate::plugins::core::RallySet;
use crate::plugins::player::Player;
use crate::plugins::rules::{Intent, Intents, MatchState, Roster, RulesEngine};

/// Upward speed below which a ball that has been touched is worth jumping for.
const JUMP_RISE_SPEED: f32 = 600.0;

/// The ball as seen at the last reaction tick.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Snapshot {
    pos: Vec2,
    vel: Vec2,
}

#[derive(Resource, Debug)]
pub struct AiBrain {
    side: Side,
    rng: ChaCha8Rng,
    reaction: f32,
    target_x: Option<f32>,
    lockout: f32,
}

impl AiBrain {
    pub fn new(side: Side, tunables: &Tunables) -> Self {
        let rng = match tunables.ai_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            side,
            rng,
            reaction: 0.0,
            target_x: None,
            lockout: 0.0,
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Where the brain is currently walking to, if it has looked yet.
    #[inline]
    pub fn target_x(&self) -> Option<f32> {
        self.target_x
    }

    /// Standard normal sample (Box-Muller).
    fn gaussian(&mut self) -> f32 {
        let u1 = self.rng.r#gen::<f32>().max(f32::MIN_POSITIVE);
        let u2 = self.rng.r#gen::<f32>();
        (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos()
    }

    /// One control decision for `me`.
    pub fn think(&mut self, engine: &RulesEngine, me: &Player, ball: &Ball, dt: f32) -> Intent {
        let t = engine.tunables();
        let court = engine.layout();
        let bounds = me.bounds();

        self.lockout = (self.lockout - dt).max(0.0);
        self.reaction -= dt;
        if self.reaction <= 0.0 {
            self.reaction = t.ai_reaction_time;
            let seen = Snapshot {
                pos: ball.pos,
                vel: ball.vel,
            };
            self.target_x = Some(self.plan(engine, me, ball, seen));
        }

        let target = self.target_x.unwrap_or_else(|| bounds.mid());
        let dx = target - me.x;
        let move_dir = if dx.abs() <= t.ai_slop_extra { 0.0 } else { dx.signum() };

        let mine = ball.side(court) == self.side;
        let touched = ball.touches[self.side] > 0;
        let reach = t.spike_reach();
        let grounded = me.on_ground(t);

        let jump = grounded
            && mine
            && touched
            && ball.vel.y > -JUMP_RISE_SPEED
            && ball.pos.y < me.y
            && (ball.pos.x - me.x).abs() < reach;

        let can_spike = !grounded && mine && ball.pos.distance(me.pos()) <= reach;
        let can_set = grounded
            && mine
            && ball.touches[self.side] < t.max_touches
            && (ball.pos.x - me.x).abs() <= t.x_align_window
            && (ball.pos.y - t.contact_y(me.y)).abs() <= t.set_y_window();

        let mut action = false;
        if (can_spike || can_set) && self.lockout <= 0.0 {
            self.lockout = t.action_buffer;
            if self.rng.r#gen::<f32>() < t.ai_press_fail_chance {
                debug!("ai fumbled a {}", if can_spike { "spike" } else { "set" });
            } else {
                action = true;
            }
        }

        Intent {
            move_dir,
            jump,
            action,
            action_buffer: 0.0,
        }
    }

    /// Pick a spot to walk to from a fresh look at the ball.
    fn plan(&mut self, engine: &RulesEngine, me: &Player, ball: &Ball, seen: Snapshot) -> f32 {
        let t = engine.tunables();
        let court = engine.layout();
        let bounds = me.bounds();

        if ball.touches[self.side] > 0 && Side::of_x(seen.pos.x, court.net_x) == self.side {
            return bounds.clamp(engine.set_target(self.side).x);
        }

        let Some(landing) = predict_landing_x(seen.pos, seen.vel, t.contact_y(me.ground_y()), t.ball_gravity)
        else {
            return bounds.mid();
        };
        let landing = fold_into_court(landing, t.ball_radius, court.width);
        if Side::of_x(landing, court.net_x) != self.side {
            return bounds.mid();
        }

        let noisy = landing + self.gaussian() * t.ai_noise_std;
        debug!("ai predicts landing at {landing:.0}, heading to {noisy:.0}");
        bounds.clamp(noisy)
    }
}

/// X where a ball at `pos` with `vel` next comes down through height `y`.
pub fn predict_landing_x(pos: Vec2, vel: Vec2, y: f32, gravity: f32) -> Option<f32> {
    // pos.y + vel.y * t + g/2 * t^2 = y, later root
    let a = 0.5 * gravity;
    let b = vel.y;
    let c = pos.y - y;
    if a.abs() < f32::EPSILON {
        if b.abs() < f32::EPSILON {
            return None;
        }
        let time = -c / b;
        return (time >= 0.0).then(|| pos.x + vel.x * time);
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let time = (-b + disc.sqrt()) / (2.0 * a);
    (time >= 0.0).then(|| pos.x + vel.x * time)
}

/// Mirror a predicted x off the side walls.
pub fn fold_into_court(x: f32, radius: f32, width: f32) -> f32 {
    let lo = radius;
    let hi = width - radius;
    if hi <= lo {
        return width * 0.5;
    }
    let span = hi - lo;
    let period = 2.0 * span;
    let m = (x - lo).rem_euclid(period);
    if m <= span { lo + m } else { hi - (m - span) }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), reset_brain)
        .add_systems(
            FixedUpdate,
            drive_ai
                .in_set(RallySet::Control)
                .run_if(in_state(GameState::InGame)),
        );
}

fn reset_brain(mut commands: Commands, tunables: Res<Tunables>) {
    if let Some(seed) = tunables.ai_seed {
        info!("ai seeded with {seed}");
    }
    commands.insert_resource(AiBrain::new(Side::Right, &tunables));
}

fn drive_ai(
    time: Res<Time<Fixed>>,
    engine: Option<Res<RulesEngine>>,
    roster: Option<Res<Roster>>,
    brain: Option<ResMut<AiBrain>>,
    state: Res<MatchState>,
    players: Query<&Player>,
    balls: Query<&Ball>,
    mut intents: ResMut<Intents>,
) {
    let (Some(engine), Some(roster), Some(mut brain)) = (engine, roster, brain) else {
        return;
    };
    let side = brain.side();
    let (Ok(me), Ok(ball)) = (players.get(roster.player(side)), balls.get(roster.ball)) else {
        return;
    };
    if state.is_over() {
        intents[side] = Intent::default();
        return;
    }

    let decision = brain.think(&engine, me, ball, time.delta_secs());
    let intent = &mut intents[side];
    intent.move_dir = decision.move_dir;
    intent.jump = decision.jump;
    if decision.action {
        intent.action = true;
    }
}

#[cfg(test)]
mod tests;
