//! The volleyball rules engine.
//!
//! `RulesEngine` is built once per match from an immutable `Tunables` snapshot and
//! the `CourtLayout`. It is the only writer of touch counts and the score. Each
//! fixed tick `step` runs, in order:
//!
//! ```text
//! intents -> jump / walk both players
//!         -> serve freeze countdown            (ball frozen)
//!            or ball flight, walls, floor, net (floor ends the tick)
//!         -> buffered actions: spike, else set
//! ```

use bevy::prelude::*;

use crate::common::{
    side::{PerSide, Side},
    tunables::Tunables,
};
use crate::plugins::ball::Ball;
use crate::plugins::court::CourtLayout;
use crate::plugins::player::Player;

use super::{Intent, MatchPhase, MatchState, RallyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitKind {
    Spike,
    Set,
}

/// Result of resolving one buffered action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Hit(HitKind),
    /// The hit would have been a fourth touch; the point already went to the opponent.
    Violation,
    Miss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BallOutcome {
    Airborne,
    Grounded,
}

/// Mutable view of everything a rally touches.
pub struct Rally<'a> {
    pub left: &'a mut Player,
    pub right: &'a mut Player,
    pub ball: &'a mut Ball,
    pub state: &'a mut MatchState,
}

impl Rally<'_> {
    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Left => &*self.left,
            Side::Right => &*self.right,
        }
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::Left => &mut *self.left,
            Side::Right => &mut *self.right,
        }
    }
}

/// Velocity that carries a projectile from `from` to `to` in exactly `time`
/// seconds under constant downward `gravity` (court space, +y down).
pub fn launch_velocity(from: Vec2, to: Vec2, time: f32, gravity: f32) -> Vec2 {
    let time = time.max(f32::EPSILON);
    let d = to - from;
    Vec2::new(d.x / time, (d.y - 0.5 * gravity * time * time) / time)
}

#[derive(Resource, Debug, Clone)]
pub struct RulesEngine {
    tunables: Tunables,
    court: CourtLayout,
}

impl RulesEngine {
    pub fn new(tunables: Tunables, court: CourtLayout) -> Self {
        Self { tunables, court }
    }

    #[inline]
    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    #[inline]
    pub fn layout(&self) -> &CourtLayout {
        &self.court
    }

    /// Where the server stands: its own back line. The right server mirrors the
    /// left one instead of starting from the middle of its half.
    pub fn server_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.court.left.min,
            Side::Right => self.court.right.max,
        }
    }

    /// Point near the top of the net a set from `side` aims for.
    pub fn set_target(&self, side: Side) -> Vec2 {
        let offset = self.tunables.set_target_offset;
        Vec2::new(
            self.court.net_x - side.attack_sign() * offset.x,
            self.court.net_top_y + offset.y,
        )
    }

    /// Fresh match: 0-0, left serves.
    pub fn start_match(&self, rally: &mut Rally) {
        *rally.state = MatchState::default();
        let left_home = self.court.left.mid();
        let right_home = self.court.right.mid();
        rally.left.place(left_home);
        rally.right.place(right_home);
        self.reset_serve(rally);
    }

    /// Hover the ball above the current server and restart the serve freeze.
    pub fn reset_serve(&self, rally: &mut Rally) {
        let server = rally.state.serve;
        let x = self.server_x(server);

        let player = rally.player_mut(server);
        player.x = player.bounds().clamp(x);

        rally.ball.place(Vec2::new(x, self.tunables.serve_height));
        rally.state.serve_delay = self.tunables.serve_delay;
        if !rally.state.is_over() {
            rally.state.phase = MatchPhase::Serving;
        }
    }

    /// Give `scorer` a point; the scorer serves next.
    pub fn award_point(&self, rally: &mut Rally, scorer: Side, events: &mut Vec<RallyEvent>) {
        rally.state.score[scorer] += 1;
        rally.state.serve = scorer;
        let score = rally.state.score;

        info!(
            "point {}: {} - {}",
            scorer.label(),
            score.left,
            score.right
        );
        events.push(RallyEvent::PointScored { scorer, score });

        self.reset_serve(rally);

        if score[scorer] >= self.tunables.win_score {
            info!("match over, {} wins {} - {}", scorer.label(), score.left, score.right);
            rally.state.phase = MatchPhase::Over { winner: scorer };
            events.push(RallyEvent::MatchOver { winner: scorer, score });
        }
    }

    /// Count a touch for `side`. A touch past the limit hands the point to the
    /// opponent and returns `false`.
    pub fn register_touch(&self, rally: &mut Rally, side: Side, events: &mut Vec<RallyEvent>) -> bool {
        let touches = &mut rally.ball.touches[side];
        *touches = touches.saturating_add(1);
        if *touches > self.tunables.max_touches {
            debug!("{} touched the ball {} times", side.label(), *touches);
            self.award_point(rally, side.opponent(), events);
            return false;
        }
        true
    }

    /// Advance the whole rally by one tick.
    pub fn step(
        &self,
        rally: &mut Rally,
        intents: &mut PerSide<Intent>,
        dt: f32,
        events: &mut Vec<RallyEvent>,
    ) {
        if dt <= 0.0 || rally.state.is_over() {
            return;
        }
        let t = &self.tunables;

        for side in Side::BOTH {
            let intent = &mut intents[side];
            let player = rally.player_mut(side);
            if intent.jump {
                player.jump(t);
            }
            player.update(dt, intent.move_dir, t);

            if intent.action {
                intent.action = false;
                intent.action_buffer = t.action_buffer;
            }
        }

        if rally.state.serve_delay > 0.0 {
            rally.state.serve_delay -= dt;
            if rally.state.serve_delay <= 0.0 {
                rally.state.serve_delay = 0.0;
                rally.state.phase = MatchPhase::InPlay;
            }
        } else if self.advance_ball(rally, dt, events) == BallOutcome::Grounded {
            return;
        }

        for side in Side::BOTH {
            if rally.state.is_over() {
                break;
            }
            if intents[side].action_buffer <= 0.0 {
                continue;
            }
            match self.resolve_action(rally, side, events) {
                ActionOutcome::Miss => {
                    let buffer = &mut intents[side].action_buffer;
                    *buffer = (*buffer - dt).max(0.0);
                }
                ActionOutcome::Hit(_) | ActionOutcome::Violation => {
                    intents[side].action_buffer = 0.0;
                }
            }
        }
    }

    fn advance_ball(&self, rally: &mut Rally, dt: f32, events: &mut Vec<RallyEvent>) -> BallOutcome {
        let t = &self.tunables;
        let court = &self.court;

        rally.ball.update(dt, t.ball_gravity, t.trail_len);
        if rally.ball.collide_walls(court, t.ball_radius, t.wall_damping) {
            events.push(RallyEvent::WallBounce);
        }

        if rally.ball.touches_floor(court, t.ball_radius) {
            let landed = rally.ball.side(court);
            events.push(RallyEvent::GroundContact { side: landed });
            self.award_point(rally, landed.opponent(), events);
            return BallOutcome::Grounded;
        }

        if rally.ball.crossed_net(court.net_x) {
            rally.ball.reset_touches();
        }
        BallOutcome::Airborne
    }

    /// Try a spike, then a set, for `side`.
    pub fn resolve_action(&self, rally: &mut Rally, side: Side, events: &mut Vec<RallyEvent>) -> ActionOutcome {
        if rally.ball.cooldown > 0.0 {
            return ActionOutcome::Miss;
        }

        let hit = self
            .spike_velocity(rally, side)
            .map(|vel| (HitKind::Spike, vel))
            .or_else(|| self.set_velocity(rally, side).map(|vel| (HitKind::Set, vel)));
        let Some((kind, vel)) = hit else {
            return ActionOutcome::Miss;
        };

        if !self.register_touch(rally, side, events) {
            return ActionOutcome::Violation;
        }

        rally.ball.vel = vel;
        rally.ball.cooldown = self.tunables.touch_cooldown;
        events.push(RallyEvent::Hit { side, kind });
        ActionOutcome::Hit(kind)
    }

    /// Spike launch velocity, if `side` can spike right now.
    pub fn spike_velocity(&self, rally: &Rally, side: Side) -> Option<Vec2> {
        let t = &self.tunables;
        let player = rally.player(side);
        let ball = &*rally.ball;

        if player.on_ground(t) || ball.side(&self.court) != side {
            return None;
        }
        let reach = t.spike_reach();
        if ball.pos.distance_squared(player.pos()) > reach * reach {
            return None;
        }

        let far = self.court.bounds(side.opponent());
        let distance = match side {
            Side::Left => far.max - ball.pos.x,
            Side::Right => ball.pos.x - far.min,
        };
        let speed = (distance / t.spike_aim_time).max(t.min_spike_velocity);
        Some(Vec2::new(side.attack_sign() * speed, t.spike_down_velocity))
    }

    /// Set launch velocity, if `side` can set right now.
    pub fn set_velocity(&self, rally: &Rally, side: Side) -> Option<Vec2> {
        let t = &self.tunables;
        let player = rally.player(side);
        let ball = &*rally.ball;

        if !player.on_ground(t) || ball.side(&self.court) != side {
            return None;
        }
        if (ball.pos.x - player.x).abs() > t.x_align_window {
            return None;
        }
        if (ball.pos.y - t.contact_y(player.y)).abs() > t.set_y_window() {
            return None;
        }

        Some(launch_velocity(
            ball.pos,
            self.set_target(side),
            t.set_flight_time,
            t.ball_gravity,
        ))
    }
}
