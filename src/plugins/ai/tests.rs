use bevy::prelude::*;

use crate::common::scale::FALLBACK_DISPLAY;
use crate::common::side::{PerSide, Side};
use crate::common::test_utils::{run_system_once, TestRng};
use crate::common::tunables::Tunables;
use crate::plugins::ball::Ball;
use crate::plugins::court::CourtLayout;
use crate::plugins::player::{Controller, Player};
use crate::plugins::rules::{Intents, MatchState, Roster, RulesEngine};

use super::{fold_into_court, predict_landing_x, AiBrain};

const DT: f32 = 1.0 / 120.0;

fn tunables() -> Tunables {
    Tunables {
        ai_seed: Some(11),
        ai_noise_std: 0.0,
        ai_press_fail_chance: 0.0,
        ..Tunables::default()
    }
}

fn setup(t: Tunables) -> (RulesEngine, Player, AiBrain) {
    let court = CourtLayout::for_display(FALLBACK_DISPLAY, &t);
    let me = Player::new(Side::Right, Controller::Ai, &court, &t);
    let brain = AiBrain::new(Side::Right, &t);
    (RulesEngine::new(t, court), me, brain)
}

#[test]
fn straight_drop_lands_below() {
    let x = predict_landing_x(Vec2::new(100.0, 100.0), Vec2::ZERO, 728.0, 1450.0);
    assert_eq!(x, Some(100.0));
}

#[test]
fn drift_follows_flight_time() {
    let x = predict_landing_x(Vec2::new(100.0, 100.0), Vec2::new(100.0, 0.0), 728.0, 1450.0)
        .expect("lands");
    let time = (2.0 * 628.0_f32 / 1450.0).sqrt();
    assert!((x - (100.0 + 100.0 * time)).abs() < 1e-2);
}

#[test]
fn rising_ball_uses_descending_crossing() {
    // Rises first, so it comes down further along than a dropped ball would.
    let up = predict_landing_x(Vec2::new(0.0, 700.0), Vec2::new(100.0, -800.0), 728.0, 1450.0)
        .expect("lands");
    let time = (800.0 + (800.0_f32 * 800.0 + 2.0 * 1450.0 * 28.0).sqrt()) / 1450.0;
    assert!((up - 100.0 * time).abs() < 1e-2);
}

#[test]
fn ball_below_target_height_never_crosses() {
    assert_eq!(
        predict_landing_x(Vec2::new(0.0, 800.0), Vec2::new(0.0, 100.0), 728.0, 1450.0),
        None
    );
}

#[test]
fn fold_mirrors_off_walls() {
    assert_eq!(fold_into_court(500.0, 12.0, 1920.0), 500.0);
    assert!((fold_into_court(1930.0, 12.0, 1920.0) - 1886.0).abs() < 1e-3);
    assert!((fold_into_court(0.0, 12.0, 1920.0) - 24.0).abs() < 1e-3);
}

#[test]
fn fold_stays_in_court_for_random_inputs() {
    let mut rng = TestRng::new(0xA11CE);
    for _ in 0..1_000 {
        let x = rng.range_f32(-10_000.0, 10_000.0);
        let folded = fold_into_court(x, 12.0, 1920.0);
        assert!((12.0..=1908.0 + 1e-2).contains(&folded), "{x} -> {folded}");
    }
}

#[test]
fn walks_toward_a_ball_dropping_on_its_side() {
    let (engine, me, mut brain) = setup(tunables());
    let ball = Ball::new(Vec2::new(1200.0, 200.0));

    let intent = brain.think(&engine, &me, &ball, DT);

    assert_eq!(brain.target_x(), Some(1200.0));
    assert_eq!(intent.move_dir, -1.0);
    assert!(!intent.jump);
    assert!(!intent.action);
}

#[test]
fn goes_home_when_ball_heads_to_other_side() {
    let (engine, mut me, mut brain) = setup(tunables());
    me.place(1800.0);
    let ball = Ball::new(Vec2::new(400.0, 200.0));

    let intent = brain.think(&engine, &me, &ball, DT);

    assert_eq!(brain.target_x(), Some(me.bounds().mid()));
    assert_eq!(intent.move_dir, -1.0);
}

#[test]
fn stands_still_inside_dead_zone() {
    let (engine, mut me, mut brain) = setup(tunables());
    me.place(1203.0);
    let ball = Ball::new(Vec2::new(1200.0, 200.0));

    let intent = brain.think(&engine, &me, &ball, DT);
    assert_eq!(intent.move_dir, 0.0);
}

#[test]
fn acts_on_stale_snapshot_between_reactions() {
    let (engine, me, mut brain) = setup(tunables());
    let mut ball = Ball::new(Vec2::new(1200.0, 200.0));
    brain.think(&engine, &me, &ball, DT);

    ball.pos.x = 1600.0;
    brain.think(&engine, &me, &ball, DT);
    assert_eq!(brain.target_x(), Some(1200.0));

    for _ in 0..10 {
        brain.think(&engine, &me, &ball, DT);
    }
    assert_eq!(brain.target_x(), Some(1600.0));
}

#[test]
fn presses_when_a_set_is_possible() {
    let t = tunables();
    let (engine, me, mut brain) = setup(t.clone());
    let ball = Ball::new(Vec2::new(me.x, t.contact_y(me.y)));

    let first = brain.think(&engine, &me, &ball, DT);
    let second = brain.think(&engine, &me, &ball, DT);

    assert!(first.action);
    assert!(!second.action, "locked out after a press");
}

#[test]
fn always_fumbling_never_presses() {
    let t = Tunables {
        ai_press_fail_chance: 1.0,
        ..tunables()
    };
    let (engine, me, mut brain) = setup(t.clone());
    let ball = Ball::new(Vec2::new(me.x, t.contact_y(me.y)));

    for _ in 0..100 {
        assert!(!brain.think(&engine, &me, &ball, DT).action);
    }
}

#[test]
fn jumps_under_own_touched_ball_and_spikes() {
    let t = tunables();
    let (engine, mut me, mut brain) = setup(t.clone());
    me.place(1052.0);
    let mut ball = Ball::new(Vec2::new(1060.0, 380.0));
    ball.vel = Vec2::new(-20.0, -100.0);
    ball.touches = PerSide::new(0, 1);

    let intent = brain.think(&engine, &me, &ball, DT);
    assert!(intent.jump);

    me.jump(&t);
    me.update(0.3, 0.0, &t);
    ball.pos = Vec2::new(1055.0, me.y - 60.0);
    let intent = brain.think(&engine, &me, &ball, DT);
    assert!(intent.action);
    assert!(!intent.jump);
}

#[test]
fn same_seed_same_noise() {
    let t = Tunables {
        ai_noise_std: 16.0,
        ..tunables()
    };
    let (engine, me, mut a) = setup(t.clone());
    let mut b = AiBrain::new(Side::Right, &t);
    let ball = Ball::new(Vec2::new(1400.0, 200.0));

    for _ in 0..50 {
        a.think(&engine, &me, &ball, DT);
        b.think(&engine, &me, &ball, DT);
        assert_eq!(a.target_x(), b.target_x());
    }
}

#[test]
fn drive_ai_writes_right_intent() {
    let t = tunables();
    let court = CourtLayout::for_display(FALLBACK_DISPLAY, &t);
    let mut world = World::new();
    let right = world
        .spawn(Player::new(Side::Right, Controller::Ai, &court, &t))
        .id();
    let left = world
        .spawn(Player::new(Side::Left, Controller::Human, &court, &t))
        .id();
    let ball = world.spawn(Ball::new(Vec2::new(1200.0, 200.0))).id();
    world.insert_resource(Roster { left, right, ball });
    world.insert_resource(RulesEngine::new(t.clone(), court));
    world.insert_resource(AiBrain::new(Side::Right, &t));
    world.insert_resource(Time::<Fixed>::from_hz(120.0));
    world.init_resource::<MatchState>();
    world.init_resource::<Intents>();

    run_system_once(&mut world, super::drive_ai);

    let intents = world.resource::<Intents>();
    assert_eq!(intents[Side::Right].move_dir, -1.0);
    assert_eq!(intents[Side::Left], Default::default());
}
