use bevy::prelude::*;

use crate::common::scale::{Scale, FALLBACK_DISPLAY};
use crate::common::side::Side;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::rules::RulesEngine;

use super::CourtLayout;

#[test]
fn reference_layout_matches_design_numbers() {
    let t = Tunables::default();
    let court = CourtLayout::for_display(FALLBACK_DISPLAY, &t);

    assert_eq!(court.ground_y, 780.0);
    assert_eq!(court.floor_y, 820.0);
    assert_eq!(court.net_x, 960.0);
    assert_eq!(court.left.min, 60.0);
    assert_eq!(court.left.max, 880.0);
    assert_eq!(court.right.min, 1040.0);
    assert_eq!(court.right.max, 1860.0);
    assert_eq!(court.bounds(Side::Right), court.right);
}

#[test]
fn larger_display_keeps_design_units() {
    let t = Tunables::default();
    let court = CourtLayout::for_display(Vec2::new(2400.0, 1080.0 * 2.0), &t);

    assert_eq!(court.height, 1080.0);
    assert_eq!(court.width, 1200.0);
    assert_eq!(court.scale.factor(), 2.0);
}

#[test]
fn to_world_centres_and_flips_y() {
    let t = Tunables::default();
    let court = CourtLayout::new(Vec2::new(1920.0, 1080.0), Scale::from_display_height(2160.0), &t);

    assert_eq!(court.to_world(Vec2::new(960.0, 540.0)), Vec2::ZERO);
    assert_eq!(court.to_world(Vec2::new(0.0, 0.0)), Vec2::new(-1920.0, 1080.0));
    assert_eq!(court.to_world(Vec2::new(1920.0, 1080.0)), Vec2::new(1920.0, -1080.0));
}

#[test]
fn spawns_net_and_bands() {
    let mut world = World::new();
    let t = Tunables::default();
    let court = CourtLayout::for_display(FALLBACK_DISPLAY, &t);
    world.insert_resource(RulesEngine::new(t, court));

    run_system_once(&mut world, super::spawn_court);

    let names: Vec<String> = world
        .query::<(&Name, &Sprite)>()
        .iter(&world)
        .map(|(n, _)| n.as_str().to_owned())
        .collect();
    for expected in ["CourtLeft", "CourtRight", "FloorLine", "NetPole", "NetTop"] {
        assert!(names.iter().any(|n| n == expected), "missing {expected}");
    }
}

#[test]
fn spawn_court_without_engine_is_noop() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_court);
    assert_eq!(world.query::<&Sprite>().iter(&world).count(), 0);
}
