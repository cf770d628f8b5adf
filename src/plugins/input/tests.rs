use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::side::Side;
use crate::common::test_utils::run_system_once;
use crate::plugins::rules::{Intents, RestartRally};

use super::{axis, ControlInput, TouchControl, UiClicked};

fn world_with_keys(pressed: &[KeyCode]) -> World {
    let mut world = World::new();
    let mut keys = ButtonInput::<KeyCode>::default();
    for key in pressed {
        keys.press(*key);
    }
    world.insert_resource(keys);
    world.init_resource::<ControlInput>();
    world.init_resource::<Intents>();
    world.init_resource::<Messages<UiClicked>>();
    world.init_resource::<Messages<RestartRally>>();
    world
}

#[test]
fn axis_cancels_when_both_held() {
    assert_eq!(axis(true, false), -1.0);
    assert_eq!(axis(false, true), 1.0);
    assert_eq!(axis(true, true), 0.0);
    assert_eq!(axis(false, false), 0.0);
}

#[test]
fn latches_are_consumed_once() {
    let mut input = ControlInput::default();
    input.press(TouchControl::Jump);
    input.press(TouchControl::Action);
    input.press(TouchControl::Restart);

    assert!(input.take_jump());
    assert!(!input.take_jump());
    assert!(input.take_action());
    assert!(!input.take_action());
    assert!(input.take_restart());
    assert!(!input.take_restart());
}

#[test]
fn held_keys_keep_rearming() {
    let mut input = ControlInput {
        jump_held: true,
        action_held: true,
        ..default()
    };
    assert!(input.take_jump());
    assert!(input.take_jump());
    assert!(input.take_action());
    assert!(input.take_action());
}

#[test]
fn keyboard_maps_to_controls() {
    let mut world = world_with_keys(&[KeyCode::ArrowRight, KeyCode::KeyW, KeyCode::KeyR]);

    run_system_once(&mut world, super::read_controls);

    let input = world.resource::<ControlInput>().clone();
    assert_eq!(input.move_dir, 1.0);
    assert!(input.jump_held);
    assert!(!input.action_held);

    let mut input = input;
    assert!(input.take_restart());
}

#[test]
fn opposing_keys_cancel() {
    let mut world = world_with_keys(&[KeyCode::KeyA, KeyCode::KeyD]);
    run_system_once(&mut world, super::read_controls);
    assert_eq!(world.resource::<ControlInput>().move_dir, 0.0);
}

#[test]
fn held_touch_button_moves() {
    let mut world = world_with_keys(&[]);
    world.spawn((TouchControl::Left, Interaction::Pressed));
    world.spawn((TouchControl::Right, Interaction::None));

    run_system_once(&mut world, super::read_controls);

    assert_eq!(world.resource::<ControlInput>().move_dir, -1.0);
}

#[test]
fn pressed_buttons_latch_and_click() {
    let mut world = world_with_keys(&[]);
    world.spawn((TouchControl::Jump, Interaction::Pressed));
    world.spawn((TouchControl::Action, Interaction::Hovered));

    run_system_once(&mut world, super::press_touch_controls);

    let mut input = world.resource::<ControlInput>().clone();
    assert!(input.take_jump());
    assert!(!input.take_action());
    assert_eq!(world.resource::<Messages<UiClicked>>().len(), 1);
}

#[test]
fn controls_feed_left_intent_only() {
    let mut world = world_with_keys(&[]);
    {
        let mut input = world.resource_mut::<ControlInput>();
        input.move_dir = -1.0;
        input.press(TouchControl::Action);
        input.press(TouchControl::Restart);
    }

    run_system_once(&mut world, super::apply_human_controls);

    let intents = world.resource::<Intents>();
    assert_eq!(intents[Side::Left].move_dir, -1.0);
    assert!(intents[Side::Left].action);
    assert!(!intents[Side::Left].jump);
    assert_eq!(intents[Side::Right], Default::default());
    assert_eq!(world.resource::<Messages<RestartRally>>().len(), 1);

    run_system_once(&mut world, super::apply_human_controls);
    assert_eq!(world.resource::<Messages<RestartRally>>().len(), 1);
}
