use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::side::{PerSide, Side};
use crate::common::state::GameState;
use crate::common::test_utils::run_system_once;
use crate::plugins::input::UiClicked;
use crate::plugins::rules::{MatchPhase, MatchState};

use super::{winner_banner, MenuButton, MenuCommand};

fn menu_world(pressed: &[KeyCode]) -> World {
    let mut world = World::new();
    let mut keys = ButtonInput::<KeyCode>::default();
    for key in pressed {
        keys.press(*key);
    }
    world.insert_resource(keys);
    world.init_resource::<NextState<GameState>>();
    world.init_resource::<Messages<AppExit>>();
    world.init_resource::<Messages<UiClicked>>();
    world
}

fn pending(world: &World) -> Option<GameState> {
    match world.resource::<NextState<GameState>>() {
        NextState::Pending(state) => Some(*state),
        _ => None,
    }
}

#[test]
fn buttons_map_to_commands() {
    assert_eq!(MenuButton::Play.command(), MenuCommand::Go(GameState::InGame));
    assert_eq!(MenuButton::Quit.command(), MenuCommand::Quit);
    assert_eq!(MenuButton::BackToMenu.command(), MenuCommand::Go(GameState::Menu));
}

#[test]
fn enter_starts_a_match() {
    let mut world = menu_world(&[KeyCode::Enter]);
    run_system_once(&mut world, super::menu_keys);
    assert_eq!(pending(&world), Some(GameState::InGame));
    assert!(world.resource::<Messages<AppExit>>().is_empty());
}

#[test]
fn escape_quits() {
    let mut world = menu_world(&[KeyCode::Escape]);
    run_system_once(&mut world, super::menu_keys);
    assert_eq!(pending(&world), None);
    assert_eq!(world.resource::<Messages<AppExit>>().len(), 1);
}

#[test]
fn play_button_click_is_reported() {
    let mut world = menu_world(&[]);
    world.spawn((MenuButton::Play, Interaction::Pressed));
    world.spawn((MenuButton::Quit, Interaction::Hovered));

    run_system_once(&mut world, super::press_menu_buttons);

    assert_eq!(pending(&world), Some(GameState::InGame));
    assert_eq!(world.resource::<Messages<UiClicked>>().len(), 1);
    assert!(world.resource::<Messages<AppExit>>().is_empty());
}

#[test]
fn space_leaves_match_over() {
    let mut world = menu_world(&[KeyCode::Space]);
    run_system_once(&mut world, super::match_over_keys);
    assert_eq!(pending(&world), Some(GameState::Menu));
}

#[test]
fn match_over_screen_shows_winner() {
    let mut world = World::new();
    world.insert_resource(MatchState {
        score: PerSide::new(25, 21),
        phase: MatchPhase::Over { winner: Side::Left },
        ..default()
    });

    run_system_once(&mut world, super::spawn_match_over);

    let texts: Vec<String> = world
        .query::<&Text>()
        .iter(&world)
        .map(|t| t.0.clone())
        .collect();
    assert!(texts.iter().any(|t| t == winner_banner(Side::Left)));
    assert!(texts.iter().any(|t| t == "25  -  21"));
    assert_eq!(
        world.query::<&MenuButton>().iter(&world).copied().collect::<Vec<_>>(),
        vec![MenuButton::BackToMenu]
    );
}
