//! On-screen control pad.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{palette, scale::Scale, state::GameState};
use crate::plugins::input::TouchControl;
use crate::plugins::rules::RulesEngine;

const BUTTON_MARGIN: f32 = 26.0;
const BUTTON_GAP: f32 = 24.0;
const BUTTON_SIZE: Vec2 = Vec2::new(200.0, 160.0);
const BUTTON_TOP: f32 = 30.0;
const RESTART_POS: Vec2 = Vec2::new(20.0, 18.0);
const RESTART_SIZE: Vec2 = Vec2::new(100.0, 80.0);

impl TouchControl {
    pub fn label(self) -> &'static str {
        match self {
            TouchControl::Left => "<",
            TouchControl::Right => ">",
            TouchControl::Jump => "JUMP",
            TouchControl::Action => "SET",
            TouchControl::Restart => "\u{21bb}",
        }
    }
}

fn button(
    parent: &mut ChildSpawnerCommands<'_>,
    scale: Scale,
    control: TouchControl,
    place: Node,
    size: Vec2,
) {
    parent
        .spawn((
            Name::new(format!("{control:?}Button")),
            control,
            Button,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(scale.px(size.x)),
                height: Val::Px(scale.px(size.y)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..place
            },
            BackgroundColor(palette::BUTTON_FACE),
        ))
        .with_children(|b| {
            b.spawn((
                Text::new(control.label()),
                TextFont::from_font_size(scale.px(28.0)),
                TextColor(palette::BUTTON_TEXT),
            ));
        });
}

pub(super) fn spawn_pad(mut commands: Commands, engine: Option<Res<RulesEngine>>) {
    let Some(engine) = engine else {
        return;
    };
    let t = engine.tunables();
    let scale = engine.layout().scale;
    let px = |v: f32| Val::Px(scale.px(v));

    commands
        .spawn((
            Name::new("ControlPad"),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                bottom: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: px(t.control_pad_height),
                ..default()
            },
            BackgroundColor(palette::PAD_BACKGROUND),
            DespawnOnExit(GameState::InGame),
        ))
        .with_children(|pad| {
            let top = px(BUTTON_TOP);
            let step = BUTTON_SIZE.x + BUTTON_GAP;
            for (control, place) in [
                (TouchControl::Left, Node { left: px(BUTTON_MARGIN), top, ..default() }),
                (TouchControl::Right, Node { left: px(BUTTON_MARGIN + step), top, ..default() }),
                (TouchControl::Action, Node { right: px(BUTTON_MARGIN), top, ..default() }),
                (TouchControl::Jump, Node { right: px(BUTTON_MARGIN + step), top, ..default() }),
            ] {
                button(pad, scale, control, place, BUTTON_SIZE);
            }
        });

    commands
        .spawn((
            Name::new("RestartCorner"),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            DespawnOnExit(GameState::InGame),
        ))
        .with_children(|root| {
            let place = Node {
                left: px(RESTART_POS.x),
                top: px(RESTART_POS.y),
                ..default()
            };
            button(root, scale, TouchControl::Restart, place, RESTART_SIZE);
        });
}

pub(super) fn shade_buttons(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<TouchControl>)>,
) {
    for (interaction, mut bg) in &mut q {
        bg.0 = match interaction {
            Interaction::Pressed => palette::BUTTON_FACE_PRESSED,
            _ => palette::BUTTON_FACE,
        };
    }
}
