//! Input plugin: keyboard and on-screen controls -> the left player's intent.
//!
//! ```text
//! Update (InGame):      keys + TouchControl buttons -> ControlInput (latches)
//! FixedUpdate (Control): ControlInput -> Intents[Left], RestartRally
//! ```
//!
//! Latches survive frames without a fixed tick and are consumed exactly once.

use bevy::prelude::*;

use crate::common::{side::Side, state::GameState};
use crate::plugins::core::RallySet;
use crate::plugins::rules::{restart_rally, Intents, RestartRally};

/// On-screen control button.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchControl {
    Left,
    Right,
    Jump,
    Action,
    Restart,
}

/// Any button press, for click feedback.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct UiClicked;

#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct ControlInput {
    pub move_dir: f32,
    pub jump_held: bool,
    pub action_held: bool,
    jump_latch: bool,
    action_latch: bool,
    restart_latch: bool,
}

impl ControlInput {
    /// Latch a one-shot press from an on-screen button.
    pub fn press(&mut self, control: TouchControl) {
        match control {
            TouchControl::Jump => self.jump_latch = true,
            TouchControl::Action => self.action_latch = true,
            TouchControl::Restart => self.restart_latch = true,
            TouchControl::Left | TouchControl::Right => {}
        }
    }

    pub fn request_restart(&mut self) {
        self.restart_latch = true;
    }

    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_latch) || self.jump_held
    }

    pub fn take_action(&mut self) -> bool {
        std::mem::take(&mut self.action_latch) || self.action_held
    }

    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart_latch)
    }
}

/// Horizontal direction from the two opposing inputs.
pub fn axis(left: bool, right: bool) -> f32 {
    match (left, right) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<ControlInput>()
        .add_message::<UiClicked>()
        .add_systems(OnEnter(GameState::InGame), reset_controls)
        .add_systems(
            Update,
            (press_touch_controls, read_controls, leave_on_escape)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            apply_human_controls
                .in_set(RallySet::Control)
                .before(restart_rally)
                .run_if(in_state(GameState::InGame)),
        );
}

fn reset_controls(mut input: ResMut<ControlInput>) {
    *input = ControlInput::default();
}

fn press_touch_controls(
    q: Query<(&TouchControl, &Interaction), Changed<Interaction>>,
    mut input: ResMut<ControlInput>,
    mut clicks: MessageWriter<UiClicked>,
) {
    for (control, interaction) in &q {
        if *interaction == Interaction::Pressed {
            input.press(*control);
            clicks.write(UiClicked);
        }
    }
}

fn read_controls(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Query<(&TouchControl, &Interaction)>,
    mut input: ResMut<ControlInput>,
) {
    let held = |control: TouchControl| {
        buttons
            .iter()
            .any(|(c, i)| *c == control && *i == Interaction::Pressed)
    };
    let key = |codes: [KeyCode; 2]| keys.as_ref().is_some_and(|k| k.any_pressed(codes));

    let left = key([KeyCode::KeyA, KeyCode::ArrowLeft]) || held(TouchControl::Left);
    let right = key([KeyCode::KeyD, KeyCode::ArrowRight]) || held(TouchControl::Right);
    input.move_dir = axis(left, right);
    input.jump_held = key([KeyCode::KeyW, KeyCode::ArrowUp]);
    input.action_held = keys.as_ref().is_some_and(|k| k.pressed(KeyCode::Space));

    if keys.as_ref().is_some_and(|k| k.just_pressed(KeyCode::KeyR)) {
        input.request_restart();
    }
}

fn leave_on_escape(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.is_some_and(|k| k.just_pressed(KeyCode::Escape)) {
        info!("back to menu");
        next.set(GameState::Menu);
    }
}

pub fn apply_human_controls(
    mut input: ResMut<ControlInput>,
    mut intents: ResMut<Intents>,
    mut restarts: MessageWriter<RestartRally>,
) {
    let intent = &mut intents[Side::Left];
    intent.move_dir = input.move_dir;
    intent.jump = input.take_jump();
    if input.take_action() {
        intent.action = true;
    }

    if input.take_restart() {
        restarts.write(RestartRally);
    }
}

#[cfg(test)]
mod tests;
