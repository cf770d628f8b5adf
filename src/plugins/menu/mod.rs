//! Menu plugin: title screen and match-over screen.
//!
//! ```text
//! Menu:      Enter/Space/Play -> InGame, Escape/Quit -> AppExit
//! MatchOver: Enter/Space/click -> Menu
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{palette, side::Side, state::GameState};
use crate::plugins::input::UiClicked;
use crate::plugins::rules::MatchState;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Play,
    Quit,
    BackToMenu,
}

impl MenuButton {
    fn label(self) -> &'static str {
        match self {
            MenuButton::Play => "Play",
            MenuButton::Quit => "Quit",
            MenuButton::BackToMenu => "Menu",
        }
    }

    pub fn command(self) -> MenuCommand {
        match self {
            MenuButton::Play => MenuCommand::Go(GameState::InGame),
            MenuButton::Quit => MenuCommand::Quit,
            MenuButton::BackToMenu => MenuCommand::Go(GameState::Menu),
        }
    }
}

/// What a menu input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Go(GameState),
    Quit,
}

/// Headline for the match-over screen.
pub fn winner_banner(winner: Side) -> &'static str {
    match winner {
        Side::Left => "YOU WIN",
        Side::Right => "AI WINS",
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::Menu), spawn_menu)
        .add_systems(OnEnter(GameState::MatchOver), spawn_match_over)
        .add_systems(
            Update,
            (
                press_menu_buttons,
                menu_keys.run_if(in_state(GameState::Menu)),
                match_over_keys.run_if(in_state(GameState::MatchOver)),
            ),
        );
}

fn screen_root(state: GameState) -> impl Bundle {
    (
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(24.0),
            ..default()
        },
        BackgroundColor(palette::MENU_BACKGROUND),
        DespawnOnExit(state),
    )
}

fn spawn_button(parent: &mut ChildSpawnerCommands<'_>, button: MenuButton) {
    parent
        .spawn((
            Name::new(format!("{button:?}Button")),
            button,
            Button,
            Node {
                width: Val::Px(560.0),
                height: Val::Px(120.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(palette::BUTTON_FACE),
        ))
        .with_children(|b| {
            b.spawn((
                Text::new(button.label()),
                TextFont::from_font_size(64.0),
                TextColor(palette::BUTTON_TEXT),
            ));
        });
}

fn spawn_menu(mut commands: Commands) {
    commands
        .spawn((Name::new("MenuScreen"), screen_root(GameState::Menu)))
        .with_children(|root| {
            root.spawn((
                Text::new("VOLLEYBALL"),
                TextFont::from_font_size(88.0),
                TextColor(palette::TITLE_TEXT),
            ));
            root.spawn((
                Text::new("1v1  \u{2022}  Mobile controls"),
                TextFont::from_font_size(22.0),
                TextColor(palette::SUBTITLE_TEXT),
            ));
            spawn_button(root, MenuButton::Play);
            spawn_button(root, MenuButton::Quit);
        });
}

fn spawn_match_over(mut commands: Commands, state: Res<MatchState>) {
    let banner = state.winner().map(winner_banner).unwrap_or("MATCH OVER");
    let score = format!("{}  -  {}", state.score.left, state.score.right);

    commands
        .spawn((Name::new("MatchOverScreen"), screen_root(GameState::MatchOver)))
        .with_children(|root| {
            root.spawn((
                Text::new(banner),
                TextFont::from_font_size(88.0),
                TextColor(palette::TITLE_TEXT),
            ));
            root.spawn((
                Text::new(score),
                TextFont::from_font_size(64.0),
                TextColor(palette::SUBTITLE_TEXT),
            ));
            spawn_button(root, MenuButton::BackToMenu);
        });
}

fn run_command(
    command: MenuCommand,
    next: &mut NextState<GameState>,
    exit: &mut MessageWriter<AppExit>,
) {
    match command {
        MenuCommand::Go(state) => {
            info!("entering {state:?}");
            next.set(state);
        }
        MenuCommand::Quit => {
            info!("quit requested");
            exit.write(AppExit::Success);
        }
    }
}

fn press_menu_buttons(
    q: Query<(&MenuButton, &Interaction), Changed<Interaction>>,
    mut next: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
    mut clicks: MessageWriter<UiClicked>,
) {
    for (button, interaction) in &q {
        if *interaction == Interaction::Pressed {
            clicks.write(UiClicked);
            run_command(button.command(), &mut next, &mut exit);
        }
    }
}

fn menu_keys(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut next: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    let Some(keys) = keys else {
        return;
    };
    if keys.any_just_pressed([KeyCode::Enter, KeyCode::Space]) {
        run_command(MenuCommand::Go(GameState::InGame), &mut next, &mut exit);
    } else if keys.just_pressed(KeyCode::Escape) {
        run_command(MenuCommand::Quit, &mut next, &mut exit);
    }
}

fn match_over_keys(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    mut next: ResMut<NextState<GameState>>,
) {
    let key = keys.is_some_and(|k| k.any_just_pressed([KeyCode::Enter, KeyCode::Space]));
    let click = mouse.is_some_and(|m| m.just_pressed(MouseButton::Left));
    if key || click {
        next.set(GameState::Menu);
    }
}

#[cfg(test)]
mod tests;
