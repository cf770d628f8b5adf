//! Shared colours.

use bevy::prelude::*;

pub const BACKGROUND: Color = Color::srgb_u8(242, 245, 250);
pub const MENU_BACKGROUND: Color = Color::srgb_u8(18, 22, 28);
pub const COURT_LEFT: Color = Color::srgb_u8(228, 240, 255);
pub const COURT_RIGHT: Color = Color::srgb_u8(255, 235, 228);
pub const LINE: Color = Color::srgb_u8(210, 210, 210);
pub const NET: Color = Color::srgb_u8(40, 40, 40);
pub const NET_TOP: Color = Color::srgb_u8(220, 220, 220);

pub const PLAYER_LEFT: Color = Color::srgb_u8(70, 140, 255);
pub const PLAYER_RIGHT: Color = Color::srgb_u8(255, 120, 80);
pub const BALL: Color = Color::srgb_u8(50, 50, 50);
pub const SCORE_TEXT: Color = Color::srgb_u8(20, 20, 20);

pub const PAD_BACKGROUND: Color = Color::srgba_u8(18, 22, 28, 170);
pub const BUTTON_FACE: Color = Color::srgb_u8(245, 248, 255);
pub const BUTTON_FACE_PRESSED: Color = Color::srgb_u8(228, 236, 255);
pub const BUTTON_TEXT: Color = Color::srgb_u8(25, 40, 120);
pub const TITLE_TEXT: Color = Color::srgb_u8(240, 245, 255);
pub const SUBTITLE_TEXT: Color = Color::srgb_u8(210, 215, 225);
