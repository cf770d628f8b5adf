//! Tunable gameplay constants.
//!
//! Every threshold the rules engine reads lives here. Lengths are design units
//! (a 1080-unit-tall screen), times are seconds, and velocities use court space
//! where +y points down.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Tunables {
    pub tick_hz: f64,

    pub player_speed: f32,
    pub player_jump_velocity: f32,
    pub player_gravity: f32,
    pub ball_gravity: f32,
    pub player_radius: f32,
    pub ball_radius: f32,
    pub ground_tolerance: f32,

    pub net_top_y: f32,
    pub wall_damping: f32,

    pub set_flight_time: f32,
    pub set_target_offset: Vec2,
    pub spike_down_velocity: f32,
    pub min_spike_velocity: f32,
    pub spike_aim_time: f32,
    pub spike_reach_bonus: f32,
    pub good_y_window: f32,
    pub set_y_slack: f32,
    pub x_align_window: f32,

    pub max_touches: u8,
    pub win_score: u32,
    pub action_buffer: f32,
    pub serve_delay: f32,
    pub serve_height: f32,
    pub touch_cooldown: f32,
    pub trail_len: usize,

    pub ai_reaction_time: f32,
    pub ai_noise_std: f32,
    pub ai_press_fail_chance: f32,
    pub ai_slop_extra: f32,
    pub ai_move_speed_factor: f32,
    pub ai_seed: Option<u64>,

    pub court_margin: f32,
    pub net_margin: f32,
    pub control_pad_height: f32,
    pub ground_gap: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        let player_radius = 40.0;
        Self {
            tick_hz: 120.0,

            player_speed: 520.0,
            player_jump_velocity: -1500.0,
            player_gravity: 3000.0,
            ball_gravity: 1450.0,
            player_radius,
            ball_radius: 12.0,
            ground_tolerance: 0.5,

            net_top_y: 350.0,
            wall_damping: 0.9,

            set_flight_time: 0.62,
            set_target_offset: Vec2::new(92.0, 18.0),
            spike_down_velocity: 1500.0,
            min_spike_velocity: 600.0,
            spike_aim_time: 0.6,
            spike_reach_bonus: 70.0,
            good_y_window: 48.0,
            set_y_slack: 6.0,
            x_align_window: player_radius * 1.18,

            max_touches: 3,
            win_score: 25,
            action_buffer: 0.16,
            serve_delay: 0.40,
            serve_height: 120.0,
            touch_cooldown: 0.1,
            trail_len: 14,

            ai_reaction_time: 0.07,
            ai_noise_std: 16.0,
            ai_press_fail_chance: 0.055,
            ai_slop_extra: 6.0,
            ai_move_speed_factor: 1.16,
            ai_seed: None,

            court_margin: 60.0,
            net_margin: 80.0,
            control_pad_height: 240.0,
            ground_gap: 60.0,
        }
    }
}

impl Tunables {
    /// Environment variable holding a fixed seed for the AI's random stream.
    pub const AI_SEED_VAR: &'static str = "VOLLEY_AI_SEED";

    /// Defaults, with overrides taken from the process environment.
    pub fn from_env() -> Self {
        let ai_seed = std::env::var(Self::AI_SEED_VAR)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok());
        Self { ai_seed, ..Self::default() }
    }

    /// Largest centre distance at which an airborne player can spike the ball.
    #[inline]
    pub fn spike_reach(&self) -> f32 {
        self.player_radius + self.ball_radius + self.spike_reach_bonus
    }

    /// Height (court space) where a grounded player at `player_y` meets the ball.
    #[inline]
    pub fn contact_y(&self, player_y: f32) -> f32 {
        player_y - (self.player_radius + self.ball_radius)
    }

    /// Vertical tolerance around the contact height for a set.
    #[inline]
    pub fn set_y_window(&self) -> f32 {
        self.good_y_window + self.set_y_slack
    }
}
