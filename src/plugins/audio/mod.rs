//! Audio plugin: short synthesized tones for rally events and clicks.
//!
//! Tones are generated once at startup as 16-bit mono PCM, wrapped in an
//! in-memory WAV and registered as `AudioSource` assets. Without an audio
//! backend (`Assets<AudioSource>` missing) every system here is a no-op.

use std::sync::Arc;

use bevy::audio::AudioSource;
use bevy::prelude::*;

use crate::plugins::input::UiClicked;
use crate::plugins::rules::{HitKind, RallyEvent};

pub const SAMPLE_RATE: u32 = 22_050;

/// A tone recipe: frequency (Hz), length (ms), volume in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub ms: u32,
    pub volume: f32,
}

impl Tone {
    pub const SPIKE: Tone = Tone { freq: 220.0, ms: 120, volume: 0.45 };
    pub const SET: Tone = Tone { freq: 880.0, ms: 70, volume: 0.25 };
    pub const BOUNCE: Tone = Tone { freq: 320.0, ms: 60, volume: 0.30 };
    pub const POINT: Tone = Tone { freq: 660.0, ms: 160, volume: 0.45 };
    pub const UI: Tone = Tone { freq: 520.0, ms: 80, volume: 0.30 };
}

/// Linearly decaying sine, `amp * env * sin(2πft)`.
pub fn synth_tone(tone: Tone, rate: u32) -> Vec<i16> {
    let n = (rate as u64 * tone.ms as u64 / 1000) as usize;
    let amp = 32767.0 * tone.volume.clamp(0.0, 1.0);
    (0..n)
        .map(|i| {
            let t = i as f32 / rate as f32;
            let env = (1.0 - i as f32 / n as f32).max(0.0);
            (amp * env * (std::f32::consts::TAU * tone.freq * t).sin()) as i16
        })
        .collect()
}

/// RIFF/WAVE container for 16-bit mono PCM.
pub fn encode_wav(samples: &[i16], rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + data_len as usize);

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&rate.to_le_bytes());
    out.extend_from_slice(&(rate * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}

#[derive(Resource, Debug, Clone)]
pub struct Tones {
    pub spike: Handle<AudioSource>,
    pub set: Handle<AudioSource>,
    pub bounce: Handle<AudioSource>,
    pub point: Handle<AudioSource>,
    pub ui: Handle<AudioSource>,
}

impl Tones {
    pub fn for_event(&self, event: &RallyEvent) -> Option<&Handle<AudioSource>> {
        match event {
            RallyEvent::Hit { kind: HitKind::Spike, .. } => Some(&self.spike),
            RallyEvent::Hit { kind: HitKind::Set, .. } => Some(&self.set),
            RallyEvent::WallBounce | RallyEvent::GroundContact { .. } => Some(&self.bounce),
            RallyEvent::PointScored { .. } => Some(&self.point),
            RallyEvent::MatchOver { .. } => None,
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, build_tones)
        .add_systems(Update, (play_rally_tones, play_click_tones));
}

fn build_tones(mut commands: Commands, sources: Option<ResMut<Assets<AudioSource>>>) {
    let Some(mut sources) = sources else {
        warn!("no audio backend, tones disabled");
        return;
    };
    let mut add = |tone: Tone| {
        let bytes: Arc<[u8]> = encode_wav(&synth_tone(tone, SAMPLE_RATE), SAMPLE_RATE).into();
        sources.add(AudioSource { bytes })
    };

    commands.insert_resource(Tones {
        spike: add(Tone::SPIKE),
        set: add(Tone::SET),
        bounce: add(Tone::BOUNCE),
        point: add(Tone::POINT),
        ui: add(Tone::UI),
    });
}

fn play_rally_tones(
    mut commands: Commands,
    mut events: MessageReader<RallyEvent>,
    tones: Option<Res<Tones>>,
) {
    let Some(tones) = tones else {
        events.clear();
        return;
    };
    for event in events.read() {
        if let Some(handle) = tones.for_event(event) {
            commands.spawn((AudioPlayer::new(handle.clone()), PlaybackSettings::DESPAWN));
        }
    }
}

fn play_click_tones(
    mut commands: Commands,
    mut clicks: MessageReader<UiClicked>,
    tones: Option<Res<Tones>>,
) {
    let Some(tones) = tones else {
        clicks.clear();
        return;
    };
    for _ in clicks.read() {
        commands.spawn((AudioPlayer::new(tones.ui.clone()), PlaybackSettings::DESPAWN));
    }
}
