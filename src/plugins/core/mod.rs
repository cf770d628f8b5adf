//! Core plugin: shared resources, the fixed tick and the rally system sets.
//!
//! ```text
//! FixedUpdate (tick_hz): RallySet::Control -> RallySet::Simulate -> RallySet::Sync
//! ```

use bevy::prelude::*;

use crate::common::{palette, tunables::Tunables};

/// Ordering of the fixed-step rally pipeline.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RallySet {
    /// Human and AI intents, restart requests.
    Control,
    /// Rules engine step.
    Simulate,
    /// Court space -> `Transform`.
    Sync,
}

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::from_env());
    }
    let hz = app.world().resource::<Tunables>().tick_hz;

    app.insert_resource(ClearColor(palette::BACKGROUND))
        .insert_resource(Time::<Fixed>::from_hz(hz))
        .configure_sets(
            FixedUpdate,
            (RallySet::Control, RallySet::Simulate, RallySet::Sync).chain(),
        );
}
