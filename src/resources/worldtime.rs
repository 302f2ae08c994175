//! Simulation clock.
//!
//! Ticks have a fixed duration: `delta` never follows wall-clock time, the
//! driver is expected to call the tick entry point at a matching cadence.

use bevy_ecs::prelude::Resource;

/// Default tick duration in seconds (about 60 ticks per second).
pub const DEFAULT_DELTA: f32 = 0.016;

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct WorldTime {
    /// Simulated seconds since initialization.
    pub elapsed: f32,
    /// Fixed tick duration in seconds.
    pub delta: f32,
    /// Number of ticks run so far.
    pub tick_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: DEFAULT_DELTA,
            tick_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_delta(delta: f32) -> Self {
        WorldTime {
            delta,
            ..Default::default()
        }
    }
}
