//! Frame driver
//!
//! The host calls `frame` once per display refresh with a millisecond
//! timestamp. Each call runs at most one fixed simulation step, then applies
//! any whole seconds of countdown that elapsed. Both timelines go through
//! `&mut self`, so a countdown tick can never land in the middle of a step.

use crate::consts::{CLOCK_PERIOD_MS, FRAME_MS};
use crate::settings::Settings;
use crate::sim::{LevelDescription, World, tick, tick_clock};

use super::input::{Key, KeyBindings, KeySet};

/// Owns a running session and feeds it time and input
#[derive(Debug, Clone)]
pub struct FrameDriver {
    world: World,
    keys: KeySet,
    bindings: KeyBindings,
    last_time_ms: Option<f64>,
    /// Elapsed time not yet spent on the countdown
    clock_accumulator_ms: f64,
    torn_down: bool,
}

impl FrameDriver {
    pub fn new(world: World, bindings: KeyBindings) -> Self {
        Self {
            world,
            keys: KeySet::new(),
            bindings,
            last_time_ms: None,
            clock_accumulator_ms: 0.0,
            torn_down: false,
        }
    }

    /// Start a session on a level with the given settings
    pub fn start(desc: &LevelDescription, settings: &Settings) -> Self {
        log::info!(
            "Starting session: {} lives, {} s on the clock",
            settings.start_lives,
            settings.start_clock
        );
        Self::new(World::new(desc, settings), settings.bindings.clone())
    }

    /// Read-only snapshot for the presentation layer
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn key_down(&mut self, key: Key) {
        self.keys.press(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.release(key);
    }

    /// Forget held keys, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.keys.clear();
    }

    /// Animation-frame callback. Returns true if a simulation step ran.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if self.torn_down {
            return false;
        }

        // The first frame steps at the nominal rate but no wall time has
        // passed yet, so it feeds nothing to the countdown
        let (elapsed_ms, clock_ms) = match self.last_time_ms {
            Some(last) => (now_ms - last, now_ms - last),
            None => (FRAME_MS as f64, 0.0),
        };
        self.last_time_ms = Some(now_ms);

        let dt = (elapsed_ms / FRAME_MS as f64) as f32;
        let input = self.keys.to_tick_input(&self.bindings);
        let before = self.world.frame;
        tick(&mut self.world, &input, dt);

        if clock_ms > 0.0 {
            self.clock_accumulator_ms += clock_ms;
        }
        let period = CLOCK_PERIOD_MS as f64;
        while self.clock_accumulator_ms >= period {
            self.clock_accumulator_ms -= period;
            tick_clock(&mut self.world);
        }

        self.world.frame != before
    }

    /// Stop the session: no further frames or countdown ticks are processed
    pub fn teardown(&mut self) {
        if !self.torn_down {
            log::info!("Session torn down at frame {}", self.world.frame);
        }
        self.torn_down = true;
        self.keys.clear();
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}
