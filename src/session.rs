//! Host-loop driver
//!
//! Turns variable frame times into whole fixed ticks and owns the one live
//! simulation. Reset and load replace the whole state in one assignment, so
//! readers never see a half-built session.

use crate::consts::*;
use crate::sim::{self, SimView, Simulation};
use crate::tuning::Tuning;

/// Longest frame we will try to catch up on (seconds)
const MAX_FRAME_DT: f32 = 0.25;

pub struct Session {
    sim: Simulation,
    tuning: Tuning,
    accumulator: f32,
}

impl Session {
    /// Start a session on the standard board
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            sim: Simulation::standard(seed, tuning.clone()),
            tuning,
            accumulator: 0.0,
        }
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    /// Mutable access for boundary operations (spawns, effects, pause)
    pub fn sim_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn snapshot(&self) -> SimView<'_> {
        self.sim.snapshot()
    }

    /// Run the ticks owed for `dt` seconds of wall time. Returns ticks run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            sim::tick(&mut self.sim);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop time we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Throw the current state away and start over
    pub fn reset(&mut self, seed: u64) {
        self.sim = Simulation::standard(seed, self.tuning.clone());
        self.accumulator = 0.0;
        log::info!("Session reset with seed {}", seed);
    }

    /// Swap in a loaded state
    pub fn load_state(&mut self, sim: Simulation) {
        self.tuning = sim.tuning.clone();
        self.sim = sim;
        self.accumulator = 0.0;
        log::info!("Session loaded at tick {}", self.sim.time_ticks);
    }
}
