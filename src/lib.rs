//! Packet Hell - A packet-routing network puzzle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (packets, wires, buffers, economy)
//! - `session`: Fixed-timestep host loop driver
//! - `persistence`: Save/load with integrity verification
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::{Difficulty, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Packets a system node can hold
    pub const BUFFER_CAPACITY: usize = 5;
    /// Interior bend points a wire may carry
    pub const MAX_BENDS: usize = 3;

    /// Wire budget at session start (length units)
    pub const INITIAL_WIRE_BUDGET: f32 = 500.0;

    /// Deliveries needed to win
    pub const WIN_DELIVERIES: u32 = 10;
    /// Loss ratio above which the run is over
    pub const MAX_LOSS_RATIO: f32 = 0.5;

    /// Two port coordinates closer than this are the same port
    pub const PORT_EPSILON: f32 = 0.5;
}

/// Sign of a scalar, with zero mapping to zero (unlike `f32::signum`)
#[inline]
pub fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Total Euclidean length of a polyline
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Whether two port coordinates refer to the same port
#[inline]
pub fn same_port(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < consts::PORT_EPSILON
}
