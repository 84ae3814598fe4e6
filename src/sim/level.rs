//! Standard node layout

use glam::Vec2;

use super::node::NodeId;
use super::state::Simulation;
use crate::tuning::Tuning;

/// Node centers of the standard board (two columns, two rows)
pub const STANDARD_NODES: [Vec2; 4] = [
    Vec2::new(100.0, 150.0),
    Vec2::new(400.0, 150.0),
    Vec2::new(100.0, 400.0),
    Vec2::new(400.0, 400.0),
];

/// Place the standard nodes into a simulation
pub fn build_standard(sim: &mut Simulation) -> Vec<NodeId> {
    let ids: Vec<NodeId> = STANDARD_NODES.iter().map(|&pos| sim.add_node(pos)).collect();
    log::info!("Standard level built with {} nodes", ids.len());
    ids
}

impl Simulation {
    /// New simulation on the standard board
    pub fn standard(seed: u64, tuning: Tuning) -> Self {
        let mut sim = Self::new(seed, tuning);
        build_standard(&mut sim);
        sim
    }
}
