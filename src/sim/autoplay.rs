//! Demo operator for the standard board
//!
//! Opens closed loops between vertically stacked nodes: a bare return wire
//! first, then a spawn on the outgoing leg. The packet then circulates,
//! earning coins at each arrival, and the coins buy the wire for the next
//! loop. Each loop carries one packet, so loops never collide.

use glam::Vec2;

use super::effects::EffectKind;
use super::state::{SimStatus, Simulation};

/// One closed loop: (outgoing leg, return leg), each as (output port, input port)
type Loop = [(Vec2, Vec2); 2];

/// Left column (top-left <-> bottom-left), then right column
pub const LOOPS: [Loop; 2] = [
    [
        (Vec2::new(120.0, 160.0), Vec2::new(80.0, 390.0)),
        (Vec2::new(120.0, 390.0), Vec2::new(80.0, 160.0)),
    ],
    [
        (Vec2::new(420.0, 160.0), Vec2::new(380.0, 390.0)),
        (Vec2::new(420.0, 390.0), Vec2::new(380.0, 160.0)),
    ],
];

fn loop_length(legs: &Loop) -> f32 {
    legs.iter().map(|(from, to)| from.distance(*to)).sum()
}

#[derive(Debug, Clone, Default)]
pub struct AutoPilot {
    /// Loops opened so far
    pub opened: usize,
}

impl AutoPilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make at most one purchase and one construction. Call between ticks.
    pub fn step(&mut self, sim: &mut Simulation) {
        if sim.status != SimStatus::Running {
            return;
        }

        let reset_cost = EffectKind::ResetNoise.cost(&sim.tuning.costs);
        if sim.counters.coins >= reset_cost && sim.packets.iter().any(|p| p.noise_ratio() > 0.5) {
            if let Err(e) = sim.apply_effect(EffectKind::ResetNoise) {
                log::debug!("Autopilot reset refused: {}", e);
            }
        }

        let Some(&legs) = LOOPS.get(self.opened) else {
            return;
        };
        if sim.budget.remaining < loop_length(&legs) {
            let extend_cost = EffectKind::ExtendBudget.cost(&sim.tuning.costs);
            if sim.counters.coins >= extend_cost {
                if let Err(e) = sim.apply_effect(EffectKind::ExtendBudget) {
                    log::debug!("Autopilot extend refused: {}", e);
                }
            }
            return;
        }

        let [(out_from, out_to), (back_from, back_to)] = legs;
        let Some(back_dest) = sim.nodes.iter().find(|n| n.has_input(back_to)).map(|n| n.id) else {
            log::warn!("Autopilot: no node takes input at {:?}", back_to);
            self.opened += 1;
            return;
        };
        let opened = sim
            .try_create_wire(back_from, back_to, back_dest)
            .and_then(|_| sim.spawn_packet(out_from, out_to));
        match opened {
            Ok(id) => {
                log::info!("Autopilot opened loop {} with packet {}", self.opened, id.0);
                self.opened += 1;
            }
            Err(e) => log::warn!("Autopilot could not open loop {}: {}", self.opened, e),
        }
    }
}
