//! Coin-gated global effects
//!
//! Each purchase is check, debit, apply: if the balance is short nothing
//! changes; otherwise exactly the cost is debited and the effect applies once.

use serde::{Deserialize, Serialize};

use super::packet::PacketKind;
use super::state::{Rejected, Simulation};
use crate::tuning::EffectCosts;

/// Shop items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Stop every in-flight packet for a while
    Freeze,
    /// More wire length
    ExtendBudget,
    /// Slow down secret packets
    DesensitizeSecret,
    /// Clear accumulated noise on every packet
    ResetNoise,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Freeze,
        EffectKind::ExtendBudget,
        EffectKind::DesensitizeSecret,
        EffectKind::ResetNoise,
    ];

    pub fn cost(self, costs: &EffectCosts) -> u32 {
        match self {
            EffectKind::Freeze => costs.freeze,
            EffectKind::ExtendBudget => costs.extend_budget,
            EffectKind::DesensitizeSecret => costs.desensitize_secret,
            EffectKind::ResetNoise => costs.reset_noise,
        }
    }
}

/// Timed effects in progress
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    /// Ticks of freeze remaining
    pub freeze_ticks: u32,
}

impl ActiveEffects {
    pub fn is_frozen(&self) -> bool {
        self.freeze_ticks > 0
    }
}

impl Simulation {
    /// Buy and apply an effect
    pub fn apply_effect(&mut self, kind: EffectKind) -> Result<(), Rejected> {
        if self.status.is_terminal() {
            return Err(Rejected::NotRunning);
        }
        let cost = kind.cost(&self.tuning.costs);
        let balance = self.counters.coins;
        if balance < cost {
            log::debug!("{:?} rejected: cost {}, balance {}", kind, cost, balance);
            return Err(Rejected::InsufficientCoins { cost, balance });
        }
        self.counters.coins -= cost;

        match kind {
            EffectKind::Freeze => {
                for p in &mut self.packets {
                    p.vel = glam::Vec2::ZERO;
                    p.accel = 0.0;
                }
                self.effects.freeze_ticks = self.tuning.freeze_duration_ticks;
            }
            EffectKind::ExtendBudget => {
                self.budget.extend(self.tuning.budget_extension);
            }
            EffectKind::DesensitizeSecret => {
                let damping = self.tuning.secret_damping;
                for p in self.packets.iter_mut().filter(|p| p.kind == PacketKind::Secret) {
                    p.vel *= damping;
                    p.speed_scale *= damping;
                }
            }
            EffectKind::ResetNoise => {
                for p in &mut self.packets {
                    p.noise = 0.0;
                }
                for node in &mut self.nodes {
                    for p in node.buffer_mut() {
                        p.noise = 0.0;
                    }
                }
            }
        }

        log::info!("{:?} applied for {} coins ({} left)", kind, cost, self.counters.coins);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::packet::PacketShape;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn sim_with_packets() -> Simulation {
        let mut sim = Simulation::new(3, Tuning::default());
        sim.add_node(Vec2::new(100.0, 150.0));
        sim.add_node(Vec2::new(300.0, 150.0));
        sim.spawn_packet_as(
            Vec2::new(120.0, 140.0),
            Vec2::new(280.0, 140.0),
            PacketKind::Secret,
            PacketShape::Square,
        )
        .unwrap();
        sim.spawn_packet_as(
            Vec2::new(120.0, 160.0),
            Vec2::new(280.0, 160.0),
            PacketKind::Messenger,
            PacketShape::Triangle,
        )
        .unwrap();
        sim
    }

    #[test]
    fn test_freeze_rejected_when_short() {
        let mut sim = sim_with_packets();
        sim.counters.coins = 5;
        let before: Vec<_> = sim.packets.iter().map(|p| p.vel).collect();

        assert_eq!(
            sim.apply_effect(EffectKind::Freeze),
            Err(Rejected::InsufficientCoins { cost: 10, balance: 5 })
        );
        assert_eq!(sim.counters.coins, 5);
        let after: Vec<_> = sim.packets.iter().map(|p| p.vel).collect();
        assert_eq!(before, after);
        assert!(!sim.effects.is_frozen());
    }

    #[test]
    fn test_freeze_zeroes_motion() {
        let mut sim = sim_with_packets();
        sim.counters.coins = 12;
        sim.apply_effect(EffectKind::Freeze).unwrap();
        assert_eq!(sim.counters.coins, 2);
        assert!(sim.packets.iter().all(|p| p.vel == Vec2::ZERO && p.accel == 0.0));
        assert!(sim.effects.is_frozen());
    }

    #[test]
    fn test_extend_budget() {
        let mut sim = sim_with_packets();
        let before = sim.budget;
        sim.counters.coins = 5;
        sim.apply_effect(EffectKind::ExtendBudget).unwrap();
        assert_eq!(sim.counters.coins, 0);
        assert!((sim.budget.remaining - before.remaining - 100.0).abs() < 1e-3);
        assert!((sim.budget.allocated - before.allocated - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_desensitize_only_touches_secret() {
        let mut sim = sim_with_packets();
        sim.counters.coins = 20;
        sim.apply_effect(EffectKind::DesensitizeSecret).unwrap();
        assert_eq!(sim.counters.coins, 5);
        for p in &sim.packets {
            match p.kind {
                PacketKind::Secret => assert!((p.vel.x - 1.6 * 0.8).abs() < 1e-5),
                _ => assert_eq!(p.vel, Vec2::new(2.0, 0.0)),
            }
        }
    }

    #[test]
    fn test_reset_noise() {
        let mut sim = sim_with_packets();
        for p in &mut sim.packets {
            p.noise = 4.0;
        }
        sim.counters.coins = 5;
        sim.apply_effect(EffectKind::ResetNoise).unwrap();
        assert!(sim.packets.iter().all(|p| p.noise == 0.0));
    }

    #[test]
    fn test_effects_refused_after_end() {
        let mut sim = sim_with_packets();
        sim.counters.coins = 100;
        sim.status = crate::sim::SimStatus::Win;
        for kind in EffectKind::ALL {
            assert_eq!(sim.apply_effect(kind), Err(Rejected::NotRunning));
        }
        assert_eq!(sim.counters.coins, 100);
    }
}
