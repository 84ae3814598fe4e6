//! Fixed timestep simulation tick
//!
//! One tick runs, in this order and never out of it:
//! noise -> physics -> delivery/loss -> release -> end conditions.

use super::collision;
use super::packet::PacketId;
use super::physics::{self, Step};
use super::state::{SimStatus, Simulation};

/// Advance the simulation by one fixed step. No-op unless running.
pub fn tick(sim: &mut Simulation) {
    if sim.status != SimStatus::Running {
        return;
    }
    sim.time_ticks += 1;

    apply_noise(sim);
    let arrivals = integrate(sim);
    resolve_arrivals(sim, &arrivals);
    release_buffered(sim);
    evaluate_end_conditions(sim);

    // Ensure deterministic ordering
    sim.normalize_order();

    debug_assert!(
        sim.invariant_violations().is_empty(),
        "invariants broken at tick {}: {:?}",
        sim.time_ticks,
        sim.invariant_violations()
    );
}

/// Accrue overlap noise and drop packets pushed past their size
fn apply_noise(sim: &mut Simulation) {
    // Runs while frozen too: stopped packets still interfere
    collision::accumulate_noise(&mut sim.packets);

    let lost: Vec<PacketId> = sim.packets.iter().filter(|p| p.is_lost()).map(|p| p.id).collect();
    for id in lost {
        if let Some(p) = sim.take_in_flight(id) {
            sim.counters.lost += 1;
            log::debug!("Packet {} lost to noise ({:.0} > {})", id.0, p.noise, p.size);
        }
    }
}

/// Move every in-flight packet; returns those that reached their wire's end
fn integrate(sim: &mut Simulation) -> Vec<PacketId> {
    if sim.effects.is_frozen() {
        sim.effects.freeze_ticks -= 1;
        if !sim.effects.is_frozen() {
            thaw(sim);
        }
        return Vec::new();
    }

    let carriers = sim.carriers();
    let mut arrivals = Vec::new();
    for packet in &mut sim.packets {
        let wire = carriers
            .get(&packet.id)
            .and_then(|w| sim.wires.iter().find(|wire| wire.id == *w));
        if physics::advance(packet, wire) == Step::Arrived {
            arrivals.push(packet.id);
        }
    }
    arrivals
}

/// Freeze expired: relaunch every packet along its current segment
fn thaw(sim: &mut Simulation) {
    let carriers = sim.carriers();
    for packet in &mut sim.packets {
        if let Some(wire) = carriers
            .get(&packet.id)
            .and_then(|w| sim.wires.iter().find(|wire| wire.id == *w))
        {
            physics::init_motion(packet, wire, &sim.tuning);
        }
    }
    log::info!("Freeze over at tick {}", sim.time_ticks);
}

/// Hand arrived packets to their destination buffer, or count them lost
fn resolve_arrivals(sim: &mut Simulation, arrivals: &[PacketId]) {
    for &id in arrivals {
        let Some(wire) = sim.wire_of(id) else {
            continue;
        };
        let dest = sim.destination(wire);
        let Some(mut packet) = sim.take_in_flight(id) else {
            continue;
        };
        packet.vel = glam::Vec2::ZERO;
        packet.accel = 0.0;
        packet.segment = 0;

        let reward = packet.profile().reward;
        let stored = match dest.and_then(|d| sim.node_mut(d)) {
            Some(node) => node.store(packet).is_ok(),
            None => false,
        };
        if stored {
            sim.counters.coins += reward;
            sim.counters.delivered += 1;
            log::debug!("Packet {} delivered via wire {} (+{} coins)", id.0, wire.0, reward);
        } else {
            sim.counters.lost += 1;
            log::debug!("Packet {} dropped at wire {}: destination full", id.0, wire.0);
        }
    }
}

/// Release at most one buffered packet per node onto its first idle outgoing wire
fn release_buffered(sim: &mut Simulation) {
    for idx in 0..sim.nodes.len() {
        let node = &sim.nodes[idx];
        if node.buffered() == 0 {
            continue;
        }
        let idle = sim
            .wires
            .iter()
            .find(|w| !sim.is_occupied(w.id) && node.has_output(w.start()))
            .map(|w| w.id);
        let Some(wire) = idle else {
            continue;
        };
        if let Some(packet) = sim.nodes[idx].release() {
            log::debug!("Packet {} released onto wire {}", packet.id.0, wire.0);
            sim.launch(packet, wire);
        }
    }
}

/// Derive terminal state from the counters; first matching rule wins
fn evaluate_end_conditions(sim: &mut Simulation) {
    let c = sim.counters;
    if c.delivered >= sim.tuning.win_deliveries {
        sim.status = SimStatus::Win;
        log::info!("WIN at tick {}: {} delivered, {} lost", sim.time_ticks, c.delivered, c.lost);
    } else if c.total_spawned > 0 && c.loss_ratio() > sim.tuning.max_loss_ratio {
        sim.status = SimStatus::GameOver;
        log::info!(
            "GAME OVER at tick {}: lost {} of {} packets",
            sim.time_ticks,
            c.lost,
            c.total_spawned
        );
    } else if sim.packets.is_empty() && sim.budget.remaining < 1.0 && sim.buffered() == 0 {
        sim.status = SimStatus::GameOver;
        log::info!("GAME OVER at tick {}: no wire left and nothing moving", sim.time_ticks);
    }
}
