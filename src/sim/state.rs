//! Simulation state and the boundary operations the host calls between ticks
//!
//! All state that must be persisted for Continue/determinism lives here.
//! Entities live in id-sorted arenas; relations between them (wire ->
//! destination node, wire -> occupying packet) are handle-to-handle maps.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::ActiveEffects;
use super::node::{NodeId, SystemNode};
use super::packet::{Packet, PacketId, PacketKind, PacketShape};
use super::physics;
use super::wire::{Wire, WireId};
use crate::consts::*;
use crate::tuning::Tuning;

/// Simulation lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimStatus {
    Running,
    /// Externally toggled; ticks are no-ops
    Paused,
    /// Terminal
    GameOver,
    /// Terminal
    Win,
}

impl SimStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SimStatus::GameOver | SimStatus::Win)
    }
}

/// Why a boundary operation refused to act. Nothing is mutated when one of
/// these is returned.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Rejected {
    #[error("insufficient wire budget: need {needed:.1}, have {available:.1}")]
    InsufficientBudget { needed: f32, available: f32 },
    #[error("insufficient coins: cost {cost}, balance {balance}")]
    InsufficientCoins { cost: u32, balance: u32 },
    #[error("wire already has the maximum number of bends")]
    MaxBends,
    #[error("segment {index} out of range (wire has {segments})")]
    SegmentOutOfRange { index: usize, segments: usize },
    #[error("wire is carrying a packet")]
    WireOccupied,
    #[error("no port at that position")]
    UnknownPort,
    #[error("unknown node")]
    UnknownNode,
    #[error("unknown wire")]
    UnknownWire,
    #[error("a wire cannot loop back into its own node")]
    SameNode,
    #[error("the run has ended")]
    NotRunning,
}

/// Packet and coin counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub lost: u32,
    pub delivered: u32,
    /// Packets launched onto a wire: fresh spawns plus buffer releases
    pub total_spawned: u32,
    pub coins: u32,
}

impl Counters {
    /// Fraction of launches that ended in loss
    pub fn loss_ratio(&self) -> f32 {
        if self.total_spawned == 0 {
            0.0
        } else {
            self.lost as f32 / self.total_spawned as f32
        }
    }
}

/// Finite wire length available to the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireBudget {
    /// Length still available
    pub remaining: f32,
    /// Length ever granted (initial budget plus extensions)
    pub allocated: f32,
}

impl WireBudget {
    pub fn new(initial: f32) -> Self {
        Self {
            remaining: initial,
            allocated: initial,
        }
    }

    pub fn check(&self, amount: f32) -> Result<(), Rejected> {
        if self.remaining >= amount {
            Ok(())
        } else {
            Err(Rejected::InsufficientBudget {
                needed: amount,
                available: self.remaining,
            })
        }
    }

    fn spend(&mut self, amount: f32) {
        debug_assert!(amount <= self.remaining);
        self.remaining = (self.remaining - amount).max(0.0);
    }

    pub(crate) fn extend(&mut self, amount: f32) {
        self.remaining += amount;
        self.allocated += amount;
    }
}

/// Read-only view handed to renderers and HUDs between ticks
#[derive(Debug, Clone, Copy)]
pub struct SimView<'a> {
    pub status: SimStatus,
    pub time_ticks: u64,
    pub counters: Counters,
    pub remaining_budget: f32,
    pub frozen: bool,
    pub packets: &'a [Packet],
    pub wires: &'a [Wire],
    pub nodes: &'a [SystemNode],
    occupancy: &'a BTreeMap<WireId, PacketId>,
}

impl SimView<'_> {
    pub fn occupant(&self, wire: WireId) -> Option<PacketId> {
        self.occupancy.get(&wire).copied()
    }

    pub fn buffered(&self) -> usize {
        self.nodes.iter().map(|n| n.buffered()).sum()
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub status: SimStatus,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub counters: Counters,
    pub budget: WireBudget,
    /// In-flight packets (sorted by id for determinism)
    pub packets: Vec<Packet>,
    /// Wires (sorted by id)
    pub wires: Vec<Wire>,
    /// System nodes (sorted by id)
    pub nodes: Vec<SystemNode>,
    destinations: BTreeMap<WireId, NodeId>,
    occupancy: BTreeMap<WireId, PacketId>,
    pub effects: ActiveEffects,
    /// Next entity ID
    next_id: u32,
}

impl Simulation {
    /// Create an empty simulation (no nodes)
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!(
            "New simulation: seed {}, budget {:.0}, {}",
            seed,
            tuning.initial_wire_budget,
            tuning.difficulty.as_str()
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            budget: WireBudget::new(tuning.initial_wire_budget),
            tuning,
            status: SimStatus::Running,
            time_ticks: 0,
            counters: Counters::default(),
            packets: Vec::new(),
            wires: Vec::new(),
            nodes: Vec::new(),
            destinations: BTreeMap::new(),
            occupancy: BTreeMap::new(),
            effects: ActiveEffects::default(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a node with the default port layout
    pub fn add_node(&mut self, pos: Vec2) -> NodeId {
        let id = NodeId(self.next_entity_id());
        self.nodes.push(SystemNode::new(id, pos));
        id
    }

    /// Add a node with explicit ports
    pub fn add_node_with_ports(&mut self, pos: Vec2, inputs: Vec<Vec2>, outputs: Vec<Vec2>) -> NodeId {
        let id = NodeId(self.next_entity_id());
        self.nodes.push(SystemNode::with_ports(id, pos, inputs, outputs));
        id
    }

    // === Lookups ===

    pub fn node(&self, id: NodeId) -> Option<&SystemNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.iter().find(|w| w.id == id)
    }

    pub fn packet(&self, id: PacketId) -> Option<&Packet> {
        self.packets.iter().find(|p| p.id == id)
    }

    pub fn packet_mut(&mut self, id: PacketId) -> Option<&mut Packet> {
        self.packets.iter_mut().find(|p| p.id == id)
    }

    pub fn destination(&self, wire: WireId) -> Option<NodeId> {
        self.destinations.get(&wire).copied()
    }

    pub fn occupant(&self, wire: WireId) -> Option<PacketId> {
        self.occupancy.get(&wire).copied()
    }

    pub fn is_occupied(&self, wire: WireId) -> bool {
        self.occupancy.contains_key(&wire)
    }

    /// The wire a packet is riding, if any
    pub fn wire_of(&self, packet: PacketId) -> Option<WireId> {
        self.occupancy
            .iter()
            .find(|&(_, &p)| p == packet)
            .map(|(&w, _)| w)
    }

    /// Packet -> wire lookup for the whole registry
    pub(crate) fn carriers(&self) -> BTreeMap<PacketId, WireId> {
        self.occupancy.iter().map(|(&w, &p)| (p, w)).collect()
    }

    pub fn in_flight(&self) -> usize {
        self.packets.len()
    }

    pub fn buffered(&self) -> usize {
        self.nodes.iter().map(|n| n.buffered()).sum()
    }

    fn node_with_output(&self, port: Vec2) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.has_output(port)).map(|n| n.id)
    }

    fn node_with_input(&self, port: Vec2) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.has_input(port)).map(|n| n.id)
    }

    fn ensure_live(&self) -> Result<(), Rejected> {
        if self.status.is_terminal() {
            Err(Rejected::NotRunning)
        } else {
            Ok(())
        }
    }

    // === Wire topology & budget ledger ===

    /// Build a straight wire from `start` to `end`, an input port of `dest`.
    /// Deducts its length from the budget.
    pub fn try_create_wire(&mut self, start: Vec2, end: Vec2, dest: NodeId) -> Result<WireId, Rejected> {
        self.ensure_live()?;
        let node = self.node(dest).ok_or(Rejected::UnknownNode)?;
        if !node.has_input(end) {
            return Err(Rejected::UnknownPort);
        }
        let length = start.distance(end);
        if let Err(e) = self.budget.check(length) {
            log::debug!("Wire rejected: {}", e);
            return Err(e);
        }

        let id = WireId(self.next_entity_id());
        self.wires.push(Wire::new(id, start, end));
        self.destinations.insert(id, dest);
        self.budget.spend(length);
        log::info!(
            "Wire {} created: length {:.1}, budget left {:.1}",
            id.0,
            length,
            self.budget.remaining
        );
        Ok(id)
    }

    /// Insert a bend point into `segment` of a wire, paying `cost` coins and
    /// the extra length from the budget.
    pub fn try_add_bend(&mut self, wire: WireId, segment: usize, point: Vec2, cost: u32) -> Result<(), Rejected> {
        self.ensure_live()?;
        let w = self.wire(wire).ok_or(Rejected::UnknownWire)?;
        if w.bends() >= MAX_BENDS {
            return Err(Rejected::MaxBends);
        }
        if self.counters.coins < cost {
            return Err(Rejected::InsufficientCoins {
                cost,
                balance: self.counters.coins,
            });
        }
        let new_length = w.length_with_bend(segment, point).ok_or(Rejected::SegmentOutOfRange {
            index: segment,
            segments: w.segment_count(),
        })?;
        if self.is_occupied(wire) {
            return Err(Rejected::WireOccupied);
        }
        let extra = (new_length - w.length()).max(0.0);
        self.budget.check(extra)?;

        self.counters.coins -= cost;
        self.budget.spend(extra);
        if let Some(w) = self.wires.iter_mut().find(|w| w.id == wire) {
            w.insert_bend(segment, point);
        }
        log::debug!("Bend added to wire {} (segment {}), +{:.1} length", wire.0, segment, extra);
        Ok(())
    }

    // === Packets ===

    /// Connect an output port to an input port and launch a packet of a
    /// seeded-random kind on the new wire.
    pub fn spawn_packet(&mut self, start: Vec2, end: Vec2) -> Result<PacketId, Rejected> {
        let dest = self.check_connection(start, end)?;
        let wire = self.try_create_wire(start, end, dest)?;

        let weights = &self.tuning.spawn_weights;
        let roll = self.rng.random_range(0..weights.total().max(1));
        let kind = weights.pick(roll);
        let shape = if self.rng.random_bool(0.5) {
            PacketShape::Square
        } else {
            PacketShape::Triangle
        };
        Ok(self.spawn_on(wire, kind, shape))
    }

    /// Like `spawn_packet`, with an explicit kind and shape
    pub fn spawn_packet_as(
        &mut self,
        start: Vec2,
        end: Vec2,
        kind: PacketKind,
        shape: PacketShape,
    ) -> Result<PacketId, Rejected> {
        let dest = self.check_connection(start, end)?;
        let wire = self.try_create_wire(start, end, dest)?;
        Ok(self.spawn_on(wire, kind, shape))
    }

    /// Resolve the destination node of a proposed connection
    fn check_connection(&self, start: Vec2, end: Vec2) -> Result<NodeId, Rejected> {
        self.ensure_live()?;
        let src = self.node_with_output(start).ok_or(Rejected::UnknownPort)?;
        let dest = self.node_with_input(end).ok_or(Rejected::UnknownPort)?;
        if src == dest {
            return Err(Rejected::SameNode);
        }
        Ok(dest)
    }

    fn spawn_on(&mut self, wire: WireId, kind: PacketKind, shape: PacketShape) -> PacketId {
        let id = PacketId(self.next_entity_id());
        let packet = Packet::new(id, kind, shape);
        log::debug!("Packet {} spawned ({:?}) on wire {}", id.0, kind, wire.0);
        self.launch(packet, wire);
        id
    }

    /// Move a packet onto an idle wire: reposition, initialize motion from
    /// its profile, register it in flight and mark the wire occupied.
    pub(crate) fn launch(&mut self, mut packet: Packet, wire: WireId) {
        debug_assert!(!self.is_occupied(wire));
        let Some(w) = self.wire(wire) else {
            return;
        };
        packet.pos = w.start();
        packet.segment = 0;
        physics::init_motion(&mut packet, w, &self.tuning);

        self.occupancy.insert(wire, packet.id);
        self.packets.push(packet);
        self.counters.total_spawned += 1;
    }

    /// Take a packet out of the registry, freeing its wire
    pub(crate) fn take_in_flight(&mut self, id: PacketId) -> Option<Packet> {
        let idx = self.packets.iter().position(|p| p.id == id)?;
        if let Some(wire) = self.wire_of(id) {
            self.occupancy.remove(&wire);
        }
        Some(self.packets.remove(idx))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut SystemNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    // === Status ===

    pub fn pause(&mut self) -> bool {
        if self.status == SimStatus::Running {
            self.status = SimStatus::Paused;
            log::info!("Paused at tick {}", self.time_ticks);
            true
        } else {
            false
        }
    }

    pub fn resume(&mut self) -> bool {
        if self.status == SimStatus::Paused {
            self.status = SimStatus::Running;
            log::info!("Resumed at tick {}", self.time_ticks);
            true
        } else {
            false
        }
    }

    pub fn snapshot(&self) -> SimView<'_> {
        SimView {
            status: self.status,
            time_ticks: self.time_ticks,
            counters: self.counters,
            remaining_budget: self.budget.remaining,
            frozen: self.effects.is_frozen(),
            packets: &self.packets,
            wires: &self.wires,
            nodes: &self.nodes,
            occupancy: &self.occupancy,
        }
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.packets.sort_by_key(|p| p.id);
        self.wires.sort_by_key(|w| w.id);
        self.nodes.sort_by_key(|n| n.id);
    }

    /// Check a state decoded from a save: wire shapes, cached lengths, id
    /// allocation and a clean invariant audit
    pub(crate) fn revalidate(&mut self) -> Result<(), String> {
        for wire in &mut self.wires {
            wire.revalidate()?;
        }
        self.normalize_order();

        let ids = self
            .nodes
            .iter()
            .map(|n| n.id.0)
            .chain(self.wires.iter().map(|w| w.id.0))
            .chain(self.packets.iter().map(|p| p.id.0))
            .chain(self.nodes.iter().flat_map(|n| n.buffer().map(|p| p.id.0)));
        if let Some(id) = ids.filter(|&id| id >= self.next_id).max() {
            return Err(format!("entity id {} not below next id {}", id, self.next_id));
        }

        let violations = self.invariant_violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations.join("; "))
        }
    }

    /// Ownership and ledger violations (empty when the state is consistent)
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut out = Vec::new();

        let mut seen = BTreeMap::new();
        for (&wire, &packet) in &self.occupancy {
            if self.wire(wire).is_none() {
                out.push(format!("occupancy names missing wire {}", wire.0));
            }
            if self.packet(packet).is_none() {
                out.push(format!("wire {} holds packet {} that is not in flight", wire.0, packet.0));
            }
            if let Some(other) = seen.insert(packet, wire) {
                out.push(format!("packet {} rides wires {} and {}", packet.0, other.0, wire.0));
            }
        }
        for (&wire, &node) in &self.destinations {
            if self.wire(wire).is_none() {
                out.push(format!("destination recorded for missing wire {}", wire.0));
            }
            if self.node(node).is_none() {
                out.push(format!("wire {} leads to missing node {}", wire.0, node.0));
            }
        }
        for w in &self.wires {
            match self.destination(w.id).and_then(|n| self.node(n)) {
                Some(node) if node.has_input(w.end()) => {}
                Some(node) => out.push(format!("wire {} does not end at an input of node {}", w.id.0, node.id.0)),
                None => out.push(format!("wire {} has no destination", w.id.0)),
            }
        }
        let carriers = self.carriers();
        for p in &self.packets {
            match carriers.get(&p.id).and_then(|&w| self.wire(w)) {
                Some(w) if p.segment <= w.segment_count() => {}
                Some(w) => out.push(format!("packet {} on segment {} of wire {}", p.id.0, p.segment, w.id.0)),
                None => out.push(format!("packet {} is in flight on no wire", p.id.0)),
            }
        }

        let mut packet_ids = BTreeSet::new();
        for id in self
            .packets
            .iter()
            .map(|p| p.id)
            .chain(self.nodes.iter().flat_map(|n| n.buffer().map(|p| p.id)))
        {
            if !packet_ids.insert(id) {
                out.push(format!("packet {} is held twice", id.0));
            }
        }
        for node in &self.nodes {
            if node.buffered() > BUFFER_CAPACITY {
                out.push(format!("node {} buffer over capacity", node.id.0));
            }
        }

        let materialized: f32 = self.wires.iter().map(|w| w.length()).sum();
        if (materialized + self.budget.remaining - self.budget.allocated).abs() > 0.05 {
            out.push(format!(
                "wires use {:.2} with {:.2} left, but {:.2} was allocated",
                materialized, self.budget.remaining, self.budget.allocated
            ));
        }
        if !self.budget.remaining.is_finite() || !self.budget.allocated.is_finite() {
            out.push("non-finite wire budget".to_string());
        }
        if self.budget.remaining < 0.0 {
            out.push("negative wire budget".to_string());
        }
        let c = &self.counters;
        if c.delivered as u64 + c.lost as u64 + self.packets.len() as u64 != c.total_spawned as u64 {
            out.push(format!(
                "launch accounting off: {} delivered + {} lost + {} in flight != {} launched",
                c.delivered,
                c.lost,
                self.packets.len(),
                c.total_spawned
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_nodes() -> (Simulation, NodeId, NodeId) {
        let mut sim = Simulation::new(7, Tuning::default());
        let a = sim.add_node(Vec2::new(100.0, 150.0));
        let b = sim.add_node(Vec2::new(400.0, 150.0));
        (sim, a, b)
    }

    #[test]
    fn test_wire_budget_scenario() {
        let mut sim = Simulation::new(1, Tuning::default());
        let dest = sim.add_node_with_ports(
            Vec2::new(1000.0, 0.0),
            vec![Vec2::new(100.0, 0.0), Vec2::new(0.0, 450.0)],
            vec![],
        );

        assert!(sim.try_create_wire(Vec2::ZERO, Vec2::new(100.0, 0.0), dest).is_ok());
        assert!((sim.budget.remaining - 400.0).abs() < 1e-3);

        let err = sim.try_create_wire(Vec2::ZERO, Vec2::new(0.0, 450.0), dest).unwrap_err();
        assert!(matches!(err, Rejected::InsufficientBudget { .. }));
        assert!((sim.budget.remaining - 400.0).abs() < 1e-3);
        assert_eq!(sim.wires.len(), 1);
    }

    #[test]
    fn test_spawn_creates_wire_and_packet() {
        let (mut sim, _a, b) = two_nodes();
        let id = sim
            .spawn_packet_as(
                Vec2::new(120.0, 140.0),
                Vec2::new(380.0, 140.0),
                PacketKind::Messenger,
                PacketShape::Square,
            )
            .unwrap();

        let wire = sim.wire_of(id).unwrap();
        assert_eq!(sim.destination(wire), Some(b));
        assert_eq!(sim.counters.total_spawned, 1);
        let p = sim.packet(id).unwrap();
        assert_eq!(p.pos, Vec2::new(120.0, 140.0));
        assert!((p.vel - Vec2::new(2.0, 0.0)).length() < 1e-5);
        assert!(sim.invariant_violations().is_empty());
    }

    #[test]
    fn test_spawn_rejects_bad_ports() {
        let (mut sim, _a, _b) = two_nodes();
        let before = sim.budget.remaining;
        assert_eq!(
            sim.spawn_packet(Vec2::new(0.0, 0.0), Vec2::new(380.0, 140.0)),
            Err(Rejected::UnknownPort)
        );
        // Output and input of the same node
        assert_eq!(
            sim.spawn_packet(Vec2::new(120.0, 140.0), Vec2::new(80.0, 140.0)),
            Err(Rejected::SameNode)
        );
        assert_eq!(sim.budget.remaining, before);
        assert_eq!(sim.counters.total_spawned, 0);
    }

    #[test]
    fn test_bend_limits() {
        let (mut sim, _a, b) = two_nodes();
        let wire = sim
            .try_create_wire(Vec2::new(120.0, 140.0), Vec2::new(380.0, 140.0), b)
            .unwrap();
        sim.counters.coins = 10;

        assert_eq!(
            sim.try_add_bend(wire, 4, Vec2::new(200.0, 150.0), 1),
            Err(Rejected::SegmentOutOfRange { index: 4, segments: 1 })
        );
        assert_eq!(
            sim.try_add_bend(wire, 0, Vec2::new(200.0, 150.0), 50),
            Err(Rejected::InsufficientCoins { cost: 50, balance: 10 })
        );

        for i in 0..3 {
            sim.try_add_bend(wire, i, Vec2::new(150.0 + 50.0 * i as f32, 145.0), 1).unwrap();
        }
        let path = sim.wire(wire).unwrap().path().to_vec();
        let coins = sim.counters.coins;
        let budget = sim.budget.remaining;
        for _ in 0..3 {
            assert_eq!(sim.try_add_bend(wire, 0, Vec2::new(130.0, 141.0), 1), Err(Rejected::MaxBends));
        }
        assert_eq!(sim.wire(wire).unwrap().path(), path.as_slice());
        assert_eq!(sim.counters.coins, coins);
        assert_eq!(sim.budget.remaining, budget);
        assert_eq!(coins, 7);
        assert!(sim.invariant_violations().is_empty());
    }

    #[test]
    fn test_bend_on_busy_wire_rejected() {
        let (mut sim, _a, _b) = two_nodes();
        let id = sim.spawn_packet(Vec2::new(120.0, 140.0), Vec2::new(380.0, 140.0)).unwrap();
        let wire = sim.wire_of(id).unwrap();
        sim.counters.coins = 5;
        assert_eq!(
            sim.try_add_bend(wire, 0, Vec2::new(200.0, 100.0), 1),
            Err(Rejected::WireOccupied)
        );
        assert_eq!(sim.counters.coins, 5);
    }

    #[test]
    fn test_pause_resume_only_from_valid_state() {
        let (mut sim, _a, _b) = two_nodes();
        assert!(!sim.resume());
        assert!(sim.pause());
        assert!(!sim.pause());
        assert_eq!(sim.status, SimStatus::Paused);
        assert!(sim.resume());
        sim.status = SimStatus::Win;
        assert!(!sim.pause());
        assert_eq!(sim.status, SimStatus::Win);
    }

    #[test]
    fn test_clone_is_independent() {
        let (mut sim, _a, _b) = two_nodes();
        let id = sim.spawn_packet(Vec2::new(120.0, 140.0), Vec2::new(380.0, 140.0)).unwrap();
        let copy = sim.clone();
        sim.packet_mut(id).unwrap().noise = 5.0;
        sim.counters.coins = 99;
        assert_eq!(copy.packet(id).unwrap().noise, 0.0);
        assert_eq!(copy.counters.coins, 0);
    }

    #[test]
    fn test_snapshot_view() {
        let (mut sim, _a, _b) = two_nodes();
        let id = sim.spawn_packet(Vec2::new(120.0, 140.0), Vec2::new(380.0, 140.0)).unwrap();
        let wire = sim.wire_of(id).unwrap();
        let view = sim.snapshot();
        assert_eq!(view.packets.len(), 1);
        assert_eq!(view.wires.len(), 1);
        assert_eq!(view.nodes.len(), 2);
        assert_eq!(view.occupant(wire), Some(id));
        assert_eq!(view.buffered(), 0);
        assert_eq!(view.status, SimStatus::Running);
    }
}
