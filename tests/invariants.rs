//! Randomized operation sequences on the standard board. After every
//! operation the ownership, budget and counter invariants must hold.

use std::collections::BTreeMap;

use glam::Vec2;
use packet_hell::consts::{BUFFER_CAPACITY, MAX_BENDS};
use packet_hell::sim::{EffectKind, PacketId, Rejected, Simulation, tick};
use packet_hell::tuning::Tuning;
use proptest::prelude::*;

/// Output -> input pairs between distinct standard nodes
const ROUTES: [(Vec2, Vec2); 8] = [
    (Vec2::new(120.0, 140.0), Vec2::new(380.0, 140.0)),
    (Vec2::new(120.0, 160.0), Vec2::new(380.0, 160.0)),
    (Vec2::new(120.0, 390.0), Vec2::new(380.0, 390.0)),
    (Vec2::new(120.0, 410.0), Vec2::new(380.0, 410.0)),
    (Vec2::new(120.0, 160.0), Vec2::new(380.0, 390.0)),
    (Vec2::new(120.0, 390.0), Vec2::new(380.0, 160.0)),
    (Vec2::new(420.0, 140.0), Vec2::new(80.0, 140.0)),
    (Vec2::new(420.0, 410.0), Vec2::new(80.0, 410.0)),
];

#[derive(Debug, Clone)]
enum Op {
    Spawn(usize),
    Tick(u32),
    Effect(usize),
    Bend { wire: usize, segment: usize, offset: (f32, f32) },
    Grant(u32),
    Pause,
    Resume,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..ROUTES.len()).prop_map(Op::Spawn),
        6 => (1u32..40).prop_map(Op::Tick),
        2 => (0..EffectKind::ALL.len()).prop_map(Op::Effect),
        2 => (0usize..8, 0usize..5, (-60.0f32..60.0, -60.0f32..60.0))
            .prop_map(|(wire, segment, offset)| Op::Bend { wire, segment, offset }),
        1 => (0u32..20).prop_map(Op::Grant),
        1 => Just(Op::Pause),
        1 => Just(Op::Resume),
    ]
}

fn noise_by_id(sim: &Simulation) -> BTreeMap<PacketId, f32> {
    sim.packets.iter().map(|p| (p.id, p.noise)).collect()
}

fn check(sim: &Simulation) -> Result<(), TestCaseError> {
    let violations = sim.invariant_violations();
    prop_assert!(violations.is_empty(), "violations: {violations:?}");
    prop_assert!(sim.budget.remaining >= 0.0);

    for node in &sim.nodes {
        prop_assert!(node.buffered() <= BUFFER_CAPACITY);
    }
    // Every in-flight packet rides exactly one wire, and no wire carries two
    let mut carried = BTreeMap::new();
    for p in &sim.packets {
        let wire = sim.wire_of(p.id);
        prop_assert!(wire.is_some(), "packet {} rides nothing", p.id.0);
        prop_assert!(carried.insert(wire, p.id).is_none());
    }
    let c = sim.counters;
    prop_assert!(c.delivered + c.lost <= c.total_spawned);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_under_random_play(
        seed in any::<u64>(),
        ops in prop::collection::vec(arb_op(), 1..60),
    ) {
        let tuning = Tuning { initial_wire_budget: 1200.0, ..Tuning::default() };
        let mut sim = Simulation::standard(seed, tuning);

        for op in ops {
            let noise_before = noise_by_id(&sim);
            let budget_before = sim.budget.remaining;
            let mut noise_may_drop = false;

            match op {
                Op::Spawn(route) => {
                    let (from, to) = ROUTES[route];
                    let _ = sim.spawn_packet(from, to);
                }
                Op::Tick(n) => {
                    for _ in 0..n {
                        let was_terminal = sim.status.is_terminal();
                        let ticks = sim.time_ticks;
                        tick(&mut sim);
                        if was_terminal {
                            prop_assert_eq!(sim.time_ticks, ticks);
                        }
                    }
                    // Ticks never touch the budget
                    prop_assert_eq!(sim.budget.remaining, budget_before);
                }
                Op::Effect(i) => {
                    let kind = EffectKind::ALL[i];
                    let coins = sim.counters.coins;
                    match sim.apply_effect(kind) {
                        Ok(()) => {
                            prop_assert_eq!(sim.counters.coins, coins - kind.cost(&sim.tuning.costs));
                            noise_may_drop = kind == EffectKind::ResetNoise;
                        }
                        Err(_) => prop_assert_eq!(sim.counters.coins, coins),
                    }
                }
                Op::Bend { wire, segment, offset } => {
                    if sim.wires.is_empty() {
                        continue;
                    }
                    let w = &sim.wires[wire % sim.wires.len()];
                    let (id, bends, path) = (w.id, w.bends(), w.path().to_vec());
                    let point = w.start() + Vec2::new(offset.0, offset.1);
                    let coins = sim.counters.coins;

                    let result = sim.try_add_bend(id, segment, point, 1);
                    if bends >= MAX_BENDS && !sim.status.is_terminal() {
                        prop_assert_eq!(result, Err(Rejected::MaxBends));
                    }
                    if result.is_err() {
                        let after = sim.wire(id).map(|w| w.path().to_vec());
                        prop_assert_eq!(after, Some(path));
                        prop_assert_eq!(sim.counters.coins, coins);
                        prop_assert_eq!(sim.budget.remaining, budget_before);
                    }
                }
                Op::Grant(n) => sim.counters.coins += n,
                Op::Pause => {
                    sim.pause();
                }
                Op::Resume => {
                    sim.resume();
                }
            }

            check(&sim)?;
            if !noise_may_drop {
                for p in &sim.packets {
                    if let Some(&before) = noise_before.get(&p.id) {
                        prop_assert!(p.noise >= before, "noise of packet {} dropped", p.id.0);
                    }
                }
            }
        }
    }

    #[test]
    fn same_seed_same_run(seed in any::<u64>(), routes in prop::collection::vec(0..ROUTES.len(), 1..4)) {
        let build = || {
            let mut sim = Simulation::standard(seed, Tuning { initial_wire_budget: 2000.0, ..Tuning::default() });
            for &r in &routes {
                let (from, to) = ROUTES[r];
                let _ = sim.spawn_packet(from, to);
            }
            sim
        };
        let mut a = build();
        let mut b = build();
        for _ in 0..150 {
            tick(&mut a);
            tick(&mut b);
        }
        prop_assert_eq!(a.counters, b.counters);
        prop_assert_eq!(a.packets, b.packets);
        prop_assert_eq!(a.status, b.status);
    }
}
