//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` per step)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod collision;
pub mod effects;
pub mod level;
pub mod node;
pub mod packet;
pub mod physics;
pub mod state;
pub mod tick;
pub mod wire;

pub use autoplay::AutoPilot;
pub use collision::{accumulate_noise, overlaps};
pub use effects::{ActiveEffects, EffectKind};
pub use level::{STANDARD_NODES, build_standard};
pub use node::{NodeId, SystemNode};
pub use packet::{Packet, PacketId, PacketKind, PacketShape, PhysicsProfile};
pub use physics::Step;
pub use state::{Counters, Rejected, SimStatus, SimView, Simulation, WireBudget};
pub use tick::tick;
pub use wire::{Wire, WireId};
