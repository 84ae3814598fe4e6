//! Packet entity and per-kind physics profiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable packet handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PacketId(pub u32);

/// Cosmetic outline, no physics effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PacketShape {
    #[default]
    Square,
    Triangle,
}

/// Packet kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PacketKind {
    /// Normal traffic
    #[default]
    Messenger,
    /// Slower start, best reward
    Secret,
    /// Heavy, decelerates, low speed cap
    Bulky,
}

/// Movement and economy numbers for one packet kind.
///
/// Every initializer (spawn, release, thaw) reads from this table, so spawn-time
/// and release-time physics cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsProfile {
    /// Launch speed along the first segment
    pub base_speed: f32,
    /// Speed ceiling
    pub max_speed: f32,
    /// Speed floor while moving (deceleration never stalls a packet)
    pub min_speed: f32,
    /// Acceleration applied from launch
    pub base_accel: f32,
    /// Launch speed multiplier
    pub spawn_speed_scale: f32,
    /// Collision size and noise tolerance
    pub size: u32,
    /// Coins paid on delivery
    pub reward: u32,
    /// Whether long wires grant extra acceleration
    pub long_wire_boost: bool,
}

const MESSENGER: PhysicsProfile = PhysicsProfile {
    base_speed: 2.0,
    max_speed: 10.0,
    min_speed: 0.5,
    base_accel: 0.0,
    spawn_speed_scale: 1.0,
    size: 10,
    reward: 1,
    long_wire_boost: true,
};

const SECRET: PhysicsProfile = PhysicsProfile {
    base_speed: 2.0,
    max_speed: 10.0,
    min_speed: 0.5,
    base_accel: 0.0,
    spawn_speed_scale: 0.8,
    size: 10,
    reward: 3,
    long_wire_boost: true,
};

const BULKY: PhysicsProfile = PhysicsProfile {
    base_speed: 1.0,
    max_speed: 3.0,
    min_speed: 0.5,
    base_accel: -0.1,
    spawn_speed_scale: 1.0,
    size: 14,
    reward: 2,
    long_wire_boost: false,
};

impl PacketKind {
    pub fn profile(self) -> &'static PhysicsProfile {
        match self {
            PacketKind::Messenger => &MESSENGER,
            PacketKind::Secret => &SECRET,
            PacketKind::Bulky => &BULKY,
        }
    }
}

/// A packet entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packet {
    pub id: PacketId,
    pub shape: PacketShape,
    pub kind: PacketKind,
    pub size: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Scalar acceleration applied along the sign of each velocity component
    pub accel: f32,
    /// Accumulated loss risk
    pub noise: f32,
    /// Index of the wire segment currently being travelled
    pub segment: usize,
    /// Launch speed multiplier bought through desensitizing, kept across
    /// release and thaw
    #[serde(default = "unit_scale")]
    pub speed_scale: f32,
}

fn unit_scale() -> f32 {
    1.0
}

impl Packet {
    pub fn new(id: PacketId, kind: PacketKind, shape: PacketShape) -> Self {
        Self {
            id,
            shape,
            kind,
            size: kind.profile().size,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            accel: 0.0,
            noise: 0.0,
            segment: 0,
            speed_scale: 1.0,
        }
    }

    #[inline]
    pub fn profile(&self) -> &'static PhysicsProfile {
        self.kind.profile()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn add_noise(&mut self, amount: f32) {
        self.noise += amount;
    }

    pub fn is_lost(&self) -> bool {
        self.noise > self.size as f32
    }

    /// Accumulated noise as a fraction of the loss threshold
    pub fn noise_ratio(&self) -> f32 {
        self.noise / self.size as f32
    }

    /// Half the size, used as the collision radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size as f32 / 2.0
    }
}
