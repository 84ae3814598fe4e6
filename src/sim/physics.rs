//! Packet motion along wire polylines
//!
//! Velocity is bookkeeping for speed only: once a packet rides a wire its
//! actual travel direction is the direction of the current path segment.

use glam::Vec2;

use super::packet::{Packet, PhysicsProfile};
use super::wire::Wire;
use crate::sign;
use crate::tuning::Tuning;

/// Outcome of one integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moving,
    /// Within reach of the wire's terminal point; resolve delivery this tick
    Arrived,
}

/// Set launch velocity and acceleration from the packet's profile, aimed
/// along its current segment. Used at spawn, release and thaw.
pub fn init_motion(packet: &mut Packet, wire: &Wire, tuning: &Tuning) {
    let profile = packet.profile();
    let dir = wire.segment_dir(packet.segment);
    packet.vel = dir * profile.base_speed * profile.spawn_speed_scale * packet.speed_scale;
    packet.accel = profile.base_accel;
    if profile.long_wire_boost && wire.length() > tuning.long_wire_threshold {
        packet.accel = tuning.long_wire_boost;
    }
}

/// `v += a * sign(v)` per component. Deceleration stops at zero rather than
/// flipping a component's direction.
pub fn apply_acceleration(vel: Vec2, accel: f32) -> Vec2 {
    let step = |v: f32| {
        let s = sign(v);
        let next = v + accel * s;
        if sign(next) != s { 0.0 } else { next }
    };
    Vec2::new(step(vel.x), step(vel.y))
}

/// Scale a moving velocity into the profile's speed band, preserving direction
pub fn clamp_speed(vel: Vec2, profile: &PhysicsProfile) -> Vec2 {
    let speed = vel.length();
    if speed > profile.max_speed {
        vel / speed * profile.max_speed
    } else if speed > 0.0 && speed < profile.min_speed {
        vel / speed * profile.min_speed
    } else {
        vel
    }
}

/// Advance one packet by one tick
pub fn advance(packet: &mut Packet, wire: Option<&Wire>) -> Step {
    let Some(wire) = wire else {
        // Unattached packets drift
        packet.pos += packet.vel;
        return Step::Moving;
    };

    packet.vel = clamp_speed(apply_acceleration(packet.vel, packet.accel), packet.profile());
    let speed = packet.speed();

    if let Some((_, end)) = wire.segment(packet.segment) {
        packet.pos += wire.segment_dir(packet.segment) * speed;
        // Zero-length segments are crossed immediately
        if packet.pos.distance(end) < speed.max(f32::EPSILON) {
            packet.pos = end;
            packet.segment += 1;
        }
    }

    let past_end = packet.segment >= wire.segment_count();
    let near_end = wire.is_last_segment(packet.segment)
        && packet.pos.distance(wire.end()) < packet.size as f32;
    if past_end || near_end {
        Step::Arrived
    } else {
        Step::Moving
    }
}
