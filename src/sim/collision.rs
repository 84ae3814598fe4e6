//! Packet proximity and noise
//!
//! Pairwise O(n²) scan; packet counts stay in the low double digits. Every
//! overlapping pair adds one unit of noise to both packets.

use super::packet::Packet;

/// Noise added per overlapping pair
pub const NOISE_PER_OVERLAP: f32 = 1.0;

/// Whether two packets overlap (center distance below the sum of half-sizes)
#[inline]
pub fn overlaps(a: &Packet, b: &Packet) -> bool {
    a.pos.distance(b.pos) < a.radius() + b.radius()
}

/// Number of overlaps each packet takes part in, indexed like `packets`
pub fn overlap_counts(packets: &[Packet]) -> Vec<u32> {
    let mut hits = vec![0u32; packets.len()];
    for i in 0..packets.len() {
        for j in (i + 1)..packets.len() {
            if overlaps(&packets[i], &packets[j]) {
                hits[i] += 1;
                hits[j] += 1;
            }
        }
    }
    hits
}

/// Add noise for every overlap. Returns the number of overlapping pairs.
pub fn accumulate_noise(packets: &mut [Packet]) -> u32 {
    let hits = overlap_counts(packets);
    for (packet, &n) in packets.iter_mut().zip(&hits) {
        if n > 0 {
            packet.add_noise(n as f32 * NOISE_PER_OVERLAP);
        }
    }
    hits.iter().sum::<u32>() / 2
}
