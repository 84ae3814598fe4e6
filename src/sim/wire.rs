//! Wire geometry
//!
//! A wire is a polyline from an output port to an input port:
//! - path[0]: start (output port)
//! - path[1..len-1]: bend points (at most `MAX_BENDS`)
//! - path[len-1]: end (input port)
//!
//! The total length is cached and recomputed whenever the path changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_BENDS;
use crate::polyline_length;

/// Stable wire handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireId(pub u32);

/// A wire between two ports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    pub id: WireId,
    path: Vec<Vec2>,
    length: f32,
}

impl Wire {
    pub fn new(id: WireId, start: Vec2, end: Vec2) -> Self {
        Self {
            id,
            path: vec![start, end],
            length: start.distance(end),
        }
    }

    #[inline]
    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    /// Cached total length
    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.path[0]
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.path[self.path.len() - 1]
    }

    pub fn bends(&self) -> usize {
        self.path.len().saturating_sub(2)
    }

    pub fn segment_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Endpoints of a segment, if it exists
    pub fn segment(&self, index: usize) -> Option<(Vec2, Vec2)> {
        if index + 1 < self.path.len() {
            Some((self.path[index], self.path[index + 1]))
        } else {
            None
        }
    }

    /// Unit direction of a segment (zero for degenerate or missing segments)
    pub fn segment_dir(&self, index: usize) -> Vec2 {
        self.segment(index)
            .map(|(a, b)| (b - a).normalize_or_zero())
            .unwrap_or(Vec2::ZERO)
    }

    pub fn is_last_segment(&self, index: usize) -> bool {
        index + 1 >= self.segment_count()
    }

    /// Length the wire would have with `point` inserted into `segment`
    pub fn length_with_bend(&self, segment: usize, point: Vec2) -> Option<f32> {
        let (a, b) = self.segment(segment)?;
        Some(self.length - a.distance(b) + a.distance(point) + point.distance(b))
    }

    /// Split `segment` at `point`. Callers check `MAX_BENDS` and the segment range.
    pub(crate) fn insert_bend(&mut self, segment: usize, point: Vec2) {
        debug_assert!(self.bends() < MAX_BENDS);
        debug_assert!(segment < self.segment_count());
        self.path.insert(segment + 1, point);
        self.recompute_length();
    }

    /// Check a wire decoded from a save and refresh its cached length
    pub(crate) fn revalidate(&mut self) -> Result<(), String> {
        if self.path.len() < 2 {
            return Err(format!("wire {} has {} path points", self.id.0, self.path.len()));
        }
        if self.bends() > MAX_BENDS {
            return Err(format!("wire {} has {} bends", self.id.0, self.bends()));
        }
        if !self.path.iter().all(|p| p.is_finite()) {
            return Err(format!("wire {} has a non-finite point", self.id.0));
        }
        self.recompute_length();
        Ok(())
    }

    fn recompute_length(&mut self) {
        self.length = polyline_length(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_wire() {
        let w = Wire::new(WireId(1), Vec2::ZERO, Vec2::new(30.0, 40.0));
        assert_eq!(w.length(), 50.0);
        assert_eq!(w.bends(), 0);
        assert_eq!(w.segment_count(), 1);
        assert!(w.is_last_segment(0));
        assert!(w.segment(1).is_none());
    }

    #[test]
    fn test_bend_recomputes_length() {
        let mut w = Wire::new(WireId(1), Vec2::ZERO, Vec2::new(100.0, 0.0));
        let predicted = w.length_with_bend(0, Vec2::new(50.0, 50.0)).unwrap();
        w.insert_bend(0, Vec2::new(50.0, 50.0));
        assert_eq!(w.bends(), 1);
        assert_eq!(w.path()[1], Vec2::new(50.0, 50.0));
        assert!((w.length() - predicted).abs() < 1e-3);
        assert!((w.length() - 2.0 * 50.0 * 2f32.sqrt()).abs() < 1e-3);
        assert!(!w.is_last_segment(0));
    }

    #[test]
    fn test_segment_dir() {
        let w = Wire::new(WireId(1), Vec2::new(10.0, 10.0), Vec2::new(10.0, 0.0));
        assert_eq!(w.segment_dir(0), Vec2::new(0.0, -1.0));
        assert_eq!(w.segment_dir(5), Vec2::ZERO);
    }

    #[test]
    fn test_revalidate() {
        let mut w = Wire::new(WireId(1), Vec2::ZERO, Vec2::new(3.0, 4.0));
        w.length = 1.0;
        assert!(w.revalidate().is_ok());
        assert_eq!(w.length(), 5.0);

        w.path.truncate(1);
        assert_eq!(w.bends(), 0);
        assert!(w.revalidate().is_err());

        let mut w = Wire::new(WireId(2), Vec2::ZERO, Vec2::new(100.0, 0.0));
        w.path.splice(1..1, [Vec2::new(10.0, 1.0), Vec2::new(20.0, 1.0), Vec2::new(30.0, 1.0), Vec2::new(40.0, 1.0)]);
        assert!(w.revalidate().is_err());
    }
}
