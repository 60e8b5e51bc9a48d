//! Planar node coordinates.
//!
//! Positions are normalized to the unit square `[0, 1) × [0, 1)`; rendering
//! layers scale them to the floor plan.  Distances are plain Euclidean,
//! which is all the nearest-cluster-head assignment needs.

/// A normalized 2-D position.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Squared distance, enough for nearest-neighbour comparisons.
    #[inline]
    pub fn distance_sq(self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}
