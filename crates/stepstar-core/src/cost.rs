//! Distance functions and the g/h cost model.

use crate::geom::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> u32 {
    (a.x - b.x).unsigned_abs() + (a.y - b.y).unsigned_abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> u32 {
    (a.x - b.x).unsigned_abs().max((a.y - b.y).unsigned_abs())
}

/// Distance used for both step costs and the heuristic.
///
/// `Manhattan` charges a diagonal step 2 while still allowing it as a single
/// move, so the heuristic is not consistent for 8-way movement and found
/// routes may be longer than optimal. `Chebyshev` makes every king move cost
/// 1 and keeps A*'s optimality guarantee.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    #[default]
    Manhattan,
    Chebyshev,
}

impl Metric {
    #[inline]
    pub fn distance(self, a: Point, b: Point) -> u32 {
        match self {
            Self::Manhattan => manhattan(a, b),
            Self::Chebyshev => chebyshev(a, b),
        }
    }
}

/// Pure g/h/f functions for one Start/End placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CostModel {
    pub metric: Metric,
    pub start: Point,
    pub end: Point,
}

impl CostModel {
    pub fn new(metric: Metric, start: Point, end: Point) -> Self {
        Self { metric, start, end }
    }

    /// Straight-line distance from Start.
    #[inline]
    pub fn g(&self, p: Point) -> u32 {
        self.metric.distance(p, self.start)
    }

    /// Heuristic distance to End.
    #[inline]
    pub fn h(&self, p: Point) -> u32 {
        self.metric.distance(p, self.end)
    }

    /// Cost of moving between two adjacent cells.
    #[inline]
    pub fn step(&self, from: Point, to: Point) -> u32 {
        self.metric.distance(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_charges_diagonals_two() {
        let cm = CostModel::new(Metric::Manhattan, Point::new(0, 0), Point::new(4, 0));
        assert_eq!(cm.step(Point::new(0, 0), Point::new(1, 1)), 2);
        assert_eq!(cm.g(Point::new(1, 1)), 2);
        assert_eq!(cm.h(Point::new(1, 1)), 4);
        assert_eq!(cm.g(Point::new(1, 1)) + cm.h(Point::new(1, 1)), 6);
    }

    #[test]
    fn chebyshev_charges_diagonals_one() {
        let cm = CostModel::new(Metric::Chebyshev, Point::new(0, 0), Point::new(4, 0));
        assert_eq!(cm.step(Point::new(0, 0), Point::new(1, 1)), 1);
        assert_eq!(cm.h(Point::new(1, 3)), 3);
    }

    #[test]
    fn endpoints_are_zero() {
        let cm = CostModel::new(Metric::default(), Point::new(2, 5), Point::new(7, 1));
        assert_eq!(cm.g(cm.start), 0);
        assert_eq!(cm.h(cm.end), 0);
        assert_eq!(manhattan(cm.start, cm.end), 9);
        assert_eq!(chebyshev(cm.start, cm.end), 5);
    }
}
