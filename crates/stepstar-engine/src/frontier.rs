//! The open set.
//!
//! Opened cells are kept in a `BTreeSet` keyed by `(f, h, position)`, where
//! position compares row-major. Popping the first key therefore picks the
//! lowest f, then the lowest h, then the first cell in scan order, which is
//! the same cell a full-board rescan would choose.

use std::collections::BTreeSet;

use stepstar_core::{CellState, GridModel, Node, Point};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenKey {
    f: u32,
    h: u32,
    pos: Point,
}

impl OpenKey {
    fn of(pos: Point, node: &Node) -> Self {
        Self {
            f: node.f(),
            h: node.h,
            pos,
        }
    }
}

/// What [`Frontier::upsert`] did with a candidate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Upsert {
    /// Unexplored cell discovered.
    Opened,
    /// Already open; the candidate had a strictly lower f and replaced it.
    Improved,
    /// Already open with an f no worse than the candidate.
    Kept,
    /// Wall, marker, Closed or off the board.
    Rejected,
}

/// Incrementally maintained set of Opened cells.
///
/// The frontier only indexes cells; their g/h/parent live on the board. All
/// Opened transitions go through [`upsert`](Frontier::upsert) so the two
/// never disagree.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    open: BTreeSet<OpenKey>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from every Opened cell on `grid` by scanning the whole board.
    #[cfg(test)]
    pub(crate) fn from_grid(grid: &GridModel) -> Self {
        let open = grid
            .iter()
            .filter(|(_, n)| n.state == CellState::Opened)
            .map(|(p, n)| OpenKey::of(p, n))
            .collect();
        Self { open }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn clear(&mut self) {
        self.open.clear();
    }

    #[cfg(test)]
    pub(crate) fn peek_best(&self) -> Option<Point> {
        self.open.first().map(|k| k.pos)
    }

    /// Remove and return the open cell with minimum f, then minimum h, then
    /// first in row-major order.
    pub fn extract_best(&mut self) -> Option<Point> {
        self.open.pop_first().map(|k| k.pos)
    }

    /// Open cells in extraction order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.open.iter().map(|k| k.pos)
    }

    /// Offer a route to `p` with cost `g`, heuristic `h`, via `parent`.
    ///
    /// Unexplored cells become Opened. Opened cells are replaced only when
    /// `g + h` is strictly lower than their current f. Anything else is
    /// left untouched.
    pub fn upsert(
        &mut self,
        grid: &mut GridModel,
        p: Point,
        g: u32,
        h: u32,
        parent: Point,
    ) -> Upsert {
        let Some(current) = grid.node(p).copied() else {
            return Upsert::Rejected;
        };
        let candidate = Node::opened(g, h, parent);
        let result = match current.state {
            CellState::Unexplored => Upsert::Opened,
            CellState::Opened if candidate.f() < current.f() => {
                self.open.remove(&OpenKey::of(p, &current));
                Upsert::Improved
            }
            CellState::Opened => return Upsert::Kept,
            _ => return Upsert::Rejected,
        };
        if grid.open(p, candidate) {
            self.open.insert(OpenKey::of(p, &candidate));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepstar_core::Metric;

    fn board() -> GridModel {
        GridModel::new(5, 5, Point::new(0, 0), Point::new(4, 0), Metric::Manhattan).unwrap()
    }

    #[test]
    fn extracts_by_f_then_h_then_scan_order() {
        let mut g = board();
        let mut fr = Frontier::new();
        let from = Point::new(0, 0);
        fr.upsert(&mut g, Point::new(2, 2), 3, 3, from); // f 6, h 3
        fr.upsert(&mut g, Point::new(1, 2), 2, 4, from); // f 6, h 4
        fr.upsert(&mut g, Point::new(3, 1), 4, 2, from); // f 6, h 2
        fr.upsert(&mut g, Point::new(2, 1), 4, 2, from); // f 6, h 2, earlier in scan
        fr.upsert(&mut g, Point::new(1, 1), 5, 3, from); // f 8
        let order: Vec<_> = std::iter::from_fn(|| fr.extract_best()).collect();
        assert_eq!(
            order,
            vec![
                Point::new(2, 1),
                Point::new(3, 1),
                Point::new(2, 2),
                Point::new(1, 2),
                Point::new(1, 1)
            ]
        );
        assert!(fr.is_empty());
    }

    #[test]
    fn replaces_only_on_strictly_lower_f() {
        let mut g = board();
        let mut fr = Frontier::new();
        let p = Point::new(2, 2);
        assert_eq!(fr.upsert(&mut g, p, 4, 4, Point::new(1, 1)), Upsert::Opened);
        assert_eq!(fr.upsert(&mut g, p, 4, 4, Point::new(1, 2)), Upsert::Kept);
        assert_eq!(g.node(p).unwrap().parent, Some(Point::new(1, 1)));
        assert_eq!(fr.upsert(&mut g, p, 3, 4, Point::new(2, 1)), Upsert::Improved);
        let n = g.node(p).unwrap();
        assert_eq!((n.g, n.h, n.parent), (3, 4, Some(Point::new(2, 1))));
        assert_eq!(fr.len(), 1);
        assert_eq!(fr.extract_best(), Some(p));
        assert_eq!(fr.extract_best(), None);
    }

    #[test]
    fn never_opens_walls_markers_or_closed_cells() {
        let mut g = board();
        let mut fr = Frontier::new();
        g.set_wall(Point::new(1, 1)).unwrap();
        assert_eq!(fr.upsert(&mut g, Point::new(1, 1), 1, 1, Point::ZERO), Upsert::Rejected);
        let (start, end) = (g.start(), g.end());
        assert_eq!(fr.upsert(&mut g, start, 1, 1, Point::ZERO), Upsert::Rejected);
        assert_eq!(fr.upsert(&mut g, end, 1, 1, Point::ZERO), Upsert::Rejected);
        assert_eq!(fr.upsert(&mut g, Point::new(7, 0), 1, 1, Point::ZERO), Upsert::Rejected);

        fr.upsert(&mut g, Point::new(2, 2), 4, 4, Point::ZERO);
        let p = fr.extract_best().unwrap();
        g.close(p).unwrap();
        assert_eq!(fr.upsert(&mut g, p, 0, 0, Point::ZERO), Upsert::Rejected);
        assert_eq!(g.state(p), Some(CellState::Closed));
        assert!(fr.is_empty());
    }

    #[test]
    fn matches_full_rescan() {
        let mut g = board();
        let mut fr = Frontier::new();
        fr.upsert(&mut g, Point::new(1, 0), 1, 3, Point::ZERO);
        fr.upsert(&mut g, Point::new(0, 1), 1, 4, Point::ZERO);
        fr.upsert(&mut g, Point::new(1, 1), 2, 4, Point::ZERO);
        fr.upsert(&mut g, Point::new(1, 1), 1, 4, Point::new(1, 0));
        let rescan = Frontier::from_grid(&g);
        assert_eq!(fr.iter().collect::<Vec<_>>(), rescan.iter().collect::<Vec<_>>());
        assert_eq!(fr.peek_best(), Some(Point::new(1, 0)));
    }
}
