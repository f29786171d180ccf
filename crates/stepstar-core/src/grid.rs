//! The [`GridModel`] type — a fixed W×H board of search [`Node`]s.
//!
//! The board owns exactly one Start and one End at all times. Every mutator
//! either keeps that invariant or fails without touching any cell; whether an
//! edit is *allowed* at the current point of the search is decided by the
//! engine that owns the board.

use crate::cell::{CellState, Node};
use crate::cost::{CostModel, Metric};
use crate::error::Error;
use crate::geom::{Point, Range};
use crate::MIN_SIDE;

/// A fixed-size board with walls, the two markers and search state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    bounds: Range,
    nodes: Vec<Node>,
    start: Point,
    end: Point,
    metric: Metric,
}

impl GridModel {
    /// Create an empty board with Start and End placed.
    ///
    /// Fails with [`Error::InvalidDimensions`] if either side is below
    /// [`MIN_SIDE`], or [`Error::InvalidCoordinate`] if a marker is off the
    /// board or both markers share a cell.
    pub fn new(
        width: i32,
        height: i32,
        start: Point,
        end: Point,
        metric: Metric,
    ) -> Result<Self, Error> {
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(Error::InvalidDimensions { width, height });
        }
        let bounds = Range::board(width, height);
        for p in [start, end] {
            if !bounds.contains(p) {
                return Err(Error::InvalidCoordinate(p));
            }
        }
        if start == end {
            return Err(Error::InvalidCoordinate(end));
        }
        let mut grid = Self {
            bounds,
            nodes: vec![Node::default(); bounds.len()],
            start,
            end,
            metric,
        };
        grid.refresh_markers();
        Ok(grid)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    #[inline]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Cost model for the current marker placement.
    #[inline]
    pub fn costs(&self) -> CostModel {
        CostModel::new(self.metric, self.start, self.end)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The node at `p`, or `None` if off the board.
    #[inline]
    pub fn node(&self, p: Point) -> Option<&Node> {
        self.bounds.index(p).map(|i| &self.nodes[i])
    }

    /// The state at `p`, or `None` if off the board.
    #[inline]
    pub fn state(&self, p: Point) -> Option<CellState> {
        self.node(p).map(|n| n.state)
    }

    /// Row-major iterator over `(Point, &Node)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Node)> + '_ {
        self.bounds.iter().zip(self.nodes.iter())
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.nodes.iter().filter(|n| n.state == state).count()
    }

    fn checked_index(&self, p: Point) -> Result<usize, Error> {
        self.bounds.index(p).ok_or(Error::InvalidCoordinate(p))
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Turn an Unexplored cell into a Wall. Returns whether anything changed.
    pub fn set_wall(&mut self, p: Point) -> Result<bool, Error> {
        let i = self.checked_index(p)?;
        if self.nodes[i].state != CellState::Unexplored {
            return Ok(false);
        }
        self.nodes[i] = Node::with_state(CellState::Wall);
        Ok(true)
    }

    /// Turn a Wall back into Unexplored. Returns whether anything changed.
    pub fn clear_wall(&mut self, p: Point) -> Result<bool, Error> {
        let i = self.checked_index(p)?;
        if self.nodes[i].state != CellState::Wall {
            return Ok(false);
        }
        self.nodes[i] = Node::default();
        Ok(true)
    }

    /// Relocate Start. The old Start becomes Unexplored; a Wall under the
    /// target is replaced. Fails if `p` is off the board or is End.
    pub fn move_start(&mut self, p: Point) -> Result<bool, Error> {
        let i = self.checked_index(p)?;
        if p == self.end {
            return Err(Error::InvalidCoordinate(p));
        }
        if p == self.start {
            return Ok(false);
        }
        let old = self.checked_index(self.start)?;
        self.nodes[old] = Node::default();
        self.nodes[i] = Node::with_state(CellState::Start);
        self.start = p;
        self.refresh_markers();
        Ok(true)
    }

    /// Relocate End. Mirror of [`move_start`](GridModel::move_start).
    pub fn move_end(&mut self, p: Point) -> Result<bool, Error> {
        let i = self.checked_index(p)?;
        if p == self.start {
            return Err(Error::InvalidCoordinate(p));
        }
        if p == self.end {
            return Ok(false);
        }
        let old = self.checked_index(self.end)?;
        self.nodes[old] = Node::default();
        self.nodes[i] = Node::with_state(CellState::End);
        self.end = p;
        self.refresh_markers();
        Ok(true)
    }

    /// Wipe every Opened/Closed/Path cell, keeping walls and markers.
    pub fn reset(&mut self) {
        for n in self.nodes.iter_mut() {
            if n.state.is_search() {
                *n = Node::default();
            }
        }
        self.refresh_markers();
    }

    /// Like [`reset`](GridModel::reset), and also removes every wall.
    pub fn clear(&mut self) {
        for n in self.nodes.iter_mut() {
            if !n.state.is_marker() {
                *n = Node::default();
            }
        }
        self.refresh_markers();
    }

    /// Recompute marker costs: g(Start) = 0 and h(End) = 0. Also drops any
    /// parent recorded on End by a previous search.
    fn refresh_markers(&mut self) {
        let costs = self.costs();
        let (start, end) = (self.start, self.end);
        if let Some(i) = self.bounds.index(start) {
            self.nodes[i] = Node {
                state: CellState::Start,
                g: 0,
                h: costs.h(start),
                parent: None,
            };
        }
        if let Some(i) = self.bounds.index(end) {
            self.nodes[i] = Node {
                state: CellState::End,
                g: costs.g(end),
                h: 0,
                parent: None,
            };
        }
    }

    // -----------------------------------------------------------------------
    // Search-side transitions
    //
    // Driven only by the search engine, which keeps the parent chain and the
    // frontier consistent with them. Calling these directly can leave End
    // with a parent chain that does not lead back to Start.
    // -----------------------------------------------------------------------

    /// Store a frontier record on an Unexplored or Opened cell.
    ///
    /// Returns `false`, leaving the cell alone, for any other state.
    #[doc(hidden)]
    pub fn open(&mut self, p: Point, node: Node) -> bool {
        let Some(i) = self.bounds.index(p) else {
            return false;
        };
        if !matches!(self.nodes[i].state, CellState::Unexplored | CellState::Opened) {
            return false;
        }
        self.nodes[i] = Node {
            state: CellState::Opened,
            ..node
        };
        true
    }

    /// Opened → Closed, keeping g/h/parent. Returns the closed node.
    #[doc(hidden)]
    pub fn close(&mut self, p: Point) -> Option<Node> {
        let i = self.bounds.index(p)?;
        let n = &mut self.nodes[i];
        if n.state != CellState::Opened {
            return None;
        }
        n.state = CellState::Closed;
        Some(*n)
    }

    /// Record the cell End was reached from.
    #[doc(hidden)]
    pub fn set_end_parent(&mut self, parent: Point) {
        if let Some(i) = self.bounds.index(self.end) {
            self.nodes[i].parent = Some(parent);
        }
    }

    /// Opened/Closed → Path. Costs and parent are left as they were.
    #[doc(hidden)]
    pub fn mark_path(&mut self, p: Point) -> bool {
        let Some(i) = self.bounds.index(p) else {
            return false;
        };
        let n = &mut self.nodes[i];
        if !matches!(n.state, CellState::Opened | CellState::Closed) {
            return false;
        }
        n.state = CellState::Path;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> GridModel {
        GridModel::new(5, 5, Point::new(0, 0), Point::new(4, 0), Metric::Manhattan).unwrap()
    }

    fn assert_one_of_each_marker(g: &GridModel) {
        assert_eq!(g.count(CellState::Start), 1);
        assert_eq!(g.count(CellState::End), 1);
        assert_eq!(g.state(g.start()), Some(CellState::Start));
        assert_eq!(g.state(g.end()), Some(CellState::End));
        assert_ne!(g.start(), g.end());
    }

    #[test]
    fn new_places_markers_with_costs() {
        let g = board();
        assert_one_of_each_marker(&g);
        let s = g.node(g.start()).unwrap();
        assert_eq!((s.g, s.h), (0, 4));
        let e = g.node(g.end()).unwrap();
        assert_eq!((e.g, e.h), (4, 0));
        assert_eq!(g.count(CellState::Unexplored), 23);
    }

    #[test]
    fn new_rejects_bad_input() {
        let m = Metric::Manhattan;
        assert_eq!(
            GridModel::new(2, 5, Point::ZERO, Point::new(1, 1), m),
            Err(Error::InvalidDimensions { width: 2, height: 5 })
        );
        assert_eq!(
            GridModel::new(3, 3, Point::ZERO, Point::new(3, 0), m),
            Err(Error::InvalidCoordinate(Point::new(3, 0)))
        );
        assert_eq!(
            GridModel::new(3, 3, Point::new(1, 1), Point::new(1, 1), m),
            Err(Error::InvalidCoordinate(Point::new(1, 1)))
        );
    }

    #[test]
    fn walls_only_on_matching_cells() {
        let mut g = board();
        assert_eq!(g.set_wall(Point::new(2, 2)), Ok(true));
        assert_eq!(g.set_wall(Point::new(2, 2)), Ok(false));
        assert_eq!(g.set_wall(g.start()), Ok(false));
        assert_eq!(g.clear_wall(g.end()), Ok(false));
        assert_eq!(g.set_wall(Point::new(9, 9)), Err(Error::InvalidCoordinate(Point::new(9, 9))));
        assert_eq!(g.state(Point::new(2, 2)), Some(CellState::Wall));
        assert_eq!(g.clear_wall(Point::new(2, 2)), Ok(true));
        assert_eq!(g.state(Point::new(2, 2)), Some(CellState::Unexplored));
        assert_one_of_each_marker(&g);
    }

    #[test]
    fn moving_markers_recomputes_costs() {
        let mut g = board();
        assert_eq!(g.move_start(Point::new(0, 4)), Ok(true));
        assert_eq!(g.state(Point::new(0, 0)), Some(CellState::Unexplored));
        assert_eq!(g.node(Point::new(0, 4)).unwrap().h, 8);
        assert_eq!(g.node(g.end()).unwrap().g, 8);

        assert_eq!(g.move_end(Point::new(1, 4)), Ok(true));
        assert_eq!(g.node(g.start()).unwrap().h, 1);
        assert_eq!(g.node(g.end()).unwrap().g, 1);
        assert_one_of_each_marker(&g);
    }

    #[test]
    fn moving_onto_other_marker_fails_without_change() {
        let mut g = board();
        let before = g.clone();
        assert_eq!(g.move_start(g.end()), Err(Error::InvalidCoordinate(Point::new(4, 0))));
        assert_eq!(g.move_end(g.start()), Err(Error::InvalidCoordinate(Point::new(0, 0))));
        assert_eq!(g.move_end(Point::new(5, 0)), Err(Error::InvalidCoordinate(Point::new(5, 0))));
        assert_eq!(g.move_start(g.start()), Ok(false));
        assert_eq!(g, before);
    }

    #[test]
    fn moving_onto_wall_replaces_it() {
        let mut g = board();
        g.set_wall(Point::new(2, 2)).unwrap();
        g.move_end(Point::new(2, 2)).unwrap();
        assert_eq!(g.count(CellState::Wall), 0);
        assert_one_of_each_marker(&g);
    }

    #[test]
    fn reset_keeps_walls_clear_does_not() {
        let mut g = board();
        g.set_wall(Point::new(2, 0)).unwrap();
        assert!(g.open(Point::new(1, 0), Node::opened(1, 3, Point::new(0, 0))));
        assert!(g.open(Point::new(1, 1), Node::opened(2, 4, Point::new(0, 0))));
        g.close(Point::new(1, 0)).unwrap();
        assert!(g.mark_path(Point::new(1, 0)));
        g.set_end_parent(Point::new(1, 0));

        let mut r = g.clone();
        r.reset();
        assert_eq!(r.count(CellState::Wall), 1);
        assert_eq!(r.count(CellState::Opened) + r.count(CellState::Path), 0);
        assert_eq!(r.node(r.end()).unwrap().parent, None);
        assert_one_of_each_marker(&r);

        g.clear();
        assert_eq!(g.count(CellState::Wall), 0);
        assert_eq!(g.count(CellState::Unexplored), 23);
        assert_one_of_each_marker(&g);
    }

    #[test]
    fn search_transitions_refuse_wrong_states() {
        let mut g = board();
        g.set_wall(Point::new(2, 2)).unwrap();
        assert!(!g.open(Point::new(2, 2), Node::opened(1, 1, Point::ZERO)));
        assert!(!g.open(g.start(), Node::opened(1, 1, Point::ZERO)));
        assert!(g.close(Point::new(3, 3)).is_none());
        assert!(!g.mark_path(Point::new(2, 2)));
        assert!(!g.mark_path(g.end()));

        assert!(g.open(Point::new(3, 3), Node::opened(6, 4, Point::ZERO)));
        let closed = g.close(Point::new(3, 3)).unwrap();
        assert_eq!((closed.state, closed.g, closed.h), (CellState::Closed, 6, 4));
        assert!(!g.open(Point::new(3, 3), Node::opened(1, 1, Point::ZERO)));
        assert!(g.close(Point::new(3, 3)).is_none());
    }
}
