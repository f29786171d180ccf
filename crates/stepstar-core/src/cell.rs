//! Per-cell search record: [`CellState`] and [`Node`].

use std::fmt;

use crate::geom::Point;

/// Lifecycle state of one board position. Exactly one per cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Unexplored,
    Wall,
    Start,
    End,
    /// Discovered, waiting in the frontier.
    Opened,
    /// Expanded; g/h are final.
    Closed,
    /// Revealed as part of the found route. Presentation only.
    Path,
}

impl CellState {
    /// Start or End.
    #[inline]
    pub const fn is_marker(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Written by a search, wiped by reset.
    #[inline]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Opened | Self::Closed | Self::Path)
    }
}

/// Search record for one cell.
///
/// `f` is not stored; [`Node::f`] always derives it from the current `g` and
/// `h`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub state: CellState,
    /// Accumulated cost from Start.
    pub g: u32,
    /// Heuristic cost to End.
    pub h: u32,
    /// Cell this one was discovered from.
    pub parent: Option<Point>,
}

impl Node {
    /// A bare node in `state` with zero costs and no parent.
    #[inline]
    pub const fn with_state(state: CellState) -> Self {
        Self {
            state,
            g: 0,
            h: 0,
            parent: None,
        }
    }

    /// A freshly discovered frontier node.
    #[inline]
    pub const fn opened(g: u32, h: u32, parent: Point) -> Self {
        Self {
            state: CellState::Opened,
            g,
            h,
            parent: Some(parent),
        }
    }

    /// `g + h`, the expansion priority.
    #[inline]
    pub const fn f(&self) -> u32 {
        self.g + self.h
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g={}, h={}, f={}", self.g, self.h, self.f())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f_follows_g_and_h() {
        let mut n = Node::opened(3, 4, Point::ZERO);
        assert_eq!(n.f(), 7);
        n.g = 1;
        assert_eq!(n.f(), 5);
        assert_eq!(n.to_string(), "g=1, h=4, f=5");
    }

    #[test]
    fn state_classes() {
        assert!(CellState::Start.is_marker());
        assert!(!CellState::Wall.is_marker());
        assert!(CellState::Path.is_search());
        assert!(!CellState::Unexplored.is_search());
        assert_eq!(Node::default().state, CellState::Unexplored);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn node_roundtrip() {
        let n = Node::opened(2, 5, Point::new(1, 3));
        let json = serde_json::to_string(&n).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
        assert_eq!(back.f(), 7);
    }

    #[test]
    fn state_is_a_plain_string() {
        let json = serde_json::to_string(&CellState::Closed).unwrap();
        assert_eq!(json, "\"Closed\"");
    }
}
