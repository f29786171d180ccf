//! **stepstar-core** — the board an interactive A* search runs on.
//!
//! This crate provides the passive half of the *stepstar* engine: geometry
//! primitives, the per-cell search record, the cost model, and the editable
//! [`GridModel`] that enforces exactly one Start and one End. The stepping
//! search itself lives in `stepstar-engine`.

pub mod cell;
pub mod cost;
pub mod error;
pub mod geom;
pub mod grid;
pub mod layout;

pub use cell::{CellState, Node};
pub use cost::{CostModel, Metric, chebyshev, manhattan};
pub use error::{Error, SearchState};
pub use geom::{Point, Range};
pub use grid::GridModel;
pub use layout::{Layout, LayoutError};

/// Smallest meaningful board side, in cells.
pub const MIN_SIDE: i32 = 3;
