//! A* search that advances one expansion at a time.
//!
//! The [`Engine`] owns a [`GridModel`](stepstar_core::GridModel) and drives
//! the search over it in discrete [`step`](Engine::step)s so that a shell can
//! draw every intermediate frontier:
//!
//! - **Frontier** — open cells ordered by (f, h, row-major position)
//!   ([`Frontier`])
//! - **Step engine** — the `NotStarted → Stepping → GoalFound | Exhausted`
//!   state machine with its edit gate ([`Engine`])
//! - **Path reconstruction** — parent back-pointers walked from End
//!   ([`Path`]) and revealed one cell per tick ([`PathReveal`])
//!
//! The engine never sleeps or measures time. Auto-run cadence and reveal
//! pacing belong to the caller.

mod config;
mod engine;
mod frontier;
mod neighbors;
mod path;

pub use config::EngineConfig;
pub use engine::{Engine, SearchStats, StepOutcome};
pub use frontier::{Frontier, Upsert};
pub use neighbors::Neighbors;
pub use path::{Path, PathReveal, RevealTick};
pub use stepstar_core::{CellState, Error, Metric, Node, Point, SearchState};
