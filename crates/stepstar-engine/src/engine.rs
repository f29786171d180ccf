//! The step engine: one board, one frontier, one search state machine.

use stepstar_core::{CellState, Error, GridModel, Node, Point, SearchState};

use crate::config::EngineConfig;
use crate::frontier::{Frontier, Upsert};
use crate::neighbors::Neighbors;
use crate::path::{Path, PathReveal, RevealTick};

/// What a single [`Engine::step`] achieved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepOutcome {
    /// A cell was expanded and the search goes on.
    Continuing,
    /// End was reached; a path is available.
    GoalFound,
    /// The frontier ran dry before End was reached.
    NoPathExists,
}

/// Counters for the current search. Zeroed by reset and clear.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// `step` calls that did work (terminal no-ops excluded).
    pub steps: u32,
    /// Cells whose neighbors were examined, Start included.
    pub expansions: u32,
    /// Cells moved from Unexplored to Opened.
    pub opened: u32,
    /// Opened cells that received a cheaper route.
    pub improved: u32,
}

/// An interactive A* session over one board.
///
/// Edits are accepted only in [`SearchState::NotStarted`]. The first
/// [`step`](Engine::step) locks the board; [`reset`](Engine::reset) and
/// [`clear`](Engine::clear) unlock it again.
#[derive(Debug)]
pub struct Engine {
    grid: GridModel,
    frontier: Frontier,
    state: SearchState,
    stats: SearchStats,
    neighbors: Neighbors,
    // Bumped by reset/clear so outstanding reveals notice they are stale.
    generation: u32,
    place_start_next: bool,
}

impl Engine {
    /// Create an engine on an empty board described by `config`.
    pub fn new(config: EngineConfig) -> Result<Self, Error> {
        let grid = GridModel::new(
            config.width,
            config.height,
            config.start,
            config.end,
            config.metric,
        )?;
        Ok(Self::with_grid(grid))
    }

    /// Create an engine with the default metric.
    pub fn initialize(width: i32, height: i32, start: Point, end: Point) -> Result<Self, Error> {
        Self::new(EngineConfig {
            width,
            height,
            start,
            end,
            ..Default::default()
        })
    }

    /// Take over a prepared board. Any search state on it is wiped.
    pub fn with_grid(mut grid: GridModel) -> Self {
        grid.reset();
        Self {
            grid,
            frontier: Frontier::new(),
            state: SearchState::NotStarted,
            stats: SearchStats::default(),
            neighbors: Neighbors::new(),
            generation: 0,
            place_start_next: true,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    #[inline]
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// State of the cell at `p`, or `None` if off the board.
    #[inline]
    pub fn cell_state(&self, p: Point) -> Option<CellState> {
        self.grid.state(p)
    }

    /// Full record (state, g, h, parent) of the cell at `p`.
    #[inline]
    pub fn node(&self, p: Point) -> Option<&Node> {
        self.grid.node(p)
    }

    /// Whether the next marker placement moves Start (otherwise End).
    #[inline]
    pub fn places_start_next(&self) -> bool {
        self.place_start_next
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    fn ensure_editable(&self) -> Result<(), Error> {
        if self.state != SearchState::NotStarted {
            return Err(Error::EditNotAllowed(self.state));
        }
        Ok(())
    }

    /// Turn an Unexplored cell into a Wall. Other cells are left alone.
    pub fn set_wall(&mut self, p: Point) -> Result<bool, Error> {
        self.ensure_editable()?;
        let changed = self.grid.set_wall(p)?;
        if changed {
            log::debug!("wall set at {p}");
        }
        Ok(changed)
    }

    /// Turn a Wall back into Unexplored. Other cells are left alone.
    pub fn clear_wall(&mut self, p: Point) -> Result<bool, Error> {
        self.ensure_editable()?;
        let changed = self.grid.clear_wall(p)?;
        if changed {
            log::debug!("wall cleared at {p}");
        }
        Ok(changed)
    }

    pub fn move_start(&mut self, p: Point) -> Result<bool, Error> {
        self.ensure_editable()?;
        let changed = self.grid.move_start(p)?;
        if changed {
            log::debug!("start moved to {p}");
        }
        Ok(changed)
    }

    pub fn move_end(&mut self, p: Point) -> Result<bool, Error> {
        self.ensure_editable()?;
        let changed = self.grid.move_end(p)?;
        if changed {
            log::debug!("end moved to {p}");
        }
        Ok(changed)
    }

    /// Move Start and End alternately, Start first.
    ///
    /// A target already holding either marker is ignored and does not
    /// advance the alternation.
    pub fn place_marker(&mut self, p: Point) -> Result<bool, Error> {
        self.ensure_editable()?;
        match self.grid.state(p) {
            None => return Err(Error::InvalidCoordinate(p)),
            Some(s) if s.is_marker() => return Ok(false),
            Some(_) => {}
        }
        let changed = if self.place_start_next {
            self.move_start(p)?
        } else {
            self.move_end(p)?
        };
        self.place_start_next = !self.place_start_next;
        Ok(changed)
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Advance the search by one expansion.
    ///
    /// The first call expands Start directly. Later calls pop the best
    /// frontier cell, close it and expand it. Once a terminal outcome is
    /// reported, further calls repeat it without touching the board.
    pub fn step(&mut self) -> StepOutcome {
        let current = match self.state {
            SearchState::GoalFound => return StepOutcome::GoalFound,
            SearchState::Exhausted => return StepOutcome::NoPathExists,
            SearchState::NotStarted => {
                self.state = SearchState::Stepping;
                self.stats.steps += 1;
                let start = self.grid.start();
                log::debug!("search started at {start}");
                return self.expand(start, 0);
            }
            SearchState::Stepping => {
                self.stats.steps += 1;
                self.frontier.extract_best()
            }
        };

        let Some(p) = current else {
            self.state = SearchState::Exhausted;
            log::info!(
                "frontier exhausted after {} expansions; no path exists",
                self.stats.expansions
            );
            return StepOutcome::NoPathExists;
        };
        match self.grid.close(p) {
            Some(node) => self.expand(p, node.g),
            None => {
                // Frontier and board disagree; never expand a non-open cell.
                log::warn!("frontier yielded {p}, which is not an open cell");
                StepOutcome::Continuing
            }
        }
    }

    fn expand(&mut self, p: Point, g: u32) -> StepOutcome {
        self.stats.expansions += 1;
        let costs = self.grid.costs();
        log::debug!(
            "expanding {p} (g={g}, h={}), frontier size {}",
            costs.h(p),
            self.frontier.len()
        );

        let mut neighbors = std::mem::take(&mut self.neighbors);
        let grid = &self.grid;
        let candidates = neighbors.all(p, |n| {
            grid.state(n).is_some_and(|s| s != CellState::Wall)
        });

        let mut outcome = StepOutcome::Continuing;
        for &n in candidates {
            match self.grid.state(n) {
                Some(CellState::End) => {
                    self.grid.set_end_parent(p);
                    self.state = SearchState::GoalFound;
                    outcome = StepOutcome::GoalFound;
                    log::info!(
                        "goal {n} reached from {p} after {} expansions",
                        self.stats.expansions
                    );
                    break;
                }
                Some(CellState::Unexplored | CellState::Opened) => {
                    let g2 = g + costs.step(p, n);
                    let h2 = costs.h(n);
                    let result = self.frontier.upsert(&mut self.grid, n, g2, h2, p);
                    match result {
                        Upsert::Opened => self.stats.opened += 1,
                        Upsert::Improved => self.stats.improved += 1,
                        Upsert::Kept | Upsert::Rejected => {}
                    }
                    log::trace!("{n}: {result:?} with g={g2}, h={h2} via {p}");
                }
                _ => {}
            }
        }

        self.neighbors = neighbors;
        outcome
    }

    /// Step until a terminal outcome or until `max_steps` steps were taken.
    ///
    /// No pacing happens here; a driver that wants a visible cadence calls
    /// [`step`](Engine::step) itself.
    pub fn run(&mut self, max_steps: usize) -> StepOutcome {
        let mut outcome = match self.state {
            SearchState::GoalFound => StepOutcome::GoalFound,
            SearchState::Exhausted => StepOutcome::NoPathExists,
            _ => StepOutcome::Continuing,
        };
        for _ in 0..max_steps {
            if outcome != StepOutcome::Continuing {
                break;
            }
            outcome = self.step();
        }
        outcome
    }

    /// Wipe search state, keeping walls and markers. Cancels reveals.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.restart();
        log::debug!("search reset");
    }

    /// Wipe search state and walls, keeping markers. Cancels reveals.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.restart();
        log::debug!("board cleared");
    }

    fn restart(&mut self) {
        self.frontier.clear();
        self.state = SearchState::NotStarted;
        self.stats = SearchStats::default();
        self.generation = self.generation.wrapping_add(1);
        self.place_start_next = true;
    }

    // -----------------------------------------------------------------------
    // Path
    // -----------------------------------------------------------------------

    /// The found route, Start excluded, End included.
    pub fn path(&self) -> Result<Path, Error> {
        if self.state != SearchState::GoalFound {
            return Err(Error::NoPathAvailable);
        }
        Path::reconstruct(&self.grid)
    }

    /// Begin revealing the found route one cell per
    /// [`reveal_tick`](Engine::reveal_tick).
    pub fn reveal(&self) -> Result<PathReveal, Error> {
        Ok(PathReveal::new(&self.path()?, self.generation))
    }

    /// Mark the next cell of `reveal` as Path.
    pub fn reveal_tick(&mut self, reveal: &mut PathReveal) -> RevealTick {
        if reveal.generation != self.generation || self.state != SearchState::GoalFound {
            reveal.cancel();
            return RevealTick::Cancelled;
        }
        match reveal.advance() {
            Some(p) => {
                self.grid.mark_path(p);
                RevealTick::Revealed(p)
            }
            None => RevealTick::Done,
        }
    }

    /// Reveal the whole route at once. Returns the number of cells marked.
    pub fn reveal_all(&mut self) -> Result<usize, Error> {
        let mut reveal = self.reveal()?;
        let mut n = 0;
        while let RevealTick::Revealed(_) = self.reveal_tick(&mut reveal) {
            n += 1;
        }
        Ok(n)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn stats_snapshot() {
        let mut e = Engine::initialize(5, 5, Point::new(0, 0), Point::new(4, 0)).unwrap();
        assert_eq!(e.run(100), StepOutcome::GoalFound);
        let json = serde_json::to_string(&e.stats()).unwrap();
        let back: SearchStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e.stats());
        assert_eq!(serde_json::to_string(&StepOutcome::GoalFound).unwrap(), "\"GoalFound\"");
    }
}
