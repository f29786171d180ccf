//! Path reconstruction and the step-by-step reveal of a found route.

use stepstar_core::{Error, GridModel, Point};

/// A found route: every cell after Start, in walking order, ending at End.
///
/// The sequence is owned, so it can be iterated any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Point>,
}

impl Path {
    /// Walk parent back-pointers from End to Start.
    ///
    /// Fails with [`Error::NoPathAvailable`] if End has no parent, or if the
    /// chain breaks or runs longer than the board has cells before reaching
    /// Start.
    pub fn reconstruct(grid: &GridModel) -> Result<Self, Error> {
        let (start, end) = (grid.start(), grid.end());
        let limit = grid.bounds().len();
        let mut cells = vec![end];
        let mut cur = end;
        loop {
            let Some(parent) = grid.node(cur).and_then(|n| n.parent) else {
                return Err(Error::NoPathAvailable);
            };
            if parent == start {
                break;
            }
            if cells.len() >= limit {
                log::warn!("parent chain from {end} exceeds {limit} cells; giving up");
                return Err(Error::NoPathAvailable);
            }
            cells.push(parent);
            cur = parent;
        }
        cells.reverse();
        Ok(Self { cells })
    }

    /// Number of cells, End included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` for a reconstructed path, which holds at least End.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Point] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.cells.iter()
    }

    /// Cells strictly between Start and End; the ones a reveal marks.
    pub fn interior(&self) -> &[Point] {
        match self.cells.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;
    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Result of one [`Engine::reveal_tick`](crate::Engine::reveal_tick).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealTick {
    /// This cell just became Path.
    Revealed(Point),
    /// Every interior cell has been revealed.
    Done,
    /// The board was reset or cleared after the reveal began.
    Cancelled,
}

/// Cursor over a path being revealed one cell per tick.
///
/// Created by [`Engine::reveal`](crate::Engine::reveal). It remembers the
/// engine generation it was created in; once the engine resets or clears,
/// every further tick reports [`RevealTick::Cancelled`].
#[derive(Debug, Clone)]
pub struct PathReveal {
    cells: Vec<Point>,
    next: usize,
    pub(crate) generation: u32,
}

impl PathReveal {
    pub(crate) fn new(path: &Path, generation: u32) -> Self {
        Self {
            cells: path.interior().to_vec(),
            next: 0,
            generation,
        }
    }

    /// Cells not yet revealed.
    pub fn remaining(&self) -> usize {
        self.cells.len() - self.next
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.cells.len()
    }

    pub(crate) fn advance(&mut self) -> Option<Point> {
        let p = self.cells.get(self.next).copied()?;
        self.next += 1;
        Some(p)
    }

    pub(crate) fn cancel(&mut self) {
        self.next = self.cells.len();
    }
}
