//! Boards described as ASCII art.
//!
//! A [`Layout`] is the editable part of a board written as text, one line
//! per row:
//!
//! ```text
//! S..#.
//! ...#.
//! .....
//! ...#E
//! ```
//!
//! `.` is Unexplored, `#` a Wall, `S` and `E` the markers. [`Layout::render`]
//! goes the other way and also shows search state: `o` Opened, `x` Closed,
//! `*` Path.

use std::fmt;

use crate::cell::CellState;
use crate::cost::Metric;
use crate::error::Error;
use crate::geom::Point;
use crate::grid::GridModel;

/// Characters accepted by [`Layout::new`].
pub const LAYOUT_RUNES: &str = ".#SE";

/// The character a cell state is drawn with.
pub const fn rune(state: CellState) -> char {
    match state {
        CellState::Unexplored => '.',
        CellState::Wall => '#',
        CellState::Start => 'S',
        CellState::End => 'E',
        CellState::Opened => 'o',
        CellState::Closed => 'x',
        CellState::Path => '*',
    }
}

/// A parsed, validated board description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    rows: Vec<Vec<char>>,
    start: Point,
    end: Point,
}

impl Layout {
    /// Parse a layout.
    ///
    /// Leading/trailing whitespace is trimmed from the whole string and from
    /// each line. Every line must have the same width, and `S` and `E` must
    /// each appear exactly once.
    pub fn new(s: &str) -> Result<Self, LayoutError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LayoutError::Empty);
        }
        let mut rows: Vec<Vec<char>> = Vec::new();
        let mut start = None;
        let mut end = None;
        for (y, line) in s.lines().enumerate() {
            let row: Vec<char> = line.trim().chars().collect();
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(LayoutError::InconsistentSize { line: y });
                }
            }
            for (x, &ch) in row.iter().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let slot = match ch {
                    'S' => &mut start,
                    'E' => &mut end,
                    _ if LAYOUT_RUNES.contains(ch) => continue,
                    _ => return Err(LayoutError::InvalidRune { ch, pos }),
                };
                if slot.replace(pos).is_some() {
                    return Err(LayoutError::DuplicateMarker(ch));
                }
            }
            rows.push(row);
        }
        let start = start.ok_or(LayoutError::MissingMarker('S'))?;
        let end = end.ok_or(LayoutError::MissingMarker('E'))?;
        Ok(Self { rows, start, end })
    }

    /// (width, height) in cells.
    pub fn size(&self) -> Point {
        let w = self.rows.first().map_or(0, Vec::len);
        Point::new(w as i32, self.rows.len() as i32)
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Build the board this layout describes.
    pub fn to_grid(&self, metric: Metric) -> Result<GridModel, LayoutError> {
        let size = self.size();
        let mut grid = GridModel::new(size.x, size.y, self.start, self.end, metric)?;
        for (y, row) in self.rows.iter().enumerate() {
            for (x, &ch) in row.iter().enumerate() {
                if ch == '#' {
                    grid.set_wall(Point::new(x as i32, y as i32))?;
                }
            }
        }
        Ok(grid)
    }

    /// Draw a board, search state included, one line per row.
    pub fn render(grid: &GridModel) -> String {
        let w = grid.width().max(0) as usize;
        let mut out = String::with_capacity((w + 1) * grid.height().max(0) as usize);
        for (p, node) in grid.iter() {
            if p.x == 0 && p.y > 0 {
                out.push('\n');
            }
            out.push(rune(node.state));
        }
        out
    }
}

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Nothing but whitespace.
    Empty,
    /// Line `line` is not as wide as the first one.
    InconsistentSize { line: usize },
    /// A character outside [`LAYOUT_RUNES`].
    InvalidRune { ch: char, pos: Point },
    /// `S` or `E` does not appear.
    MissingMarker(char),
    /// `S` or `E` appears more than once.
    DuplicateMarker(char),
    /// The layout parsed but is not a valid board.
    Grid(Error),
}

impl From<Error> for LayoutError {
    fn from(e: Error) -> Self {
        Self::Grid(e)
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("layout: empty"),
            Self::InconsistentSize { line } => {
                write!(f, "layout: line {line} differs in width from the first line")
            }
            Self::InvalidRune { ch, pos } => {
                write!(f, "layout contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingMarker(ch) => write!(f, "layout: missing marker {ch}"),
            Self::DuplicateMarker(ch) => write!(f, "layout: marker {ch} appears more than once"),
            Self::Grid(e) => write!(f, "layout: {e}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "
        S..#.
        ...#.
        .....
        ...#E";

    #[test]
    fn parse_and_build() {
        let l = Layout::new(ROOM).unwrap();
        assert_eq!(l.size(), Point::new(5, 4));
        assert_eq!(l.start(), Point::new(0, 0));
        assert_eq!(l.end(), Point::new(4, 3));
        let g = l.to_grid(Metric::Manhattan).unwrap();
        assert_eq!(g.count(CellState::Wall), 3);
        assert_eq!(g.state(Point::new(3, 1)), Some(CellState::Wall));
        assert_eq!(g.node(g.start()).unwrap().h, 7);
    }

    #[test]
    fn render_matches_source() {
        let g = Layout::new(ROOM).unwrap().to_grid(Metric::Manhattan).unwrap();
        assert_eq!(Layout::render(&g), "S..#.\n...#.\n.....\n...#E");
    }

    #[test]
    fn render_shows_search_state() {
        let mut g = Layout::new("S..\n...\n..E").unwrap().to_grid(Metric::Manhattan).unwrap();
        g.open(Point::new(1, 0), crate::Node::opened(1, 3, Point::ZERO));
        g.open(Point::new(0, 1), crate::Node::opened(1, 3, Point::ZERO));
        g.close(Point::new(0, 1));
        assert_eq!(Layout::render(&g), "So.\nx..\n..E");
    }

    #[test]
    fn rejects_malformed_layouts() {
        assert_eq!(Layout::new("  \n "), Err(LayoutError::Empty));
        assert_eq!(
            Layout::new("S..\n..\n..E"),
            Err(LayoutError::InconsistentSize { line: 1 })
        );
        assert_eq!(
            Layout::new("S.?\n...\n..E"),
            Err(LayoutError::InvalidRune { ch: '?', pos: Point::new(2, 0) })
        );
        assert_eq!(Layout::new("S..\n...\n..."), Err(LayoutError::MissingMarker('E')));
        assert_eq!(Layout::new("S.S\n...\n..E"), Err(LayoutError::DuplicateMarker('S')));
    }

    #[test]
    fn too_small_layout_is_a_grid_error() {
        let l = Layout::new("SE").unwrap();
        assert_eq!(
            l.to_grid(Metric::Manhattan),
            Err(LayoutError::Grid(Error::InvalidDimensions { width: 2, height: 1 }))
        );
    }
}
