use std::str::FromStr;

use super::common::{Cell, CellType};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MazeError {
    #[error("Invalid maze: {0}")]
    InvalidMaze(#[from] InvalidMaze),
    #[error("Cell {0} is outside the maze")]
    OutOfBounds(Cell),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidMaze {
    #[error("the description has no rows")]
    Empty,
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("a {rows}x{cols} maze has more cells than can be addressed")]
    TooLarge { rows: usize, cols: usize },
    #[error("got {actual} cells, expected {expected}")]
    CellCount { expected: usize, actual: usize },
    #[error("unexpected symbol {symbol:?} at ({row}, {col})")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
    #[error("expected exactly one start cell, found {0}")]
    StartCount(usize),
    #[error("expected exactly one goal cell, found {0}")]
    GoalCount(usize),
}

/// The maze. Read-only once loaded, so it can be shared freely between
/// readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellType>,
    start: Cell,
    goal: Cell,
}

impl Grid {
    /// Builds a grid from `rows * cols` cells laid out row by row.
    pub fn load(rows: usize, cols: usize, cells: Vec<CellType>) -> Result<Self, MazeError> {
        let expected = match rows.checked_mul(cols) {
            None => return Err(InvalidMaze::TooLarge { rows, cols }.into()),
            Some(expected) => expected,
        };
        if cells.len() != expected {
            return Err(InvalidMaze::CellCount {
                expected,
                actual: cells.len(),
            }
            .into());
        }

        let position_of = |index: usize| Cell::new(index / cols, index % cols);
        let find_all = |wanted: CellType| -> Vec<Cell> {
            cells
                .iter()
                .enumerate()
                .filter(|(_, cell_type)| **cell_type == wanted)
                .map(|(index, _)| position_of(index))
                .collect()
        };

        let starts = find_all(CellType::Start);
        let start = match starts.as_slice() {
            [start] => *start,
            found => return Err(InvalidMaze::StartCount(found.len()).into()),
        };
        let goals = find_all(CellType::Goal);
        let goal = match goals.as_slice() {
            [goal] => *goal,
            found => return Err(InvalidMaze::GoalCount(found.len()).into()),
        };

        debug!("loaded {}x{} maze, start {} goal {}", rows, cols, start, goal);

        Ok(Self {
            rows,
            cols,
            cells,
            start,
            goal,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub fn type_at(&self, cell: Cell) -> Result<CellType, MazeError> {
        self.index_of(cell).map(|index| self.cells[index])
    }

    pub fn is_passable(&self, cell: Cell) -> Result<bool, MazeError> {
        self.type_at(cell).map(|cell_type| cell_type.is_passable())
    }

    /// Every cell with its type, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, CellType)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell_type)| (Cell::new(index / cols, index % cols), *cell_type))
    }

    /// Flat row-major index of `cell`.
    pub(super) fn index_of(&self, cell: Cell) -> Result<usize, MazeError> {
        if !self.contains(cell) {
            return Err(MazeError::OutOfBounds(cell));
        }
        Ok(cell.row * self.cols + cell.col)
    }

    pub(super) fn len(&self) -> usize {
        self.cells.len()
    }
}

/// Parses the character table: one line per row, `1` wall, `0` free,
/// `S` start, `G` goal. Blank lines and surrounding whitespace are ignored.
impl FromStr for Grid {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

        let cols = match lines.first() {
            None => return Err(InvalidMaze::Empty.into()),
            Some(first) => first.chars().count(),
        };

        let mut cells = Vec::with_capacity(lines.len() * cols);
        for (row, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            if len != cols {
                return Err(InvalidMaze::RaggedRow {
                    row,
                    len,
                    expected: cols,
                }
                .into());
            }

            for (col, symbol) in line.chars().enumerate() {
                let cell_type = CellType::from_symbol(symbol)
                    .ok_or(InvalidMaze::UnknownSymbol { symbol, row, col })?;
                cells.push(cell_type);
            }
        }

        Grid::load(lines.len(), cols, cells)
    }
}

#[cfg(test)]
mod tests {
    use crate::maze::common::{Cell, CellType};

    use super::{Grid, InvalidMaze, MazeError};

    #[test]
    fn test_parse_caches_start_and_goal() {
        let grid = create_grid();

        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.start(), Cell::new(0, 0));
        assert_eq!(grid.goal(), Cell::new(2, 3));
        assert_eq!(grid.type_at(grid.start()), Ok(CellType::Start));
        assert_eq!(grid.type_at(grid.goal()), Ok(CellType::Goal));
    }

    #[test]
    fn test_type_at() {
        let grid = create_grid();

        assert_eq!(grid.type_at(Cell::new(0, 2)), Ok(CellType::Wall));
        assert_eq!(grid.type_at(Cell::new(1, 1)), Ok(CellType::Free));
        assert_eq!(
            grid.type_at(Cell::new(3, 0)),
            Err(MazeError::OutOfBounds(Cell::new(3, 0)))
        );
        assert_eq!(
            grid.type_at(Cell::new(0, 4)),
            Err(MazeError::OutOfBounds(Cell::new(0, 4)))
        );
    }

    #[test]
    fn test_is_passable() {
        let grid = create_grid();

        assert_eq!(grid.is_passable(Cell::new(0, 0)), Ok(true));
        assert_eq!(grid.is_passable(Cell::new(1, 0)), Ok(false));
        assert_eq!(grid.is_passable(Cell::new(2, 3)), Ok(true));
        assert!(grid.is_passable(Cell::new(9, 9)).is_err());
    }

    #[test]
    fn test_load_rejects_wrong_cell_count() {
        let result = Grid::load(2, 2, vec![CellType::Start, CellType::Goal, CellType::Free]);

        assert_eq!(
            result,
            Err(MazeError::InvalidMaze(InvalidMaze::CellCount {
                expected: 4,
                actual: 3
            }))
        );
    }

    #[test]
    fn test_load_rejects_overflowing_dimensions() {
        let result = Grid::load(usize::MAX, 2, vec![CellType::Start, CellType::Goal]);

        assert_eq!(
            result,
            Err(MazeError::InvalidMaze(InvalidMaze::TooLarge {
                rows: usize::MAX,
                cols: 2
            }))
        );
    }

    #[test]
    fn test_load_rejects_start_and_goal_counts() {
        use CellType::*;

        let result = Grid::load(1, 3, vec![Free, Goal, Free]);
        assert_eq!(result, Err(InvalidMaze::StartCount(0).into()));

        let result = Grid::load(1, 3, vec![Start, Goal, Start]);
        assert_eq!(result, Err(InvalidMaze::StartCount(2).into()));

        let result = Grid::load(1, 3, vec![Start, Free, Free]);
        assert_eq!(result, Err(InvalidMaze::GoalCount(0).into()));

        let result = Grid::load(1, 4, vec![Goal, Start, Goal, Free]);
        assert_eq!(result, Err(InvalidMaze::GoalCount(2).into()));
    }

    #[test]
    fn test_parse_rejects_malformed_descriptions() {
        assert_eq!("".parse::<Grid>(), Err(InvalidMaze::Empty.into()));
        assert_eq!(
            "S01\n0G".parse::<Grid>(),
            Err(InvalidMaze::RaggedRow {
                row: 1,
                len: 2,
                expected: 3
            }
            .into())
        );
        assert_eq!(
            "S0x\n00G".parse::<Grid>(),
            Err(InvalidMaze::UnknownSymbol {
                symbol: 'x',
                row: 0,
                col: 2
            }
            .into())
        );
    }

    #[test]
    fn test_cells_are_row_major() {
        let grid = create_grid();
        let cells: Vec<_> = grid.cells().collect();

        assert_eq!(cells.len(), 12);
        assert_eq!(cells[0], (Cell::new(0, 0), CellType::Start));
        assert_eq!(cells[4], (Cell::new(1, 0), CellType::Wall));
        assert_eq!(cells[11], (Cell::new(2, 3), CellType::Goal));
    }

    fn create_grid() -> Grid {
        let s = r#"
S010
1010
000G
"#;
        s.parse().unwrap()
    }
}
