use std::fmt::Display;

/// Content of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    Wall,
    Free,
    Start,
    Goal,
}

impl CellType {
    pub fn is_passable(&self) -> bool {
        !matches!(self, CellType::Wall)
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '1' => Some(CellType::Wall),
            '0' => Some(CellType::Free),
            'S' => Some(CellType::Start),
            'G' => Some(CellType::Goal),
            _ => None,
        }
    }
}

/// A (row, column) coordinate. Row 0 is the top of the maze.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The orthogonal neighbour in `direction`, or `None` when it would
    /// have a negative coordinate. The upper bounds are the grid's business.
    pub fn step(&self, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Cell::new(row, col))
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbour exploration order of the pathfinder. Golden paths in the
    /// tests depend on it.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row, column) unit vector.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// A discrete command produced by an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Solve,
    Quit,
}

impl Command {
    pub const MOVE_UP: Command = Command::Move(Direction::Up);
    pub const MOVE_DOWN: Command = Command::Move(Direction::Down);
    pub const MOVE_LEFT: Command = Command::Move(Direction::Left);
    pub const MOVE_RIGHT: Command = Command::Move(Direction::Right);
}

#[cfg(test)]
mod tests {
    use super::{Cell, CellType, Direction};

    #[test]
    fn test_step_follows_unit_vectors() {
        let cell = Cell::new(1, 1);

        assert_eq!(cell.step(Direction::Up), Some(Cell::new(0, 1)));
        assert_eq!(cell.step(Direction::Down), Some(Cell::new(2, 1)));
        assert_eq!(cell.step(Direction::Left), Some(Cell::new(1, 0)));
        assert_eq!(cell.step(Direction::Right), Some(Cell::new(1, 2)));
    }

    #[test]
    fn test_step_out_of_the_top_left_corner() {
        let corner = Cell::new(0, 0);

        assert_eq!(corner.step(Direction::Up), None);
        assert_eq!(corner.step(Direction::Left), None);
        assert_eq!(corner.step(Direction::Down), Some(Cell::new(1, 0)));
    }

    #[test]
    fn test_only_walls_are_impassable() {
        assert!(!CellType::Wall.is_passable());
        assert!(CellType::Free.is_passable());
        assert!(CellType::Start.is_passable());
        assert!(CellType::Goal.is_passable());
    }

    #[test]
    fn test_symbols() {
        assert_eq!(CellType::from_symbol('1'), Some(CellType::Wall));
        assert_eq!(CellType::from_symbol('0'), Some(CellType::Free));
        assert_eq!(CellType::from_symbol('S'), Some(CellType::Start));
        assert_eq!(CellType::from_symbol('G'), Some(CellType::Goal));
        assert_eq!(CellType::from_symbol('x'), None);
    }
}
