use std::{collections::VecDeque, ops::Deref};

use super::{
    common::{Cell, Direction},
    grid::{Grid, MazeError},
};
use tracing::debug;

/// Cells from the search origin to the goal, both included.
/// Empty when the goal cannot be reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<Cell>);

impl Path {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self(cells)
    }

    pub fn none() -> Self {
        Self(vec![])
    }

    /// Number of moves needed to walk the path.
    pub fn steps(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

impl Deref for Path {
    type Target = [Cell];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Breadth-first search from `origin` to the grid's goal over passable
/// cells, moving up, down, left and right only.
///
/// Cells are marked visited when enqueued, so each cell enters the queue at
/// most once. Neighbours are explored in [`Direction::ALL`] order, which
/// decides between equally short paths.
pub fn find_shortest_path(grid: &Grid, origin: Cell) -> Result<Path, MazeError> {
    let origin_index = grid.index_of(origin)?;
    if !grid.is_passable(origin)? {
        return Ok(Path::none());
    }

    let goal = grid.goal();
    let mut came_from: Vec<Option<Cell>> = vec![None; grid.len()];
    let mut visited = vec![false; grid.len()];
    let mut queue = VecDeque::from([origin]);
    visited[origin_index] = true;

    let mut expanded = 0;
    while let Some(cell) = queue.pop_front() {
        expanded += 1;

        if cell == goal {
            debug!("goal reached from {} after expanding {} cells", origin, expanded);
            return Ok(walk_back(grid, &came_from, cell));
        }

        for direction in Direction::ALL {
            let next = match cell.step(direction) {
                Some(next) if grid.contains(next) => next,
                _ => continue,
            };
            let index = grid.index_of(next)?;
            if visited[index] || !grid.is_passable(next)? {
                continue;
            }

            visited[index] = true;
            came_from[index] = Some(cell);
            queue.push_back(next);
        }
    }

    debug!("no path from {} after expanding {} cells", origin, expanded);
    Ok(Path::none())
}

fn walk_back(grid: &Grid, came_from: &[Option<Cell>], end: Cell) -> Path {
    let mut cells = vec![end];
    let mut current = end;
    // only the origin has no predecessor
    while let Some(previous) = came_from[current.row * grid.cols() + current.col] {
        cells.push(previous);
        current = previous;
    }
    cells.reverse();
    Path::new(cells)
}
