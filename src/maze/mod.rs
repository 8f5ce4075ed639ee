mod common;
mod game;
mod grid;
mod pathfinder;

pub use common::{Cell, CellType, Command, Direction};
pub use game::{AgentState, MazeGame, RenderState, Renderer, TextRenderer, TickOutcome};
pub use grid::{Grid, InvalidMaze, MazeError};
pub use pathfinder::{find_shortest_path, Path};
