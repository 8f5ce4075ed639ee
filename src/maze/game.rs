use std::{fmt::Display, sync::Arc};

use super::{
    common::{Cell, CellType, Command, Direction},
    grid::{Grid, MazeError},
    pathfinder::{find_shortest_path, Path},
};
use tracing::{debug, info};

/// Where the agent stands and the overlay it last asked for.
///
/// `overlay` is `None` until a solve and again after every move, because an
/// old path no longer starts at the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentState {
    pub cell: Cell,
    pub overlay: Option<Path>,
}

impl AgentState {
    pub fn new(cell: Cell) -> Self {
        Self {
            cell,
            overlay: None,
        }
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Moved(Cell),
    Bumped,
    Solved { len: usize },
    Quit,
}

#[derive(Debug)]
pub struct MazeGame {
    grid: Arc<Grid>,
    agent: AgentState,
}

impl MazeGame {
    pub fn new(grid: Arc<Grid>) -> Self {
        let agent = AgentState::new(grid.start());
        Self { grid, agent }
    }

    /// Applies at most one command. Bumping into a wall or the border is a
    /// no-op, and finding no path installs an empty overlay.
    pub fn play(&mut self, command: Option<Command>) -> Result<TickOutcome, MazeError> {
        let command = match command {
            None => return Ok(TickOutcome::Idle),
            Some(command) => command,
        };

        info!("play with {:?}", command);

        match command {
            Command::Move(direction) => Ok(self.move_agent(direction)),
            Command::Solve => {
                let path = find_shortest_path(&self.grid, self.agent.cell)?;
                let len = path.len();
                info!("solved from {}: {} cells", self.agent.cell, len);
                self.agent.overlay = Some(path);
                Ok(TickOutcome::Solved { len })
            }
            Command::Quit => Ok(TickOutcome::Quit),
        }
    }

    /// Feeds `commands` one per tick and hands every resulting frame to
    /// `renderer`, until a `Quit` or the end of the input.
    pub fn run<I, R>(&mut self, commands: I, renderer: &mut R) -> Result<(), MazeError>
    where
        I: IntoIterator<Item = Command>,
        R: Renderer + ?Sized,
    {
        renderer.render(&self.render_state());

        for command in commands {
            if self.play(Some(command))? == TickOutcome::Quit {
                info!("quit");
                return Ok(());
            }
            renderer.render(&self.render_state());
        }

        Ok(())
    }

    pub fn render_state(&self) -> RenderState<'_> {
        RenderState {
            grid: &self.grid,
            agent: self.agent.cell,
            goal: self.grid.goal(),
            path: self.agent.overlay.as_ref(),
        }
    }

    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    pub fn agent(&self) -> &AgentState {
        &self.agent
    }

    pub fn at_goal(&self) -> bool {
        self.agent.cell == self.grid.goal()
    }

    fn move_agent(&mut self, direction: Direction) -> TickOutcome {
        let candidate = self
            .agent
            .cell
            .step(direction)
            .filter(|cell| self.grid.is_passable(*cell).unwrap_or(false));

        match candidate {
            Some(cell) => {
                self.agent.cell = cell;
                self.agent.overlay = None;
                TickOutcome::Moved(cell)
            }
            None => {
                debug!("move {:?} from {} rejected", direction, self.agent.cell);
                TickOutcome::Bumped
            }
        }
    }
}

/// Read-only frame for a renderer.
#[derive(Debug, Clone, Copy)]
pub struct RenderState<'a> {
    pub grid: &'a Grid,
    pub agent: Cell,
    pub goal: Cell,
    pub path: Option<&'a Path>,
}

impl RenderState<'_> {
    pub fn on_path(&self, cell: Cell) -> bool {
        self.path.map_or(false, |path| path.contains(&cell))
    }
}

/// ASCII frame: `#` wall, `.` free, `S` start, `G` goal, `*` overlay,
/// `@` agent.
impl Display for RenderState<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (cell, cell_type) in self.grid.cells() {
            let c = if cell == self.agent {
                '@'
            } else if cell == self.goal {
                'G'
            } else if self.on_path(cell) {
                '*'
            } else {
                match cell_type {
                    CellType::Wall => '#',
                    CellType::Free => '.',
                    CellType::Start => 'S',
                    CellType::Goal => 'G',
                }
            };
            write!(f, "{}", c)?;
            if cell.col + 1 == self.grid.cols() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

pub trait Renderer {
    fn render(&mut self, state: &RenderState<'_>);
}

/// Collects every frame as text. Handy without a display.
#[derive(Debug, Default)]
pub struct TextRenderer {
    pub frames: Vec<String>,
}

impl Renderer for TextRenderer {
    fn render(&mut self, state: &RenderState<'_>) {
        self.frames.push(state.to_string());
    }
}
