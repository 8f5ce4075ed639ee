use std::sync::Arc;

use bevy::{
    app::AppExit,
    input::{keyboard::KeyboardInput, ButtonState},
    prelude::*,
};

use crate::maze::{Cell, CellType, Command, Grid, MazeGame, TickOutcome};

use self::{
    components::*,
    events::{GameTick, TickPlayedEvent},
    resources::{CommandQueueResource, DrawConfigurationResource, GameTimerResource},
};

const FLOOR_Z: f32 = 0.;
const PATH_Z: f32 = 1.;
// The agent can stand on the goal, so it should be bigger
const GOAL_Z: f32 = 2.;
const AGENT_Z: f32 = 3.;

// Gap between cells, the clear colour shows through as grid lines
const CELL_GAP: f32 = 2.;

pub struct MazePlugin {
    pub rect: UiRect<f32>,
    pub grid: Arc<Grid>,
    pub tick_seconds: f32,
}

impl Plugin for MazePlugin {
    fn build(&self, app: &mut App) {
        let cell_width = (self.rect.right - self.rect.left) / self.grid.cols() as f32;
        let cell_height = (self.rect.top - self.rect.bottom) / self.grid.rows() as f32;
        let cell_size = cell_height.min(cell_width);

        app.insert_resource(MazeGame::new(self.grid.clone()))
            .insert_resource(CommandQueueResource::default())
            .insert_resource(DrawConfigurationResource {
                cell_size,
                half_cell: cell_size / 2.,
                origin: (self.rect.left, self.rect.top),
            })
            .insert_resource(GameTimerResource(Timer::from_seconds(
                self.tick_seconds,
                true,
            )))
            .init_resource::<SpriteBundles>()
            .add_event::<GameTick>()
            .add_event::<TickPlayedEvent>()
            .add_startup_system(draw_field)
            .add_startup_system(draw_agent)
            .add_system(game_tick)
            .add_system(queue_commands.before("play"))
            .add_system(play.label("play"))
            .add_system(update_agent.after("play"))
            .add_system(update_overlay.after("play"));
    }
}

fn game_tick(
    time: Res<Time>,
    mut game_timers: ResMut<GameTimerResource>,
    mut tick_event_writer: EventWriter<GameTick>,
) {
    let game_timers = &mut game_timers.0;
    if !game_timers.tick(time.delta()).finished() {
        return;
    }

    tick_event_writer.send(GameTick);
}

fn queue_commands(
    mut keyboard_input_events: EventReader<KeyboardInput>,
    mut queue: ResMut<CommandQueueResource>,
) {
    let commands = keyboard_input_events
        .iter()
        .filter(|ki| matches!(ki.state, ButtonState::Pressed))
        .filter_map(|ki| ki.key_code)
        .filter_map(command_for_key);

    for command in commands {
        debug!("queued {:?}", command);
        queue.0.push_back(command);
    }
}

fn command_for_key(key_code: KeyCode) -> Option<Command> {
    match key_code {
        KeyCode::W | KeyCode::Up => Some(Command::MOVE_UP),
        KeyCode::S | KeyCode::Down => Some(Command::MOVE_DOWN),
        KeyCode::A | KeyCode::Left => Some(Command::MOVE_LEFT),
        KeyCode::D | KeyCode::Right => Some(Command::MOVE_RIGHT),
        KeyCode::Space => Some(Command::Solve),
        KeyCode::Escape => Some(Command::Quit),
        _ => None,
    }
}

fn play(
    mut tick_event: EventReader<GameTick>,
    mut queue: ResMut<CommandQueueResource>,
    mut maze_game: ResMut<MazeGame>,
    mut tick_played_event_writer: EventWriter<TickPlayedEvent>,
    mut app_exit_event_writer: EventWriter<AppExit>,
) {
    if tick_event.iter().count() == 0 {
        return;
    }

    // Leave the game untouched on idle ticks so nothing is redrawn
    let command = match queue.0.pop_front() {
        None => return,
        Some(command) => command,
    };

    match maze_game.play(Some(command)) {
        Ok(TickOutcome::Quit) => app_exit_event_writer.send(AppExit),
        Ok(outcome) => tick_played_event_writer.send(TickPlayedEvent { outcome }),
        Err(error) => error!("Cannot play {:?}: {}", command, error),
    }
}

fn update_agent(
    draw_configuration: Res<DrawConfigurationResource>,
    maze_game: Res<MazeGame>,
    mut agent_query: Query<&mut Transform, With<AgentComponent>>,
) {
    if !maze_game.is_changed() {
        return;
    }

    let state = maze_game.render_state();
    for mut transform in agent_query.iter_mut() {
        move_to(&mut transform, state.agent, &draw_configuration);
    }
}

fn update_overlay(
    mut commands: Commands,
    bundles: Res<SpriteBundles>,
    draw_configuration: Res<DrawConfigurationResource>,
    maze_game: Res<MazeGame>,
    path_query: Query<Entity, With<PathComponent>>,
) {
    if !maze_game.is_changed() {
        return;
    }

    for entity in path_query.iter() {
        commands.entity(entity).despawn();
    }

    let path = match maze_game.render_state().path {
        None => return,
        Some(path) => path,
    };

    for cell in path.iter() {
        let mut sprite = bundles.path();
        move_to(&mut sprite.transform, *cell, &draw_configuration);
        sprite.transform.translation.z = PATH_Z;

        commands.spawn_bundle(sprite).insert(PathComponent);
    }
}

fn draw_field(
    mut commands: Commands,
    bundles: Res<SpriteBundles>,
    draw_configuration: Res<DrawConfigurationResource>,
    maze_game: Res<MazeGame>,
) {
    let state = maze_game.render_state();

    for (cell, cell_type) in state.grid.cells() {
        let mut sprite = match cell_type {
            CellType::Wall => bundles.wall(),
            _ => bundles.floor(),
        };
        move_to(&mut sprite.transform, cell, &draw_configuration);
        sprite.transform.translation.z = FLOOR_Z;

        commands.spawn_bundle(sprite);
    }

    let mut goal = bundles.goal();
    move_to(&mut goal.transform, state.goal, &draw_configuration);
    goal.transform.translation.z = GOAL_Z;

    commands.spawn_bundle(goal).insert(GoalComponent);
}

fn draw_agent(
    mut commands: Commands,
    bundles: Res<SpriteBundles>,
    draw_configuration: Res<DrawConfigurationResource>,
    maze_game: Res<MazeGame>,
) {
    let mut agent = bundles.agent();
    move_to(
        &mut agent.transform,
        maze_game.render_state().agent,
        &draw_configuration,
    );
    agent.transform.translation.z = AGENT_Z;

    commands.spawn_bundle(agent).insert(AgentComponent);
}

/// Row 0 is drawn at the top of the rect.
fn move_to(transform: &mut Transform, to: Cell, draw_configuration: &DrawConfigurationResource) {
    transform.translation.x = to.col as f32 * draw_configuration.cell_size
        + draw_configuration.origin.0
        + draw_configuration.half_cell;
    transform.translation.y = draw_configuration.origin.1
        - to.row as f32 * draw_configuration.cell_size
        - draw_configuration.half_cell;
}

pub struct SpriteBundles {
    wall: SpriteBundle,
    floor: SpriteBundle,
    path: SpriteBundle,
    goal: SpriteBundle,
    agent: SpriteBundle,
}
impl SpriteBundles {
    pub fn wall(&self) -> SpriteBundle {
        self.wall.clone()
    }
    pub fn floor(&self) -> SpriteBundle {
        self.floor.clone()
    }
    pub fn path(&self) -> SpriteBundle {
        self.path.clone()
    }
    pub fn goal(&self) -> SpriteBundle {
        self.goal.clone()
    }
    pub fn agent(&self) -> SpriteBundle {
        self.agent.clone()
    }
}
impl FromWorld for SpriteBundles {
    fn from_world(world: &mut World) -> Self {
        let draw_configuration = world.resource::<DrawConfigurationResource>();
        let size = (draw_configuration.cell_size - CELL_GAP).max(1.);

        SpriteBundles {
            wall: colored_sprite(Color::BLACK, size),
            floor: colored_sprite(Color::WHITE, size),
            path: colored_sprite(Color::rgb(0., 1., 0.), size),
            goal: colored_sprite(Color::rgb(1., 0., 0.), size),
            agent: colored_sprite(Color::rgb(0., 0., 1.), size),
        }
    }
}

fn colored_sprite(color: Color, size: f32) -> SpriteBundle {
    SpriteBundle {
        sprite: Sprite {
            color,
            custom_size: Some(Vec2::new(size, size)),
            ..default()
        },
        ..default()
    }
}

mod resources {
    use std::collections::VecDeque;

    use bevy::time::Timer;

    use crate::maze::Command;

    #[derive(Clone)]
    pub struct DrawConfigurationResource {
        pub half_cell: f32,
        pub cell_size: f32,
        /// Top left corner of the maze.
        pub origin: (f32, f32),
    }

    pub struct GameTimerResource(pub Timer);

    /// Commands waiting for a tick, oldest first.
    #[derive(Default)]
    pub struct CommandQueueResource(pub VecDeque<Command>);
}

pub mod events {
    use crate::maze::TickOutcome;

    pub struct GameTick;

    pub struct TickPlayedEvent {
        pub outcome: TickOutcome,
    }
}

mod components {
    use bevy::prelude::Component;

    #[derive(Component)]
    pub struct AgentComponent;

    #[derive(Component)]
    pub struct GoalComponent;

    #[derive(Component)]
    pub struct PathComponent;
}
