use std::sync::Arc;

use bevy::prelude::*;
use maze::{Grid, MazeGame, TickOutcome};
use maze_plugin::{events::TickPlayedEvent, MazePlugin};
use resources::TitleResource;

pub mod configuration;
pub mod maze;
mod maze_plugin;

use configuration::Configuration;

pub struct MainPlugin {
    pub configuration: Configuration,
    pub grid: Arc<Grid>,
}
impl Plugin for MainPlugin {
    fn build(&self, app: &mut App) {
        let window_description = app.world.resource::<WindowDescriptor>();

        // the maze fills the whole window
        let top = window_description.height / 2.;
        let bottom = -window_description.height / 2.;
        let right = window_description.width / 2.;
        let left = -window_description.width / 2.;

        // shows through between cells as grid lines
        app.insert_resource(ClearColor(Color::rgb(0.78, 0.78, 0.78)))
            .insert_resource(TitleResource(self.configuration.title.clone()))
            .add_startup_system(setup)
            .add_system(show_status)
            .add_plugin(MazePlugin {
                rect: UiRect {
                    top,
                    left,
                    right,
                    bottom,
                },
                grid: self.grid.clone(),
                tick_seconds: self.configuration.tick_seconds,
            });
    }
}

fn setup(mut commands: Commands) {
    commands.spawn_bundle(Camera2dBundle::default());
}

fn show_status(
    mut tick_played_event_reader: EventReader<TickPlayedEvent>,
    maze_game: Res<MazeGame>,
    title: Res<TitleResource>,
    windows: Option<ResMut<Windows>>,
) {
    let status = match tick_played_event_reader
        .iter()
        .filter_map(|e| status_line(&title.0, e.outcome, maze_game.at_goal()))
        .last()
    {
        None => return,
        Some(status) => status,
    };

    info!("{}", status);

    if let Some(mut windows) = windows {
        if let Some(window) = windows.get_primary_mut() {
            window.set_title(status);
        }
    }
}

/// Window title after a tick, `None` when it should stay as it is.
fn status_line(title: &str, outcome: TickOutcome, at_goal: bool) -> Option<String> {
    match outcome {
        TickOutcome::Moved(_) | TickOutcome::Solved { .. } if at_goal => {
            Some(format!("{} - goal reached!", title))
        }
        TickOutcome::Moved(_) => Some(title.to_string()),
        TickOutcome::Solved { len: 0 } => Some(format!("{} - no path", title)),
        TickOutcome::Solved { len } => Some(format!("{} - path: {} steps", title, len - 1)),
        TickOutcome::Idle | TickOutcome::Bumped | TickOutcome::Quit => None,
    }
}

mod resources {
    pub struct TitleResource(pub String);
}

#[cfg(test)]
mod tests {
    use crate::maze::{Cell, TickOutcome};

    use super::status_line;

    #[test]
    fn test_status_line() {
        let title = "Maze Solver Game";

        assert_eq!(
            status_line(title, TickOutcome::Solved { len: 6 }, false),
            Some("Maze Solver Game - path: 5 steps".to_string())
        );
        assert_eq!(
            status_line(title, TickOutcome::Solved { len: 0 }, false),
            Some("Maze Solver Game - no path".to_string())
        );
        assert_eq!(
            status_line(title, TickOutcome::Moved(Cell::new(2, 3)), true),
            Some("Maze Solver Game - goal reached!".to_string())
        );
        assert_eq!(
            status_line(title, TickOutcome::Moved(Cell::new(0, 1)), false),
            Some("Maze Solver Game".to_string())
        );
        assert_eq!(status_line(title, TickOutcome::Bumped, false), None);
    }

    #[test]
    fn test_status_line_on_goal_after_solve() {
        assert_eq!(
            status_line("Maze", TickOutcome::Solved { len: 1 }, true),
            Some("Maze - goal reached!".to_string())
        );
    }

    pub fn init_logging() {
        use tracing_log::LogTracer;
        use tracing_subscriber::{prelude::*, registry::Registry, EnvFilter};

        if LogTracer::init().is_ok() {
            let filter_layer = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new("OFF,maze_solver=INFO"))
                .unwrap();
            let subscriber = Registry::default().with(filter_layer);
            let fmt_layer = tracing_subscriber::fmt::Layer::default().with_test_writer();
            let subscriber = subscriber.with(fmt_layer);
            tracing::subscriber::set_global_default(subscriber).unwrap();
        }
    }
}
