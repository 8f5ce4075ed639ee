use std::{process, sync::Arc};

use bevy::{log::LogPlugin, prelude::*};
use tracing::error;
use tracing_subscriber::{prelude::*, EnvFilter};

use maze_solver::{configuration::Configuration, maze::Grid, MainPlugin};

fn main() {
    let configuration = Configuration::from_env();
    init_logging(configuration.as_ref().map_or(false, |c| c.log_json));

    let configuration = match configuration {
        Ok(configuration) => configuration,
        Err(error) => exit_with(&error),
    };
    let grid: Grid = match configuration.level.parse() {
        Ok(grid) => grid,
        Err(error) => exit_with(&error),
    };

    let (width, height) = configuration.window_size(&grid);

    App::new()
        .insert_resource(WindowDescriptor {
            title: configuration.title.clone(),
            width,
            height,
            resizable: false,
            ..default()
        })
        // logging is set up above, before the app exists
        .add_plugins_with(DefaultPlugins, |group| group.disable::<LogPlugin>())
        .add_plugin(MainPlugin {
            configuration,
            grid: Arc::new(grid),
        })
        .run();
}

fn init_logging(json: bool) {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn,maze_solver=info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter_layer);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn exit_with(error: &dyn std::error::Error) -> ! {
    error!("{}", error);
    process::exit(1);
}
