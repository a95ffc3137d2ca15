//! Hex board viewer.
//!
//! Draws the background grid and the demo tokens. WASD/arrows pan, scroll
//! zooms, Space toggles a ghost, N/M select and step a token, Tab opens the
//! inspector, Esc quits.

use bevy::app::AppExit;
use bevy::log::LogPlugin;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;
#[cfg(feature = "native")]
use clap::Parser;

use hex_board::GameState;
use hex_board::board::{BoardConfig, HexDimensions};
use hex_board::camera::{CameraConfig, CameraPlugin};
use hex_board::demo::{DemoConfig, DemoPlugin};
use hex_board::error::ConfigError;
use hex_board::grid::{GridConfig, GridPlugin};
use hex_board::pieces::{PiecesConfig, PiecesPlugin};

const DEFAULT_LOG_FILTER: &str = "info,wgpu=error,naga=warn";

#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(name = "hex-board", about = "Hex board viewer with a viewport-following grid")]
struct Cli {
    /// Grid tile color as #rrggbb.
    #[arg(long)]
    grid_color: Option<String>,

    /// Hex circumradius in world units.
    #[arg(long, default_value_t = 1.0)]
    hex_size: f32,

    /// Rings drawn around the center cell.
    #[arg(long, default_value_t = 30)]
    rings: u32,

    /// Flat-top hexes instead of pointy-top.
    #[arg(long)]
    flat: bool,

    /// Log filter, in `RUST_LOG` syntax.
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

/// Startup settings, validated before the app is built.
struct Settings {
    board: BoardConfig,
    dims: HexDimensions,
    grid: GridConfig,
    log_filter: String,
}

impl Settings {
    #[cfg(feature = "native")]
    fn load() -> Result<Self, ConfigError> {
        let cli = Cli::parse();
        let board = BoardConfig {
            hex_size: cli.hex_size,
            flat: cli.flat,
            ..default()
        };
        let dims = HexDimensions::from_config(&board)?;
        let grid = match &cli.grid_color {
            Some(color) => GridConfig::from_hex(color)?,
            None => GridConfig::default(),
        };
        Ok(Self {
            board,
            dims,
            grid: GridConfig {
                rings: cli.rings,
                ..grid
            },
            log_filter: cli.log_filter,
        })
    }

    #[cfg(not(feature = "native"))]
    fn load() -> Result<Self, ConfigError> {
        let board = BoardConfig::default();
        Ok(Self {
            dims: HexDimensions::from_config(&board)?,
            board,
            grid: GridConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        })
    }
}

fn main() -> AppExit {
    // The logger is not up yet, so configuration errors go to stderr.
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("hex-board: {err}");
            return AppExit::error();
        }
    };

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Hex Board".into(),
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: settings.log_filter,
                ..default()
            }),
    )
    .register_type::<GameState>()
    .register_type::<BoardConfig>()
    .init_state::<GameState>()
    .insert_resource(settings.board)
    .insert_resource(settings.dims)
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(GridPlugin(settings.grid))
    .add_plugins(PiecesPlugin(PiecesConfig::default()))
    .add_plugins(CameraPlugin(CameraConfig::default()))
    .add_plugins(DemoPlugin(DemoConfig::default()))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)));

    #[cfg(feature = "native")]
    app.add_plugins(RemotePlugin::default())
        .add_plugins(RemoteHttpPlugin::default());

    app.run()
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        let new_state = match state.get() {
            GameState::Running => GameState::Debugging,
            GameState::Debugging => GameState::Running,
        };
        info!(state = ?new_state, "switching state");
        next.set(new_state);
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
