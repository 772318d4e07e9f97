//! bytepath: steer a circle around a fixed 480x270 playfield.
//!
//! Arrow keys move and turn; Escape quits.

mod config;
mod game;
mod ship;

use anyhow::Result;

use bytepath_engine::device::GpuInit;
use bytepath_engine::logging::{init_logging, LoggingConfig};
use bytepath_engine::window::{LogicalSize, Runtime, RuntimeConfig};

use crate::config::GameConfig;
use crate::game::Game;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = GameConfig::default();
    let runtime = RuntimeConfig {
        title: "bytepath".to_string(),
        initial_size: initial_window_size(&config),
        ..RuntimeConfig::default()
    };

    log::info!("starting bytepath");
    Runtime::run(runtime, GpuInit::default(), Game::new(config))
}

/// Opens the window at three times the logical playfield size.
fn initial_window_size(config: &GameConfig) -> LogicalSize<f64> {
    LogicalSize::new(
        config.viewport.width as f64 * 3.0,
        config.viewport.height as f64 * 3.0,
    )
}
