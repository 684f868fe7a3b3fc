mod game;
mod palette;
mod term;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use game::{Flow, SnakeGame};
use snake::{Cli, GameConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the game, so the log goes to a file
    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("cannot create log file {}", cli.log_file.display()))?;
    WriteLogger::init(level, Config::default(), log_file).context("cannot initialize logger")?;

    let config = GameConfig::from_cli(&cli).context("invalid game settings")?;
    let state = config.build().context("cannot set up the game")?;
    info!(
        "grid {}x{}, snake length {}, {:?}",
        config.grid.width(), config.grid.height(), config.snake.len(), config.modes
    );

    let mut game = SnakeGame::new(state)?;
    session(&mut game, SnakeGame::initialize, run, SnakeGame::shutdown)
}

type Step<G> = fn(&mut G) -> Result<()>;

/// Runs `body` after `setup`, then `teardown` no matter which of the two failed.
/// Setup can fail halfway through, leaving raw mode or the alternate screen on.
fn session<G>(game: &mut G, setup: Step<G>, body: Step<G>, teardown: Step<G>) -> Result<()> {
    let outcome = setup(game).and_then(|()| body(game));
    let restored = teardown(game);
    outcome?;
    restored
}

fn run(game: &mut SnakeGame) -> Result<()> {
    if game.show_intro()? == Flow::Quit {
        info!("quit");
        return Ok(());
    }

    // Each round ends on game over; the player decides whether to go again
    while game.play()? == Flow::PlayAgain {}

    info!("quit");
    Ok(())
}
