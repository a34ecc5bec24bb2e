use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;

use invasion_app::state::AppState;
use invasion_app::{bridge, game_loop};
use invasion_core::config::SimConfig;

/// How often the main thread flushes outbound messages to stdout.
const FLUSH_INTERVAL: Duration = Duration::from_millis(5);

#[derive(Parser, Debug)]
#[command(name = "alien-invasion")]
#[command(about = "Headless Alien Invasion simulation speaking JSON lines on stdio")]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,
}

fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.validate().context("invalid configuration")?;

    let state = AppState::new(&config);
    // Detached: a blocked stdin read must not hold up shutdown.
    bridge::spawn_stdin_reader(state.inbound.clone()).context("failed to spawn stdin reader")?;
    let game = game_loop::spawn_game_loop(config, state.clone(), cli.max_ticks)
        .context("failed to spawn game loop thread")?;

    let mut stdout = io::stdout().lock();
    loop {
        let finished = game.is_finished();
        let summary = bridge::write_outbound(&mut stdout, &state.outbound)
            .context("failed writing to stdout")?;
        if finished || summary.exit_seen {
            break;
        }
        std::thread::sleep(FLUSH_INTERVAL);
    }

    state.shutdown();
    let ticks = game
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    bridge::write_outbound(&mut stdout, &state.outbound).context("failed writing to stdout")?;
    info!(ticks, dropped = state.outbound.dropped(), "shutdown complete");
    Ok(())
}
