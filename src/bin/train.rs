use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ml_hex::ai::RandomAgent;
use ml_hex::config::AppConfig;
use ml_hex::training::{Episode, Trainer};

/// Generate Hex self-play data and feed it to an agent.
#[derive(Parser)]
#[command(name = "train", about = "Run Hex self-play training")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override number of training episodes
    #[arg(long)]
    episodes: Option<usize>,

    /// Override board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override board columns
    #[arg(long)]
    columns: Option<usize>,

    /// Seed every random source for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(episodes) = cli.episodes {
        app_config.training.num_episodes = episodes;
    }
    if let Some(rows) = cli.rows {
        app_config.board.rows = rows;
    }
    if let Some(columns) = cli.columns {
        app_config.board.columns = columns;
    }
    if let Some(seed) = cli.seed {
        app_config.episode.seed = Some(seed);
        app_config.replay.seed = Some(seed);
        app_config.training.seed = Some(seed);
    }
    app_config
        .validate()
        .context("validating config after command-line overrides")?;

    let mut episode = Episode::from_config(&app_config).context("creating episode")?;
    println!(
        "Board {}x{} | replay capacity {} ({:?}{})",
        episode.rows(),
        episode.columns(),
        episode.replay_buffer().capacity(),
        episode.replay_buffer().policy(),
        if app_config.replay.clear_on_drain {
            ", cleared on drain"
        } else {
            ""
        }
    );
    let mut agent = match app_config.training.seed {
        Some(seed) => RandomAgent::with_seed(seed),
        None => RandomAgent::new(),
    };

    let summary = Trainer::new(app_config.training.clone())
        .train(&mut agent, &mut episode)
        .context("self-play training")?;

    println!(
        "Blue win rate: {:.1}% | first mover win rate: {:.1}% | avg length: {:.1}",
        summary.blue_win_rate * 100.0,
        summary.first_mover_win_rate * 100.0,
        summary.average_game_length
    );
    Ok(())
}
