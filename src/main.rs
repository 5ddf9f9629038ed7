use anyhow::{Context, Result};
use clap::Parser;
use snake_arcade::modes::HumanMode;
use snake_arcade::AppConfig;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Classic Snake with remappable controls")]
struct Cli {
    /// JSON file with game settings and key bindings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Playfield width in pixels
    #[arg(long)]
    width: Option<i32>,

    /// Playfield height in pixels
    #[arg(long)]
    height: Option<i32>,

    /// Cell size in pixels
    #[arg(long)]
    unit: Option<i32>,

    /// Seed for apple placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Load the config file, if any, and apply command-line overrides
    fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => AppConfig::default(),
        };

        if let Some(width) = self.width {
            config.game.screen_width = width;
        }
        if let Some(height) = self.height {
            config.game.screen_height = height;
        }
        if let Some(unit) = self.unit {
            config.game.unit_size = unit;
        }
        config.game.validate().context("Invalid game settings")?;

        Ok(config)
    }
}

/// Route logs to a file; the terminal belongs to the game
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = cli.app_config()?;
    log::info!(
        "playfield {}x{} px, {} px cells",
        config.game.screen_width,
        config.game.screen_height,
        config.game.unit_size
    );

    let mut human_mode = HumanMode::new(config, cli.seed)?;
    human_mode.run().await?;

    Ok(())
}
