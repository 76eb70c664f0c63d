/// Cadence Player - headless playlist player
use cadence_player::{config::PlayerConfig, Player, Reply, SimulatedDevice};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "cadence_player=info,cadence_playback=info";

#[derive(Parser)]
#[command(name = "cadence-player")]
#[command(about = "Cadence headless playlist player", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CADENCE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// JSON track listing to load as the library
    #[arg(short, long, global = true)]
    library: Option<PathBuf>,

    /// Fixed shuffle seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read player commands from stdin (default)
    Run {
        /// Simulate a device that blocks autoplay
        #[arg(long)]
        block_autoplay: bool,
    },
    /// Print the resolved configuration as JSON
    ShowConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = PlayerConfig::load(cli.config.as_deref())?.with_overrides(cli.library, cli.seed);
    config.validate()?;

    // Initialize tracing
    let default_filter = config.log_level.as_deref().unwrap_or(DEFAULT_LOG_FILTER);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command.unwrap_or(Commands::Run {
        block_autoplay: false,
    }) {
        Commands::Run { block_autoplay } => run(&config, block_autoplay),
        Commands::ShowConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn run(config: &PlayerConfig, block_autoplay: bool) -> anyhow::Result<()> {
    let device = if block_autoplay {
        SimulatedDevice::rejecting()
    } else {
        SimulatedDevice::new()
    };
    let mut player = Player::new(config, device)?;

    tracing::info!(
        library = player.library().len(),
        "Cadence player ready, type `help` for commands"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match player.run_line(&line) {
            Ok(Reply::Text(text)) => writeln!(stdout, "{text}")?,
            Ok(Reply::Quit) => break,
            Err(e) => {
                tracing::debug!(error = %e, line = %line, "command failed");
                writeln!(stdout, "error: {e}")?;
            }
        }
        stdout.flush()?;
    }

    Ok(())
}
