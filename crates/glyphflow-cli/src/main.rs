//! glyphflow CLI - Run text-as-particles simulations from the terminal

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, modes, run};

#[derive(Parser)]
#[command(name = "glyphflow")]
#[command(about = "Turn text into a field of physically simulated glyphs", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation headless and print its statistics
    Run {
        /// Text to simulate
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the text from a file
        #[arg(long)]
        file: Option<String>,

        /// Physics mode (fluid, gravity, chaos, weather, swarm)
        #[arg(short, long)]
        mode: Option<String>,

        /// Number of physics ticks to execute
        #[arg(long, default_value = "600")]
        ticks: u64,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Surface width
        #[arg(long, default_value = "800")]
        width: f32,

        /// Surface height
        #[arg(long, default_value = "600")]
        height: f32,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Draw an ASCII preview after every tick
        #[arg(long)]
        ascii: bool,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,

        /// Pace frames by the wall clock instead of stepping them
        #[arg(long)]
        realtime: bool,
    },

    /// List the available physics modes
    Modes,

    /// Print the default configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins over the flags
    let level = match (cli.verbose, cli.quiet) {
        (0, true) => "error",
        (0, false) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Run {
            text,
            file,
            mode,
            ticks,
            seed,
            width,
            height,
            config,
            ascii,
            json,
            realtime,
        } => run::run(run::RunArgs {
            text,
            file,
            mode,
            ticks,
            seed,
            width,
            height,
            config,
            ascii,
            json,
            realtime,
        }),
        Commands::Modes => modes::run(),
        Commands::Config => config::run(),
    }
}
