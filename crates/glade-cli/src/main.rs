//! Glade CLI - command-line tools for Glade levels

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{heightmap, info, mesh, roundtrip, simulate};
use glade_runtime::GladeConfig;

#[derive(Parser)]
#[command(name = "glade")]
#[command(about = "Inspect, convert, and simulate procedural terrain levels", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter (overrides config and GLADE_LOG; RUST_LOG wins over all)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level information
    Info {
        /// Path to level file
        level: String,
    },

    /// Load a level and save it again
    Roundtrip {
        /// Level to read
        input: String,

        /// Where to write the re-saved level
        output: String,
    },

    /// Run the simulation headless and print the final state
    Simulate {
        /// Path to level file
        level: String,

        /// Number of frames to tick
        #[arg(long, default_value = "60")]
        frames: u64,

        /// Keys to press, one per frame (e.g. "wwdd t"; space toggles the avatar)
        #[arg(long, default_value = "")]
        keys: String,
    },

    /// Print vertex and triangle counts for every mesh in a level
    Mesh {
        /// Path to level file
        level: String,
    },

    /// Create a flat-sunlit level from a grayscale heightmap image
    ImportHeightmap {
        /// Heightmap image (PNG)
        image: String,

        /// Output level path
        output: String,

        /// Altitude of a fully white pixel
        #[arg(long, default_value = "10.0")]
        scale: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GladeConfig::load().context("failed to load config")?;
    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info { level } => info::run(&level),
        Commands::Roundtrip { input, output } => roundtrip::run(&input, &output),
        Commands::Simulate {
            level,
            frames,
            keys,
        } => simulate::run(simulate::SimulateArgs {
            level,
            frames,
            keys,
            config,
        }),
        Commands::Mesh { level } => mesh::run(&level, config.road_steps),
        Commands::ImportHeightmap {
            image,
            output,
            scale,
        } => heightmap::run(&image, &output, scale),
    }
}
