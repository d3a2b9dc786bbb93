//! Command-line interface for the Framecut editing engine.
//!
//! Usage:
//!   framecut demo [OPTIONS]    Render a demo project to a PPM sequence
//!   framecut presets           List the built-in effect presets

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "framecut",
    about = "Timeline editing and compositing engine",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a small in-memory project and export it as a PPM frame sequence
    Demo {
        /// Output directory for the rendered frames
        #[arg(short, long, default_value = "framecut-demo")]
        output: PathBuf,

        /// Output width
        #[arg(long, default_value = "320")]
        width: u32,

        /// Output height
        #[arg(long, default_value = "180")]
        height: u32,

        /// Frame rate
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Project duration in seconds
        #[arg(long, default_value = "4.0")]
        duration: f64,
    },

    /// List the built-in effect presets
    Presets,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = framecut_common::config::AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    framecut_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Demo {
            output,
            width,
            height,
            fps,
            duration,
        } => commands::demo::run(output, width, height, fps, duration).await,
        Commands::Presets => commands::presets::run(),
    }
}
