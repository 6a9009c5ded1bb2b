//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Factreel - turn a random fact into a narrated short video
#[derive(Parser, Debug)]
#[command(name = "factreel")]
#[command(about = "Turn a random fact into a narrated short video", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a video and print its path and caption
    Generate {
        /// Use this topic instead of fetching a random fact
        #[arg(long)]
        topic: Option<String>,

        /// Directory for the finished video and run intermediates
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Keep retrying speech synthesis for as long as it is rate limited
        #[arg(long)]
        retry_forever: bool,
    },

    /// Fetch and print one random fact
    Fact,

    /// Generate and print the script bundle for a topic
    Script {
        /// Topic to write about
        #[arg(long)]
        topic: String,
    },
}
