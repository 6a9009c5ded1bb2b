//! Factreel CLI binary.
//!
//! - `generate` runs the whole pipeline and prints the video path and caption
//! - `fact` prints one random fact
//! - `script` prints the script bundle generated for a topic

use clap::Parser;
use factreel::{FactreelConfig, ObservabilityConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, generate_video, print_fact, print_script};

    // Credentials may live in a .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_observability(
        ObservabilityConfig::default()
            .with_verbose(cli.verbose)
            .with_json_logs(cli.json_logs),
    )?;

    let config = FactreelConfig::load()?;

    match cli.command {
        Commands::Generate {
            topic,
            output_dir,
            retry_forever,
        } => {
            generate_video(config, topic, output_dir, retry_forever).await?;
        }

        Commands::Fact => {
            print_fact(&config).await?;
        }

        Commands::Script { topic } => {
            print_script(&config, &topic).await?;
        }
    }

    Ok(())
}
