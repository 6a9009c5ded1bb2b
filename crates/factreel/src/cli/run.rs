//! Command handlers.

use factreel::{
    ApiNinjasFactSource, BackoffPolicy, CompletionSettings, Credentials, FactSource,
    FactreelConfig, JsonError, OpenAiCompletionClient, ScriptGenerator, build_pipeline, required_var,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Run the full pipeline and print the video path and caption.
pub async fn generate_video(
    mut config: FactreelConfig,
    topic: Option<String>,
    output_dir: Option<PathBuf>,
    retry_forever: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = output_dir {
        config.pipeline.output_dir = dir;
    }
    let policy = if retry_forever {
        BackoffPolicy {
            max_attempts: None,
            ..config.backoff
        }
    } else {
        config.backoff
    };

    let credentials = Credentials::from_env()?;
    let pipeline = build_pipeline(&config, &credentials, policy)?;

    let output = match topic {
        Some(topic) => pipeline.run_with_topic(&topic).await?,
        None => pipeline.run().await?,
    };

    info!(run_id = %output.run_id, "Done");
    println!("Video: {}", output.video_path().display());
    println!("Caption: {}", output.caption);
    Ok(())
}

/// Fetch one fact and print it.
pub async fn print_fact(config: &FactreelConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = ApiNinjasFactSource::new(
        required_var("API_NINJAS_KEY")?,
        config.providers.facts.url.as_str(),
    );
    let fact = source.fetch_fact().await?;
    println!("{}", fact);
    Ok(())
}

/// Generate a script bundle for `topic` and print it as JSON.
pub async fn print_script(
    config: &FactreelConfig,
    topic: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let CompletionSettings { url, model } = &config.providers.completion;
    let client = OpenAiCompletionClient::new(
        required_var("OPENAI_API_KEY")?,
        url.as_str(),
        model.as_str(),
    );
    let generator = ScriptGenerator::new(Arc::new(client), config.pipeline.prompt_count);

    let bundle = generator.generate(topic).await?;
    let json = serde_json::to_string_pretty(&bundle)
        .map_err(|e| JsonError::new(format!("Failed to render script bundle: {}", e)))?;
    println!("{}", json);
    Ok(())
}
