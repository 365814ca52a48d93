//! CLI entry-point for synchronous detections over a local file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    cli::Detection,
    comprehend::ComprehendClient,
    config::Settings,
    content,
};

/// Args for the `analyze` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Path to a UTF-8 text file.
    #[arg(long)]
    pub file: PathBuf,
    /// Detections to run, in order.
    #[arg(long, value_delimiter = ',', default_value = "sentiment,entities,syntax,key-phrases")]
    pub detect: Vec<Detection>,
    /// Trim before submission: positive keeps leading bytes, negative keeps
    /// trailing bytes, zero sends the whole file.
    #[arg(long, allow_hyphen_values = true)]
    pub trim: Option<i64>,
    /// Override the configured language code.
    #[arg(long)]
    pub language: Option<String>,
    /// How many records to print per detection summary.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let trim = args.trim.unwrap_or(settings.truncation_length);
    let text = content::load_and_trim(&args.file, trim)?;
    content::ensure_sync_limit(&text)?;

    let language = args.language.as_deref().unwrap_or(&settings.language_code);
    let client = ComprehendClient::new(&settings)?;
    run_detections(&client, &text, language, &args.detect, args.top).await
}

/// Run each requested detection sequentially, logging extracted summaries.
/// Shared with the `batch` runner.
pub(crate) async fn run_detections(
    client: &ComprehendClient,
    text: &str,
    language: &str,
    detections: &[Detection],
    top: usize,
) -> Result<()> {
    for detection in detections {
        match detection {
            Detection::Sentiment => {
                let (sentiment, score) = client.detect_sentiment(text, language).await?;
                info!(%sentiment, "prevailing sentiment");
                info!("sentiment score: {}", serde_json::to_string_pretty(&score)?);
            }
            Detection::Entities => {
                let entities = client.detect_entities(text, language).await?;
                log_head("named entities", &entities, top)?;
            }
            Detection::Syntax => {
                let tokens = client.detect_syntax(text, language).await?;
                log_head("syntax tokens", &tokens, top)?;
            }
            Detection::KeyPhrases => {
                let phrases = client.detect_key_phrases(text, language).await?;
                log_head("key phrases", &phrases, top)?;
            }
        }
    }
    Ok(())
}

fn log_head<T: Serialize>(label: &str, records: &[T], top: usize) -> Result<()> {
    let head = &records[..records.len().min(top)];
    info!(
        total = records.len(),
        "{label} (first {}): {}",
        head.len(),
        serde_json::to_string_pretty(head)?
    );
    Ok(())
}
