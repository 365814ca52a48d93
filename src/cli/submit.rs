//! CLI entry-point for starting one asynchronous detection job.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    cli::JobKind,
    comprehend::{ComprehendClient, JobConfig},
    config::Settings,
};

/// Args for the `submit` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Kind of detection job to start.
    #[arg(long, value_enum)]
    pub kind: JobKind,
    /// Display name for the remote job.
    #[arg(long)]
    pub job_name: String,
    /// Override the configured input collection URI.
    #[arg(long)]
    pub input_uri: Option<String>,
    /// Override the configured output URI.
    #[arg(long)]
    pub output_uri: Option<String>,
    /// Override the configured language code.
    #[arg(long)]
    pub language: Option<String>,
    /// Topic count for topic-modeling jobs.
    #[arg(long)]
    pub topics: Option<u32>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let client = ComprehendClient::new(&settings)?;
    let overrides = JobOverrides {
        input_uri: args.input_uri.as_deref(),
        output_uri: args.output_uri.as_deref(),
        language: args.language.as_deref(),
        topics: args.topics,
    };
    let job_id = start_job(&client, &settings, args.kind, &args.job_name, overrides).await?;
    info!(%job_id, kind = ?args.kind, "job accepted");
    Ok(())
}

/// Per-job overrides on top of the configured defaults.
#[derive(Debug, Default)]
pub(crate) struct JobOverrides<'a> {
    pub input_uri: Option<&'a str>,
    pub output_uri: Option<&'a str>,
    pub language: Option<&'a str>,
    pub topics: Option<u32>,
}

/// Resolve config fallbacks and submit one job. Shared with the `batch`
/// runner; returns the remote job id.
pub(crate) async fn start_job(
    client: &ComprehendClient,
    settings: &Settings,
    kind: JobKind,
    job_name: &str,
    overrides: JobOverrides<'_>,
) -> Result<String> {
    let job = JobConfig {
        job_name: job_name.to_string(),
        input_uri: overrides
            .input_uri
            .unwrap_or(&settings.input_bucket_uri)
            .to_string(),
        output_uri: overrides
            .output_uri
            .unwrap_or(&settings.output_bucket_uri)
            .to_string(),
        data_access_role_arn: settings.data_access_role_arn.clone(),
    };
    let language = overrides.language.unwrap_or(&settings.language_code);

    let job_id = match kind {
        JobKind::Entities => client.start_entities_detection_job(&job, language).await?,
        JobKind::KeyPhrases => {
            client
                .start_key_phrases_detection_job(&job, language)
                .await?
        }
        JobKind::Sentiment => {
            client
                .start_sentiment_detection_job(&job, language)
                .await?
        }
        JobKind::Topics => {
            let topics = overrides.topics.unwrap_or(settings.topic_count);
            client.start_topics_detection_job(&job, topics).await?
        }
    };
    Ok(job_id)
}
