//! Manifest-driven runner replacing per-document driver scripts.
//!
//! A JSON manifest lists synchronous analyses and job submissions for one
//! corpus. Steps run sequentially and the run aborts on the first failure;
//! later steps are never attempted.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{
    cli::{analyze, submit, Detection, JobKind},
    comprehend::ComprehendClient,
    config::Settings,
    content,
};

/// Args for the `batch` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Path to a JSON manifest of analyses and job submissions.
    #[arg(long)]
    pub manifest: PathBuf,
}

/// Top-level manifest shape.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Language applied to steps that do not set their own.
    #[serde(default)]
    pub language: Option<String>,
    /// Synchronous analyses, run first.
    #[serde(default)]
    pub analyses: Vec<AnalysisStep>,
    /// Job submissions, run after the analyses.
    #[serde(default)]
    pub jobs: Vec<JobStep>,
}

impl Manifest {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading manifest {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing manifest {}", path.display()))
    }
}

/// One synchronous analysis over a local document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisStep {
    pub file: PathBuf,
    /// Trim policy, same convention as `analyze --trim`.
    #[serde(default)]
    pub trim: i64,
    pub detect: Vec<Detection>,
    #[serde(default)]
    pub language: Option<String>,
}

/// One asynchronous job submission.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobStep {
    pub kind: JobKind,
    pub job_name: String,
    #[serde(default)]
    pub input_uri: Option<String>,
    #[serde(default)]
    pub output_uri: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Option<u32>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let manifest = Manifest::from_path(&args.manifest)?;
    run_manifest(&manifest, &settings).await
}

pub async fn run_manifest(manifest: &Manifest, settings: &Settings) -> Result<()> {
    let client = ComprehendClient::new(settings)?;

    for step in &manifest.analyses {
        info!(file = %step.file.display(), trim = step.trim, "running analysis step");
        let text = content::load_and_trim(&step.file, step.trim)?;
        content::ensure_sync_limit(&text)?;
        let language = step
            .language
            .as_deref()
            .or(manifest.language.as_deref())
            .unwrap_or(&settings.language_code);
        analyze::run_detections(&client, &text, language, &step.detect, 10)
            .await
            .with_context(|| format!("analysis of {}", step.file.display()))?;
    }

    for step in &manifest.jobs {
        info!(job_name = %step.job_name, kind = ?step.kind, "submitting job step");
        let overrides = submit::JobOverrides {
            input_uri: step.input_uri.as_deref(),
            output_uri: step.output_uri.as_deref(),
            language: step.language.as_deref().or(manifest.language.as_deref()),
            topics: step.topics,
        };
        let job_id = submit::start_job(&client, settings, step.kind, &step.job_name, overrides)
            .await
            .with_context(|| format!("submitting job {}", step.job_name))?;
        info!(%job_id, job_name = %step.job_name, "job accepted");
    }

    Ok(())
}
