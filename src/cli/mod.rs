//! Command-line interface wiring for comprehend-kit.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use crate::config::Settings;

pub mod analyze;
pub mod batch;
pub mod submit;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Text analysis with Amazon Comprehend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Analyze(args) => analyze::run(args, settings).await,
            Commands::Submit(args) => submit::run(args, settings).await,
            Commands::Batch(args) => batch::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run synchronous detections over a local text file.
    Analyze(analyze::Args),
    /// Start one asynchronous detection job over the configured corpus.
    Submit(submit::Args),
    /// Run a manifest of analyses and job submissions in order.
    Batch(batch::Args),
}

/// Synchronous detection operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Detection {
    Sentiment,
    Entities,
    Syntax,
    KeyPhrases,
}

/// Asynchronous batch-job kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobKind {
    Entities,
    KeyPhrases,
    Sentiment,
    Topics,
}
