//! Toolkit for analyzing text with Amazon Comprehend.
//!
//! Synchronous detections (entities, key phrases, syntax, sentiment) run over
//! inline text read from local files; batch detection jobs run over an
//! S3-resident document collection and are fire-and-forget: the job id is
//! logged and never polled.

pub mod cli;
pub mod comprehend;
pub mod config;
pub mod content;
pub mod logging;
