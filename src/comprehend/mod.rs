//! Thin client over the Amazon Comprehend JSON 1.1 API.
//!
//! One method per remote operation; every call logs the raw response body
//! before extracting the documented field, so the log stream is a complete
//! audit trail. Batch jobs are submitted and forgotten; nothing here polls,
//! waits for, or cancels them.

mod error;
mod sign;
mod types;

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    StatusCode, Url,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

pub use error::ComprehendError;
pub use types::{
    Entity, InputDataConfig, JobConfig, KeyPhrase, OutputDataConfig, PartOfSpeech,
    SentimentScore, SyntaxToken,
};

use crate::config::{AwsCredentials, Settings};
use sign::SigningParams;
use types::{
    DetectEntitiesResponse, DetectKeyPhrasesResponse, DetectRequest, DetectSentimentResponse,
    DetectSyntaxResponse, ServiceErrorBody, StartDetectionJobRequest, StartJobResponse,
    StartTopicsJobRequest,
};

pub(crate) const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";
pub(crate) const SERVICE: &str = "comprehend";
const TARGET_PREFIX: &str = "Comprehend_20171127.";

/// Client holding the endpoint, region, and signing credentials.
///
/// Constructed explicitly from [`Settings`]; there is no process-wide client.
pub struct ComprehendClient {
    http: reqwest::Client,
    endpoint: Url,
    host: String,
    region: String,
    credentials: AwsCredentials,
}

impl ComprehendClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let endpoint: Url = settings
            .endpoint
            .parse()
            .with_context(|| format!("parsing endpoint {}", settings.endpoint))?;
        let host = endpoint
            .host_str()
            .context("endpoint URL has no host")?
            .to_string();
        // The signed host header must match what reqwest sends, port included.
        let host = match endpoint.port() {
            Some(port) => format!("{host}:{port}"),
            None => host,
        };
        let http = reqwest::Client::builder()
            .user_agent(concat!("comprehend-kit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint,
            host,
            region: settings.region.clone(),
            credentials: settings.credentials.clone(),
        })
    }

    /// Inspects text for named entities and returns information about them.
    pub async fn detect_entities(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Vec<Entity>, ComprehendError> {
        let request = DetectRequest {
            text,
            language_code: language,
        };
        let response: DetectEntitiesResponse = self.invoke("DetectEntities", &request).await?;
        Ok(response.entities)
    }

    /// Detects the key noun phrases found in the text.
    pub async fn detect_key_phrases(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Vec<KeyPhrase>, ComprehendError> {
        let request = DetectRequest {
            text,
            language_code: language,
        };
        let response: DetectKeyPhrasesResponse =
            self.invoke("DetectKeyPhrases", &request).await?;
        Ok(response.key_phrases)
    }

    /// Inspects text for the part of speech of each word.
    pub async fn detect_syntax(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Vec<SyntaxToken>, ComprehendError> {
        let request = DetectRequest {
            text,
            language_code: language,
        };
        let response: DetectSyntaxResponse = self.invoke("DetectSyntax", &request).await?;
        Ok(response.syntax_tokens)
    }

    /// Returns the prevailing sentiment label and its confidence mapping.
    pub async fn detect_sentiment(
        &self,
        text: &str,
        language: &str,
    ) -> Result<(String, SentimentScore), ComprehendError> {
        let request = DetectRequest {
            text,
            language_code: language,
        };
        let response: DetectSentimentResponse =
            self.invoke("DetectSentiment", &request).await?;
        Ok((response.sentiment, response.sentiment_score))
    }

    /// Starts an asynchronous entity detection job over a document collection.
    pub async fn start_entities_detection_job(
        &self,
        job: &JobConfig,
        language: &str,
    ) -> Result<String, ComprehendError> {
        let request = StartDetectionJobRequest::new(job, language);
        let response: StartJobResponse =
            self.invoke("StartEntitiesDetectionJob", &request).await?;
        info!(job_id = %response.job_id, status = ?response.job_status, "entities detection job accepted");
        Ok(response.job_id)
    }

    /// Starts an asynchronous key-phrase detection job.
    pub async fn start_key_phrases_detection_job(
        &self,
        job: &JobConfig,
        language: &str,
    ) -> Result<String, ComprehendError> {
        let request = StartDetectionJobRequest::new(job, language);
        let response: StartJobResponse =
            self.invoke("StartKeyPhrasesDetectionJob", &request).await?;
        info!(job_id = %response.job_id, status = ?response.job_status, "key phrase detection job accepted");
        Ok(response.job_id)
    }

    /// Starts an asynchronous sentiment detection job.
    pub async fn start_sentiment_detection_job(
        &self,
        job: &JobConfig,
        language: &str,
    ) -> Result<String, ComprehendError> {
        let request = StartDetectionJobRequest::new(job, language);
        let response: StartJobResponse =
            self.invoke("StartSentimentDetectionJob", &request).await?;
        info!(job_id = %response.job_id, status = ?response.job_status, "sentiment detection job accepted");
        Ok(response.job_id)
    }

    /// Starts an asynchronous topic-modeling job clustering the collection
    /// into `number_of_topics` latent topics.
    pub async fn start_topics_detection_job(
        &self,
        job: &JobConfig,
        number_of_topics: u32,
    ) -> Result<String, ComprehendError> {
        let request = StartTopicsJobRequest::new(job, number_of_topics);
        let response: StartJobResponse =
            self.invoke("StartTopicsDetectionJob", &request).await?;
        info!(job_id = %response.job_id, status = ?response.job_status, "topic detection job accepted");
        Ok(response.job_id)
    }

    async fn invoke<R>(
        &self,
        operation: &'static str,
        body: &impl Serialize,
    ) -> Result<R, ComprehendError>
    where
        R: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)
            .map_err(|source| ComprehendError::Encode { operation, source })?;
        let target = format!("{TARGET_PREFIX}{operation}");
        let signed = sign::sign(
            &SigningParams {
                access_key_id: &self.credentials.access_key_id,
                secret_access_key: &self.credentials.secret_access_key,
                session_token: self.credentials.session_token.as_deref(),
                region: &self.region,
                host: &self.host,
                target: &target,
                timestamp: Utc::now(),
            },
            &payload,
        );

        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, AMZ_JSON_CONTENT_TYPE)
            .header("X-Amz-Target", target.as_str())
            .header("X-Amz-Date", signed.amz_date.as_str())
            .header(AUTHORIZATION, signed.authorization.as_str())
            .body(payload);
        if let Some(token) = &self.credentials.session_token {
            request = request.header("X-Amz-Security-Token", token.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|source| ComprehendError::Transport { operation, source })?;
        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|source| ComprehendError::Transport { operation, source })?;
        info!(%operation, status = status.as_u16(), body = %raw, "comprehend response");

        if !status.is_success() {
            return Err(service_error(operation, status, &raw));
        }
        serde_json::from_str(&raw)
            .map_err(|source| ComprehendError::UnexpectedResponse { operation, source })
    }
}

fn service_error(operation: &'static str, status: StatusCode, raw: &str) -> ComprehendError {
    let body: ServiceErrorBody = serde_json::from_str(raw).unwrap_or_default();
    // `__type` arrives namespaced, e.g. `com.amazon...#TooManyRequestsException`.
    let code = body
        .error_type
        .as_deref()
        .and_then(|t| t.rsplit('#').next())
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string());
    let message = body.message.unwrap_or_else(|| raw.to_string());
    ComprehendError::Service {
        operation,
        code,
        message,
    }
}
