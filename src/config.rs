//! Runtime configuration utilities for comprehend-kit.

use std::{env, fmt};

/// Ambient AWS credentials resolved from the environment.
///
/// Nothing is validated here; a missing key simply fails at the service,
/// the same way an unconfigured SDK client would.
#[derive(Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    /// AWS region hosting the Comprehend endpoint.
    pub region: String,
    /// Comprehend endpoint URL; override with `COMPREHEND_ENDPOINT` to point
    /// at a local stand-in service.
    pub endpoint: String,
    /// Signing credentials from the ambient AWS environment.
    pub credentials: AwsCredentials,
    /// Account id used to derive default bucket URIs and the role ARN.
    pub account_id: String,
    /// Default S3 location of the input document collection.
    pub input_bucket_uri: String,
    /// Default S3 location batch jobs write results to.
    pub output_bucket_uri: String,
    /// Role Comprehend assumes to read input and write output.
    pub data_access_role_arn: String,
    /// Two-letter language code passed through to the service unvalidated.
    pub language_code: String,
    /// Default trim applied before synchronous calls: positive keeps leading
    /// bytes, negative keeps trailing bytes, zero keeps the whole file.
    pub truncation_length: i64,
    /// Default topic count for topic-modeling jobs.
    pub topic_count: u32,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let account_id =
            env::var("AWS_ACCOUNT_ID").unwrap_or_else(|_| "111222333444".to_string());
        let endpoint = env::var("COMPREHEND_ENDPOINT")
            .unwrap_or_else(|_| format!("https://comprehend.{region}.amazonaws.com"));
        let input_bucket_uri = env::var("COMPREHEND_INPUT_URI")
            .unwrap_or_else(|_| format!("s3://comprehend-{account_id}-{region}/input/"));
        let output_bucket_uri = env::var("COMPREHEND_OUTPUT_URI")
            .unwrap_or_else(|_| format!("s3://comprehend-{account_id}-{region}/output/"));
        let data_access_role_arn = env::var("COMPREHEND_DATA_ACCESS_ROLE_ARN").unwrap_or_else(
            |_| format!("arn:aws:iam::{account_id}:role/service-role/AmazonComprehendServiceRole-S3"),
        );
        let language_code =
            env::var("COMPREHEND_LANGUAGE").unwrap_or_else(|_| "en".to_string());
        let truncation_length = env::var("COMPREHEND_TRUNCATE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let topic_count = env::var("COMPREHEND_TOPICS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);
        let credentials = AwsCredentials {
            access_key_id: env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
            secret_access_key: env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
            session_token: env::var("AWS_SESSION_TOKEN").ok(),
        };

        Ok(Self {
            region,
            endpoint,
            credentials,
            account_id,
            input_bucket_uri,
            output_bucket_uri,
            data_access_role_arn,
            language_code,
            truncation_length,
            topic_count,
        })
    }
}
