//! Wire models for the Comprehend JSON 1.1 protocol.

use serde::{Deserialize, Serialize};

/// Named real-world object span identified in text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Entity {
    pub text: String,
    #[serde(rename = "Type")]
    pub entity_type: String,
    pub score: f64,
    pub begin_offset: usize,
    pub end_offset: usize,
}

/// Salient noun phrase extracted from text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyPhrase {
    pub text: String,
    pub score: f64,
    pub begin_offset: usize,
    pub end_offset: usize,
}

/// Word with its part-of-speech tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SyntaxToken {
    pub text: String,
    pub part_of_speech: PartOfSpeech,
    pub begin_offset: usize,
    pub end_offset: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartOfSpeech {
    pub tag: String,
    pub score: f64,
}

/// Per-label confidence mapping accompanying a sentiment verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SentimentScore {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub mixed: f64,
}

/// Names a batch job and the S3 locations it works over.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Display name for the remote job; uniqueness is not enforced locally.
    pub job_name: String,
    /// S3 URI of the input document collection, one document per file.
    pub input_uri: String,
    /// S3 URI the service writes results to.
    pub output_uri: String,
    /// Role the service assumes to read input and write output.
    pub data_access_role_arn: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputDataConfig {
    pub s3_uri: String,
    pub input_format: String,
}

impl InputDataConfig {
    pub fn one_doc_per_file(s3_uri: &str) -> Self {
        Self {
            s3_uri: s3_uri.to_string(),
            input_format: "ONE_DOC_PER_FILE".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputDataConfig {
    pub s3_uri: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DetectRequest<'a> {
    pub text: &'a str,
    pub language_code: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DetectEntitiesResponse {
    #[serde(default)]
    pub entities: Vec<Entity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DetectKeyPhrasesResponse {
    #[serde(default)]
    pub key_phrases: Vec<KeyPhrase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DetectSyntaxResponse {
    #[serde(default)]
    pub syntax_tokens: Vec<SyntaxToken>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DetectSentimentResponse {
    pub sentiment: String,
    pub sentiment_score: SentimentScore,
}

/// Shared request shape for entities, key-phrases, and sentiment jobs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct StartDetectionJobRequest<'a> {
    pub input_data_config: InputDataConfig,
    pub output_data_config: OutputDataConfig,
    pub data_access_role_arn: &'a str,
    pub job_name: &'a str,
    pub language_code: &'a str,
}

impl<'a> StartDetectionJobRequest<'a> {
    pub fn new(job: &'a JobConfig, language: &'a str) -> Self {
        Self {
            input_data_config: InputDataConfig::one_doc_per_file(&job.input_uri),
            output_data_config: OutputDataConfig {
                s3_uri: job.output_uri.clone(),
            },
            data_access_role_arn: &job.data_access_role_arn,
            job_name: &job.job_name,
            language_code: language,
        }
    }
}

/// Topic-modeling jobs take a topic count instead of a language code.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct StartTopicsJobRequest<'a> {
    pub input_data_config: InputDataConfig,
    pub output_data_config: OutputDataConfig,
    pub data_access_role_arn: &'a str,
    pub job_name: &'a str,
    pub number_of_topics: u32,
}

impl<'a> StartTopicsJobRequest<'a> {
    pub fn new(job: &'a JobConfig, number_of_topics: u32) -> Self {
        Self {
            input_data_config: InputDataConfig::one_doc_per_file(&job.input_uri),
            output_data_config: OutputDataConfig {
                s3_uri: job.output_uri.clone(),
            },
            data_access_role_arn: &job.data_access_role_arn,
            job_name: &job.job_name,
            number_of_topics,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct StartJobResponse {
    pub job_id: String,
    #[serde(default)]
    pub job_status: Option<String>,
}

/// Modeled error body; `__type` carries a namespaced exception name.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ServiceErrorBody {
    #[serde(rename = "__type", default)]
    pub error_type: Option<String>,
    #[serde(rename = "message", alias = "Message", default)]
    pub message: Option<String>,
}
