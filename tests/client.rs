//! Exercises the Comprehend client against a local stand-in service.

use std::sync::{Arc, Mutex};

use axum::{
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use comprehend_kit::{
    cli::batch::{self, Manifest},
    comprehend::{ComprehendClient, ComprehendError, JobConfig},
    config::{AwsCredentials, Settings},
};
use serde_json::{json, Value};

struct SeenRequest {
    target: String,
    authorization: String,
    body: Value,
}

type Recording = Arc<Mutex<Vec<SeenRequest>>>;

/// Bind a one-route service on an ephemeral port that records every request
/// and answers with a canned status and body.
async fn spawn_service(status: StatusCode, reply: Value) -> (String, Recording) {
    let recording: Recording = Arc::new(Mutex::new(Vec::new()));
    let seen = recording.clone();
    let app = Router::new().route(
        "/",
        post(move |headers: HeaderMap, body: String| {
            let seen = seen.clone();
            let reply = reply.clone();
            async move {
                let header = |name: &str| {
                    headers
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string()
                };
                let body: Value = serde_json::from_str(&body).expect("json request body");
                seen.lock().expect("recording lock").push(SeenRequest {
                    target: header("x-amz-target"),
                    authorization: header("authorization"),
                    body,
                });
                (status, Json(reply))
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock service");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{addr}"), recording)
}

fn test_settings(endpoint: &str) -> Settings {
    Settings {
        region: "us-east-1".to_string(),
        endpoint: endpoint.to_string(),
        credentials: AwsCredentials {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string(),
            session_token: None,
        },
        account_id: "123456789012".to_string(),
        input_bucket_uri: "s3://comprehend-123456789012-us-east-1/input/".to_string(),
        output_bucket_uri: "s3://comprehend-123456789012-us-east-1/output/".to_string(),
        data_access_role_arn:
            "arn:aws:iam::123456789012:role/service-role/AmazonComprehendServiceRole-S3"
                .to_string(),
        language_code: "en".to_string(),
        truncation_length: 0,
        topic_count: 5,
    }
}

fn test_job(name: &str, settings: &Settings) -> JobConfig {
    JobConfig {
        job_name: name.to_string(),
        input_uri: settings.input_bucket_uri.clone(),
        output_uri: settings.output_bucket_uri.clone(),
        data_access_role_arn: settings.data_access_role_arn.clone(),
    }
}

#[tokio::test]
async fn detect_sentiment_returns_label_and_score_mapping() {
    let reply = json!({
        "Sentiment": "POSITIVE",
        "SentimentScore": {"Positive": 0.93, "Negative": 0.02, "Neutral": 0.04, "Mixed": 0.01}
    });
    let (endpoint, recording) = spawn_service(StatusCode::OK, reply).await;
    let settings = test_settings(&endpoint);
    let client = ComprehendClient::new(&settings).expect("client");

    let (sentiment, score) = client
        .detect_sentiment("We will rebuild, reconcile and recover.", "en")
        .await
        .expect("call succeeds");

    assert_eq!(sentiment, "POSITIVE");
    assert!((score.positive - 0.93).abs() < 1e-9);
    assert!((score.negative - 0.02).abs() < 1e-9);
    assert!((score.neutral - 0.04).abs() < 1e-9);
    assert!((score.mixed - 0.01).abs() < 1e-9);

    let seen = recording.lock().expect("recording lock");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].target, "Comprehend_20171127.DetectSentiment");
    assert_eq!(seen[0].body["Text"], "We will rebuild, reconcile and recover.");
    assert_eq!(seen[0].body["LanguageCode"], "en");
    assert!(seen[0]
        .authorization
        .starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
}

#[tokio::test]
async fn detect_entities_extracts_the_entity_list() {
    let reply = json!({
        "Entities": [
            {"Text": "Amanda Gorman", "Type": "PERSON", "Score": 0.998, "BeginOffset": 0, "EndOffset": 13},
            {"Text": "January", "Type": "DATE", "Score": 0.97, "BeginOffset": 20, "EndOffset": 27}
        ]
    });
    let (endpoint, _recording) = spawn_service(StatusCode::OK, reply).await;
    let client = ComprehendClient::new(&test_settings(&endpoint)).expect("client");

    let entities = client
        .detect_entities("Amanda Gorman spoke in January.", "en")
        .await
        .expect("call succeeds");

    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].text, "Amanda Gorman");
    assert_eq!(entities[0].entity_type, "PERSON");
    assert_eq!(entities[1].begin_offset, 20);
    assert_eq!(entities[1].end_offset, 27);
}

#[tokio::test]
async fn detect_syntax_and_key_phrases_extract_their_lists() {
    let syntax_reply = json!({
        "SyntaxTokens": [
            {"Text": "climb", "PartOfSpeech": {"Tag": "VERB", "Score": 0.99}, "BeginOffset": 0, "EndOffset": 5}
        ]
    });
    let (endpoint, _recording) = spawn_service(StatusCode::OK, syntax_reply).await;
    let client = ComprehendClient::new(&test_settings(&endpoint)).expect("client");
    let tokens = client.detect_syntax("climb", "en").await.expect("syntax");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].part_of_speech.tag, "VERB");

    let phrase_reply = json!({
        "KeyPhrases": [
            {"Text": "the hill we climb", "Score": 0.99, "BeginOffset": 0, "EndOffset": 17}
        ]
    });
    let (endpoint, _recording) = spawn_service(StatusCode::OK, phrase_reply).await;
    let client = ComprehendClient::new(&test_settings(&endpoint)).expect("client");
    let phrases = client
        .detect_key_phrases("the hill we climb", "en")
        .await
        .expect("key phrases");
    assert_eq!(phrases.len(), 1);
    assert_eq!(phrases[0].text, "the hill we climb");
}

#[tokio::test]
async fn topics_job_sends_the_requested_topic_count() {
    let (endpoint, recording) =
        spawn_service(StatusCode::OK, json!({"JobId": "job-123", "JobStatus": "SUBMITTED"})).await;
    let settings = test_settings(&endpoint);
    let client = ComprehendClient::new(&settings).expect("client");

    let job_id = client
        .start_topics_detection_job(&test_job("gorman_topic_detection", &settings), 5)
        .await
        .expect("submission accepted");
    assert_eq!(job_id, "job-123");

    let seen = recording.lock().expect("recording lock");
    assert_eq!(seen[0].target, "Comprehend_20171127.StartTopicsDetectionJob");
    assert_eq!(seen[0].body["NumberOfTopics"], 5);
    assert_eq!(seen[0].body["JobName"], "gorman_topic_detection");
    assert_eq!(seen[0].body["InputDataConfig"]["InputFormat"], "ONE_DOC_PER_FILE");
    assert!(seen[0].body.get("LanguageCode").is_none());
}

#[tokio::test]
async fn entities_job_sends_language_and_data_access_role() {
    let (endpoint, recording) =
        spawn_service(StatusCode::OK, json!({"JobId": "job-entities-1"})).await;
    let settings = test_settings(&endpoint);
    let client = ComprehendClient::new(&settings).expect("client");

    let job_id = client
        .start_entities_detection_job(&test_job("gorman_entities_detection", &settings), "en")
        .await
        .expect("submission accepted");
    assert_eq!(job_id, "job-entities-1");

    let seen = recording.lock().expect("recording lock");
    assert_eq!(seen[0].target, "Comprehend_20171127.StartEntitiesDetectionJob");
    assert_eq!(seen[0].body["LanguageCode"], "en");
    assert_eq!(
        seen[0].body["DataAccessRoleArn"],
        settings.data_access_role_arn.as_str()
    );
    assert_eq!(
        seen[0].body["OutputDataConfig"]["S3Uri"],
        settings.output_bucket_uri.as_str()
    );
}

#[tokio::test]
async fn service_error_surfaces_as_a_typed_failure() {
    let reply = json!({
        "__type": "com.amazonaws.comprehend#TextSizeLimitExceededException",
        "message": "Input text size exceeds limit of 5000 bytes"
    });
    let (endpoint, _recording) = spawn_service(StatusCode::BAD_REQUEST, reply).await;
    let client = ComprehendClient::new(&test_settings(&endpoint)).expect("client");

    let err = client
        .detect_entities("oversized", "en")
        .await
        .expect_err("must fail");
    match err {
        ComprehendError::Service {
            operation,
            code,
            message,
        } => {
            assert_eq!(operation, "DetectEntities");
            assert_eq!(code, "TextSizeLimitExceededException");
            assert!(message.contains("exceeds limit"));
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn job_submission_errors_are_not_swallowed() {
    let reply = json!({
        "__type": "com.amazonaws.comprehend#AccessDeniedException",
        "Message": "role cannot be assumed"
    });
    let (endpoint, _recording) = spawn_service(StatusCode::FORBIDDEN, reply).await;
    let settings = test_settings(&endpoint);
    let client = ComprehendClient::new(&settings).expect("client");

    let err = client
        .start_sentiment_detection_job(&test_job("denied", &settings), "en")
        .await
        .expect_err("must fail");
    match err {
        ComprehendError::Service { code, message, .. } => {
            assert_eq!(code, "AccessDeniedException");
            assert!(message.contains("cannot be assumed"));
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn batch_manifest_submits_each_job_in_order() {
    let (endpoint, recording) = spawn_service(StatusCode::OK, json!({"JobId": "job-9"})).await;
    let settings = test_settings(&endpoint);
    let manifest: Manifest = serde_json::from_value(json!({
        "jobs": [
            {"kind": "entities", "job_name": "speech_entities"},
            {"kind": "topics", "job_name": "speech_topics", "topics": 25}
        ]
    }))
    .expect("manifest parses");

    batch::run_manifest(&manifest, &settings)
        .await
        .expect("manifest run succeeds");

    let seen = recording.lock().expect("recording lock");
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].target, "Comprehend_20171127.StartEntitiesDetectionJob");
    assert_eq!(seen[0].body["LanguageCode"], "en");
    assert_eq!(seen[1].target, "Comprehend_20171127.StartTopicsDetectionJob");
    assert_eq!(seen[1].body["NumberOfTopics"], 25);
}

#[tokio::test]
async fn batch_aborts_on_the_first_failed_submission() {
    let reply = json!({
        "__type": "com.amazonaws.comprehend#TooManyRequestsException",
        "message": "slow down"
    });
    let (endpoint, recording) = spawn_service(StatusCode::BAD_REQUEST, reply).await;
    let settings = test_settings(&endpoint);
    let manifest: Manifest = serde_json::from_value(json!({
        "jobs": [
            {"kind": "key-phrases", "job_name": "first"},
            {"kind": "sentiment", "job_name": "never_submitted"}
        ]
    }))
    .expect("manifest parses");

    let result = batch::run_manifest(&manifest, &settings).await;
    assert!(result.is_err());

    let seen = recording.lock().expect("recording lock");
    assert_eq!(seen.len(), 1, "later jobs must not be attempted");
    assert_eq!(seen[0].body["JobName"], "first");
}
