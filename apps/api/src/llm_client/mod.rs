//! LLM Gateway — the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the generation API directly.
//! All LLM interactions MUST go through this module.

use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod normalize;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Default model for all pipeline calls. A per-request override is accepted
/// at the transform endpoint for A/B comparisons.
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";
const MAX_ATTEMPTS: u32 = 5;
const BASE_DELAY: Duration = Duration::from_secs(1);
const JITTER_STEP: Duration = Duration::from_millis(100);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Whether the request asks the model for strict-JSON output
/// (`responseMimeType: application/json`) or free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Json,
    Text,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("API call failed after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM output parse error: {0}")]
    Parse(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (Gemini generateContent)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
pub struct TextPart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Extracts the first candidate's first text part — the payload to normalize.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Pluggable generation backend. The pipeline depends on this trait so stage
/// behavior (fatal vs non-fatal fallbacks) is testable with scripted outputs.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        mode: GenerationMode,
        model_override: Option<&str>,
    ) -> Result<GenerateContentResponse, LlmError>;
}

/// The single LLM client used by the pipeline. Wraps the Gemini
/// generateContent API with bounded retry and a per-call timeout.
#[derive(Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    retry_base_delay: Duration,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GEMINI_API_BASE.to_string(), BASE_DELAY)
    }

    /// Constructor with an explicit endpoint and retry base delay.
    /// Tests point this at a local stub server with millisecond backoff.
    pub fn with_base_url(api_key: String, base_url: String, retry_base_delay: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url,
            retry_base_delay,
        }
    }

    /// Makes a raw generateContent call, returning the full response envelope.
    ///
    /// Retries transport errors and 5xx up to 5 attempts with exponential
    /// backoff plus a small linear jitter. 4xx is terminal: it signals a
    /// malformed request that retrying cannot fix, so it is returned
    /// immediately. Exhausted retries surface as a generic failure.
    pub async fn call(
        &self,
        prompt: &str,
        mode: GenerationMode,
        model_override: Option<&str>,
    ) -> Result<GenerateContentResponse, LlmError> {
        let model = model_override.unwrap_or(DEFAULT_MODEL);
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: match mode {
                GenerationMode::Json => Some(GenerationConfig {
                    response_mime_type: "application/json",
                }),
                GenerationMode::Text => None,
            },
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                // 1s, 2.1s, 4.2s, 8.3s
                let delay =
                    self.retry_base_delay * (1 << (attempt - 1)) + JITTER_STEP * (attempt - 1);
                warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "LLM call failed, retrying after backoff"
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&url).json(&request_body).send().await {
                Ok(r) => r,
                Err(e) => {
                    warn!("LLM transport error: {e}");
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {status}: {}", normalize::preview(&body));
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: normalize::preview(&body),
                });
                continue;
            }

            if !status.is_success() {
                // Client error — retrying cannot fix a malformed request.
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: normalize::preview(&body),
                });
            }

            let envelope: GenerateContentResponse = response.json().await?;
            debug!(model, candidates = envelope.candidates.len(), "LLM call succeeded");
            return Ok(envelope);
        }

        if let Some(e) = last_error {
            warn!("LLM call exhausted retries; last error: {e}");
        }
        Err(LlmError::RetriesExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(
        &self,
        prompt: &str,
        mode: GenerationMode,
        model_override: Option<&str>,
    ) -> Result<GenerateContentResponse, LlmError> {
        self.call(prompt, mode, model_override).await
    }
}

/// Convenience wrapper: JSON-mode call, normalize, deserialize.
pub async fn generate_json<T: DeserializeOwned>(
    llm: &dyn TextGenerator,
    prompt: &str,
    model_override: Option<&str>,
) -> Result<T, LlmError> {
    let response = llm
        .generate(prompt, GenerationMode::Json, model_override)
        .await?;
    let text = response.first_text().ok_or(LlmError::EmptyContent)?;
    normalize::parse_json_payload(text).map_err(|e| LlmError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::Router;

    use super::*;

    async fn stub_handler(
        State((counter, status, body)): State<(Arc<AtomicUsize>, u16, &'static str)>,
    ) -> (StatusCode, &'static str) {
        counter.fetch_add(1, Ordering::SeqCst);
        (StatusCode::from_u16(status).unwrap(), body)
    }

    /// Spawns a throwaway server that answers every request with a fixed
    /// status/body, counting attempts. Returns its base URL.
    async fn spawn_stub(status: u16, body: &'static str, counter: Arc<AtomicUsize>) -> String {
        let app = Router::new()
            .fallback(stub_handler)
            .with_state((counter, status, body));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn test_client(base_url: String) -> LlmClient {
        LlmClient::with_base_url("test-key".to_string(), base_url, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_permanent_503_issues_exactly_five_attempts() {
        let counter = Arc::new(AtomicUsize::new(0));
        let url = spawn_stub(503, "overloaded", counter.clone()).await;

        let err = test_client(url)
            .call("prompt", GenerationMode::Json, None)
            .await
            .unwrap_err();

        assert_eq!(counter.load(Ordering::SeqCst), 5);
        assert!(matches!(err, LlmError::RetriesExhausted { attempts: 5 }));
    }

    #[tokio::test]
    async fn test_client_error_is_terminal_after_one_attempt() {
        let counter = Arc::new(AtomicUsize::new(0));
        let url = spawn_stub(400, "bad request", counter.clone()).await;

        let err = test_client(url)
            .call("prompt", GenerationMode::Json, None)
            .await
            .unwrap_err();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        match err {
            LlmError::Api { status, .. } => assert_eq!(status, 400),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_success_envelope_first_text() {
        let counter = Arc::new(AtomicUsize::new(0));
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"hello"}]}}]}"#;
        let url = spawn_stub(200, body, counter.clone()).await;

        let envelope = test_client(url)
            .call("prompt", GenerationMode::Text, None)
            .await
            .unwrap();

        assert_eq!(envelope.first_text(), Some("hello"));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_generate_json_normalizes_fenced_output() {
        let counter = Arc::new(AtomicUsize::new(0));
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"```json\n{\"ok\": true}\n```"}]}}]}"#;
        let url = spawn_stub(200, body, counter).await;

        let client = test_client(url);
        let value: serde_json::Value = generate_json(&client, "prompt", None).await.unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn test_first_text_on_empty_candidates() {
        let envelope = GenerateContentResponse { candidates: vec![] };
        assert!(envelope.first_text().is_none());
    }
}
