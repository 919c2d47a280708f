//! Client for the Gemini `generateContent` REST endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

use super::model::GenerativeModel;
use super::prompt::GenerationConfig;
use crate::error::EstimateError;

/// Gemini API client. The API key is injected at construction.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

/// Error envelope returned by the Gemini API.
#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: &'a GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, joined.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

impl GeminiClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout_seconds: Option<u64>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        tracing::info!(base_url = base_url, model = model, "Gemini client initialized");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    fn model_url(&self) -> String {
        format!("{}/v1beta/models/{}", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    #[instrument(skip_all)]
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<Option<String>, EstimateError> {
        let url = format!("{}:generateContent", self.model_url());

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: config,
        };

        debug!(url = %url, "Gemini request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Gemini request failed");
                EstimateError::Transport(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<GeminiErrorResponse>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_else(|_| "no error details".to_string());

            error!(status = %status, message = %message, "Gemini returned an error status");
            return Err(EstimateError::Transport(format!("{}: {}", status, message)));
        }

        // Body read failures (timeout, reset) are transport errors, not parse errors
        let bytes = response.bytes().await.map_err(|e| {
            error!(error = %e, "Failed to read Gemini response body");
            EstimateError::Transport(e.to_string())
        })?;

        let payload: GenerateContentResponse = serde_json::from_slice(&bytes).map_err(|e| {
            error!(error = %e, "Failed to parse Gemini response envelope");
            EstimateError::MalformedResponse(format!("Invalid response envelope: {}", e))
        })?;

        Ok(payload.text())
    }

    async fn health_check(&self) -> Result<()> {
        self.client
            .get(self.model_url())
            .header("x-goog-api-key", &self.api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .context("Gemini health check failed")?
            .error_for_status()
            .context("Gemini model unavailable")?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Scripted reply for one connection to [`raw_server`].
    pub(crate) enum RawReply {
        /// Headers promise 500 body bytes, a fragment is sent, then the socket stalls.
        StalledBody,
        /// Complete 200 response with this JSON body.
        Json(String),
    }

    /// Plain TCP server answering each accepted connection with the next reply.
    /// Returns the base URL.
    pub(crate) async fn raw_server(replies: Vec<RawReply>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            for reply in replies {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                tokio::spawn(async move {
                    read_request(&mut stream).await;
                    match reply {
                        RawReply::StalledBody => {
                            let head = "HTTP/1.1 200 OK\r\n\
                                        content-type: application/json\r\n\
                                        content-length: 500\r\n\r\n\
                                        {\"candidates\":[";
                            let _ = stream.write_all(head.as_bytes()).await;
                            tokio::time::sleep(Duration::from_secs(5)).await;
                        }
                        RawReply::Json(body) => {
                            let response = format!(
                                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                                 content-length: {}\r\nconnection: close\r\n\r\n{}",
                                body.len(),
                                body
                            );
                            let _ = stream.write_all(response.as_bytes()).await;
                        }
                    }
                });
            }
        });

        format!("http://{}", addr)
    }

    /// Consume headers and the declared body so the client is not reset mid-send.
    async fn read_request(stream: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => n,
            };
            buf.extend_from_slice(&chunk[..n]);

            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let body_len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    return;
                }
            }
        }
    }

    /// Gemini envelope wrapping `text` as the single candidate part.
    pub(crate) fn envelope(text: &str) -> String {
        json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        })
        .to_string()
    }

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(&server.base_url(), "test-key", "gemini-2.5-flash", Some(5)).unwrap()
    }

    #[tokio::test]
    async fn sends_prompt_and_config_and_returns_text() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(GENERATE_PATH)
                    .header("x-goog-api-key", "test-key")
                    .body_includes("\"responseMimeType\":\"application/json\"")
                    .body_includes("\"temperature\":0.2")
                    .body_includes("Build a shed");
                then.status(200).json_body(json!({
                    "candidates": [{
                        "content": {
                            "role": "model",
                            "parts": [{ "text": "{\"a\":" }, { "text": "1}" }]
                        }
                    }]
                }));
            })
            .await;

        let text = client_for(&server)
            .generate("Build a shed", &GenerationConfig::for_estimate())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text.as_deref(), Some("{\"a\":1}"));
    }

    #[tokio::test]
    async fn missing_candidates_yield_no_text() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH);
                then.status(200).json_body(json!({ "promptFeedback": {} }));
            })
            .await;

        let text = client_for(&server)
            .generate("p", &GenerationConfig::for_estimate())
            .await
            .unwrap();

        assert!(text.is_none());
    }

    #[tokio::test]
    async fn error_status_is_a_transport_error() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH);
                then.status(503).json_body(json!({
                    "error": { "code": 503, "message": "The model is overloaded." }
                }));
            })
            .await;

        let err = client_for(&server)
            .generate("p", &GenerationConfig::for_estimate())
            .await
            .unwrap_err();

        match err {
            EstimateError::Transport(msg) => {
                assert!(msg.contains("503"), "message: {}", msg);
                assert!(msg.contains("overloaded"), "message: {}", msg);
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_json_envelope_is_malformed() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH);
                then.status(200).body("<html>Service Unavailable</html>");
            })
            .await;

        let err = client_for(&server)
            .generate("p", &GenerationConfig::for_estimate())
            .await
            .unwrap_err();

        assert!(
            matches!(err, EstimateError::MalformedResponse(_)),
            "got {:?}",
            err
        );
    }

    #[tokio::test]
    async fn stalled_body_is_a_transport_error() {
        let base_url = raw_server(vec![RawReply::StalledBody]).await;
        let client = GeminiClient::new(&base_url, "k", "gemini-2.5-flash", Some(1)).unwrap();

        let err = client
            .generate("p", &GenerationConfig::for_estimate())
            .await
            .unwrap_err();

        assert!(matches!(err, EstimateError::Transport(_)), "got {:?}", err);
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn raw_server_serves_complete_envelopes() {
        let base_url = raw_server(vec![RawReply::Json(envelope("{}"))]).await;
        let client = GeminiClient::new(&base_url, "k", "gemini-2.5-flash", Some(5)).unwrap();

        let text = client
            .generate("p", &GenerationConfig::for_estimate())
            .await
            .unwrap();

        assert_eq!(text.as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn connection_failure_is_a_transport_error() {
        let client = GeminiClient::new("http://127.0.0.1:1", "k", "gemini-2.5-flash", Some(2)).unwrap();

        let err = client
            .generate("p", &GenerationConfig::for_estimate())
            .await
            .unwrap_err();

        assert!(matches!(err, EstimateError::Transport(_)));
    }

    #[tokio::test]
    async fn health_check_queries_the_model() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1beta/models/gemini-2.5-flash")
                    .header("x-goog-api-key", "test-key");
                then.status(200).json_body(json!({ "name": "models/gemini-2.5-flash" }));
            })
            .await;

        client_for(&server).health_check().await.unwrap();
        mock.assert_async().await;
    }
}
