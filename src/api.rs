use crate::{
    config::Config,
    constants::{API_KEY_HEADER, GEMINI_API_VERSION},
    errors::{ChatError, ChatResult, ServiceError},
    logging::log_api_call,
    models::ApiCallLog,
};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Instant;

/// The external text-generation service. One call per user submission.
#[async_trait]
pub trait Generate: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError>;
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(config: &Config) -> ChatResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ChatError::config_error(format!("Failed to build HTTP client: {}", e)))?;

        let endpoint = format!(
            "{}/{}/models/{}:generateContent",
            config.api_base_url.trim_end_matches('/'),
            GEMINI_API_VERSION,
            config.model
        );

        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, prompt: &str) -> Result<(u16, Value), ServiceError> {
        let payload = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_output_tokens
            }
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok((status.as_u16(), response.json().await?))
    }
}

#[async_trait]
impl Generate for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        let start_time = Instant::now();
        let outcome = self.send(prompt).await;

        let response_status = match &outcome {
            Ok((status, _)) => *status,
            Err(ServiceError::Status { status, .. }) => *status,
            Err(ServiceError::Http(e)) => e.status().map_or(0, |s| s.as_u16()),
            Err(_) => 0,
        };
        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: self.endpoint.clone(),
            request_summary: format!("generateContent ({} chars)", prompt.chars().count()),
            response_status,
            response_time_ms: start_time.elapsed().as_millis(),
        });

        let (_, body) = outcome?;
        extract_reply(&body)
    }
}

/// Pulls the reply text out of a `generateContent` response body.
fn extract_reply(body: &Value) -> Result<String, ServiceError> {
    if let Some(error) = body["error"].as_object() {
        return Err(ServiceError::Api {
            kind: error
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            message: error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("no message")
                .to_string(),
        });
    }

    if let Some(reason) = body["promptFeedback"]["blockReason"].as_str() {
        return Err(ServiceError::Api {
            kind: "BLOCKED".to_string(),
            message: format!("prompt blocked: {}", reason),
        });
    }

    let parts = body["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or(ServiceError::MissingContent)?;

    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();

    if text.is_empty() {
        return Err(ServiceError::MissingContent);
    }
    Ok(text)
}
