// Learnify Text Generation Bridge
// Copyright (c) 2026 Xing_The_Creator | Learnify
//
// Thin client for the Hugging Face Inference API text-generation task.

use anyhow::{anyhow, bail, Context, Result};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{error, info};

use crate::config::TextGenConfig;

pub struct TextGenerator {
    client: reqwest::Client,
    endpoint: String,
    token: String,
    model: String,
    max_length: u32,
}

impl TextGenerator {
    /// Build a generator from config. Fails if no access token is set.
    pub fn from_config(config: &TextGenConfig) -> Result<Self> {
        let token = config
            .token
            .clone()
            .ok_or_else(|| anyhow!("No Hugging Face token configured (set HF_TOKEN)"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let endpoint = format!(
            "{}/models/{}",
            config.api_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            client,
            endpoint,
            token,
            model: config.model.clone(),
            max_length: config.max_length,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Continue `prompt` with the hosted model; returns the full generated text.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        info!("[TEXTGEN] Generating with {}: {}", self.model, prompt);

        let payload = json!({
            "inputs": prompt,
            "parameters": {
                "max_length": self.max_length,
                "num_return_sequences": 1
            }
        });

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await
            .context("Text generation request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!("[TEXTGEN] API Error {}: {}", status, body);
            bail!("Text generation API returned {}: {}", status, body);
        }

        let json: Value = resp
            .json()
            .await
            .context("Text generation response was not JSON")?;
        extract_generated_text(&json)
    }
}

/// Pull `generated_text` out of the first returned sequence.
pub fn extract_generated_text(json: &Value) -> Result<String> {
    if let Some(err) = json.get("error").and_then(|e| e.as_str()) {
        bail!("Text generation API error: {}", err);
    }

    let first = match json {
        Value::Array(items) => items.first(),
        Value::Object(_) => Some(json),
        _ => None,
    };

    first
        .and_then(|item| item["generated_text"].as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow!("Text generation response had no generated_text"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};

    fn config(token: Option<&str>) -> TextGenConfig {
        config_for("https://api-inference.huggingface.co/", token)
    }

    fn config_for(api_url: &str, token: Option<&str>) -> TextGenConfig {
        TextGenConfig {
            api_url: api_url.into(),
            model: "distilgpt2".into(),
            max_length: 150,
            timeout_secs: 5,
            token: token.map(|t| t.to_string()),
        }
    }

    #[test]
    fn test_requires_token() {
        assert!(TextGenerator::from_config(&config(None)).is_err());
    }

    #[test]
    fn test_endpoint_built_from_model() {
        let generator = TextGenerator::from_config(&config(Some("hf_x"))).unwrap();
        assert_eq!(
            generator.endpoint,
            "https://api-inference.huggingface.co/models/distilgpt2"
        );
        assert_eq!(generator.model(), "distilgpt2");
    }

    #[test]
    fn test_extract_generated_text() {
        let body = json!([{ "generated_text": "A loop repeats code." }]);
        assert_eq!(extract_generated_text(&body).unwrap(), "A loop repeats code.");

        let single = json!({ "generated_text": "ok" });
        assert_eq!(extract_generated_text(&single).unwrap(), "ok");

        assert!(extract_generated_text(&json!([])).is_err());
        assert!(extract_generated_text(&json!({ "error": "Model is loading" })).is_err());
    }

    /// Serve `app` on an ephemeral local port and return its base URL.
    async fn spawn_api(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_generate_reports_api_status() {
        let app = Router::new().route(
            "/models/distilgpt2",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "Model is loading") }),
        );
        let base = spawn_api(app).await;
        let generator = TextGenerator::from_config(&config_for(&base, Some("hf_x"))).unwrap();

        let err = generator.generate("What is a loop?").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("503"), "unexpected error: {}", msg);
        assert!(msg.contains("Model is loading"), "unexpected error: {}", msg);
    }

    #[tokio::test]
    async fn test_generate_returns_first_sequence() {
        let app = Router::new().route(
            "/models/distilgpt2",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["inputs"], "What is a loop?");
                assert_eq!(body["parameters"]["max_length"], 150);
                Json(json!([{ "generated_text": "What is a loop? A loop repeats code." }]))
            }),
        );
        let base = spawn_api(app).await;
        let generator = TextGenerator::from_config(&config_for(&base, Some("hf_x"))).unwrap();

        let text = generator.generate("What is a loop?").await.unwrap();
        assert_eq!(text, "What is a loop? A loop repeats code.");
    }
}
