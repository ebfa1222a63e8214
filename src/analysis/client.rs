use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, instrument};

use super::parser::ParseError;
use crate::config::GeminiConfig;

pub const SYSTEM_INSTRUCTION: &str =
    "You are a nutrition expert. Analyze food images and provide detailed nutritional information.";

pub const ANALYSIS_PROMPT: &str = "Analyze this food image and provide:
1. Food name
2. Estimated calories (kcal)
3. Estimated protein (grams)
4. Estimated carbohydrates (grams)
5. Estimated fats (grams)
6. Brief description

Respond in this exact format:
Food: [name]
Calories: [number]
Protein: [number]g
Carbs: [number]g
Fats: [number]g
Description: [brief description]";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Google API key not configured")]
    NotConfigured,
    #[error("{0}")]
    Upstream(String),
    #[error(transparent)]
    Malformed(#[from] ParseError),
}

impl From<anyhow::Error> for AnalysisError {
    fn from(e: anyhow::Error) -> Self {
        Self::Upstream(format!("{e:#}"))
    }
}

#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    /// Returns the model's free-text reply for one image.
    async fn describe_image(&self, image: Bytes, content_type: &str) -> Result<String, AnalysisError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inline_data", alias = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mime_type", alias = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Gemini `generateContent` over plain REST.
pub struct GeminiAnalyzer {
    client: Client,
    config: GeminiConfig,
}

impl GeminiAnalyzer {
    pub fn new(config: GeminiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("build gemini http client")?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

fn build_request(image: &[u8], content_type: &str) -> GenerateRequest {
    GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part::Text {
                text: SYSTEM_INSTRUCTION.to_string(),
            }],
        },
        contents: vec![Content {
            role: Some("user".into()),
            parts: vec![
                Part::Text {
                    text: ANALYSIS_PROMPT.to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: content_type.to_string(),
                        data: STANDARD.encode(image),
                    },
                },
            ],
        }],
    }
}

fn extract_text(response: GenerateResponse) -> Result<String, AnalysisError> {
    if let Some(err) = response.error {
        return Err(AnalysisError::Upstream(format!("Gemini API error: {}", err.message)));
    }
    let text: String = response
        .candidates
        .into_iter()
        .flatten()
        .next()
        .and_then(|c| c.content)
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| match p {
                    Part::Text { text } => Some(text),
                    Part::InlineData { .. } => None,
                })
                .collect()
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(AnalysisError::Upstream("No content in Gemini response".into()));
    }
    Ok(text)
}

#[async_trait]
impl ImageAnalyzer for GeminiAnalyzer {
    #[instrument(skip(self, image), fields(model = %self.config.model, bytes = image.len()))]
    async fn describe_image(&self, image: Bytes, content_type: &str) -> Result<String, AnalysisError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AnalysisError::NotConfigured)?;

        let body = build_request(&image, content_type);
        debug!("sending image to gemini");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .context("gemini request")?;

        let status = response.status();
        let text = response.text().await.context("read gemini response")?;
        if !status.is_success() {
            error!(%status, "gemini api error");
            return Err(AnalysisError::Upstream(format!(
                "Gemini API returned {status}: {text}"
            )));
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&text).context("decode gemini response")?;
        extract_text(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(api_key: Option<&str>) -> GeminiConfig {
        GeminiConfig {
            api_key: api_key.map(String::from),
            model: "gemini-2.0-flash".into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta/".into(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        let analyzer = GeminiAnalyzer::new(config(Some("k"))).unwrap();
        assert_eq!(
            analyzer.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn request_carries_prompt_and_base64_image() {
        let req = build_request(b"abc", "image/png");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value["system_instruction"]["parts"][0]["text"],
            SYSTEM_INSTRUCTION
        );
        let parts = &value["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], ANALYSIS_PROMPT);
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], "YWJj");
    }

    #[test]
    fn extracts_text_from_first_candidate() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Food: Apple\n" }, { "text": "Calories: 95" }] }
            }]
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "Food: Apple\nCalories: 95");
    }

    #[test]
    fn api_error_is_upstream_failure() {
        let response: GenerateResponse =
            serde_json::from_value(json!({ "error": { "message": "quota exceeded" } })).unwrap();
        let err = extract_text(response).unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn empty_candidates_are_rejected() {
        let response: GenerateResponse = serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(matches!(extract_text(response), Err(AnalysisError::Upstream(_))));
    }

    #[tokio::test]
    async fn missing_api_key_is_reported_before_any_request() {
        let analyzer = GeminiAnalyzer::new(config(None)).unwrap();
        let err = analyzer
            .describe_image(Bytes::from_static(b"img"), "image/jpeg")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::NotConfigured));
    }
}
