//! Gemini endpoint — text-only `generateContent` calls.
//!
//! The credential travels with each request; this module never reads keys
//! from the environment or stores one of its own.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AiError;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Model used when `GEMINI_MODEL` is not configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 2048;

/// A completion backend the [`super::AiClient`] can drive.
///
/// Implementations must return a non-empty completion or an error; the one
/// production implementation is [`GeminiEndpoint`], and tests substitute
/// stubs to exercise the decode and fallback paths without a network.
#[async_trait]
pub trait ModelEndpoint: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, AiError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct Candidate {
    // Absent when a candidate is blocked before producing content.
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt_token_count: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates_token_count: Option<u32>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Endpoint
// ────────────────────────────────────────────────────────────────────────────

/// Production endpoint for Google's `generateContent` API.
pub struct GeminiEndpoint {
    client: Client,
    model: String,
}

impl GeminiEndpoint {
    /// No request timeout is configured: a slow completion is left in
    /// flight until it settles, and nothing else queues behind the caller.
    pub fn new(model: String) -> Self {
        Self {
            client: Client::new(),
            model,
        }
    }
}

#[async_trait]
impl ModelEndpoint for GeminiEndpoint {
    async fn complete(
        &self,
        api_key: &str,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, AiError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
            system_instruction: system.map(|text| SystemInstruction {
                parts: vec![TextPart { text }],
            }),
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, api_key
        );

        let response = self.client.post(&url).json(&request_body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the structured error message
            let message = serde_json::from_str::<GenerateContentResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: GenerateContentResponse = response.json().await?;

        if let Some(error) = api_response.error {
            return Err(AiError::Api {
                status: status.as_u16(),
                message: error.message,
            });
        }

        if let Some(usage) = api_response.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_token_count.unwrap_or(0),
                usage.candidates_token_count.unwrap_or(0)
            );
        }

        let mut text = String::new();
        if let Some(candidate) = api_response.candidates.into_iter().flatten().next() {
            if let Some(content) = candidate.content {
                for part in content.parts {
                    if let Some(t) = part.text {
                        text.push_str(&t);
                    }
                }
            }
        }

        if text.trim().is_empty() {
            return Err(AiError::EmptyCompletion);
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_to_gemini_wire_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: "hello" }],
            }],
            system_instruction: Some(SystemInstruction {
                parts: vec![TextPart { text: "be brief" }],
            }),
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
    }

    #[test]
    fn test_request_omits_absent_system_instruction() {
        let request = GenerateContentRequest {
            contents: vec![],
            system_instruction: None,
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn test_response_decodes_candidate_text() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "part one "}, {"text": "part two"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 34}
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let candidate = response.candidates.unwrap().remove(0);
        let text: String = candidate
            .content
            .unwrap()
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        assert_eq!(text, "part one part two");
    }

    #[test]
    fn test_response_decodes_error_body() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.error.unwrap().message, "API key not valid");
    }

    #[test]
    fn test_response_tolerates_blocked_candidate() {
        // Safety-blocked candidates arrive without content.
        let body = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(response.candidates.unwrap()[0].content.is_none());
    }
}
