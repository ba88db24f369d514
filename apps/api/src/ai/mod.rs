//! AI client — the single point of entry for all Gemini calls in LearnMate.
//!
//! ARCHITECTURAL RULE: no other module may talk to the model API directly,
//! and no request leaves this module without a caller-supplied credential.
//! Every capability follows the same shape: build a prompt, invoke the
//! model, decode the completion into a typed value, and substitute the
//! capability's placeholder when the completion is unusable.

pub mod credentials;
pub mod gemini;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub use credentials::CredentialStore;
pub use gemini::{GeminiEndpoint, ModelEndpoint, DEFAULT_MODEL};

/// Notice attached to an outcome when the model could not be reached and
/// placeholder content was substituted.
pub const REMOTE_FAILURE_NOTICE: &str =
    "The AI service could not be reached. Showing placeholder content instead — check your API key and try again.";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("no API credential available for this request")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned an empty completion")]
    EmptyCompletion,
}

/// A structured value the model is asked to produce.
///
/// `conforms` rejects values that decoded cleanly but violate the
/// capability's documented contract — for example a quiz question whose
/// correct-answer index points outside its own options. A rejected value
/// is replaced wholesale by the capability's placeholder; partially valid
/// completions are never forwarded.
pub trait AiPayload: DeserializeOwned {
    fn conforms(&self) -> bool {
        true
    }
}

impl<T: AiPayload> AiPayload for Vec<T> {
    fn conforms(&self) -> bool {
        self.iter().all(T::conforms)
    }
}

/// Where the value in an [`AiOutcome`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Decoded from a model completion that passed its contract checks.
    Model,
    /// The capability's placeholder was substituted.
    Fallback,
}

/// The settled result of a capability invocation.
///
/// Invocations only fail outright when no credential is available; every
/// other problem resolves to a usable value. `notice` carries a
/// user-facing warning when the model was unreachable; decode failures
/// substitute the placeholder silently.
#[derive(Debug, Clone)]
pub struct AiOutcome<T> {
    pub value: T,
    pub provenance: Provenance,
    pub notice: Option<String>,
}

/// The single AI client shared by all capabilities.
///
/// Holds no credential state of its own: the key for each call is resolved
/// by the caller (see [`CredentialStore`]) and passed in per request.
#[derive(Clone)]
pub struct AiClient {
    endpoint: Arc<dyn ModelEndpoint>,
}

impl AiClient {
    pub fn new(endpoint: Arc<dyn ModelEndpoint>) -> Self {
        Self { endpoint }
    }

    /// Runs one structured-output capability end to end.
    ///
    /// With no `api_key` this returns [`AiError::MissingCredential`] before
    /// any network traffic. A transport or API failure resolves to the
    /// fallback with a notice; a completion that cannot be decoded (or that
    /// fails its contract) resolves to the fallback without one. The
    /// fallback closure receives the raw completion when one was obtained,
    /// so a capability may fold usable text into its placeholder.
    pub async fn generate<T, F>(
        &self,
        api_key: Option<&str>,
        prompt: &str,
        system: &str,
        fallback: F,
    ) -> Result<AiOutcome<T>, AiError>
    where
        T: AiPayload,
        F: FnOnce(Option<&str>) -> T,
    {
        let api_key = api_key.ok_or(AiError::MissingCredential)?;

        match self.endpoint.complete(api_key, prompt, Some(system)).await {
            Ok(completion) => {
                let (value, provenance) = interpret(&completion, fallback);
                Ok(AiOutcome {
                    value,
                    provenance,
                    notice: None,
                })
            }
            Err(e) => {
                warn!("Model call failed, substituting placeholder: {e}");
                Ok(AiOutcome {
                    value: fallback(None),
                    provenance: Provenance::Fallback,
                    notice: Some(REMOTE_FAILURE_NOTICE.to_string()),
                })
            }
        }
    }

    /// Runs a free-text capability (chat). An empty completion substitutes
    /// the fallback silently, matching the structured path's treatment of
    /// undecodable output; an unreachable model attaches a notice.
    pub async fn complete_text(
        &self,
        api_key: Option<&str>,
        prompt: &str,
        system: &str,
        fallback: &str,
    ) -> Result<AiOutcome<String>, AiError> {
        let api_key = api_key.ok_or(AiError::MissingCredential)?;

        match self.endpoint.complete(api_key, prompt, Some(system)).await {
            Ok(text) => Ok(AiOutcome {
                value: text,
                provenance: Provenance::Model,
                notice: None,
            }),
            Err(AiError::EmptyCompletion) => Ok(AiOutcome {
                value: fallback.to_string(),
                provenance: Provenance::Fallback,
                notice: None,
            }),
            Err(e) => {
                warn!("Chat completion failed, substituting fallback reply: {e}");
                Ok(AiOutcome {
                    value: fallback.to_string(),
                    provenance: Provenance::Fallback,
                    notice: Some(REMOTE_FAILURE_NOTICE.to_string()),
                })
            }
        }
    }
}

/// Decodes a completion into `T`, falling back when the text is not valid
/// JSON for the shape or the decoded value breaks its contract.
fn interpret<T, F>(completion: &str, fallback: F) -> (T, Provenance)
where
    T: AiPayload,
    F: FnOnce(Option<&str>) -> T,
{
    let cleaned = strip_code_fences(completion);

    match serde_json::from_str::<T>(cleaned) {
        Ok(value) if value.conforms() => (value, Provenance::Model),
        Ok(_) => {
            warn!("Completion decoded but violated its contract, substituting placeholder");
            (fallback(Some(completion)), Provenance::Fallback)
        }
        Err(e) => {
            warn!("Completion was not valid JSON for the requested shape: {e}");
            (fallback(Some(completion)), Provenance::Fallback)
        }
    }
}

/// Strips a Markdown code fence that models often wrap around JSON output.
/// The info string after the opening fence ("json", "JSON", ...) is dropped
/// along with the fence itself, even when fence, tag, and payload share a
/// single line.
fn strip_code_fences(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = match rest.find('\n') {
            Some(pos) => &rest[pos + 1..],
            // One-line fence: the tag sits flush against the payload.
            None => match rest.get(..4) {
                Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
                _ => rest,
            },
        };
        if let Some(body) = text.trim_end().strip_suffix("```") {
            text = body;
        }
        text = text.trim();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Counter {
        value: i32,
    }

    impl AiPayload for Counter {
        fn conforms(&self) -> bool {
            self.value >= 0
        }
    }

    fn placeholder(_raw: Option<&str>) -> Counter {
        Counter { value: 0 }
    }

    enum StubBehavior {
        Reply(&'static str),
        Unreachable,
        Empty,
    }

    struct StubEndpoint(StubBehavior);

    #[async_trait]
    impl ModelEndpoint for StubEndpoint {
        async fn complete(
            &self,
            _api_key: &str,
            _prompt: &str,
            _system: Option<&str>,
        ) -> Result<String, AiError> {
            match self.0 {
                StubBehavior::Reply(text) => Ok(text.to_string()),
                StubBehavior::Unreachable => Err(AiError::Api {
                    status: 503,
                    message: "service unavailable".to_string(),
                }),
                StubBehavior::Empty => Err(AiError::EmptyCompletion),
            }
        }
    }

    /// Endpoint that fails the test if any call reaches it.
    struct NoCallEndpoint;

    #[async_trait]
    impl ModelEndpoint for NoCallEndpoint {
        async fn complete(
            &self,
            _api_key: &str,
            _prompt: &str,
            _system: Option<&str>,
        ) -> Result<String, AiError> {
            panic!("endpoint must not be reached without a credential");
        }
    }

    #[test]
    fn test_strip_code_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_uppercase_tag() {
        let input = "```JSON\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_single_line_with_tag() {
        let input = "```json{\"key\": \"value\"}```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
        let upper = "```JSON{\"key\": \"value\"}```";
        assert_eq!(strip_code_fences(upper), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_single_line_without_tag() {
        let input = "```{\"key\": \"value\"}```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_interpret_valid_completion() {
        let (value, provenance) = interpret::<Counter, _>("{\"value\": 7}", placeholder);
        assert_eq!(value, Counter { value: 7 });
        assert_eq!(provenance, Provenance::Model);
    }

    #[test]
    fn test_interpret_fenced_completion() {
        let (value, provenance) =
            interpret::<Counter, _>("```json\n{\"value\": 7}\n```", placeholder);
        assert_eq!(value, Counter { value: 7 });
        assert_eq!(provenance, Provenance::Model);
    }

    #[test]
    fn test_interpret_invalid_json_substitutes_placeholder() {
        let (value, provenance) = interpret::<Counter, _>("not json at all", |raw| {
            assert_eq!(raw, Some("not json at all"), "fallback must see the raw text");
            Counter { value: 0 }
        });
        assert_eq!(value, Counter { value: 0 });
        assert_eq!(provenance, Provenance::Fallback);
    }

    #[test]
    fn test_interpret_contract_violation_substitutes_placeholder() {
        // Valid JSON for the shape, but conforms() rejects negatives.
        let (value, provenance) = interpret::<Counter, _>("{\"value\": -3}", placeholder);
        assert_eq!(value, Counter { value: 0 });
        assert_eq!(provenance, Provenance::Fallback);
    }

    #[test]
    fn test_vec_payload_conforms_checks_every_element() {
        let ok: Vec<Counter> = vec![Counter { value: 1 }, Counter { value: 2 }];
        let bad: Vec<Counter> = vec![Counter { value: 1 }, Counter { value: -1 }];
        assert!(ok.conforms());
        assert!(!bad.conforms());
    }

    #[tokio::test]
    async fn test_generate_without_credential_skips_endpoint() {
        let client = AiClient::new(Arc::new(NoCallEndpoint));
        let result = client
            .generate::<Counter, _>(None, "prompt", "system", placeholder)
            .await;
        assert!(matches!(result, Err(AiError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_generate_decodes_model_completion() {
        let client = AiClient::new(Arc::new(StubEndpoint(StubBehavior::Reply(
            "{\"value\": 42}",
        ))));
        let outcome = client
            .generate::<Counter, _>(Some("key"), "prompt", "system", placeholder)
            .await
            .unwrap();
        assert_eq!(outcome.value, Counter { value: 42 });
        assert_eq!(outcome.provenance, Provenance::Model);
        assert!(outcome.notice.is_none());
    }

    #[tokio::test]
    async fn test_generate_unreachable_model_attaches_notice() {
        let client = AiClient::new(Arc::new(StubEndpoint(StubBehavior::Unreachable)));
        let outcome = client
            .generate::<Counter, _>(Some("key"), "prompt", "system", placeholder)
            .await
            .unwrap();
        assert_eq!(outcome.value, Counter { value: 0 });
        assert_eq!(outcome.provenance, Provenance::Fallback);
        assert_eq!(outcome.notice.as_deref(), Some(REMOTE_FAILURE_NOTICE));
    }

    #[tokio::test]
    async fn test_generate_undecodable_completion_is_silent() {
        let client = AiClient::new(Arc::new(StubEndpoint(StubBehavior::Reply("garbage"))));
        let outcome = client
            .generate::<Counter, _>(Some("key"), "prompt", "system", placeholder)
            .await
            .unwrap();
        assert_eq!(outcome.provenance, Provenance::Fallback);
        assert!(
            outcome.notice.is_none(),
            "decode failures must not raise a user notice"
        );
    }

    #[tokio::test]
    async fn test_complete_text_without_credential_skips_endpoint() {
        let client = AiClient::new(Arc::new(NoCallEndpoint));
        let result = client
            .complete_text(None, "hello", "system", "sorry")
            .await;
        assert!(matches!(result, Err(AiError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_complete_text_empty_reply_substitutes_fallback_silently() {
        let client = AiClient::new(Arc::new(StubEndpoint(StubBehavior::Empty)));
        let outcome = client
            .complete_text(Some("key"), "hello", "system", "sorry")
            .await
            .unwrap();
        assert_eq!(outcome.value, "sorry");
        assert_eq!(outcome.provenance, Provenance::Fallback);
        assert!(outcome.notice.is_none());
    }

    #[tokio::test]
    async fn test_complete_text_unreachable_model_attaches_notice() {
        let client = AiClient::new(Arc::new(StubEndpoint(StubBehavior::Unreachable)));
        let outcome = client
            .complete_text(Some("key"), "hello", "system", "sorry")
            .await
            .unwrap();
        assert_eq!(outcome.value, "sorry");
        assert_eq!(outcome.notice.as_deref(), Some(REMOTE_FAILURE_NOTICE));
    }
}
