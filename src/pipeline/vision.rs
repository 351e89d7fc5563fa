//! Vision-model interaction: one chat request per image, binary verdict out.
//!
//! The remote dependency hides behind [`MeaningModel`], whose only capability
//! is "give me your textual verdict for this encoded image". Everything the
//! pipeline actually relies on — the exact-match `SI` interpretation and the
//! fail-safe default — lives here in plain functions, so tests swap the
//! network for a canned fake and still exercise the real decision logic.
//!
//! ## Failure policy
//!
//! A classification call that fails in transport or parsing is logged and
//! treated as "not meaningful". The batch never aborts and nothing is
//! retried: one image, one request, one verdict.

use crate::config::ClassifyConfig;
use crate::error::{ItemError, SiftError};
use crate::pipeline::encode::to_data_url;
use crate::prompts::CLASSIFY_PROMPT;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// A model that can answer the meaningful-content question for one image.
///
/// Implementations must be `Send + Sync`; the production implementation is
/// [`VisionEndpoint`], tests use deterministic fakes.
#[async_trait]
pub trait MeaningModel: Send + Sync {
    /// Raw textual verdict for one base64-encoded image.
    ///
    /// The caller interprets the text; implementations must not normalise it.
    async fn verdict(&self, image_base64: &str) -> Result<String, ItemError>;
}

/// Production [`MeaningModel`] backed by an OpenAI-compatible chat endpoint.
pub struct VisionEndpoint {
    client: reqwest::Client,
    chat_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    top_p: f32,
}

impl VisionEndpoint {
    /// Build the endpoint client from a classification config.
    pub fn from_config(config: &ClassifyConfig) -> Result<Self, SiftError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| SiftError::HttpClientFailed {
                base_url: config.base_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            chat_url: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
        })
    }
}

// Response DTOs — only the fields the pipeline reads.

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageBody,
}

#[derive(Debug, Deserialize)]
struct ChatMessageBody {
    content: Option<String>,
}

#[async_trait]
impl MeaningModel for VisionEndpoint {
    async fn verdict(&self, image_base64: &str) -> Result<String, ItemError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": CLASSIFY_PROMPT },
                    {
                        "type": "image_url",
                        "image_url": { "url": to_data_url(image_base64) }
                    }
                ]
            }],
            "temperature": self.temperature,
            "top_p": self.top_p,
        });

        let response = self
            .client
            .post(&self.chat_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ItemError::ModelCall {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ItemError::ModelCall {
                reason: format!("HTTP {status}"),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| ItemError::ModelCall {
            reason: format!("invalid response body: {e}"),
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ItemError::ModelCall {
                reason: "response contained no choices".into(),
            })?;

        debug!("Model answered: {:?}", content);
        Ok(content)
    }
}

/// Interpret a verdict: trim, uppercase, and require an exact `SI`.
///
/// Lenient to false — `"si no"`, `"Sí claro"`, `""` and every other
/// non-exact answer all mean "not meaningful". Note that the accented
/// `"sí"` uppercases to `SÍ` and therefore does not match; only the
/// unaccented one-word form the prompt demands counts.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().to_uppercase() == "SI"
}

/// Classify one encoded image, degrading every failure to `false`.
///
/// This is the fail-safe boundary of the pipeline: a transport error, a bad
/// status, or an unparseable body is logged via `warn!` and excludes the
/// image, rather than aborting the batch.
pub async fn is_meaningful(model: &dyn MeaningModel, image_base64: &str) -> bool {
    match model.verdict(image_base64).await {
        Ok(answer) => is_affirmative(&answer),
        Err(e) => {
            warn!("Image analysis failed, treating as not meaningful: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedModel(Result<&'static str, ()>);

    #[async_trait]
    impl MeaningModel for CannedModel {
        async fn verdict(&self, _image_base64: &str) -> Result<String, ItemError> {
            self.0
                .map(str::to_string)
                .map_err(|_| ItemError::ModelCall {
                    reason: "boom".into(),
                })
        }
    }

    #[test]
    fn exact_si_matches_after_normalisation() {
        assert!(is_affirmative("SI"));
        assert!(is_affirmative("si"));
        assert!(is_affirmative("  Si \n"));
    }

    #[test]
    fn everything_else_is_negative() {
        assert!(!is_affirmative("NO"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("si no"));
        assert!(!is_affirmative("Sí claro"));
        assert!(!is_affirmative("sí")); // accented form uppercases to SÍ
        assert!(!is_affirmative("SI."));
    }

    #[tokio::test]
    async fn affirmative_verdict_means_meaningful() {
        let model = CannedModel(Ok("SI"));
        assert!(is_meaningful(&model, "QUJD").await);
    }

    #[tokio::test]
    async fn negative_and_noisy_verdicts_mean_not_meaningful() {
        assert!(!is_meaningful(&CannedModel(Ok("NO")), "QUJD").await);
        assert!(!is_meaningful(&CannedModel(Ok("SI, seguro")), "QUJD").await);
    }

    #[tokio::test]
    async fn model_failure_degrades_to_false() {
        let model = CannedModel(Err(()));
        assert!(!is_meaningful(&model, "QUJD").await);
    }
}
