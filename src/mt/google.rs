//! Google Translate web endpoint provider
//!
//! Uses the public `translate_a/single` endpoint (`client=gtx`) rather than
//! the billed v2 API, so no API key is required. The endpoint answers with a
//! nested JSON array; the translated text is the concatenation of the first
//! element of each segment in the first array.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::languages::normalize_language_code;
use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{Translator, validate_language};

#[derive(Clone)]
pub struct GoogleWebTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleWebTranslator {
    pub fn new() -> MtResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| MtError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: "https://translate.googleapis.com/translate_a/single".to_string(),
        })
    }
}

impl std::fmt::Debug for GoogleWebTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleWebTranslator")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl Translator for GoogleWebTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> MtResult<String> {
        validate_language(source)?;
        validate_language(target)?;

        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let source = if source == "auto" {
            source.to_string()
        } else {
            normalize_language_code(source)
        };
        let target = normalize_language_code(target);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("client", "gtx"),
                ("sl", source.as_str()),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MtError::Translation(format!(
                "API error ({})",
                response.status()
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| MtError::Translation(format!("Failed to parse API response: {}", e)))?;

        parse_response(&json)
    }

    fn provider_name(&self) -> &str {
        "Google Translate (web)"
    }
}

/// Extract the translated text from the gtx response shape:
/// `[[["Bonjour", "Hello", ...], [" le monde", " world", ...]], ...]`.
fn parse_response(json: &Value) -> MtResult<String> {
    let segments = json.get(0).and_then(Value::as_array).ok_or_else(|| {
        MtError::Translation("Invalid API response: missing segment array".to_string())
    })?;

    let mut translated = String::new();
    for segment in segments {
        if let Some(piece) = segment.get(0).and_then(Value::as_str) {
            translated.push_str(piece);
        }
    }

    if translated.is_empty() {
        return Err(MtError::Translation(
            "Invalid API response: no translated segments".to_string(),
        ));
    }
    Ok(translated)
}
