//! Deterministic, API-free translator for tests
//!
//! Lets the chunking pipeline and its callers be exercised without network
//! access. Each mode simulates a different provider behavior.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::Translator;

#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append the target code: "hello" -> "hello_fr".
    Suffix,
    /// Predefined (text, target) -> translation mappings; unmapped inputs
    /// fall back to the suffix behavior.
    Mappings(HashMap<(String, String), String>),
    /// Reverse word order, simulating word-order-changing target languages.
    Reorder,
    /// Fail every call with the given message.
    Error(String),
    /// Return the input unchanged.
    NoOp,
}

#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    delay_ms: u64,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self { mode, delay_ms: 0 }
    }

    /// Simulate network latency of `delay_ms` per call.
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self { mode, delay_ms }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, _source: &str, target: &str) -> MtResult<String> {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::Reorder => {
                let words: Vec<&str> = text.split_whitespace().collect();
                Ok(words.into_iter().rev().collect::<Vec<_>>().join(" "))
            }
            MockMode::Error(msg) => Err(MtError::Translation(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_suffix_mode() {
        let mock = MockTranslator::new(MockMode::Suffix);
        assert_eq!(mock.translate("hello", "en", "fr").await.unwrap(), "hello_fr");
    }

    #[tokio::test]
    async fn test_mappings_mode() {
        let mut map = HashMap::new();
        map.insert(
            ("hello".to_string(), "fr".to_string()),
            "bonjour".to_string(),
        );
        let mock = MockTranslator::new(MockMode::Mappings(map));
        assert_eq!(mock.translate("hello", "en", "fr").await.unwrap(), "bonjour");
        assert_eq!(mock.translate("bye", "en", "fr").await.unwrap(), "bye_fr");
    }

    #[tokio::test]
    async fn test_reorder_mode() {
        let mock = MockTranslator::new(MockMode::Reorder);
        assert_eq!(
            mock.translate("one two three", "en", "ja").await.unwrap(),
            "three two one"
        );
    }

    #[tokio::test]
    async fn test_error_mode() {
        let mock = MockTranslator::new(MockMode::Error("quota exceeded".to_string()));
        match mock.translate("hello", "en", "fr").await {
            Err(MtError::Translation(msg)) => assert_eq!(msg, "quota exceeded"),
            other => panic!("expected Translation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_noop_mode() {
        let mock = MockTranslator::new(MockMode::NoOp);
        assert_eq!(mock.translate("hello", "en", "fr").await.unwrap(), "hello");
    }
}
