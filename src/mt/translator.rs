//! Translation provider trait
//!
//! Abstracts over MT backends so the rest of the crate never couples to a
//! specific service. The production implementation talks to a web API; tests
//! use the deterministic mock.

use async_trait::async_trait;

use crate::languages;
use crate::mt::error::{MtError, MtResult};

/// Generic trait for machine translation providers.
///
/// Methods are async because real providers are network-bound.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` to `target`.
    ///
    /// `source` may be `"auto"` where the provider supports source-language
    /// detection. Implementations return an error on failure; best-effort
    /// fallback to the original text is the caller's concern (see
    /// [`crate::mt::translate_text`]).
    async fn translate(&self, text: &str, source: &str, target: &str) -> MtResult<String>;

    /// Short provider label for logs and CLI output.
    fn provider_name(&self) -> &str;
}

/// Validate a language code before building a request with it.
pub fn validate_language(code: &str) -> MtResult<()> {
    if languages::is_valid_language_code(code) {
        Ok(())
    } else {
        Err(MtError::InvalidLanguage(format!(
            "unusable language code: {:?}",
            code
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_language_accepts_common_codes() {
        assert!(validate_language("en").is_ok());
        assert!(validate_language("zh-Hans").is_ok());
        assert!(validate_language("auto").is_ok());
    }

    #[test]
    fn test_validate_language_rejects_garbage() {
        assert!(validate_language("").is_err());
        assert!(validate_language("en@US").is_err());
        match validate_language("fr#bad") {
            Err(MtError::InvalidLanguage(msg)) => assert!(msg.contains("fr#bad")),
            other => panic!("expected InvalidLanguage, got {:?}", other),
        }
    }
}
