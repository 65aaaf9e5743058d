//! MediaWiki Action API provider
//!
//! Talks to `https://{lang}.wikipedia.org/w/api.php`. Article text comes
//! from the TextExtracts `prop=extracts` endpoint as plain text (with
//! `== Heading ==` marker lines preserved), so it feeds straight into the
//! section splitter.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::article::Article;
use crate::languages;
use crate::wiki::error::{WikiError, WikiResult};
use crate::wiki::{ContentProvider, LanguageLink};

const SEARCH_LIMIT: &str = "10";
const LANGLINKS_LIMIT: &str = "500";

#[derive(Clone)]
pub struct WikipediaProvider {
    client: reqwest::Client,
}

impl WikipediaProvider {
    pub fn new() -> WikiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("wikilingual/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WikiError::Network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    fn api_url(language: &str) -> String {
        format!("https://{}.wikipedia.org/w/api.php", language)
    }

    /// Run one Action API query and return the decoded JSON payload.
    async fn query(&self, language: &str, params: &[(&str, &str)]) -> WikiResult<Value> {
        if !languages::is_valid_language_code(language) {
            return Err(WikiError::InvalidLanguage(format!(
                "unusable language code: {:?}",
                language
            )));
        }

        let response = self
            .client
            .get(Self::api_url(language))
            .query(&[("action", "query"), ("format", "json")])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WikiError::InvalidResponse(format!(
                "API error ({})",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WikiError::InvalidResponse(format!("Failed to parse API response: {}", e)))
    }
}

#[async_trait]
impl ContentProvider for WikipediaProvider {
    async fn search(&self, query: &str, language: &str) -> WikiResult<Vec<String>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let json = self
            .query(
                language,
                &[
                    ("list", "search"),
                    ("srsearch", query),
                    ("srlimit", SEARCH_LIMIT),
                ],
            )
            .await?;
        Ok(parse_search_titles(&json))
    }

    async fn fetch_article(&self, title: &str, language: &str) -> WikiResult<Option<Article>> {
        if title.trim().is_empty() {
            return Ok(None);
        }

        // Intro-only extract first; a missing page shows up here.
        let summary_json = self
            .query(
                language,
                &[
                    ("titles", title),
                    ("prop", "extracts"),
                    ("exintro", "1"),
                    ("explaintext", "1"),
                ],
            )
            .await?;
        let Some(summary) = parse_extract(&summary_json, "No summary available") else {
            return Ok(None);
        };

        // Then the full plain-text body.
        let content_json = self
            .query(
                language,
                &[("titles", title), ("prop", "extracts"), ("explaintext", "1")],
            )
            .await?;
        let content =
            parse_extract(&content_json, "No content available").unwrap_or_else(|| summary.clone());

        Ok(Some(Article {
            title: title.to_string(),
            summary,
            content,
            url: article_url(title, language),
        }))
    }

    async fn language_links(
        &self,
        title: &str,
        language: &str,
    ) -> WikiResult<Vec<LanguageLink>> {
        let json = self
            .query(
                language,
                &[
                    ("titles", title),
                    ("prop", "langlinks"),
                    ("lllimit", LANGLINKS_LIMIT),
                ],
            )
            .await?;
        Ok(parse_language_links(&json, title, language))
    }
}

fn parse_search_titles(json: &Value) -> Vec<String> {
    json["query"]["search"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["title"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Extract text from a `prop=extracts` response. `None` means the page does
/// not exist; a present page with no extract gets `fallback`.
fn parse_extract(json: &Value, fallback: &str) -> Option<String> {
    let pages = json["query"]["pages"].as_object()?;
    let (page_id, page) = pages.iter().next()?;
    if page_id == "-1" {
        return None;
    }
    Some(
        page.get("extract")
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string(),
    )
}

/// Extract language links; the source edition is always first. A missing
/// page degrades to just the source edition.
fn parse_language_links(json: &Value, title: &str, language: &str) -> Vec<LanguageLink> {
    let mut links = vec![LanguageLink {
        code: language.to_string(),
        title: title.to_string(),
    }];

    let Some(pages) = json["query"]["pages"].as_object() else {
        return links;
    };
    let Some((page_id, page)) = pages.iter().next() else {
        return links;
    };
    if page_id == "-1" {
        return links;
    }

    if let Some(langlinks) = page.get("langlinks").and_then(Value::as_array) {
        for link in langlinks {
            let (Some(code), Some(linked_title)) =
                (link["lang"].as_str(), link["*"].as_str())
            else {
                continue;
            };
            links.push(LanguageLink {
                code: code.to_string(),
                title: linked_title.to_string(),
            });
        }
    }
    links
}

/// Canonical article URL in the given language edition.
fn article_url(title: &str, language: &str) -> String {
    let underscored = title.replace(' ', "_");
    match reqwest::Url::parse(&format!("https://{}.wikipedia.org/wiki/", language)) {
        Ok(mut url) => {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().push(&underscored);
            }
            url.to_string()
        }
        Err(_) => format!("https://{}.wikipedia.org/wiki/{}", language, underscored),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ========== Response parsing ==========

    #[test]
    fn test_parse_search_titles() {
        let json = json!({
            "query": {
                "search": [
                    {"title": "Vienna", "pageid": 1},
                    {"title": "Vienna Circle", "pageid": 2}
                ]
            }
        });
        assert_eq!(parse_search_titles(&json), vec!["Vienna", "Vienna Circle"]);
    }

    #[test]
    fn test_parse_search_titles_empty_or_malformed() {
        assert!(parse_search_titles(&json!({"query": {"search": []}})).is_empty());
        assert!(parse_search_titles(&json!({"batchcomplete": ""})).is_empty());
        assert!(parse_search_titles(&json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn test_parse_extract_present_page() {
        let json = json!({
            "query": {
                "pages": {
                    "123": {"pageid": 123, "title": "Vienna", "extract": "Vienna is the capital."}
                }
            }
        });
        assert_eq!(
            parse_extract(&json, "fallback").as_deref(),
            Some("Vienna is the capital.")
        );
    }

    #[test]
    fn test_parse_extract_missing_page_is_none() {
        let json = json!({
            "query": {
                "pages": {
                    "-1": {"title": "Nope", "missing": ""}
                }
            }
        });
        assert!(parse_extract(&json, "fallback").is_none());
    }

    #[test]
    fn test_parse_extract_page_without_text_uses_fallback() {
        let json = json!({
            "query": {
                "pages": {
                    "123": {"pageid": 123, "title": "Vienna"}
                }
            }
        });
        assert_eq!(parse_extract(&json, "fallback").as_deref(), Some("fallback"));
    }

    #[test]
    fn test_parse_language_links_source_first() {
        let json = json!({
            "query": {
                "pages": {
                    "123": {
                        "title": "Vienna",
                        "langlinks": [
                            {"lang": "de", "*": "Wien"},
                            {"lang": "fr", "*": "Vienne"}
                        ]
                    }
                }
            }
        });
        let links = parse_language_links(&json, "Vienna", "en");
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].code, "en");
        assert_eq!(links[0].title, "Vienna");
        assert_eq!(links[1].code, "de");
        assert_eq!(links[1].title, "Wien");
    }

    #[test]
    fn test_parse_language_links_missing_page_keeps_source() {
        let json = json!({
            "query": {"pages": {"-1": {"title": "Nope", "missing": ""}}}
        });
        let links = parse_language_links(&json, "Nope", "en");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].code, "en");
    }

    // ========== URL construction ==========

    #[test]
    fn test_article_url_underscores_spaces() {
        assert_eq!(
            article_url("Rust programming", "en"),
            "https://en.wikipedia.org/wiki/Rust_programming"
        );
    }

    #[test]
    fn test_article_url_encodes_non_ascii() {
        let url = article_url("Wien", "de");
        assert_eq!(url, "https://de.wikipedia.org/wiki/Wien");
        let encoded = article_url("Čeština", "cs");
        assert!(encoded.starts_with("https://cs.wikipedia.org/wiki/"));
        assert!(!encoded.contains(' '));
    }

    // ========== Request validation ==========

    #[tokio::test]
    async fn test_invalid_language_is_rejected_before_request() {
        let provider = WikipediaProvider::new().unwrap();
        assert!(matches!(
            provider.search("vienna", "en@bad").await,
            Err(WikiError::InvalidLanguage(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_query_short_circuits() {
        let provider = WikipediaProvider::new().unwrap();
        assert!(provider.search("  ", "en").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_title_is_no_article() {
        let provider = WikipediaProvider::new().unwrap();
        assert!(provider.fetch_article("", "en").await.unwrap().is_none());
    }

    // ========== Live API (network) ==========

    #[tokio::test]
    #[ignore] // Talks to the live API; run with: cargo test -- --ignored
    async fn test_live_search_and_fetch() {
        let provider = WikipediaProvider::new().unwrap();
        let titles = provider.search("Vienna", "en").await.unwrap();
        assert!(!titles.is_empty());

        let article = provider
            .fetch_article(&titles[0], "en")
            .await
            .unwrap()
            .expect("article exists");
        assert!(!article.summary.is_empty());
        assert!(!article.content.is_empty());
    }
}
