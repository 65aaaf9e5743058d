use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable key identifying an article for highlight lookup.
///
/// Derived from the article title and the language edition it is displayed
/// in, so re-navigating to the same article in the same language resolves to
/// the same stored highlights. The key is not globally unique across content
/// sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleIdentity(String);

impl ArticleIdentity {
    pub fn new(title: &str, language: &str) -> Self {
        ArticleIdentity(format!("{}_{}", title, language))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fetched encyclopedia article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    /// Plain-text lead extract, shown above the sectioned body.
    pub summary: String,
    /// Full plain-text body, including heading marker lines.
    pub content: String,
    /// Canonical URL of the article in its language edition.
    pub url: String,
}

impl Article {
    /// Identity of this article as displayed in `language`.
    pub fn identity(&self, language: &str) -> ArticleIdentity {
        ArticleIdentity::new(&self.title, language)
    }
}
