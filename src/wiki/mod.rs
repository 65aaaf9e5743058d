//! Encyclopedia content providers
//!
//! The core consumes article content through the [`ContentProvider`] trait;
//! [`WikipediaProvider`] implements it against the MediaWiki Action API.

pub mod error;
pub mod wikipedia;

use async_trait::async_trait;
use serde::Serialize;

use crate::article::Article;
pub use error::{WikiError, WikiResult};
pub use wikipedia::WikipediaProvider;

/// Another language edition an article is available in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageLink {
    /// Language code of the edition.
    pub code: String,
    /// The article's title in that edition.
    pub title: String,
}

/// Source of searchable, fetchable article content.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Titles matching `query` in the given language edition, best first.
    /// An empty query yields an empty list.
    async fn search(&self, query: &str, language: &str) -> WikiResult<Vec<String>>;

    /// Fetch an article by exact title. `Ok(None)` when no such page exists.
    async fn fetch_article(&self, title: &str, language: &str) -> WikiResult<Option<Article>>;

    /// Language editions the article is available in; the source edition is
    /// always listed first.
    async fn language_links(&self, title: &str, language: &str)
    -> WikiResult<Vec<LanguageLink>>;
}
