//! Multilingual encyclopedia article browser core: content search and
//! fetching, section splitting for collapsible display, best-effort machine
//! translation, and shared "for review" highlights persisted per article.

pub mod article;
pub mod highlight;
pub mod languages;
pub mod mt;
pub mod sections;
pub mod wiki;

pub use article::{Article, ArticleIdentity};
pub use highlight::{HighlightRecord, HighlightService};
pub use sections::{Section, SectionSplitter, SplitStrategy};
