//! Highlight Service
//!
//! Orchestrates the store and the matcher: fetch records for an article,
//! render text with markup applied, and accept new submissions after
//! validating them against the displayed text.
//!
//! Highlights are a shared annotation layer: every successful submission is
//! visible to every subsequent reader of the same article identity, across
//! sessions. There is no per-user ownership.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::article::ArticleIdentity;
use crate::highlight::error::{HighlightError, HighlightResult};
use crate::highlight::store::HighlightStore;
use crate::highlight::{HighlightRecord, matcher};

pub struct HighlightService {
    store: Arc<dyn HighlightStore>,
}

impl HighlightService {
    pub fn new(store: Arc<dyn HighlightStore>) -> Self {
        HighlightService { store }
    }

    /// All stored records for an article, in submission order.
    pub fn highlights(&self, identity: &ArticleIdentity) -> Vec<HighlightRecord> {
        self.store.load(identity)
    }

    /// Render `text` with the article's stored highlights applied. Returns
    /// `text` unchanged when no highlights exist.
    pub fn get_highlighted(&self, identity: &ArticleIdentity, text: &str) -> String {
        let records = self.store.load(identity);
        if records.is_empty() {
            return text.to_string();
        }
        matcher::render(text, &records)
    }

    /// Record a new highlight.
    ///
    /// `candidate` must be non-empty after trimming and must occur verbatim
    /// (case-sensitive) in `source_text`, the text currently displayed to
    /// the submitter. On rejection nothing is written; on success the stored
    /// record (with trimmed text and the submission timestamp) is returned.
    pub fn submit(
        &self,
        identity: &ArticleIdentity,
        candidate: &str,
        source_text: &str,
        context: &str,
    ) -> HighlightResult<HighlightRecord> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return Err(HighlightError::EmptyText);
        }
        if !source_text.contains(candidate) {
            return Err(HighlightError::NotInSource);
        }

        let record = HighlightRecord {
            text: trimmed.to_string(),
            context: context.to_string(),
            timestamp: unix_time(),
        };
        self.store.append(identity, record.clone())?;
        Ok(record)
    }
}

fn unix_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
