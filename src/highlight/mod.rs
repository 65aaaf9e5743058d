//! Collaborative "for review" highlights
//!
//! Readers can flag passages of an article for review; the annotations are
//! persisted per article identity and shown to every viewer. The subsystem
//! has three parts:
//!
//! 1. **Store** - durable identity -> records persistence with serialized
//!    writes and a degrade-to-empty corruption policy
//! 2. **Matcher** - pure longest-first, word-boundary-safe rendering of
//!    records onto text
//! 3. **Service** - orchestration: validate and record submissions, render
//!    text with stored highlights applied
//!
//! Everything here is synchronous; nothing suspends on network I/O.

pub mod error;
pub mod matcher;
pub mod service;
pub mod store;

use serde::{Deserialize, Serialize};

pub use error::{HighlightError, HighlightResult};
pub use matcher::render;
pub use service::HighlightService;
pub use store::{HighlightStore, JsonFileStore, MemoryStore};

/// A persisted user-submitted span of text flagged for review.
///
/// Immutable once created; there is no edit or delete operation. `text` is
/// trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRecord {
    /// The exact substring flagged for review.
    pub text: String,
    /// Label of the displayed span the submission came from, e.g. "summary"
    /// or "section_3".
    pub context: String,
    /// Submission time, seconds since the Unix epoch.
    pub timestamp: u64,
}
