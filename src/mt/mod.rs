//! Machine translation subsystem
//!
//! Best-effort translation of displayed article text:
//!
//! 1. **Translator trait & providers** - generic provider abstraction with a
//!    Google Translate web-endpoint implementation and a deterministic mock
//! 2. **Chunked pipeline** - sentence-aligned chunking plus a bounded
//!    concurrent worker pool that reassembles results in original order
//!
//! Translation never blocks reading: any failure falls back to the original
//! text.

pub mod chunk;
pub mod error;
pub mod google;
pub mod mock;
pub mod translator;

pub use chunk::{split_into_chunks, translate_text};
pub use error::{MtError, MtResult};
pub use google::GoogleWebTranslator;
pub use mock::{MockMode, MockTranslator};
pub use translator::Translator;
