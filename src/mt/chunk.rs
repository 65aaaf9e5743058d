//! Chunked document translation
//!
//! Long article text is split into sentence-aligned chunks, translated
//! concurrently under a bounded worker pool, and reassembled in original
//! chunk order: chunk `i`'s translation occupies position `i` in the output
//! no matter when it completes. A chunk whose translation fails keeps its
//! original text, so the whole pipeline is best-effort and never errors.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::mt::translator::Translator;

/// Maximum chunk size in bytes; chunks prefer to end at sentence boundaries.
pub const CHUNK_SIZE: usize = 800;

/// Inputs shorter than this skip chunking and translate in one call.
pub const DIRECT_TRANSLATE_LIMIT: usize = 200;

/// Upper bound on concurrent in-flight translation requests.
pub const MAX_WORKERS: usize = 12;

/// Best-effort translation of a whole document.
///
/// Returns the input unchanged on empty input or total translation failure;
/// partial failures degrade only the affected chunks.
pub async fn translate_text(
    translator: Arc<dyn Translator>,
    text: &str,
    source: &str,
    target: &str,
) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    if text.len() < DIRECT_TRANSLATE_LIMIT {
        return match translator.translate(text, source, target).await {
            Ok(translated) => translated,
            Err(_) => text.to_string(),
        };
    }

    let chunks = split_into_chunks(text, CHUNK_SIZE);
    if chunks.is_empty() {
        return text.to_string();
    }

    let semaphore = Arc::new(Semaphore::new(MAX_WORKERS.min(chunks.len())));
    let mut handles = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        let translator = Arc::clone(&translator);
        let semaphore = Arc::clone(&semaphore);
        let chunk = chunk.clone();
        let source = source.to_string();
        let target = target.to_string();
        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            match translator.translate(&chunk, &source, &target).await {
                Ok(translated) => translated,
                Err(_) => chunk,
            }
        }));
    }

    // Joining the handles in spawn order restores original chunk order
    // regardless of completion order.
    let mut translated = Vec::with_capacity(chunks.len());
    for (i, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(piece) => translated.push(piece),
            Err(_) => translated.push(chunks[i].clone()),
        }
    }
    translated.join(" ")
}

/// Split text into chunks of at most `chunk_size` bytes, preferring sentence
/// boundaries; a single oversized sentence is split at word boundaries.
pub fn split_into_chunks(text: &str, chunk_size: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(text) {
        if sentence.len() > chunk_size {
            for word in sentence.split_whitespace() {
                if !current.is_empty() && current.len() + word.len() + 1 > chunk_size {
                    flush(&mut chunks, &mut current);
                }
                current.push_str(word);
                current.push(' ');
            }
        } else if current.len() + sentence.len() > chunk_size {
            flush(&mut chunks, &mut current);
            current.push_str(&sentence);
            current.push(' ');
        } else {
            current.push_str(&sentence);
            current.push(' ');
        }
    }
    flush(&mut chunks, &mut current);
    chunks
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
    current.clear();
}

/// Split on sentence terminators (`.`, `!`, `?`) followed by whitespace; the
/// terminator stays with its sentence, the whitespace run is dropped.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|n| n.is_whitespace()) {
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
            sentences.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    sentences
}
