/*!
 * Text segmentation for provider request limits.
 *
 * Translation providers either silently truncate or reject long inputs,
 * so free text is cut into chunks that never split mid-sentence except as
 * a last resort. Structural boundaries are preferred in order: paragraph
 * breaks first, then sentence breaks, accumulating greedily until the next
 * unit would push the current chunk past the limit.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Default chunk ceiling in characters
pub const DEFAULT_MAX_CHUNK_LEN: usize = 350;

// Whitespace after `.`, `!` or `?`; the punctuation stays with the
// preceding sentence.
static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Split free text into translation-sized chunks.
///
/// Rejoining the chunks with blank-line separators reconstructs the
/// original exactly when every break lands on a paragraph boundary, and
/// approximately otherwise. No chunk exceeds `max_len` except when a
/// single sentence does, in which case that sentence is hard-truncated to
/// the limit.
pub fn chunk_text(text: &str, max_len: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    if max_len == 0 || text.chars().count() <= max_len {
        return vec![text.to_string()];
    }

    // Flatten to (unit, joining separator) pairs; a paragraph that fits is
    // one unit, an oversized paragraph contributes its sentences.
    let mut units: Vec<(String, &str)> = Vec::new();
    for (pi, paragraph) in text.split("\n\n").enumerate() {
        let paragraph_sep = if pi == 0 { "" } else { "\n\n" };

        if paragraph.chars().count() <= max_len {
            units.push((paragraph.to_string(), paragraph_sep));
        } else {
            for (si, sentence) in split_sentences(paragraph).into_iter().enumerate() {
                let sep = if si == 0 { paragraph_sep } else { " " };
                units.push((hard_truncate(sentence, max_len), sep));
            }
        }
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for (unit, sep) in units {
        if current.is_empty() {
            current = unit;
        } else if current.chars().count() + sep.len() + unit.chars().count() <= max_len {
            current.push_str(sep);
            current.push_str(&unit);
        } else {
            chunks.push(std::mem::take(&mut current));
            current = unit;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Split a paragraph into sentences, keeping terminal punctuation with the
/// sentence it closes.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // The matched punctuation is a single byte; keep it.
        let end = boundary.start() + 1;
        if end > start {
            sentences.push(text[start..end].to_string());
        }
        start = boundary.end();
    }

    if start < text.len() {
        sentences.push(text[start..].to_string());
    }

    sentences
}

/// Last-resort truncation for a sentence longer than the chunk limit
fn hard_truncate(sentence: String, max_len: usize) -> String {
    if sentence.chars().count() <= max_len {
        sentence
    } else {
        sentence.chars().take(max_len).collect()
    }
}
