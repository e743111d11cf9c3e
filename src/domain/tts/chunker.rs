use once_cell::sync::Lazy;
use regex::Regex;

/// A sentence ends at `.`, `!` or `?` followed by whitespace.
/// Abbreviations ("Mr. Smith") and decimals followed by a space are treated as boundaries too.
static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence boundary pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunkingError {
    #[error("invalid argument: max chunk size must be at least 1, got {0}")]
    InvalidArgument(usize),
}

/// Split text into chunks of at most `max_size` characters, in reading order.
///
/// Sentences are packed greedily into chunks. A chunk that still exceeds the limit
/// (a single sentence longer than `max_size`) is packed again word by word.
/// A single word longer than `max_size` cannot be split and is emitted whole.
///
/// Text that already fits is returned verbatim as the only chunk, including the empty string.
/// Every other chunk is trimmed and non-empty.
pub fn split_into_chunks(text: &str, max_size: usize) -> Result<Vec<String>, ChunkingError> {
    if max_size < 1 {
        return Err(ChunkingError::InvalidArgument(max_size));
    }

    if char_len(text) <= max_size {
        return Ok(vec![text.to_string()]);
    }

    let sentence_chunks = pack_units(split_into_sentences(text), max_size);

    let mut chunks = Vec::with_capacity(sentence_chunks.len());
    for chunk in sentence_chunks {
        if char_len(&chunk) <= max_size {
            chunks.push(chunk);
        } else {
            chunks.extend(pack_units(chunk.split_whitespace(), max_size));
        }
    }

    Ok(chunks)
}

/// Split on sentence boundaries, keeping the terminator and dropping the whitespace after it.
fn split_into_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut last_end = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // terminators are single-byte ASCII
        sentences.push(&text[last_end..boundary.start() + 1]);
        last_end = boundary.end();
    }
    sentences.push(&text[last_end..]);

    sentences
}

/// Greedily join units with single spaces. The current chunk is closed only when
/// appending the next unit would exceed `max_size` and the chunk is non-empty.
fn pack_units<'a, I>(units: I, max_size: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut packed = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for unit in units {
        let unit_len = char_len(unit);

        if !current.is_empty() && current_len + 1 + unit_len > max_size {
            push_trimmed(&mut packed, &current);
            current.clear();
            current.push_str(unit);
            current_len = unit_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(unit);
            current_len += unit_len;
        }
    }

    push_trimmed(&mut packed, &current);
    packed
}

fn push_trimmed(chunks: &mut Vec<String>, chunk: &str) {
    let trimmed = chunk.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

/// Length in characters, which is what TTS providers bill and limit on.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
