//! Text preprocessing for narration.
//!
//! Normalizes whitespace and splits story text into sentence-aligned chunks
//! that each fit in a single speech-engine utterance.
//!
//! Lengths are measured in characters, not bytes, so multi-byte text is
//! never sliced inside a code point.

/// Collapse every run of whitespace (spaces, tabs, newlines) into a single
/// space and trim both ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for word in text.split_whitespace() {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
    }

    result
}

/// Split text into chunks of at most `max_chars` characters.
///
/// The text is whitespace-normalized, split at sentence boundaries (`.`,
/// `!`, `?` followed by a space or end of text) and sentences are greedily
/// packed into chunks joined by single spaces. A sentence that alone exceeds
/// `max_chars` is hard-split into fixed slices of `max_chars` characters.
///
/// Empty or whitespace-only input yields no chunks. The function is pure and
/// deterministic.
#[must_use]
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let text = normalize_whitespace(text);
    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in split_sentences(&text) {
        let sentence_len = sentence.chars().count();

        if sentence_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            chunks.extend(hard_split(sentence, max_chars));
            continue;
        }

        // If adding this sentence would exceed the limit, flush
        if !current.is_empty() && current_len + 1 + sentence_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(sentence);
        current_len += sentence_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Number of whitespace-separated words in `text`.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split normalized text into sentences at `.` `!` `?` boundaries.
///
/// Punctuation only ends a sentence when followed by a space, so runs like
/// `"...?!"` and decimals such as `"3.5"` stay inside one sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(next_i, ' ')) = chars.peek() {
            let sentence = text[start..next_i].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = next_i + 1;
        }
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }

    sentences
}

/// Cut an oversized sentence into consecutive slices of `max_chars` characters.
fn hard_split(sentence: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = sentence.chars().collect();
    chars
        .chunks(max_chars)
        .map(|slice| slice.iter().collect::<String>().trim().to_string())
        .filter(|slice| !slice.is_empty())
        .collect()
}
