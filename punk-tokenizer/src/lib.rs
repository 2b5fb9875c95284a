//! # punk-tokenizer
//!
//! Approximate token counting for chat text. This is a heuristic, not a real
//! tokenizer: it blends two approximations (1 token ≈ 4 characters, 1 token
//! ≈ ¾ of a word) and adds adjustments for punctuation, newlines, and spaces.
//!
//! ## Usage
//!
//! Used by the `punk-prompt` crate (cached prompt token counts), the
//! `punk-session` crate (per-message estimates), and `punk-llm` (fallback
//! when a provider response carries no usage figure).
//!
//! ## External interactions
//!
//! - **Cost accounting**: downstream cost figures are defined relative to
//!   this exact arithmetic, so the formula must not change — persisted token
//!   counts and transcripts depend on it producing the same integers.

/// Characters that tend to get their own tokens. Hyphen included.
const PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '{', '}', '\'', '"', '/', '\\', '<', '>',
    '@', '#', '$', '%', '^', '&', '*', '+', '=', '|', '~', '`', '-',
];

/// Estimates the token count for a text string.
///
/// Blank input (empty or whitespace-only) returns 0; any other input returns
/// at least 1. Deterministic: the same input always yields the same count.
///
/// # Algorithm
///
/// 1. `char_tokens = ceil(chars / 4)` over Unicode scalar values.
/// 2. `word_tokens = ceil(words / 0.75)` over whitespace-separated words.
/// 3. Average the two (rounded up), then add `ceil(punctuation / 2)`,
///    the newline count, and `ceil(whitespace / 2)`.
///
/// Newlines are counted twice — once on their own and once as whitespace.
/// That double count is inherited from the formula this estimator must stay
/// numerically compatible with; do not fix it.
pub fn estimate_tokens(text: &str) -> u32 {
    if text.trim().is_empty() {
        return 0;
    }

    let char_count = text.chars().count() as u32;
    let char_tokens = char_count.div_ceil(4);

    let word_count = text.split_whitespace().count() as u32;
    // ceil(words / 0.75) == ceil(4 * words / 3), kept in integer arithmetic
    let word_tokens = (word_count * 4).div_ceil(3);

    let punct_count = text.chars().filter(|c| PUNCTUATION.contains(c)).count() as u32;
    let newline_count = text.chars().filter(|&c| c == '\n').count() as u32;
    let space_count = text.chars().filter(|c| c.is_whitespace()).count() as u32;

    let combined = (char_tokens + word_tokens).div_ceil(2);
    let adjusted_punct = punct_count.div_ceil(2);
    let adjusted_spaces = space_count.div_ceil(2);

    let tokens = combined + adjusted_punct + newline_count + adjusted_spaces;
    tokens.max(1)
}
