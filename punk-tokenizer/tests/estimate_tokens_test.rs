//! Unit tests for `punk_tokenizer::estimate_tokens`.
//!
//! Verifies the blended heuristic: blank handling, known values, and the
//! punctuation/newline/whitespace adjustments.
//! External interactions: none (pure function tests).

use punk_tokenizer::estimate_tokens;

/// **Test: Empty and whitespace-only input estimate to exactly 0.**
#[test]
fn blank_input_is_zero() {
    assert_eq!(estimate_tokens(""), 0);
    assert_eq!(estimate_tokens("   "), 0);
    assert_eq!(estimate_tokens("\n\t  \n"), 0);
}

/// **Test: Any non-blank input estimates to at least 1.**
#[test]
fn non_blank_input_is_at_least_one() {
    for s in ["a", ".", "x y", "word", "\n.\n"] {
        assert!(estimate_tokens(s) >= 1, "estimate_tokens({s:?}) returned 0");
    }
}

/// **Test: Known values — single word, averaged char/word estimates.**
#[test]
fn known_single_word_values() {
    // "cats": char ceil(4/4)=1, word ceil(1/0.75)=2, combined ceil(3/2)=2
    assert_eq!(estimate_tokens("cats"), 2);
    // "a": char 1, word 2, combined 2
    assert_eq!(estimate_tokens("a"), 2);
}

/// **Test: Spaces add ceil(count/2) on top of the combined estimate.**
#[test]
fn spaces_are_counted() {
    // chars 11 -> 3, words 2 -> 3, combined 3, one space -> +1
    assert_eq!(estimate_tokens("Hello world"), 4);
}

/// **Test: Punctuation adds ceil(count/2); the hyphen counts as punctuation.**
#[test]
fn punctuation_is_counted() {
    // chars 3 -> 1, words 1 -> 2, combined 2, one '!' -> +1
    assert_eq!(estimate_tokens("Hi!"), 3);
    // chars 10 -> 3, words 1 -> 2, combined 3, one '-' -> +1
    assert_eq!(estimate_tokens("well-known"), 4);
}

/// **Test: Newlines count both on their own and as whitespace (inherited quirk).**
#[test]
fn newlines_count_twice() {
    // chars 3 -> 1, words 2 -> 3, combined 2, newline +1, whitespace ceil(1/2) +1
    assert_eq!(estimate_tokens("a\nb"), 4);
}

/// **Test: Same input always yields the same output.**
#[test]
fn estimate_is_deterministic() {
    let text = "The quick brown fox, jumps over the lazy dog!\nTwice.";
    let first = estimate_tokens(text);
    for _ in 0..10 {
        assert_eq!(estimate_tokens(text), first);
    }
}

/// **Test: Non-ASCII text is counted by scalar values and still estimates.**
#[test]
fn non_ascii_text_estimates() {
    // chars 4 -> 1, words 1 -> 2, combined 2
    assert_eq!(estimate_tokens("日本語で"), 2);
    assert!(estimate_tokens("héllo wörld") >= 1);
}
