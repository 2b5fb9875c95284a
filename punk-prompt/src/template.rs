//! Template placeholder resolution.

/// The literal marker inside template text, replaced with user input at
/// resolution time.
pub const PLACEHOLDER: &str = "{query}";

/// Substituted into previews when the user has typed nothing yet, so a
/// preview is never blank.
pub const PREVIEW_INPUT: &str = "[Your input will appear here]";

/// Replaces every occurrence of [`PLACEHOLDER`] in `template` with
/// `user_input`.
///
/// Single pass only: if `user_input` itself contains the placeholder it is
/// inserted literally, not resolved again. Templates with no placeholder are
/// returned unchanged. Trimming of `user_input` is the caller's concern —
/// submission paths trim, previews do not.
pub fn resolve(template: &str, user_input: &str) -> String {
    template.replace(PLACEHOLDER, user_input)
}

/// Resolves a template for preview display: blank typed input is replaced by
/// [`PREVIEW_INPUT`] instead of the empty string.
pub fn resolve_preview(template: &str, typed: &str) -> String {
    if typed.trim().is_empty() {
        resolve(template, PREVIEW_INPUT)
    } else {
        resolve(template, typed)
    }
}
