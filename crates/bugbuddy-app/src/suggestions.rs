//! Auto-suggestions for the error text field

/// Common error prefixes offered while typing
pub const COMMON_ERRORS: [&str; 8] = [
    "TypeError: Cannot read property",
    "ReferenceError: is not defined",
    "SyntaxError: Unexpected token",
    "TypeError: Cannot set property",
    "Error: Module not found",
    "TypeError: Object is not a function",
    "ReferenceError: require is not defined",
    "SyntaxError: Unexpected end of JSON input",
];

/// Suggestions appear once the text is longer than this many characters
pub const MIN_QUERY_CHARS: usize = 2;

/// At most this many suggestions are shown
pub const MAX_SUGGESTIONS: usize = 5;

/// Common errors containing `text` (case-insensitive), capped at
/// [`MAX_SUGGESTIONS`]. Empty until the text is long enough.
pub fn suggestions_for(text: &str) -> Vec<&'static str> {
    if text.chars().count() <= MIN_QUERY_CHARS {
        return Vec::new();
    }

    let needle = text.to_lowercase();
    COMMON_ERRORS
        .iter()
        .copied()
        .filter(|e| e.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}
