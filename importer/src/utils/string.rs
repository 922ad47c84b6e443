//! String utility functions

/// Truncate text to a maximum number of characters (char-boundary safe)
pub fn truncate_chars(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect()
    } else {
        text.to_string()
    }
}
