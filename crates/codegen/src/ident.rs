//! Identifier grammars for class, method and package names.

/// Returns `true` if `s` starts with a letter or underscore and continues
/// with letters, ASCII digits or underscores.
///
/// Numeric characters outside `0-9` (`²`, `½`, `①`) are not digits here.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphabetic() || c.is_ascii_digit())
        }
        _ => false,
    }
}

/// Returns `true` if `s` is one or more identifiers joined by single dots.
pub fn is_valid_dotted_identifier(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_valid_identifier)
}
