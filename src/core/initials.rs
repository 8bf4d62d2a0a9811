//! # Initials
//!
//! Avatar fallback text. Used by roster tiles, the participants drawer and
//! chat avatars, so every view shows the same letters for the same name.

use super::error::SessionError;

/// Maximum number of name tokens that contribute a letter, and of letters returned.
const MAX_INITIALS: usize = 2;

/// Derives uppercase initials from the first two whitespace-separated tokens.
///
/// `"Sarah Johnson"` → `"SJ"`, `"Mike"` → `"M"`. Blank names are rejected;
/// participants and chat events are validated before they get here.
pub fn initials(name: &str) -> Result<String, SessionError> {
    let letters: String = name
        .split_whitespace()
        .take(MAX_INITIALS)
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .take(MAX_INITIALS)
        .collect();

    if letters.is_empty() {
        return Err(SessionError::validation("cannot derive initials from an empty name"));
    }
    Ok(letters)
}
