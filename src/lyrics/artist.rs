//! Artist tag cleanup for lookup queries

use regex::Regex;
use std::sync::LazyLock;

/// Text before the first whitespace-preceded featuring/collaboration separator
static SEPARATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(.*?)\s(?:feat(?:\.|uring)?|&|with|,|and|ft\.|w\.)")
        .expect("artist separator pattern is valid")
});

/// Strip featured artists and collaborators from a raw artist tag.
///
/// `"Drake feat. Travis Scott"` becomes `"Drake"`. Artists without a separator
/// come back unchanged. A separator at the very start yields an empty string.
pub fn normalize_artist(artist: &str) -> String {
    match SEPARATOR_REGEX.captures(artist) {
        Some(caps) => caps
            .get(1)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        None => artist.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        assert_eq!(normalize_artist("Drake FEAT. Future"), "Drake");
        assert_eq!(normalize_artist("Drake Featuring Rihanna"), "Drake");
        assert_eq!(normalize_artist("Drake W. Future"), "Drake");
    }

    #[test]
    fn test_first_separator_wins() {
        assert_eq!(
            normalize_artist("Metro Boomin & Future with Drake"),
            "Metro Boomin"
        );
    }

    #[test]
    fn test_separator_needs_leading_whitespace() {
        assert_eq!(normalize_artist("Tyler, The Creator"), "Tyler, The Creator");
        assert_eq!(normalize_artist("Alexandra Stan"), "Alexandra Stan");
    }

    #[test]
    fn test_leading_separator_gives_empty_artist() {
        assert_eq!(normalize_artist(" feat. Drake"), "");
    }

    #[test]
    fn test_empty_artist() {
        assert_eq!(normalize_artist(""), "");
    }
}
