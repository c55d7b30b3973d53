//! # Initials Matcher
//!
//! Acronym-style matching of short queries against display names:
//! "bcc" finds "Bella Cake Chocolate Cream" (initials "BCCC") and
//! "Boss Classic Cola" (initials "BCC").

/// Concatenates the upper-cased first character of each whitespace-separated
/// word of `name`.
///
/// Empty or whitespace-only names yield an empty initials string.
pub fn extract_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

/// Tests whether `term` is a case-insensitive prefix of the initials of
/// `name`.
///
/// Single-word names have one-character initials, so any 2+ letter term
/// fails against them by construction.
pub fn matches_initials(term: &str, name: &str) -> bool {
    let initials = extract_initials(name);
    if initials.is_empty() {
        return false;
    }
    initials.starts_with(&term.to_uppercase())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_initials() {
        assert_eq!(extract_initials("Bella Cake Chocolate Cream"), "BCCC");
        assert_eq!(extract_initials("Boss Classic Cola"), "BCC");
        assert_eq!(extract_initials("  boss   classic  "), "BC");
        assert_eq!(extract_initials("Cola"), "C");
        assert_eq!(extract_initials(""), "");
        assert_eq!(extract_initials("   "), "");
    }

    #[test]
    fn test_prefix_matching_is_case_insensitive() {
        assert!(matches_initials("bcc", "Bella Cake Chocolate Cream"));
        assert!(matches_initials("bcc", "Boss Classic Cola"));
        assert!(matches_initials("BC", "boss classic cola"));
    }

    #[test]
    fn test_word_content_does_not_match() {
        // "boss" is a word of the name, not a prefix of its initials.
        assert!(!matches_initials("boss", "Boss Classic Cola"));
    }

    #[test]
    fn test_single_word_names_fail_multi_letter_terms() {
        assert!(!matches_initials("bc", "Bella"));
    }

    #[test]
    fn test_blank_names_never_match() {
        assert!(!matches_initials("ab", ""));
        assert!(!matches_initials("ab", "   "));
    }
}
