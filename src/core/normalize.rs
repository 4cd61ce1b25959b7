// DevFinder - core/normalize.rs
//
// Text normalisation for accent- and case-insensitive name search.
// Core layer: pure functions, no allocation beyond the returned String.

use crate::util::constants::MAX_SEARCH_TERM_CHARS;

/// Fold a string into its search form: lowercase, Latin diacritics mapped
/// to their base letter, and every U+0020 space removed.
///
/// Only the fixed table in `fold_diacritic` is applied; other characters
/// (including other whitespace) pass through unchanged. Total and
/// idempotent.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(fold_diacritic)
        .filter(|&c| c != ' ')
        .collect()
}

/// Turn raw user search input into a search term: trim surrounding
/// whitespace, keep at most `MAX_SEARCH_TERM_CHARS` characters, then
/// `normalize`.
///
/// Every path that accepts search text (CLI, config, interactive) goes
/// through here.
pub fn normalize_search_input(raw: &str) -> String {
    let capped: String = raw.trim().chars().take(MAX_SEARCH_TERM_CHARS).collect();
    normalize(&capped)
}

/// Map a lowercase accented Latin vowel (or ñ) to its base letter.
///
/// Runs after lowercasing, so only lowercase forms are listed.
fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'ã' | 'â' | 'ä' | 'à' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ô' | 'õ' | 'ö' | 'ò' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_accent_insensitive() {
        assert_eq!(normalize("São Paulo"), "saopaulo");
        assert_eq!(normalize("sao paulo"), "saopaulo");
        assert_eq!(normalize("SÃO PAULO"), "saopaulo");
    }

    #[test]
    fn test_full_table() {
        let expected = "aaaaaeeeeiiiiooooouuuun";
        assert_eq!(normalize("áãâäà éèêë íìîï óôõöò úùûü ñ"), expected);
        assert_eq!(normalize("ÁÃÂÄÀÉÈÊËÍÌÎÏÓÔÕÖÒÚÙÛÜÑ"), expected);
    }

    #[test]
    fn test_unlisted_characters_pass_through() {
        assert_eq!(normalize("Çå-ø_1"), "çå-ø_1");
    }

    #[test]
    fn test_only_plain_spaces_removed() {
        assert_eq!(normalize(" a b  c "), "abc");
        assert_eq!(normalize("a\tb\nc"), "a\tb\nc");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_idempotent() {
        for input in ["Ana Índio", "  Bruno  ", "JOÃO da Silva", "Ñandú", "İstanbul", ""] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_search_input_trimmed_and_normalised() {
        assert_eq!(normalize_search_input("  Ín dio \t"), "indio");
        assert_eq!(normalize_search_input(""), "");
    }

    #[test]
    fn test_search_input_capped() {
        let long = "a".repeat(MAX_SEARCH_TERM_CHARS + 44);
        assert_eq!(normalize_search_input(&long).len(), MAX_SEARCH_TERM_CHARS);

        // The cap counts characters, not bytes.
        let accented = "é".repeat(MAX_SEARCH_TERM_CHARS + 1);
        assert_eq!(normalize_search_input(&accented), "e".repeat(MAX_SEARCH_TERM_CHARS));
    }
}
