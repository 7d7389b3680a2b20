use unicode_normalization::UnicodeNormalization;

/// Normalize an athlete name for comparison: lowercase, strip diacritics
/// and non-letter characters, collapse whitespace.
///
/// Total and idempotent; empty input yields an empty string.
pub fn normalize(name: &str) -> String {
    let stripped: String = name
        .to_lowercase()
        // NFD decomposition splits characters into base + combining marks
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c.is_alphabetic() { c } else { ' ' })
        .collect();

    // Collapse runs of whitespace left behind by stripped characters
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Unicode combining diacritical marks (category Mn, common ranges)
fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}' | '\u{1AB0}'..='\u{1AFF}' | '\u{20D0}'..='\u{20FF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_trims() {
        assert_eq!(normalize("  Jane DOE  "), "jane doe");
    }

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(normalize("José Müller"), "jose muller");
        assert_eq!(normalize("Zoë Brontë"), "zoe bronte");
    }

    #[test]
    fn test_strips_non_letters_and_collapses_whitespace() {
        assert_eq!(normalize("O'Brien, J.R. (3rd)"), "o brien j r rd");
        assert_eq!(normalize("Anna-Maria   Kowalska"), "anna maria kowalska");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("123 !!"), "");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("Åsa Sjöström-Løkke");
        assert_eq!(normalize(&once), once);
    }
}
