use alloc::string::String;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Folds a string to the canonical form used for every comparison in the
/// game: NFD-decompose, drop the combining marks, uppercase the rest.
pub fn canonical(input: &str) -> String {
    input
        .nfd()
        .filter(|&ch| !is_combining_mark(ch))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Canonical target words must be plain letters, nothing else.
pub(crate) fn is_plain_letters(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_uppercases() {
        assert_eq!(canonical("Práctica"), "PRACTICA");
        assert_eq!(canonical("ingeniería"), "INGENIERIA");
        assert_eq!(canonical("ECONOMÍA"), "ECONOMIA");
    }

    #[test]
    fn folds_tilde_and_diaeresis_to_base_letters() {
        assert_eq!(canonical("Ñ"), "N");
        assert_eq!(canonical("Ü"), "U");
    }

    #[test]
    fn plain_input_is_unchanged() {
        assert_eq!(canonical("SEGURIDAD"), "SEGURIDAD");
    }

    #[test]
    fn plain_letters_check() {
        assert!(is_plain_letters("ARQUITECTURA"));
        assert!(!is_plain_letters(""));
        assert!(!is_plain_letters("GEST. CONFIGURACIÓN"));
        assert!(!is_plain_letters("arquitectura"));
    }
}
