use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

fn parens_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\([^)]*\)\s*").unwrap())
}

fn non_slug_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap())
}

/// Removes every parenthesized segment, parentheses included, collapsing the
/// surrounding whitespace to a single space.
pub fn strip_parens(label: &str) -> String {
    parens_re().replace_all(label, " ").trim().to_string()
}

/// Turns a human-readable label into a URL-safe slug: parentheticals
/// stripped, lowercased, accents folded to their base letter, every run of
/// remaining non-alphanumeric characters collapsed to a single hyphen.
///
/// An empty label yields an empty slug.
pub fn slugify(label: &str) -> String {
    let folded: String = strip_parens(label)
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    non_slug_re()
        .replace_all(&folded, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_parens_removes_annotation() {
        assert_eq!(strip_parens("CMM meten en controleren (C)"), "CMM meten en controleren");
        assert_eq!(strip_parens("Intellectueel eigendom (A+B)"), "Intellectueel eigendom");
    }

    #[test]
    fn test_strip_parens_collapses_inner_segment() {
        assert_eq!(strip_parens("voor (x) en na"), "voor en na");
        assert_eq!(strip_parens("geen haakjes"), "geen haakjes");
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("NPI Engineer"), "npi-engineer");
        assert_eq!(slugify("CNC Operator"), "cnc-operator");
    }

    #[test]
    fn test_slugify_excludes_parenthetical_text() {
        assert_eq!(slugify("CMM meten en controleren (C)"), "cmm-meten-en-controleren");
        assert_eq!(slugify("Ontwerp voor schaalbaarheid (A+B)"), "ontwerp-voor-schaalbaarheid");
    }

    #[test]
    fn test_slugify_folds_diacritics() {
        assert_eq!(slugify("Efficiënt één module"), "efficient-een-module");
        assert_eq!(slugify("Kwaliteitscontrole à la carte"), "kwaliteitscontrole-a-la-carte");
    }

    #[test]
    fn test_slugify_collapses_symbol_runs() {
        assert_eq!(slugify("ISO9000 en CE (A+B)"), "iso9000-en-ce");
        assert_eq!(slugify("a  --  b"), "a-b");
    }

    #[test]
    fn test_slugify_trims_hyphens() {
        assert_eq!(slugify("  spaties rondom  "), "spaties-rondom");
        assert_eq!(slugify("!leading en trailing?"), "leading-en-trailing");
    }

    #[test]
    fn test_slugify_empty_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("(alleen haakjes)"), "");
    }
}
