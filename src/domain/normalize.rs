//! Display normalization for categorical codes.
//!
//! Every function here is total: unknown or malformed input yields the
//! "no enrichment" result instead of an error.

/// Definite articles recognised as a plural prefix (with separator).
const PLURAL_ARTICLES: [&str; 5] = ["die ", "der ", "das ", "den ", "dem "];

/// Placeholder for a missing part of speech.
pub const UNKNOWN_POS: &str = "Unknown";

/// Local name of an IRI: the text after the last `#` or `/`.
///
/// Plain codes (`"noun"`) come back unchanged.
pub fn local_name(iri: &str) -> &str {
    iri.rsplit(['#', '/']).next().unwrap_or(iri)
}

/// Map a grammatical-gender code to its definite article.
pub fn gender_to_article(code: Option<&str>) -> Option<&'static str> {
    match local_name(code?.trim()) {
        "masculine" => Some("der"),
        "feminine" => Some("die"),
        "neuter" => Some("das"),
        _ => None,
    }
}

/// Remove one leading definite article from a plural form.
///
/// `"die Tische"` → `"Tische"`. Matching is case-sensitive.
pub fn strip_article(plural: &str) -> &str {
    PLURAL_ARTICLES
        .iter()
        .find_map(|article| plural.strip_prefix(article))
        .unwrap_or(plural)
}

/// Group key for the part-of-speech layer.
///
/// Takes the local name and capitalizes it: first character upper case, the
/// rest lower case (`"lexinfo#NOUN"` → `"Noun"`).
pub fn pos_key(raw: Option<&str>) -> String {
    let name = raw.map(|r| local_name(r.trim())).unwrap_or_default();
    if name.is_empty() {
        return UNKNOWN_POS.to_string();
    }
    capitalize(name)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// `Some` only for values with visible content.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("masculine"), Some("der"))]
    #[case(Some("feminine"), Some("die"))]
    #[case(Some("neuter"), Some("das"))]
    #[case(Some("http://www.lexinfo.net/ontology/2.0/lexinfo#feminine"), Some("die"))]
    #[case(Some("commonGender"), None)]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn test_gender_to_article(#[case] code: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(gender_to_article(code), expected);
    }

    #[rstest]
    #[case("die Tische", "Tische")]
    #[case("der Lehrer", "Lehrer")]
    #[case("das Haus", "Haus")]
    #[case("den Kindern", "Kindern")]
    #[case("dem Mann", "Mann")]
    #[case("Die Tische", "Die Tische")]
    #[case("dieTische", "dieTische")]
    #[case("Tische", "Tische")]
    #[case("", "")]
    fn test_strip_article(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_article(input), expected);
    }

    #[test]
    fn test_strip_article_removes_only_one_article() {
        assert_eq!(strip_article("die die Tische"), "die Tische");
    }

    #[rstest]
    #[case(Some("noun"), "Noun")]
    #[case(Some("NOUN"), "Noun")]
    #[case(Some("http://www.lexinfo.net/ontology/2.0/lexinfo#verb"), "Verb")]
    #[case(Some("übung"), "Übung")]
    #[case(Some(""), "Unknown")]
    #[case(None, "Unknown")]
    fn test_pos_key(#[case] raw: Option<&str>, #[case] expected: &str) {
        assert_eq!(pos_key(raw), expected);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("http://ailand.org/E1"), "E1");
        assert_eq!(local_name("a#b"), "b");
        assert_eq!(local_name("plain"), "plain");
    }
}
