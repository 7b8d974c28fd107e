use crate::catalog::SkuCatalog;

/// Greek capitals that PDF text layers commonly emit in place of the
/// visually identical Latin letter.
const LOOKALIKES: &[(char, char)] = &[
    ('\u{0391}', 'A'), // Α
    ('\u{0392}', 'B'), // Β
    ('\u{0395}', 'E'), // Ε
    ('\u{0396}', 'Z'), // Ζ
    ('\u{0397}', 'H'), // Η
    ('\u{0399}', 'I'), // Ι
    ('\u{039A}', 'K'), // Κ
    ('\u{039C}', 'M'), // Μ
    ('\u{039D}', 'N'), // Ν
    ('\u{039F}', 'O'), // Ο
    ('\u{03A1}', 'P'), // Ρ
    ('\u{03A4}', 'T'), // Τ
    ('\u{03A5}', 'Y'), // Υ
    ('\u{03A7}', 'X'), // Χ
];

/// Replace look-alike characters with their Latin equivalents.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            LOOKALIKES
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |(_, to)| *to)
        })
        .collect()
}

/// Resolve a raw (possibly truncated or mis-rendered) SKU fragment to its
/// canonical catalog form. Pure and total: always returns a string.
///
/// Truncated fragments prefix-match their canonical entry. Catalogs are
/// assumed to have no two entries where one prefixes the other, so the
/// first hit wins.
pub fn resolve(raw: &str, catalog: &SkuCatalog) -> String {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return normalized;
    }
    catalog
        .iter()
        .find(|entry| entry.starts_with(&normalized))
        .map(str::to_string)
        .unwrap_or(normalized)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(skus: &[&str]) -> SkuCatalog {
        skus.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalizes_greek_lookalikes() {
        // Β, Ο, Υ are Greek capitals here
        assert_eq!(normalize("\u{0392}\u{039F}\u{03A5}-12"), "BOY-12");
        assert_eq!(normalize("ABC-123"), "ABC-123");
    }

    #[test]
    fn truncated_fragment_resolves_by_prefix() {
        let catalog = cat(&["ABC-123-RED"]);
        assert_eq!(resolve("ABC-123", &catalog), "ABC-123-RED");
    }

    #[test]
    fn unknown_fragment_passes_through() {
        let catalog = cat(&["ABC-123-RED"]);
        assert_eq!(resolve("ZZZ", &catalog), "ZZZ");
    }

    #[test]
    fn empty_catalog_passes_through() {
        assert_eq!(resolve("ABC-123", &SkuCatalog::default()), "ABC-123");
    }

    #[test]
    fn misread_fragment_resolves_after_normalization() {
        let catalog = cat(&["BOY-12-BLUE"]);
        assert_eq!(resolve("\u{0392}\u{039F}\u{03A5}-12", &catalog), "BOY-12-BLUE");
    }

    #[test]
    fn empty_input_never_matches() {
        let catalog = cat(&["ABC-123-RED"]);
        assert_eq!(resolve("", &catalog), "");
    }
}
