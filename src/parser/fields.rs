use std::sync::LazyLock;

use regex::Regex;

use super::sku;
use crate::catalog::SkuCatalog;

/// Display cap applied to product names, matching the downstream sheet
/// column width.
const MAX_NAME_CHARS: usize = 90;
const NOTES_MARKER: &str = "Buyer Notes:";

static VARIANT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)v?a?riant:\s*").unwrap());
static SKU_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)[A-Z0-9-]{4,}(?:\s|$)").unwrap());
static TAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s)([A-Z0-9-]+)$").unwrap());

#[derive(Debug, PartialEq)]
pub struct Fields {
    pub name: String,
    pub variant: String,
    pub sku: String,
}

/// Decompose a block's concatenated lead-in span into product name,
/// variant, and reconciled SKU.
pub fn extract(lead_in: &[String], catalog: &SkuCatalog) -> Fields {
    let mut span = lead_in.join(" ");

    // Free-text buyer annotations trail the fields they describe and are
    // never part of any of them.
    if let Some(pos) = span.find(NOTES_MARKER) {
        span.truncate(pos);
    }

    let (rest, variant) = take_variant(&span);
    let (rest, raw_sku) = take_trailing_sku(&rest, catalog);
    let sku = sku::resolve(&raw_sku, catalog);

    let name = collapse_ws(&rest);
    let name = truncate_chars(&name, MAX_NAME_CHARS);

    Fields { name, variant, sku }
}

/// Split out the variant annotation: the text after the marker, up to the
/// next SKU-like token or the end of the span.
fn take_variant(span: &str) -> (String, String) {
    let Some(m) = VARIANT_RE.find(span) else {
        return (span.to_string(), String::new());
    };
    let after = &span[m.end()..];
    let (variant, tail) = match SKU_TOKEN_RE.find(after) {
        Some(t) => (&after[..t.start()], &after[t.start()..]),
        None => (after, ""),
    };
    let rest = format!("{} {}", &span[..m.start()], tail);
    (rest, variant.trim().to_string())
}

/// Pull the trailing SKU-like token off the span, rejoining a token that
/// wrapped across a line break into two fragments.
///
/// The fragments are rejoined when the tail alone is too short to be a
/// whole SKU, when the preceding fragment dangles on a hyphen, or when
/// only the joined form prefix-matches the catalog. Returns the remaining
/// span and the raw SKU (empty when no token is found).
fn take_trailing_sku(span: &str, catalog: &SkuCatalog) -> (String, String) {
    let span = span.trim_end();
    let Some(caps) = TAIL_RE.captures(span) else {
        return (span.to_string(), String::new());
    };
    let tail = caps.get(1).unwrap();
    let before = span[..tail.start()].trim_end();

    let joined = TAIL_RE.captures(before).and_then(|prev| {
        let frag = prev.get(1).unwrap();
        let candidate = format!("{}{}", frag.as_str(), tail.as_str());
        (candidate.len() >= 4).then_some((frag.start(), candidate))
    });

    let tail_ok = tail.as_str().len() >= 4;
    let use_joined = match &joined {
        Some((_, candidate)) => {
            !tail_ok
                || before.ends_with('-')
                || (catalog_has_prefix(catalog, candidate)
                    && !catalog_has_prefix(catalog, tail.as_str()))
        }
        None => false,
    };

    if use_joined {
        if let Some((cut, candidate)) = joined {
            return (span[..cut].to_string(), candidate);
        }
    }
    if tail_ok {
        return (
            span[..tail.start()].to_string(),
            tail.as_str().to_string(),
        );
    }
    (span.to_string(), String::new())
}

fn catalog_has_prefix(catalog: &SkuCatalog, raw: &str) -> bool {
    if catalog.is_empty() {
        return false;
    }
    let normalized = sku::normalize(raw);
    catalog.iter().any(|entry| entry.starts_with(&normalized))
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

// ── Tests ──
