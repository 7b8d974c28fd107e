use std::sync::LazyLock;

use regex::Regex;

use super::RawLine;

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Default Slot\s*(\d+)").unwrap());
// "v?a?riant:" also catches the single-character-dropped misreads
// ("riant:", "ariant:") that the text layer produces.
static VARIANT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)v?a?riant:").unwrap());
static SKU_TAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[ \t])[A-Z0-9-]{4,}$").unwrap());

/// Report titles, print stamps, pagination, and the column-header row
/// repeated on every page. None of these are record data.
const JUNK_MARKERS: &[&str] = &[
    "Picking List",
    "Printed by",
    "Print Date",
    "Nama Produk",
    "Page ",
    "Halaman ",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    /// Ends with a SKU-like token; the remainder is product-name text.
    ProductHeader,
    /// Carries a `Variant:` annotation (or its common misread).
    Variant,
    /// Contains the quantity marker; `digits` is the candidate quantity.
    Anchor { digits: String },
    /// Page furniture, never part of a record.
    Junk,
    /// Continuation text belonging to whichever block claims it.
    Unclassified,
}

impl Label {
    pub fn name(&self) -> &'static str {
        match self {
            Label::ProductHeader => "product-header",
            Label::Variant => "variant",
            Label::Anchor { .. } => "quantity-anchor",
            Label::Junk => "junk",
            Label::Unclassified => "continuation",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Line {
    pub index: usize,
    pub text: String,
    pub label: Label,
}

pub fn classify_lines(raw: &[RawLine]) -> Vec<Line> {
    raw.iter()
        .map(|r| Line {
            index: r.index,
            text: r.text.clone(),
            label: classify(&r.text),
        })
        .collect()
}

/// Label one line. Rules are evaluated in order, first match wins.
pub fn classify(text: &str) -> Label {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Label::Junk;
    }
    if JUNK_MARKERS.iter().any(|m| trimmed.starts_with(m)) {
        return Label::Junk;
    }
    if let Some(caps) = ANCHOR_RE.captures(trimmed) {
        return Label::Anchor {
            digits: caps[1].to_string(),
        };
    }
    if VARIANT_RE.is_match(trimmed) {
        return Label::Variant;
    }
    if SKU_TAIL_RE.is_match(trimmed) {
        return Label::ProductHeader;
    }
    Label::Unclassified
}

// ── Tests ──
