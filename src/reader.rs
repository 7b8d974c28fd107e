//! Input collaborators: the PDF text layer (via `pdf-extract`) and the
//! coordinate-grid variant fed by an external positioned-text reader.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::ExtractError;
use crate::parser::{number_lines, RawLine};

/// Read the document's text layer as numbered lines.
pub fn read_text_lines(path: &Path) -> Result<Vec<RawLine>, ExtractError> {
    let bytes = fs::read(path)?;
    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;
    if text.trim().is_empty() {
        return Err(ExtractError::NoText);
    }
    Ok(number_lines(text.lines()))
}

// ── Coordinate-grid variant ──

/// Picking-list pages are laid out in four columns: product name, SKU,
/// slot, quantity. Page coordinates, against a 595-unit reference width;
/// the last band widens to the actual page width.
pub const REFERENCE_PAGE_WIDTH: f64 = 595.0;

pub fn column_bands(page_width: f64) -> [(f64, f64); 4] {
    [
        (0.0, 350.0),
        (350.0, 470.0),
        (470.0, 540.0),
        (540.0, page_width),
    ]
}

fn band_index(x: f64, bands: &[(f64, f64); 4]) -> Option<usize> {
    bands.iter().position(|&(lo, hi)| x >= lo && x < hi)
}

/// Positioned text spans handed over by the coordinate reader, already
/// segmented into rows (one list of spans per ruled table row).
#[derive(Debug, Deserialize)]
pub struct GridDocument {
    pub pages: Vec<GridPage>,
}

#[derive(Debug, Deserialize)]
pub struct GridPage {
    #[serde(default = "default_page_width")]
    pub width: f64,
    pub rows: Vec<Vec<GridSpan>>,
}

#[derive(Debug, Deserialize)]
pub struct GridSpan {
    pub x: f64,
    pub text: String,
}

fn default_page_width() -> f64 {
    REFERENCE_PAGE_WIDTH
}

pub fn read_grid_document(path: &Path) -> Result<GridDocument, ExtractError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

static DEFA_BLEED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)defa").unwrap());
static STRAY_LEAD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^.\s").unwrap());
static DIGIT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Flatten banded grid rows into classifier-ready lines.
///
/// Cell text keeps the quirks of cropped extraction: SKU cells wrap across
/// physical lines and pick up bleed from the neighboring slot column, and
/// quantity cells carry trailing garbage after the digits. Rows repeating
/// the report column header are skipped whole.
pub fn flatten_grid(doc: &GridDocument) -> Vec<RawLine> {
    let mut texts = Vec::new();

    for page in &doc.pages {
        let bands = column_bands(page.width);
        for row in &page.rows {
            let mut cells: [Vec<&str>; 4] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
            for span in row {
                match band_index(span.x, &bands) {
                    Some(b) => cells[b].push(span.text.as_str()),
                    None => debug!(x = span.x, "span outside column bands, ignored"),
                }
            }

            let name = cells[0].join(" ");
            if name.contains("Nama Produk") {
                continue;
            }
            let sku = scrub_sku_cell(&cells[1].join("\n"));
            let qty = DIGIT_RUN_RE
                .find(&cells[3].join(" "))
                .map(|m| m.as_str().to_string());

            let name = name.trim();
            if !name.is_empty() {
                texts.push(name.to_string());
            }
            if !sku.is_empty() {
                texts.push(sku);
            }
            if let Some(digits) = qty {
                texts.push(format!("Default Slot {}", digits));
            }
        }
    }

    number_lines(texts)
}

/// Rejoin a SKU wrapped inside its cell and strip the cropping artifacts:
/// bleed-through of the slot column ("defa") and a stray leading character
/// left by the crop boundary.
fn scrub_sku_cell(cell: &str) -> String {
    let joined = cell.replace('\n', "");
    let cleaned = DEFA_BLEED_RE.replace_all(&joined, "");
    STRAY_LEAD_RE
        .replace(cleaned.trim(), "")
        .trim()
        .to_string()
}

// ── Tests ──
