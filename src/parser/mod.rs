pub mod blocks;
pub mod fields;
pub mod lines;
pub mod sku;

use serde::Serialize;
use tracing::debug;

use crate::catalog::SkuCatalog;

/// One physical text line (or flattened grid cell), in document order.
#[derive(Debug, Clone)]
pub struct RawLine {
    pub index: usize,
    pub text: String,
}

/// Number a sequence of line texts in document order.
pub fn number_lines<I, S>(texts: I) -> Vec<RawLine>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| RawLine {
            index,
            text: text.into(),
        })
        .collect()
}

/// One resolved order line item. Serializes with the fixed output column
/// order `[Product Name, Variant, SKU, Quantity]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    #[serde(rename = "Product Name")]
    pub product_name: String,
    #[serde(rename = "Variant")]
    pub variant: String,
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Quantity")]
    pub qty: u32,
}

/// Three-pass pipeline: raw lines → classified lines → blocks → records.
///
/// Ambiguous blocks are dropped, never errors. A record needs a parseable
/// quantity and a non-empty product name; a missing SKU is emitted as an
/// empty string. The caller decides what an empty result from non-empty
/// input means.
pub fn extract_records(raw: &[RawLine], catalog: &SkuCatalog) -> Vec<OrderRecord> {
    let classified = lines::classify_lines(raw);
    let blocks = blocks::segment(&classified);

    let mut records = Vec::with_capacity(blocks.len());
    for block in &blocks {
        let Ok(qty) = block.qty_digits.parse::<u32>() else {
            debug!(
                line = block.anchor,
                digits = %block.qty_digits,
                "unparseable quantity, block dropped"
            );
            continue;
        };
        let f = fields::extract(&block.lead_in, catalog);
        if f.name.is_empty() {
            debug!(line = block.anchor, "no product name, block dropped");
            continue;
        }
        records.push(OrderRecord {
            product_name: f.name,
            variant: f.variant,
            sku: f.sku,
            qty,
        });
    }
    records
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(texts: &[&str]) -> Vec<RawLine> {
        number_lines(texts.iter().map(|s| s.to_string()))
    }

    fn cat(skus: &[&str]) -> SkuCatalog {
        skus.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn well_formed_single_block() {
        let records = extract_records(
            &raw(&["Blue Shirt L ABC123", "Default Slot 5"]),
            &SkuCatalog::default(),
        );
        assert_eq!(
            records,
            vec![OrderRecord {
                product_name: "Blue Shirt L".into(),
                variant: "".into(),
                sku: "ABC123".into(),
                qty: 5,
            }]
        );
    }

    #[test]
    fn variant_line_between_header_and_anchor() {
        let records = extract_records(
            &raw(&["Blue Shirt L ABC123", "Variant: Large", "Default Slot 5"]),
            &SkuCatalog::default(),
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product_name, "Blue Shirt L");
        assert_eq!(records[0].variant, "Large");
        assert_eq!(records[0].sku, "ABC123");
        assert_eq!(records[0].qty, 5);
    }

    #[test]
    fn split_sku_reaches_the_reconciler_joined() {
        let records = extract_records(
            &raw(&["Thermal Flask ABC", "DEF", "Default Slot 2"]),
            &cat(&["ABCDEF-STEEL"]),
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sku, "ABCDEF-STEEL");
    }

    #[test]
    fn adjacent_anchors_yield_nothing() {
        let records = extract_records(
            &raw(&["Default Slot 3", "Default Slot 7"]),
            &SkuCatalog::default(),
        );
        assert!(records.is_empty());
    }

    #[test]
    fn literal_zero_quantity_is_emitted() {
        let records = extract_records(
            &raw(&["Blue Shirt L ABC123", "Default Slot 0"]),
            &SkuCatalog::default(),
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].qty, 0);
    }

    #[test]
    fn overflowing_quantity_drops_the_block() {
        let records = extract_records(
            &raw(&["Blue Shirt L ABC123", "Default Slot 99999999999999999999"]),
            &SkuCatalog::default(),
        );
        assert!(records.is_empty());
    }

    #[test]
    fn nameless_block_is_dropped() {
        // A lone SKU fragment with nothing else carries no product name.
        let records = extract_records(
            &raw(&["ABC-1234", "Default Slot 3"]),
            &SkuCatalog::default(),
        );
        assert!(records.is_empty());
    }

    #[test]
    fn skuless_block_is_still_emitted() {
        let records = extract_records(
            &raw(&["Topi Baseball Polos", "Default Slot 9"]),
            &SkuCatalog::default(),
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sku, "");
        assert_eq!(records[0].product_name, "Topi Baseball Polos");
    }

    #[test]
    fn records_come_back_in_document_order() {
        let records = extract_records(
            &raw(&[
                "Alpha Product ABCD-1",
                "Default Slot 9",
                "Beta Product EFGH-2",
                "Default Slot 1",
            ]),
            &SkuCatalog::default(),
        );
        let names: Vec<&str> = records.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha Product", "Beta Product"]);
    }

    #[test]
    fn picking_list_fixture() {
        let text = std::fs::read_to_string("tests/fixtures/picking_list.txt").unwrap();
        let records = extract_records(&raw(&text.lines().collect::<Vec<_>>()), &SkuCatalog::default());
        assert_eq!(records.len(), 5);

        assert_eq!(
            records[0].product_name,
            "Kaos Polos Cotton Combed 30s Lengan Pendek Hitam"
        );
        assert_eq!(records[0].sku, "TSH-BLK-M");
        assert_eq!(records[0].qty, 12);

        // SKU wrapped across a line break
        assert_eq!(records[1].sku, "CHN-NAVY-32");
        assert_eq!(records[1].product_name, "Celana Chino Slim Fit Pria Premium");
        assert_eq!(records[1].qty, 4);

        assert_eq!(records[2].variant, "Maroon, XL");
        assert_eq!(records[2].sku, "HOD-MRN-XL");

        // Buyer notes stripped from the name
        assert_eq!(records[3].product_name, "Sepatu Sneakers Canvas Low Cut Putih");
        assert_eq!(records[3].sku, "SNK-WHT-40");

        assert_eq!(records[4].product_name, "Topi Baseball Polos");
        assert_eq!(records[4].variant, "Navy");
        assert_eq!(records[4].sku, "CAP-NVY");
        assert_eq!(records[4].qty, 9);
    }

    #[test]
    fn picking_list_fixture_with_catalog() {
        let text = std::fs::read_to_string("tests/fixtures/picking_list.txt").unwrap();
        let catalog = crate::catalog::load(Some(std::path::Path::new(
            "tests/fixtures/catalog.txt",
        )));
        let records = extract_records(&raw(&text.lines().collect::<Vec<_>>()), &catalog);
        assert_eq!(records.len(), 5);
        // The truncated fragment resolves to its canonical catalog entry.
        assert_eq!(records[4].sku, "CAP-NVY-NAVY");
    }
}
