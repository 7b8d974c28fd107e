use tracing::debug;

use super::lines::{Label, Line};

/// A product header, an optional variant line, and an optional SKU
/// continuation never exceed three lines of lead-in before the anchor.
/// Bounding the window keeps a block from swallowing its neighbor's tail.
const LOOKBACK: usize = 3;

#[derive(Debug)]
pub struct Block {
    /// First claimed line index.
    pub start: usize,
    /// Index of the quantity anchor line (end of the claimed span).
    pub anchor: usize,
    /// Candidate quantity digits captured from the anchor.
    pub qty_digits: String,
    /// Window line texts in document order, junk excluded.
    pub lead_in: Vec<String>,
}

/// Partition classified lines into record blocks, one quantity anchor each.
///
/// Anchors are scanned back-to-front: each anchor claims a bounded window
/// of preceding lines, and the claimed set guarantees no line is consumed
/// twice. The window stops at a claimed line and at another anchor, so a
/// block never reaches into a neighboring record. Anchors with an empty
/// window are dropped, not errors; two adjacent anchors with no header
/// between them both drop rather than fabricate a product name. Blocks
/// come back in ascending anchor order.
pub fn segment(lines: &[Line]) -> Vec<Block> {
    let mut claimed = vec![false; lines.len()];
    let mut blocks = Vec::new();

    for i in (0..lines.len()).rev() {
        let Label::Anchor { digits } = &lines[i].label else {
            continue;
        };
        if claimed[i] {
            continue;
        }

        let mut window: Vec<&Line> = Vec::new();
        let mut start = i;
        let mut j = i;
        while j > 0 && window.len() < LOOKBACK {
            j -= 1;
            if claimed[j] || matches!(lines[j].label, Label::Anchor { .. }) {
                break;
            }
            if lines[j].label == Label::Junk {
                continue; // page furniture between lead-in lines
            }
            window.push(&lines[j]);
            start = j;
        }

        claimed[i] = true;
        if window.is_empty() {
            debug!(line = i, "anchor has no unclaimed lead-in, block dropped");
            continue;
        }
        for flag in &mut claimed[start..i] {
            *flag = true;
        }

        window.reverse();
        blocks.push(Block {
            start,
            anchor: i,
            qty_digits: digits.clone(),
            lead_in: window.iter().map(|l| l.text.trim().to_string()).collect(),
        });
    }

    blocks.reverse();
    blocks
}

// ── Tests ──
