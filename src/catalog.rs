use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

/// Master set of canonical SKU strings, loaded once per extraction job and
/// read-only for the duration of a parse.
#[derive(Debug, Default)]
pub struct SkuCatalog {
    entries: HashSet<String>,
}

impl SkuCatalog {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl FromIterator<String> for SkuCatalog {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Load a newline-delimited SKU catalog.
///
/// A missing or unreadable file is a warning, not an error: the engine
/// proceeds with an empty catalog and reconciliation degrades to
/// pass-through.
pub fn load(path: Option<&Path>) -> SkuCatalog {
    let Some(path) = path else {
        return SkuCatalog::default();
    };
    match fs::read_to_string(path) {
        Ok(text) => {
            let catalog: SkuCatalog = text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
            info!("Loaded {} catalog SKUs from {}", catalog.len(), path.display());
            catalog
        }
        Err(e) => {
            warn!(
                "Catalog {} unavailable ({}), continuing without reconciliation",
                path.display(),
                e
            );
            SkuCatalog::default()
        }
    }
}

// ── Tests ──
