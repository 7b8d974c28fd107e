use thiserror::Error;

/// Errors surfaced by the extraction pipeline.
///
/// Per-block ambiguity is not an error: blocks that cannot be resolved are
/// silently dropped (logged at debug level). An unavailable catalog is a
/// warning, not an error, so it does not appear here either.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The PDF text layer could not be read.
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// The reader produced no extractable text for the document.
    #[error("no extractable data in document")]
    NoText,

    /// A non-empty document yielded zero records.
    #[error("document yielded no records")]
    NoRecords,

    /// The grid-cell input could not be parsed.
    #[error("invalid grid cells input: {0}")]
    Grid(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
