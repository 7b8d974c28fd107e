mod catalog;
mod error;
mod parser;
mod reader;
mod writer;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::warn;

use error::ExtractError;

#[derive(Parser)]
#[command(name = "picklist", about = "Order picking-list PDF to tabular records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one document to CSV
    Convert {
        /// Input PDF (or grid-cells JSON with --grid)
        input: PathBuf,
        /// Output CSV path (default: input with .csv extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Master SKU catalog, newline-delimited, for reconciliation
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// Treat input as coordinate-grid cells JSON instead of a PDF
        #[arg(long)]
        grid: bool,
    },
    /// Convert every PDF in a directory
    Batch {
        /// Directory of PDF documents
        dir: PathBuf,
        /// Output directory (default: alongside the inputs)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Master SKU catalog, newline-delimited, for reconciliation
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Dump classified lines for a document (debugging)
    Lines {
        input: PathBuf,
        #[arg(long)]
        grid: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            catalog,
            grid,
        } => {
            let raw = read_document(&input, grid)?;
            let skus = catalog::load(catalog.as_deref());
            let records = parser::extract_records(&raw, &skus);
            if records.is_empty() {
                return Err(ExtractError::NoRecords)
                    .with_context(|| input.display().to_string());
            }
            let out = output.unwrap_or_else(|| input.with_extension("csv"));
            writer::write_csv_file(&records, &out)?;
            println!("Wrote {} records to {}", records.len(), out.display());
            Ok(())
        }
        Commands::Batch {
            dir,
            out_dir,
            catalog,
        } => {
            let skus = catalog::load(catalog.as_deref());
            let mut inputs: Vec<PathBuf> = std::fs::read_dir(&dir)?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| {
                    p.extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
                })
                .collect();
            inputs.sort();
            if inputs.is_empty() {
                println!("No PDF documents in {}", dir.display());
                return Ok(());
            }
            println!("Converting {} documents...", inputs.len());
            let counts = convert_batch(&inputs, out_dir.as_deref(), &skus)?;
            counts.print();
            Ok(())
        }
        Commands::Lines { input, grid } => {
            let raw = read_document(&input, grid)?;
            for line in parser::lines::classify_lines(&raw) {
                println!("{:>4}  {:<16} {}", line.index, line.label.name(), line.text.trim());
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn read_document(input: &Path, grid: bool) -> Result<Vec<parser::RawLine>, ExtractError> {
    if grid {
        let doc = reader::read_grid_document(input)?;
        let raw = reader::flatten_grid(&doc);
        if raw.is_empty() {
            return Err(ExtractError::NoText);
        }
        Ok(raw)
    } else {
        reader::read_text_lines(input)
    }
}

struct BatchCounts {
    files: usize,
    records: usize,
    errors: usize,
}

impl BatchCounts {
    fn print(&self) {
        println!(
            "Converted {} documents ({} records, {} failures).",
            self.files, self.records, self.errors,
        );
    }
}

/// Convert independent documents in parallel; each run owns its own line
/// sequence, only the catalog is shared (read-only).
fn convert_batch(
    inputs: &[PathBuf],
    out_dir: Option<&Path>,
    skus: &catalog::SkuCatalog,
) -> anyhow::Result<BatchCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let results: Vec<(&PathBuf, Result<usize, ExtractError>)> = inputs
        .par_iter()
        .map(|input| {
            let res = convert_one(input, out_dir, skus);
            pb.inc(1);
            (input, res)
        })
        .collect();
    pb.finish_and_clear();

    let mut counts = BatchCounts {
        files: 0,
        records: 0,
        errors: 0,
    };
    for (input, res) in results {
        match res {
            Ok(n) => {
                counts.files += 1;
                counts.records += n;
            }
            Err(e) => {
                warn!("{}: {}", input.display(), e);
                counts.errors += 1;
            }
        }
    }
    Ok(counts)
}

fn convert_one(
    input: &Path,
    out_dir: Option<&Path>,
    skus: &catalog::SkuCatalog,
) -> Result<usize, ExtractError> {
    let raw = reader::read_text_lines(input)?;
    let records = parser::extract_records(&raw, skus);
    if records.is_empty() {
        return Err(ExtractError::NoRecords);
    }
    let out = match out_dir {
        Some(dir) => {
            let mut path = dir.join(input.file_name().unwrap_or_default());
            path.set_extension("csv");
            path
        }
        None => input.with_extension("csv"),
    };
    writer::write_csv_file(&records, &out)?;
    Ok(records.len())
}
