use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use placename_extract::aggregate::{collect_document, extract_document};
use placename_extract::resolve::resolve;
use placename_extract::{DocumentExtraction, ExtractError, Lexicon, Rules, output, scanner};

#[derive(Parser)]
#[command(
    name = "placename_extract",
    about = "Place-name record extractor for classical gazetteer text"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a directory of converted documents → placename_records.csv
    Extract {
        /// Directory holding one .txt file per source document
        #[arg(default_value = "database")]
        corpus: PathBuf,
        #[arg(short, long, default_value = "placename_records.csv")]
        output: PathBuf,
        /// Keep the names as first detected (skip re-resolution)
        #[arg(long)]
        raw: bool,
        /// JSON lookup tables overriding the built-in ones
        #[arg(long)]
        lexicon: Option<PathBuf>,
        /// Also write per-document statistics as JSON
        #[arg(long)]
        summary: Option<PathBuf>,
    },
    /// Re-resolve the names of an existing record table
    Resolve {
        /// Table written by `extract --raw` (or any placename,text,source CSV)
        input: PathBuf,
        #[arg(short, long, default_value = "placename_records_resolved.csv")]
        output: PathBuf,
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },
    /// Print the built-in lookup tables as JSON (a template for --lexicon)
    Lexicon,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            corpus,
            output,
            raw,
            lexicon,
            summary,
        } => run_extract(&corpus, &output, raw, lexicon.as_deref(), summary.as_deref()),
        Command::Resolve {
            input,
            output,
            lexicon,
        } => run_resolve(&input, &output, lexicon.as_deref()),
        Command::Lexicon => {
            let json = serde_json::to_string_pretty(&Lexicon::default())?;
            println!("{json}");
            Ok(())
        }
    }
}

fn load_rules(path: Option<&Path>) -> Result<Rules> {
    let rules = match path {
        Some(p) => {
            info!(path = %p.display(), "loading lookup tables");
            Lexicon::load(p)?.compile()?
        }
        None => Rules::builtin()?,
    };
    Ok(rules)
}

// ═══════════════════════════════════════════════════════════════════════
//  EXTRACT MODE: corpus directory → record table
// ═══════════════════════════════════════════════════════════════════════

fn run_extract(
    corpus: &Path,
    output_path: &Path,
    raw: bool,
    lexicon: Option<&Path>,
    summary_path: Option<&Path>,
) -> Result<()> {
    let rules = load_rules(lexicon)?;

    let documents = scanner::scan_documents(corpus)
        .with_context(|| format!("cannot scan corpus at {}", corpus.display()))?;
    info!(corpus = %corpus.display(), documents = documents.len(), "scanning corpus");

    // One document per task; collect() keeps document order.
    let outcomes: Vec<Result<DocumentExtraction, ExtractError>> = documents
        .par_iter()
        .map(|doc| -> Result<DocumentExtraction, ExtractError> {
            let lines = doc.read_lines()?;
            debug!(source = %doc.source, lines = lines.len(), "processing document");
            Ok(if raw {
                collect_document(&lines, &doc.source, &rules)
            } else {
                extract_document(&lines, &doc.source, &rules)
            })
        })
        .collect();

    let mut records = Vec::new();
    let mut summaries = Vec::new();
    let mut failed = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(done) => {
                records.extend(done.records);
                summaries.push(done.summary);
            }
            Err(e) => {
                warn!(error = %e, "skipping document");
                failed.push(e.to_string());
            }
        }
    }

    output::write_records(output_path, &records)?;
    info!(path = %output_path.display(), records = records.len(), "wrote record table");

    if let Some(path) = summary_path {
        output::write_summary(path, &summaries)?;
        info!(path = %path.display(), "wrote summary");
    }

    // ── Print statistics ───────────────────────────────────────────
    let lines: usize = summaries.iter().map(|s| s.lines).sum();
    let buckets: usize = summaries.iter().map(|s| s.buckets).sum();
    let discarded: usize = summaries.iter().map(|s| s.discarded).sum();

    eprintln!("\n══════════════════════════════════════════");
    eprintln!("  EXTRACTION STATISTICS");
    eprintln!("══════════════════════════════════════════");
    eprintln!("  Documents:  {}", summaries.len());
    eprintln!("  Lines:      {lines}");
    eprintln!("  Buckets:    {buckets}");
    eprintln!("  Records:    {}", records.len());
    if raw {
        eprintln!("  (raw mode: names not re-resolved)");
    } else {
        eprintln!("  Discarded:  {discarded}");
    }

    let mut busiest: Vec<_> = summaries.iter().filter(|s| s.records > 0).collect();
    busiest.sort_by_key(|s| std::cmp::Reverse(s.records));
    if !busiest.is_empty() {
        eprintln!("\nMost records:");
        for s in busiest.iter().take(10) {
            eprintln!("  {}: {} records", s.source, s.records);
        }
    }

    if !failed.is_empty() {
        eprintln!("\n══════════════════════════════════════════");
        eprintln!("  UNREADABLE DOCUMENTS ({} total)", failed.len());
        eprintln!("══════════════════════════════════════════");
        for f in failed.iter().take(30) {
            eprintln!("  {f}");
        }
        if failed.len() > 30 {
            eprintln!("  ... and {} more", failed.len() - 30);
        }
    }

    ensure_all_read(&failed)
}

/// Fail the run, after the table is written, when any document was unreadable.
fn ensure_all_read(failed: &[String]) -> Result<()> {
    if !failed.is_empty() {
        anyhow::bail!("{} document(s) could not be read", failed.len());
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  RESOLVE MODE: record table → re-resolved record table
// ═══════════════════════════════════════════════════════════════════════

fn run_resolve(input: &Path, output_path: &Path, lexicon: Option<&Path>) -> Result<()> {
    let rules = load_rules(lexicon)?;

    let rows = output::read_records(input)?;
    let total = rows.len();
    info!(path = %input.display(), rows = total, "re-resolving record table");

    let mut renamed = 0usize;
    let mut resolved = Vec::with_capacity(total);
    for row in rows {
        let before = row.placename.clone();
        if let Some(record) = resolve(row, &rules) {
            if record.placename != before {
                debug!(from = %before, to = %record.placename, source = %record.source, "renamed");
                renamed += 1;
            }
            resolved.push(record);
        }
    }

    output::write_records(output_path, &resolved)?;

    eprintln!("\n══════════════════════════════════════════");
    eprintln!("  RESOLUTION STATISTICS");
    eprintln!("══════════════════════════════════════════");
    eprintln!("  Rows:       {total}");
    eprintln!("  Renamed:    {renamed}");
    eprintln!("  Discarded:  {}", total - resolved.len());
    eprintln!("  Written:    {} → {}", resolved.len(), output_path.display());

    Ok(())
}
