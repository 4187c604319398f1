use crate::commands::{load_page, save_page};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagekit_editor::DocumentStore;
use pagekit_extract::{find_batch, Source};
use std::fs;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Page document to patch
    pub page: String,

    /// File holding the patch batch, or `-` for stdin. Generated text is
    /// accepted: the batch may sit in a code fence or inside prose.
    pub batch: String,

    /// Print the result instead of writing it back
    #[arg(long)]
    pub dry_run: bool,
}

pub fn apply(args: ApplyArgs, cwd: &Path) -> Result<()> {
    let page_path = cwd.join(&args.page);
    let document = load_page(&page_path)?;

    let text = if args.batch == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(cwd.join(&args.batch))?
    };

    let found = find_batch(&text).ok_or_else(|| anyhow!("No patch batch found in {}", args.batch))?;
    if found.source != Source::Whole {
        println!("{} Batch recovered from {:?} text", "ℹ".bright_blue(), found.source);
    }
    for rejected in &found.rejected {
        eprintln!("  {} skipped: {}", "✗".red(), rejected.to_string().red());
    }

    let mut store = DocumentStore::new(document);
    let report = store.apply(&found.batch);

    println!(
        "{} {} applied, {} no-op{}",
        "✓".green(),
        report.applied,
        report.noops,
        if report.replaced { ", document replaced" } else { "" }
    );
    if report.short_circuited > 0 {
        println!(
            "{} {} command(s) after the replacement were ignored",
            "⚠️".yellow(),
            report.short_circuited
        );
    }
    if let Some(explanation) = &found.batch.explanation {
        println!("  {}", explanation.dimmed());
    }

    if args.dry_run {
        println!("{}", store.document().to_json_pretty()?);
    } else if store.version() > 0 {
        save_page(&page_path, store.document())?;
        println!("  Wrote {}", page_path.display());
    } else {
        println!("  No changes");
    }

    Ok(())
}
