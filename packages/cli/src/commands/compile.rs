use crate::commands::{is_page_file, load_page, page_stem};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagekit_compiler_html::{compile_with_options, CompileOptions};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Page file or directory of *.page.json files
    #[arg(default_value = ".")]
    pub path: String,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Emit compact markup
    #[arg(long)]
    pub compact: bool,

    /// Leave out the inline nav/FAQ script
    #[arg(long)]
    pub no_script: bool,
}

pub fn compile(args: CompileArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = cwd.join(&args.path);

    let pages = if input.is_file() {
        vec![input.clone()]
    } else if input.is_dir() {
        find_page_files(&input)
    } else {
        return Err(anyhow!("Path does not exist: {}", input.display()));
    };

    if pages.is_empty() {
        println!("{}", "⚠️  No .page.json files found".yellow());
        return Ok(());
    }

    if !args.stdout {
        println!("{}", "🔨 Compiling pages...".bright_blue().bold());
    }

    let options = CompileOptions {
        pretty: config.pretty && !args.compact,
        include_script: !args.no_script,
        ..CompileOptions::default()
    };
    let out_dir = match &args.out_dir {
        Some(out) => cwd.join(out),
        None => config.get_out_dir(cwd),
    };

    let mut success_count = 0;
    let mut error_count = 0;

    for page in &pages {
        let relative_path = page.strip_prefix(cwd).unwrap_or(page);
        match compile_file(page, &args, &options, &out_dir) {
            Ok(output_path) => {
                success_count += 1;
                if !args.stdout {
                    println!("  {} {} → {}", "✓".green(), relative_path.display(), output_path);
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    if args.stdout {
        return Ok(());
    }

    println!();
    if error_count == 0 {
        println!("{} Compiled {} pages successfully", "✅".green(), success_count);
        Ok(())
    } else {
        Err(anyhow!("Compiled {} pages, {} errors", success_count, error_count))
    }
}

fn find_page_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_page_file(path))
        .collect();
    files.sort();
    files
}

fn compile_file(path: &Path, args: &CompileArgs, options: &CompileOptions, out_dir: &Path) -> Result<String> {
    let document = load_page(path)?;
    let html = compile_with_options(&document, options.clone());

    if args.stdout {
        println!("{}", html);
        return Ok("stdout".to_string());
    }

    let output_file = out_dir.join(format!("{}.html", page_stem(path)));
    fs::create_dir_all(out_dir)?;
    fs::write(&output_file, html)?;
    tracing::debug!(output = %output_file.display(), "page compiled");

    Ok(output_file.display().to_string())
}
