mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, compile, new, preview, prompt, ApplyArgs, CompileArgs, NewArgs, PreviewArgs, PromptArgs};
use tracing_subscriber::filter::LevelFilter;

/// Pagekit CLI - landing pages as patchable documents
#[derive(Parser, Debug)]
#[command(name = "pagekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a page document from a template
    New(NewArgs),

    /// Apply a patch batch to a page document
    Apply(ApplyArgs),

    /// Compile page documents to static HTML
    Compile(CompileArgs),

    /// Print the interactive section outline of a page
    Preview(PreviewArgs),

    /// Print the generation request for a change to a page
    Prompt(PromptArgs),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::New(args) => new(args, &cwd),
            Command::Apply(args) => apply(args, &cwd),
            Command::Compile(args) => compile(args, &cwd),
            Command::Preview(args) => preview(args, &cwd),
            Command::Prompt(args) => prompt(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
