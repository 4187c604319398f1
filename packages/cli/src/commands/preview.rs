use crate::commands::load_page;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagekit_renderer::{render, RenderState, VNode, EMPTY_STATE_TITLE};
use std::path::Path;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Page document to preview
    pub page: String,

    /// Highlight the section with this id
    #[arg(short, long)]
    pub select: Option<String>,

    /// Print the interactive tree as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn preview(args: PreviewArgs, cwd: &Path) -> Result<()> {
    let document = load_page(&cwd.join(&args.page))?;
    let state = RenderState {
        selected: args.select.clone(),
    };
    let vdom = render(&document, &state);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&vdom)?);
        return Ok(());
    }

    println!(
        "{} {} ({} theme)",
        "📄".bright_blue(),
        document.metadata.title.bold(),
        document.metadata.theme.as_str()
    );

    let regions = vdom.regions();
    if regions.is_empty() {
        println!("   {}", EMPTY_STATE_TITLE.dimmed());
        return Ok(());
    }

    for region in regions {
        println!("{}", describe(region));
    }

    Ok(())
}

/// One outline line for a region
fn describe(region: &VNode) -> String {
    let index = region.attr("data-index").unwrap_or("?");
    let id = region.attr("data-section-id").unwrap_or_default();
    let kind = region.attr("data-section-type").unwrap_or("unknown");
    let marker = if region.has_class("pk-region--selected") {
        "▶".green().to_string()
    } else {
        " ".to_string()
    };

    let heading = region
        .find(&|n| matches!(n.tag(), Some("h1" | "h2" | "h3")))
        .map(|n| n.text_content())
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_default();

    let mut disabled = Vec::new();
    let mut buttons = Vec::new();
    region.find_all(&|n| n.has_class("pk-control"), &mut buttons);
    for button in buttons {
        if button.attr("disabled").is_some() {
            disabled.push(button.attr("data-action").unwrap_or_default());
        }
    }

    let mut line = format!(
        "{} {:>2}. {:<13} {}",
        marker,
        index,
        kind.bright_white(),
        id.dimmed()
    );
    if !heading.is_empty() {
        line.push_str(&format!("  \"{}\"", heading.trim()));
    }
    if !disabled.is_empty() {
        line.push_str(&format!("  {}", format!("[{} disabled]", disabled.join(", ")).dimmed()));
    }
    line
}
