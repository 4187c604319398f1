use crate::commands::{save_page, PAGE_SUFFIX};
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagekit_document::{Template, Theme};
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Page name; writes <name>.page.json
    pub name: String,

    /// Starter template (blank, startup, product)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Page title (defaults to the name)
    #[arg(long)]
    pub title: Option<String>,

    /// Theme (dark, light)
    #[arg(long)]
    pub theme: Option<String>,

    /// Also write a default pagekit.config.json
    #[arg(long)]
    pub init_config: bool,

    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn new(args: NewArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let page_path = cwd.join(format!("{}{}", args.name, PAGE_SUFFIX));

    if page_path.exists() && !args.force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            page_path.display()
        ));
    }

    let template_name = args.template.as_deref().unwrap_or(&config.default_template);
    let template = Template::from_name(template_name)?;
    let title = args.title.clone().unwrap_or_else(|| args.name.clone());

    let mut document = template.build(&title);
    document.metadata.theme = Theme::from_name(args.theme.as_deref().unwrap_or(&config.default_theme));

    save_page(&page_path, &document)?;
    println!(
        "{} Created {} ({} template, {} sections)",
        "✓".green(),
        page_path.display().to_string().bright_white(),
        template.name(),
        document.sections.len()
    );

    if args.init_config {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);
        if config_path.exists() && !args.force {
            println!(
                "{} {} already exists",
                "⚠️".yellow(),
                DEFAULT_CONFIG_NAME.bright_white()
            );
        } else {
            fs::write(&config_path, serde_json::to_string_pretty(&Config::default())? + "\n")?;
            println!("{} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
        }
    }

    Ok(())
}
