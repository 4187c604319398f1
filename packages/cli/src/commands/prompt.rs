use crate::commands::load_page;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use pagekit_extract::{ChatMessage, GenerateRequest};
use pagekit_registry::SectionRegistry;
use pagekit_workspace::{system_prompt, PromptContext};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Args)]
pub struct PromptArgs {
    /// Page document the request is about
    pub page: String,

    /// What to change
    pub message: String,

    /// Image to offer the generator, as `label=url` (repeatable)
    #[arg(long = "image", value_name = "LABEL=URL")]
    pub images: Vec<String>,

    /// Copywriting notes to fold into the prompt
    #[arg(long)]
    pub notes: Option<String>,
}

/// Print the generation request for a page as JSON, using the `generation`
/// settings from the config. The reply can be fed back through `apply`.
pub fn prompt(args: PromptArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = load_page(&cwd.join(&args.page))?;
    let request = build_request(&config, &document, &args)?;

    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

fn build_request(
    config: &Config,
    document: &pagekit_document::Document,
    args: &PromptArgs,
) -> Result<GenerateRequest> {
    let context = PromptContext {
        images: parse_images(&args.images)?,
        copy_notes: args.notes.clone(),
        now: None,
    };
    let system = system_prompt(document, &SectionRegistry::new(), &context)?;

    Ok(config
        .generation
        .request(system, vec![ChatMessage::user(args.message.as_str())]))
}

fn parse_images(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((label, url)) if !label.trim().is_empty() && !url.trim().is_empty() => {
                Ok((label.trim().to_string(), url.trim().to_string()))
            }
            _ => Err(anyhow!("Expected LABEL=URL, got `{}`", pair)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagekit_document::{Document, Metadata, Section, SectionKind};

    #[test]
    fn test_request_uses_generation_settings() {
        let config: Config = serde_json::from_str(
            r#"{ "generation": { "model": "large", "maxTokens": 1024, "temperature": 0.3 } }"#,
        )
        .unwrap();
        let document = Document::new("d", Metadata::default()).with_section(Section::new("hero-1", SectionKind::Hero));
        let args = PromptArgs {
            page: "home.page.json".into(),
            message: "add pricing".into(),
            images: vec!["hero=https://img.example/1.jpg".into()],
            notes: Some("Headline: Ship faster".into()),
        };

        let request = build_request(&config, &document, &args).unwrap();

        assert_eq!(request.model, "large");
        assert_eq!(request.max_tokens, 1024);
        assert_eq!(request.temperature, 0.3);
        assert_eq!(request.history[0].content, "add pricing");
        assert!(request.system_prompt.contains("hero-1"));
        assert!(request.system_prompt.contains("- hero: https://img.example/1.jpg"));
        assert!(request.system_prompt.contains("Headline: Ship faster"));
    }

    #[test]
    fn test_bad_image_pair_is_rejected() {
        assert!(parse_images(&["no-equals".to_string()]).is_err());
        assert!(parse_images(&["=https://x".to_string()]).is_err());
        assert_eq!(parse_images(&[]).unwrap().len(), 0);
    }
}
