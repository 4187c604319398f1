//! Prompt assembly for the generation and copywriting calls.

use chrono::{DateTime, Utc};
use pagekit_document::Document;
use pagekit_registry::SectionRegistry;
use std::collections::BTreeMap;
use std::fmt::Write;

pub const COPYWRITING_SYSTEM_PROMPT: &str = "You are a conversion copywriter. Given a request for a \
landing page change and the current page, write short notes: a headline, a subheadline, three \
benefit statements and a call to action. Plain text only, no JSON.";

const WIRE_FORMAT: &str = r#"Respond with a single JSON object and nothing else:
{
  "ast_actions": [
    {"action": "add_section", "section_type": "Hero", "props": {...}, "index": 0},
    {"action": "update_section", "section_id": "...", "props": {...}, "styles": {...}},
    {"action": "delete_section", "section_id": "..."},
    {"action": "move_section", "section_id": "...", "direction": "up"},
    {"action": "update_metadata", "metadata": {"title": "...", "theme": "dark"}}
  ],
  "explanation": "one sentence describing the change"
}
Props set to null are removed. To start over, send {"sections": [...], "meta": {...}} instead.
If the request is a question rather than a change, answer in plain prose."#;

/// Extra material folded into the system prompt
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    /// Image label to URL, from the image search step
    pub images: BTreeMap<String, String>,
    /// Output of the copywriting step
    pub copy_notes: Option<String>,
    pub now: Option<DateTime<Utc>>,
}

/// Build the system prompt for the main generation call
pub fn system_prompt(
    document: &Document,
    registry: &SectionRegistry,
    context: &PromptContext,
) -> Result<String, serde_json::Error> {
    let page = serde_json::to_string_pretty(document)?;
    let mut prompt = String::new();

    prompt.push_str("You edit a marketing landing page described as a JSON document.\n");
    if let Some(now) = context.now {
        let _ = writeln!(prompt, "Current date: {}.", now.format("%Y-%m-%d"));
    }

    prompt.push_str("\n## Section types\n");
    prompt.push_str(&registry.catalog());
    prompt.push_str("\n\n## Current page\n");
    prompt.push_str(&page);
    prompt.push_str("\n\n## Output\n");
    prompt.push_str(WIRE_FORMAT);

    if !context.images.is_empty() {
        prompt.push_str("\n\n## Images\nUse these URLs where an image fits:\n");
        for (label, url) in &context.images {
            let _ = writeln!(prompt, "- {}: {}", label, url);
        }
    }

    if let Some(notes) = context.copy_notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        prompt.push_str("\n\n## Copy notes\n");
        prompt.push_str(notes);
        prompt.push('\n');
    }

    Ok(prompt)
}

/// User message for the copywriting call
pub fn copywriting_message(document: &Document, message: &str) -> String {
    let sections: Vec<&str> = document.sections.iter().map(|s| s.kind.as_str()).collect();
    format!(
        "Page title: {}\nSections: {}\nRequest: {}",
        document.metadata.title,
        if sections.is_empty() { "(none)".to_string() } else { sections.join(", ") },
        message
    )
}
