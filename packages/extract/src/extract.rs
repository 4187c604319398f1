//! # Batch Extraction
//!
//! Recover a [`PatchBatch`] from free text. Tried in order, first hit wins:
//!
//! 1. the whole trimmed text
//! 2. each fenced code block (```` ``` ```` with an optional language tag)
//! 3. balanced `{...}` spans found by a depth scan that skips string literals
//!
//! A candidate counts only if it parses as a JSON object carrying at least one
//! batch-shape key. Text is never evaluated.

use pagekit_editor::{CommandError, PatchBatch};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+-]*[^\S\n]*\n?([\s\S]*?)```").expect("valid fence pattern"));

/// Bare substrings that suggest the text was meant to carry a batch
pub const HEURISTIC_TOKENS: &[&str] = &[
    "ast_actions",
    "add_section",
    "update_section",
    "delete_section",
    "remove_section",
    "move_section",
    "update_metadata",
    "replace_document",
    "section_type",
    "section_id",
    "\"sections\"",
    "\"slides\"",
];

/// Where in the text the batch was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Whole,
    Fence,
    Scan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Found {
    pub batch: PatchBatch,
    pub rejected: Vec<CommandError>,
    pub source: Source,
}

/// Run steps 1–3 on `text`
pub fn find_batch(text: &str) -> Option<Found> {
    let text = text.trim();

    if let Some(found) = candidate(text, Source::Whole) {
        return Some(found);
    }

    for block in fenced_blocks(text) {
        if let Some(found) = candidate(block.trim(), Source::Fence) {
            return Some(found);
        }
    }

    balanced_objects(text).find_map(|span| candidate(span, Source::Scan))
}

/// Batch found in `text`, dropping malformed commands
pub fn extract_batch(text: &str) -> Option<PatchBatch> {
    find_batch(text).map(|found| found.batch)
}

/// Whether `text` mentions batch fields without containing a usable batch
pub fn looks_like_batch(text: &str) -> bool {
    HEURISTIC_TOKENS.iter().any(|token| text.contains(token))
}

fn candidate(text: &str, source: Source) -> Option<Found> {
    if !text.starts_with('{') {
        return None;
    }
    let value: Value = serde_json::from_str(text).ok()?;
    let (batch, rejected) = PatchBatch::decode(&value)?;
    tracing::debug!(?source, commands = batch.commands.len(), "batch found");
    Some(Found {
        batch,
        rejected,
        source,
    })
}

/// Contents of every fenced code block, in order
pub fn fenced_blocks(text: &str) -> Vec<&str> {
    FENCE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Every balanced `{...}` span, ordered by start position. Braces inside
/// JSON string literals do not count; quotes outside any brace are prose.
/// One pass over the text, matching each `}` to the innermost open `{`.
pub fn balanced_objects(text: &str) -> impl Iterator<Item = &str> {
    let mut spans = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (index, byte) in text.bytes().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' if !open.is_empty() => in_string = true,
            b'{' => open.push(index),
            b'}' => {
                if let Some(start) = open.pop() {
                    spans.push((start, index));
                }
            }
            _ => {}
        }
    }

    spans.sort_unstable();
    spans.into_iter().map(move |(start, end)| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"ast_actions":[{"action":"add_section","section_type":"Hero","props":{"title":"Hi {there}"}}],"explanation":"Added a hero"}"#;

    #[test]
    fn test_whole_text() {
        let found = find_batch(&format!("  {}\n", PAYLOAD)).unwrap();
        assert_eq!(found.source, Source::Whole);
        assert_eq!(found.batch.commands.len(), 1);
    }

    #[test]
    fn test_fenced_block() {
        let text = format!("Here you go:\n```json\n{}\n```\nEnjoy!", PAYLOAD);
        let found = find_batch(&text).unwrap();
        assert_eq!(found.source, Source::Fence);
        assert_eq!(found.batch, extract_batch(PAYLOAD).unwrap());
    }

    #[test]
    fn test_prose_wrapped() {
        let text = format!("Sure! I {{think}} this works: {} Let me know.", PAYLOAD);
        let found = find_batch(&text).unwrap();
        assert_eq!(found.source, Source::Scan);
        assert_eq!(found.batch, extract_batch(PAYLOAD).unwrap());
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let text = r#"{"a": "}"} then {"ast_actions": [], "explanation": "use } and \" carefully"}"#;
        let spans: Vec<_> = balanced_objects(text).collect();
        assert_eq!(spans[0], r#"{"a": "}"}"#);
        assert!(find_batch(text).is_some());
    }

    #[test]
    fn test_unbalanced_yields_nothing() {
        assert!(find_batch(r#"{"ast_actions": [ "#).is_none());
        assert_eq!(balanced_objects("{{}").collect::<Vec<_>>(), vec!["{}"]);
    }

    #[test]
    fn test_non_batch_json_is_not_a_batch() {
        assert!(find_batch(r#"{"explanation": "only words"}"#).is_none());
        assert!(find_batch(r#"["ast_actions"]"#).is_none());
    }

    #[test]
    fn test_many_open_braces_scan_once() {
        let text = "{".repeat(40_000);
        assert_eq!(balanced_objects(&text).count(), 0);
        assert!(find_batch(&text).is_none());

        let pairs = "{}".repeat(20_000);
        assert_eq!(balanced_objects(&pairs).count(), 20_000);
    }

    #[test]
    fn test_nested_spans_start_with_the_outer_object() {
        let spans: Vec<_> = balanced_objects(r#"x {"a": {"b": 1}} y"#).collect();
        assert_eq!(spans, vec![r#"{"a": {"b": 1}}"#, r#"{"b": 1}"#]);
    }

    #[test]
    fn test_heuristics() {
        assert!(looks_like_batch(r#"{ast_actions: [ {action: add_section} ]}"#));
        assert!(!looks_like_batch("I added a hero section for you."));
    }

    #[test]
    fn test_fence_without_language() {
        let blocks = fenced_blocks("a\n```\n{\"x\":1}\n```\nb ```json {\"y\":2}```");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].trim(), "{\"x\":1}");
        assert_eq!(blocks[1].trim(), "{\"y\":2}");
    }
}
