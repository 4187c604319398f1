//! # Patch Engine
//!
//! `apply(document, batch) -> document'`. Commands run in order against a
//! copy of the input; the input is never touched.
//!
//! ## Command semantics
//!
//! ### AddSection
//! - Missing type falls back to [`SectionKind::DEFAULT`]
//! - Missing or colliding id gets a fresh one
//! - `0 <= index <= len` inserts there, anything else appends
//! - Props are stored as given, `null` values included
//!
//! ### UpdateSection / DeleteSection / MoveSection
//! - Unknown id is a no-op
//! - Move swaps with the neighbour and is clamped at both ends
//!
//! ### UpdateMetadata
//! - Shallow merge; `null` clears optional fields, title is never cleared
//!
//! ### ReplaceDocument
//! - Becomes the new state; the rest of the batch is dropped

use crate::commands::{Direction, PatchBatch, PatchCommand};
use pagekit_document::document::styles_from_map;
use pagekit_document::id_generator;
use pagekit_document::{Document, Props, SectionKind, Section, Theme};
use serde_json::{Map, Value};

/// What happened while applying a batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Commands that changed or targeted an existing section
    pub applied: usize,
    /// Commands that targeted an unknown id or could not move
    pub noops: usize,
    /// Commands dropped after a ReplaceDocument
    pub short_circuited: usize,
    /// Whether a ReplaceDocument ran
    pub replaced: bool,
}

enum Outcome {
    Applied,
    NoOp,
    Replaced(Document),
}

/// Apply a batch, returning the next document
pub fn apply(document: &Document, batch: &PatchBatch) -> Document {
    apply_with_report(document, batch).0
}

/// Apply a batch, returning the next document and a summary
pub fn apply_with_report(document: &Document, batch: &PatchBatch) -> (Document, ApplyReport) {
    let mut next = document.clone();
    let mut report = ApplyReport::default();

    for (position, command) in batch.commands.iter().enumerate() {
        match apply_command(&mut next, command) {
            Outcome::Applied => {
                tracing::debug!(command = command.name(), "applied");
                report.applied += 1;
            }
            Outcome::NoOp => {
                tracing::debug!(command = command.name(), "no-op");
                report.noops += 1;
            }
            Outcome::Replaced(document) => {
                report.applied += 1;
                report.replaced = true;
                report.short_circuited = batch.commands.len() - position - 1;
                if report.short_circuited > 0 {
                    tracing::debug!(
                        dropped = report.short_circuited,
                        "replace_document short-circuited the batch"
                    );
                }
                return (document, report);
            }
        }
    }

    (next, report)
}

fn apply_command(doc: &mut Document, command: &PatchCommand) -> Outcome {
    match command {
        PatchCommand::AddSection {
            section_type,
            props,
            styles,
            section_id,
            index,
        } => {
            apply_add(doc, section_type.as_ref(), props, styles, section_id.as_deref(), *index);
            Outcome::Applied
        }

        PatchCommand::UpdateSection {
            section_id,
            props,
            styles,
        } => apply_update(doc, section_id, props.as_ref(), styles.as_ref()),

        PatchCommand::DeleteSection { section_id } => match doc.position(section_id) {
            Some(position) => {
                doc.sections.remove(position);
                Outcome::Applied
            }
            None => Outcome::NoOp,
        },

        PatchCommand::MoveSection {
            section_id,
            direction,
        } => apply_move(doc, section_id, *direction),

        PatchCommand::UpdateMetadata { metadata } => {
            apply_metadata(doc, metadata);
            Outcome::Applied
        }

        PatchCommand::ReplaceDocument { document } => Outcome::Replaced(document.clone().normalize()),
    }
}

fn apply_add(
    doc: &mut Document,
    section_type: Option<&SectionKind>,
    props: &Props,
    styles: &Map<String, Value>,
    section_id: Option<&str>,
    index: Option<i64>,
) {
    let kind = section_type.cloned().unwrap_or(SectionKind::DEFAULT);
    if !kind.is_known() {
        tracing::warn!(section_type = %kind, "adding section of unknown type");
    }

    let id = match section_id {
        Some(id) if !id.trim().is_empty() && !doc.contains(id) => id.to_string(),
        _ => id_generator::unique_section_id(&kind, doc),
    };

    let section = Section {
        id,
        kind,
        props: props.clone(),
        styles: styles_from_map(styles),
    };

    match index {
        Some(i) if i >= 0 && (i as usize) <= doc.sections.len() => doc.sections.insert(i as usize, section),
        _ => doc.sections.push(section),
    }
}

fn apply_update(
    doc: &mut Document,
    section_id: &str,
    props: Option<&Props>,
    styles: Option<&Map<String, Value>>,
) -> Outcome {
    let Some(section) = doc.find_mut(section_id) else {
        return Outcome::NoOp;
    };

    if let Some(props) = props {
        for (key, value) in props {
            if value.is_null() {
                section.props.remove(key);
            } else {
                section.props.insert(key.clone(), value.clone());
            }
        }
    }

    if let Some(styles) = styles {
        for (property, value) in styles {
            if value.is_null() {
                section.styles.remove(property);
            }
        }
        section.styles.extend(styles_from_map(styles));
    }

    Outcome::Applied
}

fn apply_move(doc: &mut Document, section_id: &str, direction: Direction) -> Outcome {
    let Some(position) = doc.position(section_id) else {
        return Outcome::NoOp;
    };

    let target = match direction {
        Direction::Up if position > 0 => position - 1,
        Direction::Down if position + 1 < doc.sections.len() => position + 1,
        _ => return Outcome::NoOp,
    };

    doc.sections.swap(position, target);
    Outcome::Applied
}

fn apply_metadata(doc: &mut Document, partial: &Map<String, Value>) {
    let metadata = &mut doc.metadata;

    for (key, value) in partial {
        let text = match value {
            Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        };

        match key.as_str() {
            "title" => {
                if let Some(title) = text {
                    metadata.title = title;
                }
            }
            "description" => metadata.description = text,
            "theme" => metadata.theme = text.map(|t| Theme::from_name(&t)).unwrap_or_default(),
            "accentColor" | "accent_color" | "accent" => metadata.accent_color = text,
            other => tracing::debug!(key = other, "ignoring unknown metadata key"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagekit_document::Metadata;
    use serde_json::json;

    fn doc_abc() -> Document {
        Document::new("d", Metadata::default())
            .with_section(Section::new("a", SectionKind::Hero))
            .with_section(Section::new("b", SectionKind::Features))
            .with_section(Section::new("c", SectionKind::Footer))
    }

    fn ids(doc: &Document) -> Vec<&str> {
        doc.sections.iter().map(|s| s.id.as_str()).collect()
    }

    fn add(kind: SectionKind, index: Option<i64>) -> PatchCommand {
        PatchCommand::AddSection {
            section_type: Some(kind),
            props: Props::new(),
            styles: Map::new(),
            section_id: None,
            index,
        }
    }

    #[test]
    fn test_input_is_never_mutated() {
        let doc = doc_abc();
        let before = doc.clone();
        let _ = apply(
            &doc,
            &PatchBatch::single(PatchCommand::DeleteSection {
                section_id: "a".into(),
            }),
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn test_add_index_semantics() {
        let doc = doc_abc();

        let next = apply(&doc, &PatchBatch::single(add(SectionKind::Stats, Some(1))));
        assert_eq!(next.sections[0].id, "a");
        assert_eq!(next.sections[1].kind, SectionKind::Stats);
        assert_eq!(&ids(&next)[2..], &["b", "c"]);

        let next = apply(&doc, &PatchBatch::single(add(SectionKind::Stats, Some(3))));
        assert_eq!(next.sections[3].kind, SectionKind::Stats);

        for out_of_range in [Some(4), Some(99), Some(-1), None] {
            let next = apply(&doc, &PatchBatch::single(add(SectionKind::Stats, out_of_range)));
            assert_eq!(&ids(&next)[..3], &["a", "b", "c"]);
            assert_eq!(next.sections[3].kind, SectionKind::Stats);
        }
    }

    #[test]
    fn test_add_without_type_uses_default() {
        let next = apply(
            &Document::new("d", Metadata::default()),
            &PatchBatch::single(PatchCommand::AddSection {
                section_type: None,
                props: Props::new(),
                styles: Map::new(),
                section_id: None,
                index: None,
            }),
        );
        assert_eq!(next.sections[0].kind, SectionKind::Content);
    }

    #[test]
    fn test_add_with_colliding_id_gets_fresh_id() {
        let next = apply(
            &doc_abc(),
            &PatchBatch::single(PatchCommand::AddSection {
                section_type: Some(SectionKind::Hero),
                props: Props::new(),
                styles: Map::new(),
                section_id: Some("a".into()),
                index: None,
            }),
        );
        assert_eq!(next.sections.len(), 4);
        assert_ne!(next.sections[3].id, "a");
    }

    #[test]
    fn test_update_merges_and_removes() {
        let doc = Document::new("d", Metadata::default()).with_section(
            Section::new("a", SectionKind::Hero)
                .with_prop("title", "Old")
                .with_prop("badge", "New")
                .with_style("padding", "1rem"),
        );

        let next = apply(
            &doc,
            &PatchBatch::single(PatchCommand::UpdateSection {
                section_id: "a".into(),
                props: json!({ "title": "Fresh", "badge": null, "subtitle": "Sub" })
                    .as_object()
                    .cloned(),
                styles: json!({ "padding": null, "margin": "2rem" }).as_object().cloned(),
            }),
        );

        let section = &next.sections[0];
        assert_eq!(section.props["title"], "Fresh");
        assert_eq!(section.props["subtitle"], "Sub");
        assert!(!section.props.contains_key("badge"));
        assert!(!section.styles.contains_key("padding"));
        assert_eq!(section.styles.get("margin").map(String::as_str), Some("2rem"));
    }

    #[test]
    fn test_update_missing_id_is_structural_no_op() {
        let doc = doc_abc();
        let (next, report) = apply_with_report(
            &doc,
            &PatchBatch::single(PatchCommand::UpdateSection {
                section_id: "zzz".into(),
                props: json!({ "title": "x" }).as_object().cloned(),
                styles: None,
            }),
        );
        assert_eq!(next, doc);
        assert_eq!(report.noops, 1);
    }

    #[test]
    fn test_move_swaps_and_clamps() {
        let doc = doc_abc();
        let up = |id: &str| {
            PatchBatch::single(PatchCommand::MoveSection {
                section_id: id.into(),
                direction: Direction::Up,
            })
        };
        let down = |id: &str| {
            PatchBatch::single(PatchCommand::MoveSection {
                section_id: id.into(),
                direction: Direction::Down,
            })
        };

        assert_eq!(ids(&apply(&doc, &up("b"))), vec!["b", "a", "c"]);
        assert_eq!(ids(&apply(&doc, &up("a"))), vec!["a", "b", "c"]);
        assert_eq!(ids(&apply(&doc, &down("b"))), vec!["a", "c", "b"]);
        assert_eq!(ids(&apply(&doc, &down("c"))), vec!["a", "b", "c"]);
        assert_eq!(ids(&apply(&doc, &down("missing"))), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_metadata_merge() {
        let doc = doc_abc();
        let next = apply(
            &doc,
            &PatchBatch::single(PatchCommand::UpdateMetadata {
                metadata: json!({
                    "title": "",
                    "description": "Landing",
                    "theme": "light",
                    "accentColor": "#ff0000"
                })
                .as_object()
                .cloned()
                .unwrap(),
            }),
        );
        assert_eq!(next.metadata.title, doc.metadata.title);
        assert_eq!(next.metadata.description.as_deref(), Some("Landing"));
        assert_eq!(next.metadata.theme, Theme::Light);
        assert_eq!(next.metadata.accent_color.as_deref(), Some("#ff0000"));

        let cleared = apply(
            &next,
            &PatchBatch::single(PatchCommand::UpdateMetadata {
                metadata: json!({ "description": null, "theme": null }).as_object().cloned().unwrap(),
            }),
        );
        assert_eq!(cleared.metadata.description, None);
        assert_eq!(cleared.metadata.theme, Theme::Dark);
    }

    #[test]
    fn test_replace_short_circuits() {
        let replacement = Document::new("other", Metadata::default())
            .with_section(Section::new("x", SectionKind::Cta));

        let (next, report) = apply_with_report(
            &doc_abc(),
            &PatchBatch::new(vec![
                PatchCommand::DeleteSection {
                    section_id: "a".into(),
                },
                PatchCommand::ReplaceDocument {
                    document: replacement.clone(),
                },
                add(SectionKind::Stats, None),
            ]),
        );

        assert_eq!(next, replacement);
        assert!(report.replaced);
        assert_eq!(report.short_circuited, 1);
        assert_eq!(report.applied, 2);
    }

    #[test]
    fn test_empty_batch_is_no_op() {
        let doc = doc_abc();
        assert_eq!(apply(&doc, &PatchBatch::default()), doc);
    }
}
