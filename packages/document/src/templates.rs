//! Starter documents.

use crate::document::{Document, Metadata, Section};
use crate::error::DocumentError;
use crate::id_generator;
use crate::kind::SectionKind;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Blank,
    Startup,
    Product,
}

impl Template {
    pub fn all() -> [Template; 3] {
        [Template::Blank, Template::Startup, Template::Product]
    }

    pub fn from_name(name: &str) -> Result<Self, DocumentError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "blank" | "empty" => Ok(Template::Blank),
            "startup" | "saas" => Ok(Template::Startup),
            "product" => Ok(Template::Product),
            _ => Err(DocumentError::UnknownTemplate(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Template::Blank => "blank",
            Template::Startup => "startup",
            Template::Product => "product",
        }
    }

    /// Build a fresh document from this template
    pub fn build(&self, title: &str) -> Document {
        let metadata = Metadata {
            title: title.to_string(),
            ..Metadata::default()
        };
        let mut doc = Document::new(id_generator::document_id(), metadata);

        let section = |kind: SectionKind| Section::new(id_generator::section_id(&kind), kind);

        doc.sections = match self {
            Template::Blank => vec![],
            Template::Startup => vec![
                section(SectionKind::Navbar).with_prop("brand", title),
                section(SectionKind::Hero)
                    .with_prop("title", title)
                    .with_prop("secondaryCtaText", "See pricing")
                    .with_prop("secondaryCtaLink", "#pricing"),
                section(SectionKind::Features),
                section(SectionKind::Pricing),
                section(SectionKind::Faq),
                section(SectionKind::Cta),
                section(SectionKind::Footer).with_prop("brand", title),
            ],
            Template::Product => vec![
                section(SectionKind::Navbar)
                    .with_prop("brand", title)
                    .with_prop("ctaText", "Buy now"),
                section(SectionKind::Hero)
                    .with_prop("title", title)
                    .with_prop("badge", "New")
                    .with_prop("ctaText", "Buy now"),
                section(SectionKind::Stats),
                section(SectionKind::Content).with_prop("title", "Why we built it"),
                section(SectionKind::Testimonials),
                section(SectionKind::Footer)
                    .with_prop("brand", title)
                    .with_prop("links", json!([{ "label": "Contact", "href": "#contact" }])),
            ],
        };

        doc.normalize()
    }
}
