//! Closed set of section kinds.
//!
//! Tags coming from generated batches are untrusted, so anything outside the
//! closed set is kept as [`SectionKind::Unknown`] instead of failing to decode.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Navbar,
    Hero,
    Features,
    Pricing,
    Testimonials,
    Stats,
    Faq,
    Cta,
    Content,
    Footer,
    /// Tag outside the closed set (kept verbatim for placeholders and logs)
    Unknown(String),
}

impl SectionKind {
    /// Kind used when an AddSection command carries no type
    pub const DEFAULT: SectionKind = SectionKind::Content;

    /// Every known kind, in catalog order
    pub fn known() -> [SectionKind; 10] {
        [
            SectionKind::Navbar,
            SectionKind::Hero,
            SectionKind::Features,
            SectionKind::Pricing,
            SectionKind::Testimonials,
            SectionKind::Stats,
            SectionKind::Faq,
            SectionKind::Cta,
            SectionKind::Content,
            SectionKind::Footer,
        ]
    }

    /// Parse a tag. Case, `-`, `_` and whitespace are ignored.
    pub fn from_tag(tag: &str) -> Self {
        let normalized: String = tag
            .chars()
            .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "navbar" | "nav" | "navigation" | "header" => SectionKind::Navbar,
            "hero" => SectionKind::Hero,
            "features" | "feature" | "featuregrid" => SectionKind::Features,
            "pricing" | "pricingtable" => SectionKind::Pricing,
            "testimonials" | "testimonial" | "reviews" => SectionKind::Testimonials,
            "stats" | "statistics" | "metrics" => SectionKind::Stats,
            "faq" | "faqs" | "questions" => SectionKind::Faq,
            "cta" | "calltoaction" => SectionKind::Cta,
            "content" | "text" | "about" => SectionKind::Content,
            "footer" => SectionKind::Footer,
            _ => SectionKind::Unknown(tag.to_string()),
        }
    }

    /// Canonical wire tag
    pub fn as_str(&self) -> &str {
        match self {
            SectionKind::Navbar => "Navbar",
            SectionKind::Hero => "Hero",
            SectionKind::Features => "Features",
            SectionKind::Pricing => "Pricing",
            SectionKind::Testimonials => "Testimonials",
            SectionKind::Stats => "Stats",
            SectionKind::Faq => "FAQ",
            SectionKind::Cta => "CTA",
            SectionKind::Content => "Content",
            SectionKind::Footer => "Footer",
            SectionKind::Unknown(tag) => tag,
        }
    }

    /// Lowercase marker used in class names and `data-section-type`
    pub fn slug(&self) -> String {
        match self {
            SectionKind::Unknown(_) => "unknown".to_string(),
            known => known.as_str().to_lowercase(),
        }
    }

    /// Human label for catalogs and the editing surface
    pub fn label(&self) -> &str {
        match self {
            SectionKind::Navbar => "Navigation bar",
            SectionKind::Hero => "Hero",
            SectionKind::Features => "Feature grid",
            SectionKind::Pricing => "Pricing table",
            SectionKind::Testimonials => "Testimonials",
            SectionKind::Stats => "Stats strip",
            SectionKind::Faq => "FAQ",
            SectionKind::Cta => "Call to action",
            SectionKind::Content => "Content block",
            SectionKind::Footer => "Footer",
            SectionKind::Unknown(_) => "Unknown section",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SectionKind::Unknown(_))
    }
}

impl Default for SectionKind {
    fn default() -> Self {
        SectionKind::DEFAULT
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SectionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SectionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(SectionKind::from_tag(&tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_normalized() {
        assert_eq!(SectionKind::from_tag("Hero"), SectionKind::Hero);
        assert_eq!(SectionKind::from_tag("call_to_action"), SectionKind::Cta);
        assert_eq!(SectionKind::from_tag("Pricing Table"), SectionKind::Pricing);
        assert_eq!(SectionKind::from_tag("FAQ"), SectionKind::Faq);
    }

    #[test]
    fn test_unknown_tag_is_preserved() {
        let kind = SectionKind::from_tag("Carousel3D");
        assert_eq!(kind, SectionKind::Unknown("Carousel3D".to_string()));
        assert_eq!(kind.as_str(), "Carousel3D");
        assert_eq!(kind.slug(), "unknown");
        assert!(!kind.is_known());
    }

    #[test]
    fn test_canonical_tags_round_trip() {
        for kind in SectionKind::known() {
            assert_eq!(SectionKind::from_tag(kind.as_str()), kind);
        }
    }
}
