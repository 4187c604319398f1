//! # Section Variant Registry
//!
//! Maps a section type tag to its two render entry points. The lookup is
//! total: tags outside the closed set resolve to a placeholder variant that
//! renders an inert comment statically and a visible block interactively.

use pagekit_compiler_html::{compile_section, CompileOptions};
use pagekit_document::{Props, Section, SectionKind};
use pagekit_renderer::{render_section, VNode};

/// Render entry points for one section kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionVariant {
    kind: SectionKind,
}

impl SectionVariant {
    pub fn new(kind: SectionKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &SectionKind {
        &self.kind
    }

    pub fn label(&self) -> &str {
        self.kind.label()
    }

    /// Whether this variant stands in for an unknown tag
    pub fn is_placeholder(&self) -> bool {
        !self.kind.is_known()
    }

    /// Props the kind reads, as shown to the generator
    pub fn description(&self) -> &'static str {
        match self.kind {
            SectionKind::Navbar => "brand, links[{label, href}], ctaText, ctaLink",
            SectionKind::Hero => {
                "badge, title, subtitle, ctaText, ctaLink, secondaryCtaText, secondaryCtaLink, backgroundImage"
            }
            SectionKind::Features => "title, subtitle, items[{icon, title, description}]",
            SectionKind::Pricing => {
                "title, subtitle, plans[{name, price, period, features[], ctaText, ctaLink, highlighted}]"
            }
            SectionKind::Testimonials => "title, items[{quote, author, role, avatar}]",
            SectionKind::Stats => "title, items[{value, label}]",
            SectionKind::Faq => "title, items[{question, answer}]",
            SectionKind::Cta => "title, subtitle, ctaText, ctaLink, secondaryCtaText, secondaryCtaLink",
            SectionKind::Content => "title, body (blank lines split paragraphs), image, align (left|center)",
            SectionKind::Footer => "brand, tagline, links[{label, href}], copyright",
            SectionKind::Unknown(_) => "",
        }
    }

    fn section(&self, props: &Props) -> Section {
        Section::new(self.kind.slug(), self.kind.clone()).with_props(props.clone())
    }

    /// Static markup for a section of this kind
    pub fn render_static(&self, props: &Props) -> String {
        compile_section(&self.section(props), CompileOptions::default())
    }

    /// Interactive node for a section of this kind
    pub fn render_interactive(&self, props: &Props) -> VNode {
        render_section(&self.section(props))
    }
}

/// Registry of all section variants
pub struct SectionRegistry {
    variants: Vec<SectionVariant>,
}

impl SectionRegistry {
    /// Registry with every known kind, in catalog order
    pub fn new() -> Self {
        Self {
            variants: SectionKind::known().into_iter().map(SectionVariant::new).collect(),
        }
    }

    pub fn variants(&self) -> &[SectionVariant] {
        &self.variants
    }

    /// Variant for `tag`; never fails
    pub fn lookup(&self, tag: &str) -> SectionVariant {
        let kind = SectionKind::from_tag(tag);
        self.variants
            .iter()
            .find(|variant| variant.kind == kind)
            .cloned()
            .unwrap_or_else(|| SectionVariant::new(kind))
    }

    /// One line per variant: `- Hero: badge, title, ...`
    pub fn catalog(&self) -> String {
        self.variants
            .iter()
            .map(|variant| format!("- {}: {}", variant.kind.as_str(), variant.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionRegistry")
            .field("variants", &format!("{} variants", self.variants.len()))
            .finish()
    }
}

/// Look up `tag` in the built-in registry
pub fn lookup(tag: &str) -> SectionVariant {
    SectionRegistry::new().lookup(tag)
}

/// Every built-in variant
pub fn variants() -> Vec<SectionVariant> {
    SectionRegistry::new().variants
}
