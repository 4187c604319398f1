//! # Typed Section Views
//!
//! Section props arrive as an open JSON map. Render paths never read that map
//! directly: they call [`SectionView::of`], which interprets the map for the
//! section's kind and fills every gap with the defaults listed here. The
//! defaults are part of the rendering contract.
//!
//! ## Value rules
//!
//! - Text: strings, numbers and booleans are accepted (stringified). Missing,
//!   null, empty or whitespace-only values count as absent.
//! - Lists: entries that are not objects are dropped (string lists accept
//!   scalars). A missing, non-array or empty list uses the kind's default list.
//! - URLs: passed through [`safe_url`], absent links point at `#`.
//!
//! ## Defaults per kind
//!
//! | Kind | Defaults |
//! |---|---|
//! | Navbar | brand "Brand", links Features/Pricing/FAQ, no action |
//! | Hero | title, subtitle, primary "Get started"; secondary, badge, background image only when given |
//! | Features | title "Features", three items (zap, shield, sparkles) |
//! | Pricing | title "Pricing", plans Starter/Pro/Team, Pro highlighted |
//! | Testimonials | title "What our customers say", two quotes |
//! | Stats | no title, 10k+/99.9%/24/7 |
//! | Faq | title "Frequently asked questions", two questions |
//! | Cta | title "Ready to get started?", primary "Get started" |
//! | Content | body "Tell your story here.", left aligned |
//! | Footer | brand "Brand", Privacy/Terms, "All rights reserved." |

use crate::document::{scalar_to_string, Props};
use crate::kind::SectionKind;
use crate::style::safe_url;
use serde_json::{Map, Value};

/// Non-empty text value for the first key present
pub fn text(props: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        props
            .get(*key)
            .and_then(scalar_to_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

pub fn text_or(props: &Map<String, Value>, keys: &[&str], default: &str) -> String {
    text(props, keys).unwrap_or_else(|| default.to_string())
}

pub fn flag(props: &Map<String, Value>, key: &str) -> bool {
    match props.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        Some(Value::Number(n)) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
        _ => false,
    }
}

/// Object entries of a list prop, `None` when there are none
pub fn objects<'a>(props: &'a Map<String, Value>, key: &str) -> Option<Vec<&'a Map<String, Value>>> {
    let items: Vec<_> = props
        .get(key)?
        .as_array()?
        .iter()
        .filter_map(Value::as_object)
        .collect();
    (!items.is_empty()).then_some(items)
}

/// Scalar entries of a list prop (objects contribute their `text`/`label`)
pub fn strings(props: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items: Vec<_> = props
        .get(key)?
        .as_array()?
        .iter()
        .filter_map(|item| match item {
            Value::Object(map) => text(map, &["text", "label", "title"]),
            other => scalar_to_string(other)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
        .collect();
    (!items.is_empty()).then_some(items)
}

fn url(props: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    text(props, keys).map(|u| safe_url(&u))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: safe_url(href),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            label: text_or(map, &["label", "text", "title", "name"], "Link"),
            href: url(map, &["href", "url", "link"]).unwrap_or_else(|| "#".to_string()),
        }
    }

    /// Action described by a `<prefix>Text` / `<prefix>Link` pair
    fn action(props: &Map<String, Value>, text_key: &str, link_key: &str) -> Option<Self> {
        text(props, &[text_key]).map(|label| Self {
            label,
            href: url(props, &[link_key]).unwrap_or_else(|| "#".to_string()),
        })
    }
}

fn links(props: &Map<String, Value>, key: &str, defaults: &[(&str, &str)]) -> Vec<Link> {
    match objects(props, key) {
        Some(items) => items.into_iter().map(Link::from_map).collect(),
        None => defaults.iter().map(|(l, h)| Link::new(l, h)).collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavbarProps {
    pub brand: String,
    pub links: Vec<Link>,
    pub cta: Option<Link>,
}

impl NavbarProps {
    pub fn from_props(props: &Props) -> Self {
        Self {
            brand: text_or(props, &["brand", "logo", "title"], "Brand"),
            links: links(
                props,
                "links",
                &[("Features", "#features"), ("Pricing", "#pricing"), ("FAQ", "#faq")],
            ),
            cta: Link::action(props, "ctaText", "ctaLink"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeroProps {
    pub title: String,
    pub subtitle: String,
    pub badge: Option<String>,
    pub primary: Link,
    /// Rendered only when `secondaryCtaText` is present
    pub secondary: Option<Link>,
    /// Present: image background with overlay. Absent: decorative orbs.
    pub background_image: Option<String>,
}

impl HeroProps {
    pub fn from_props(props: &Props) -> Self {
        Self {
            title: text_or(props, &["title", "headline"], "Build something people love"),
            subtitle: text_or(
                props,
                &["subtitle", "subheadline", "description"],
                "Launch faster with a page that explains your product in seconds.",
            ),
            badge: text(props, &["badge"]),
            primary: Link::action(props, "ctaText", "ctaLink")
                .unwrap_or_else(|| Link::new("Get started", "#")),
            secondary: Link::action(props, "secondaryCtaText", "secondaryCtaLink"),
            background_image: url(props, &["backgroundImage", "image"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeaturesProps {
    pub title: String,
    pub subtitle: Option<String>,
    pub items: Vec<Feature>,
}

impl FeaturesProps {
    pub fn from_props(props: &Props) -> Self {
        let items = match objects(props, "items").or_else(|| objects(props, "features")) {
            Some(items) => items
                .into_iter()
                .map(|item| Feature {
                    icon: text_or(item, &["icon"], "sparkles"),
                    title: text_or(item, &["title", "name"], "Feature"),
                    description: text_or(item, &["description", "text"], ""),
                })
                .collect(),
            None => vec![
                Feature {
                    icon: "zap".into(),
                    title: "Fast".into(),
                    description: "Pages load instantly on every device.".into(),
                },
                Feature {
                    icon: "shield".into(),
                    title: "Secure".into(),
                    description: "Best-in-class protection for your data.".into(),
                },
                Feature {
                    icon: "sparkles".into(),
                    title: "Delightful".into(),
                    description: "Details your customers will notice.".into(),
                },
            ],
        };

        Self {
            title: text_or(props, &["title"], "Features"),
            subtitle: text(props, &["subtitle", "description"]),
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricingPlan {
    pub name: String,
    pub price: String,
    pub period: String,
    pub features: Vec<String>,
    pub cta: Link,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricingProps {
    pub title: String,
    pub subtitle: Option<String>,
    pub plans: Vec<PricingPlan>,
}

impl PricingProps {
    pub fn from_props(props: &Props) -> Self {
        let plans = match objects(props, "plans").or_else(|| objects(props, "tiers")) {
            Some(items) => items
                .into_iter()
                .map(|plan| PricingPlan {
                    name: text_or(plan, &["name", "title"], "Plan"),
                    price: text_or(plan, &["price"], "$0"),
                    period: text_or(plan, &["period"], "/month"),
                    features: strings(plan, "features").unwrap_or_default(),
                    cta: Link::action(plan, "ctaText", "ctaLink")
                        .unwrap_or_else(|| Link::new("Choose plan", "#")),
                    highlighted: flag(plan, "highlighted") || flag(plan, "popular"),
                })
                .collect(),
            None => default_plans(),
        };

        Self {
            title: text_or(props, &["title"], "Pricing"),
            subtitle: text(props, &["subtitle", "description"]),
            plans,
        }
    }
}

fn default_plans() -> Vec<PricingPlan> {
    let plan = |name: &str, price: &str, features: &[&str], highlighted: bool| PricingPlan {
        name: name.to_string(),
        price: price.to_string(),
        period: "/month".to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        cta: Link::new("Choose plan", "#"),
        highlighted,
    };
    vec![
        plan("Starter", "$0", &["1 project", "Community support"], false),
        plan("Pro", "$29", &["Unlimited projects", "Priority support", "Custom domain"], true),
        plan("Team", "$99", &["Everything in Pro", "Team seats", "SSO"], false),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub role: Option<String>,
    /// Present: avatar image. Absent: initials badge.
    pub avatar: Option<String>,
}

impl Testimonial {
    /// Up to two uppercase initials of the author
    pub fn initials(&self) -> String {
        self.author
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestimonialsProps {
    pub title: String,
    pub items: Vec<Testimonial>,
}

impl TestimonialsProps {
    pub fn from_props(props: &Props) -> Self {
        let items = match objects(props, "items").or_else(|| objects(props, "testimonials")) {
            Some(items) => items
                .into_iter()
                .map(|item| Testimonial {
                    quote: text_or(item, &["quote", "text"], ""),
                    author: text_or(item, &["author", "name"], "Anonymous"),
                    role: text(item, &["role", "title", "company"]),
                    avatar: url(item, &["avatar", "image"]),
                })
                .collect(),
            None => vec![
                Testimonial {
                    quote: "This changed how our team ships.".into(),
                    author: "Alex Morgan".into(),
                    role: Some("Head of Product".into()),
                    avatar: None,
                },
                Testimonial {
                    quote: "Setup took minutes, results were immediate.".into(),
                    author: "Sam Lee".into(),
                    role: Some("Founder".into()),
                    avatar: None,
                },
            ],
        };

        Self {
            title: text_or(props, &["title"], "What our customers say"),
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsProps {
    pub title: Option<String>,
    pub items: Vec<Stat>,
}

impl StatsProps {
    pub fn from_props(props: &Props) -> Self {
        let items = match objects(props, "items").or_else(|| objects(props, "stats")) {
            Some(items) => items
                .into_iter()
                .map(|item| Stat {
                    value: text_or(item, &["value", "number"], "0"),
                    label: text_or(item, &["label", "title"], ""),
                })
                .collect(),
            None => [("10k+", "Users"), ("99.9%", "Uptime"), ("24/7", "Support")]
                .iter()
                .map(|(value, label)| Stat {
                    value: value.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        };

        Self {
            title: text(props, &["title"]),
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaqProps {
    pub title: String,
    pub items: Vec<FaqItem>,
}

impl FaqProps {
    pub fn from_props(props: &Props) -> Self {
        let items = match objects(props, "items").or_else(|| objects(props, "questions")) {
            Some(items) => items
                .into_iter()
                .map(|item| FaqItem {
                    question: text_or(item, &["question", "q", "title"], "Question"),
                    answer: text_or(item, &["answer", "a", "text"], ""),
                })
                .collect(),
            None => vec![
                FaqItem {
                    question: "How do I get started?".into(),
                    answer: "Sign up and follow the onboarding guide.".into(),
                },
                FaqItem {
                    question: "Can I cancel anytime?".into(),
                    answer: "Yes, there are no long-term contracts.".into(),
                },
            ],
        };

        Self {
            title: text_or(props, &["title"], "Frequently asked questions"),
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CtaProps {
    pub title: String,
    pub subtitle: Option<String>,
    pub primary: Link,
    pub secondary: Option<Link>,
}

impl CtaProps {
    pub fn from_props(props: &Props) -> Self {
        Self {
            title: text_or(props, &["title", "headline"], "Ready to get started?"),
            subtitle: text(props, &["subtitle", "description"]),
            primary: Link::action(props, "ctaText", "ctaLink")
                .unwrap_or_else(|| Link::new("Get started", "#")),
            secondary: Link::action(props, "secondaryCtaText", "secondaryCtaLink"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentProps {
    pub title: Option<String>,
    pub body: String,
    pub image: Option<String>,
    pub align: Align,
}

impl ContentProps {
    pub fn from_props(props: &Props) -> Self {
        let align = match text(props, &["align"]).as_deref() {
            Some("center") => Align::Center,
            _ => Align::Left,
        };
        Self {
            title: text(props, &["title", "heading"]),
            body: text_or(props, &["body", "text", "content"], "Tell your story here."),
            image: url(props, &["image"]),
            align,
        }
    }

    /// Body split on blank lines
    pub fn paragraphs(&self) -> Vec<&str> {
        self.body
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterProps {
    pub brand: String,
    pub tagline: Option<String>,
    pub links: Vec<Link>,
    pub copyright: String,
}

impl FooterProps {
    pub fn from_props(props: &Props) -> Self {
        Self {
            brand: text_or(props, &["brand", "logo", "title"], "Brand"),
            tagline: text(props, &["tagline", "description"]),
            links: links(props, "links", &[("Privacy", "#"), ("Terms", "#")]),
            copyright: text_or(props, &["copyright"], "All rights reserved."),
        }
    }
}

/// Props interpreted for their section kind
#[derive(Debug, Clone, PartialEq)]
pub enum SectionView {
    Navbar(NavbarProps),
    Hero(HeroProps),
    Features(FeaturesProps),
    Pricing(PricingProps),
    Testimonials(TestimonialsProps),
    Stats(StatsProps),
    Faq(FaqProps),
    Cta(CtaProps),
    Content(ContentProps),
    Footer(FooterProps),
    Unknown(String),
}

impl SectionView {
    pub fn of(kind: &SectionKind, props: &Props) -> Self {
        match kind {
            SectionKind::Navbar => SectionView::Navbar(NavbarProps::from_props(props)),
            SectionKind::Hero => SectionView::Hero(HeroProps::from_props(props)),
            SectionKind::Features => SectionView::Features(FeaturesProps::from_props(props)),
            SectionKind::Pricing => SectionView::Pricing(PricingProps::from_props(props)),
            SectionKind::Testimonials => SectionView::Testimonials(TestimonialsProps::from_props(props)),
            SectionKind::Stats => SectionView::Stats(StatsProps::from_props(props)),
            SectionKind::Faq => SectionView::Faq(FaqProps::from_props(props)),
            SectionKind::Cta => SectionView::Cta(CtaProps::from_props(props)),
            SectionKind::Content => SectionView::Content(ContentProps::from_props(props)),
            SectionKind::Footer => SectionView::Footer(FooterProps::from_props(props)),
            SectionKind::Unknown(tag) => SectionView::Unknown(tag.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Props {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_hero_defaults() {
        let hero = HeroProps::from_props(&Props::new());
        assert_eq!(hero.title, "Build something people love");
        assert_eq!(hero.primary, Link::new("Get started", "#"));
        assert!(hero.secondary.is_none());
        assert!(hero.background_image.is_none());
    }

    #[test]
    fn test_blank_text_counts_as_absent() {
        let hero = HeroProps::from_props(&props(json!({
            "title": "   ",
            "secondaryCtaText": "",
            "ctaText": 42
        })));
        assert_eq!(hero.title, "Build something people love");
        assert!(hero.secondary.is_none());
        assert_eq!(hero.primary.label, "42");
    }

    #[test]
    fn test_secondary_action_needs_text() {
        let hero = HeroProps::from_props(&props(json!({
            "secondaryCtaText": "Learn more",
        })));
        assert_eq!(hero.secondary, Some(Link::new("Learn more", "#")));
    }

    #[test]
    fn test_empty_list_uses_defaults() {
        let features = FeaturesProps::from_props(&props(json!({ "items": [] })));
        assert_eq!(features.items.len(), 3);

        let features = FeaturesProps::from_props(&props(json!({ "items": [null, "x"] })));
        assert_eq!(features.items.len(), 3);

        let features = FeaturesProps::from_props(&props(json!({
            "items": [{ "title": "One" }]
        })));
        assert_eq!(features.items.len(), 1);
        assert_eq!(features.items[0].icon, "sparkles");
    }

    #[test]
    fn test_pricing_plan_fields() {
        let pricing = PricingProps::from_props(&props(json!({
            "plans": [{ "name": "Solo", "price": 9, "features": ["A", { "text": "B" }, null], "popular": "true" }]
        })));
        let plan = &pricing.plans[0];
        assert_eq!(plan.price, "9");
        assert_eq!(plan.period, "/month");
        assert_eq!(plan.features, vec!["A", "B"]);
        assert!(plan.highlighted);
    }

    #[test]
    fn test_unsafe_links_are_neutralised() {
        let cta = CtaProps::from_props(&props(json!({
            "ctaText": "Go",
            "ctaLink": "javascript:alert(1)"
        })));
        assert_eq!(cta.primary.href, "#");
    }

    #[test]
    fn test_initials() {
        let t = Testimonial {
            quote: String::new(),
            author: "ada lovelace byron".into(),
            role: None,
            avatar: None,
        };
        assert_eq!(t.initials(), "AL");
    }

    #[test]
    fn test_paragraphs() {
        let content = ContentProps::from_props(&props(json!({ "body": "One\n\n\nTwo\n\n " })));
        assert_eq!(content.paragraphs(), vec!["One", "Two"]);
    }
}
