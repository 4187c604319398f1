use crate::sections::render_section;
use crate::vdom::VNode;
use pagekit_document::{Section, SectionKind};
use serde_json::json;

fn by_class<'a>(node: &'a VNode, class: &str) -> Option<&'a VNode> {
    node.find(&|n| n.has_class(class))
}

fn count_class(node: &VNode, class: &str) -> usize {
    let mut out = Vec::new();
    node.find_all(&|n| n.has_class(class), &mut out);
    out.len()
}

#[test]
fn test_section_root_attributes() {
    let section = Section::new("hero-1", SectionKind::Hero).with_style("padding", "6rem 0");
    let node = render_section(&section);

    assert_eq!(node.tag(), Some("section"));
    assert_eq!(node.attr("id"), Some("hero-1"));
    assert!(node.has_class("pk-section"));
    assert!(node.has_class("pk-hero"));
    assert_eq!(node.attr("data-section-type"), Some("hero"));
    assert_eq!(node.attr("style"), Some("padding: 6rem 0"));
}

#[test]
fn test_hero_secondary_only_when_given() {
    let bare = render_section(&Section::new("h", SectionKind::Hero));
    assert!(by_class(&bare, "pk-button-secondary").is_none());
    assert!(by_class(&bare, "pk-orbs").is_some());

    let full = render_section(
        &Section::new("h", SectionKind::Hero)
            .with_prop("secondaryCtaText", json!("Learn more"))
            .with_prop("backgroundImage", json!("https://img.example/bg.jpg")),
    );
    let secondary = by_class(&full, "pk-button-secondary").expect("secondary button");
    assert_eq!(secondary.text_content(), "Learn more");
    assert!(full.has_class("pk-hero--image"));
    assert!(by_class(&full, "pk-hero-overlay").is_some());
    assert!(by_class(&full, "pk-orbs").is_none());
}

#[test]
fn test_hero_fields_are_tagged() {
    let node = render_section(&Section::new("h", SectionKind::Hero).with_prop("title", json!("Ship it")));
    let title = node
        .find(&|n| n.attr("data-field") == Some("title"))
        .expect("title field");
    assert_eq!(title.tag(), Some("h1"));
    assert_eq!(title.text_content(), "Ship it");
}

#[test]
fn test_features_render_glyphs() {
    let node = render_section(&Section::new("f", SectionKind::Features).with_prop(
        "items",
        json!([
            { "icon": "rocket", "title": "Launch" },
            { "icon": "no-such-icon", "title": "Mystery" }
        ]),
    ));
    assert_eq!(count_class(&node, "pk-feature"), 2);

    let mut icons = Vec::new();
    node.find_all(&|n| n.has_class("pk-icon"), &mut icons);
    assert_eq!(icons[0].attr("data-glyph"), Some("rocket"));
    assert_eq!(icons[1].attr("data-glyph"), Some("circle"));
    assert!(icons[0].find(&|n| n.tag() == Some("path")).is_some());
}

#[test]
fn test_pricing_highlight() {
    let node = render_section(&Section::new("p", SectionKind::Pricing));
    assert_eq!(count_class(&node, "pk-plan"), 3);
    assert_eq!(count_class(&node, "pk-plan--highlighted"), 1);
    let highlighted = by_class(&node, "pk-plan--highlighted").unwrap();
    assert!(by_class(highlighted, "pk-button-primary").is_some());
}

#[test]
fn test_testimonial_initials_without_avatar() {
    let node = render_section(&Section::new("t", SectionKind::Testimonials).with_prop(
        "items",
        json!([{ "quote": "Great", "author": "Grace Hopper" }]),
    ));
    let initials = by_class(&node, "pk-initials").expect("initials");
    assert_eq!(initials.text_content(), "GH");
    assert!(by_class(&node, "pk-role").is_none());
}

#[test]
fn test_stats_title_optional() {
    let node = render_section(&Section::new("s", SectionKind::Stats));
    assert!(node.find(&|n| n.tag() == Some("h2")).is_none());
    assert_eq!(count_class(&node, "pk-stat"), 3);
}

#[test]
fn test_content_paragraphs_and_alignment() {
    let node = render_section(
        &Section::new("c", SectionKind::Content)
            .with_prop("body", json!("First\n\nSecond"))
            .with_prop("align", json!("center")),
    );
    assert!(by_class(&node, "pk-align-center").is_some());
    let mut paragraphs = Vec::new();
    node.find_all(&|n| n.tag() == Some("p"), &mut paragraphs);
    assert_eq!(paragraphs.len(), 2);
}

#[test]
fn test_footer_defaults() {
    let node = render_section(&Section::new("f", SectionKind::Footer));
    assert_eq!(count_class(&node, "pk-footer-link"), 2);
    assert_eq!(
        by_class(&node, "pk-copyright").unwrap().text_content(),
        "All rights reserved."
    );
}

#[test]
fn test_unknown_kind_renders_placeholder() {
    let section = Section::new("x", SectionKind::Unknown("carousel".into()));
    let node = render_section(&section);
    assert!(node.has_class("pk-placeholder"));
    assert!(node.text_content().contains("carousel"));
}

#[test]
fn test_links_are_sanitised() {
    let node = render_section(&Section::new("n", SectionKind::Navbar).with_prop(
        "links",
        json!([{ "label": "Bad", "href": "javascript:alert(1)" }]),
    ));
    let link = by_class(&node, "pk-nav-link").unwrap();
    assert_eq!(link.attr("href"), Some("#"));
}
