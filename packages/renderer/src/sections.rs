//! Per-kind interactive section bodies.
//!
//! Structure and class names match `pagekit-compiler-html` section for
//! section. Text that maps straight onto a top-level prop carries a
//! `data-field` attribute so the editing surface can focus it.

use crate::vdom::VNode;
use pagekit_document::glyph;
use pagekit_document::props::*;
use pagekit_document::style::style_attribute;
use pagekit_document::{Section, SectionView};

/// Render the body of one section
pub fn render_section(section: &Section) -> VNode {
    let view = SectionView::of(&section.kind, &section.props);
    let slug = section.kind.slug();
    let mut root = VNode::element("section")
        .with_attr("id", section.id.as_str())
        .with_class("pk-section")
        .with_class(&format!("pk-{}", slug))
        .with_attr("data-section-type", slug.as_str());

    if let Some(style) = style_attribute(&section.styles) {
        root = root.with_attr("style", style);
    }

    let body = match view {
        SectionView::Navbar(props) => navbar(&props),
        SectionView::Hero(props) => {
            if props.background_image.is_some() {
                root = root.with_class("pk-hero--image");
            }
            hero(&props)
        }
        SectionView::Features(props) => features(&props),
        SectionView::Pricing(props) => pricing(&props),
        SectionView::Testimonials(props) => testimonials(&props),
        SectionView::Stats(props) => stats(&props),
        SectionView::Faq(props) => faq(&props),
        SectionView::Cta(props) => cta(&props),
        SectionView::Content(props) => content(&props),
        SectionView::Footer(props) => footer(&props),
        SectionView::Unknown(tag) => {
            tracing::warn!(section_id = %section.id, section_type = %tag, "unknown section type");
            return placeholder(&tag);
        }
    };

    root.with_children(body)
}

/// Visible block shown in place of a section whose type is not known
pub fn placeholder(tag: &str) -> VNode {
    VNode::element("div")
        .with_class("pk-placeholder")
        .with_child(VNode::element("strong").with_text("Unknown section type"))
        .with_child(VNode::element("code").with_text(tag))
}

fn el(tag: &str, class: &str) -> VNode {
    VNode::element(tag).with_class(class)
}

fn field(node: VNode, key: &str) -> VNode {
    node.with_attr("data-field", key)
}

fn link(class: &str, link: &Link) -> VNode {
    el("a", class)
        .with_attr("href", link.href.as_str())
        .with_text(&link.label)
}

fn button(link_: &Link, primary: bool) -> VNode {
    let class = if primary {
        "pk-button pk-button-primary"
    } else {
        "pk-button pk-button-secondary"
    };
    link(class, link_)
}

fn icon(name: &str) -> VNode {
    let glyph = glyph::resolve(name);
    el("span", "pk-icon")
        .with_attr("data-glyph", glyph.name)
        .with_child(
            VNode::element("svg")
                .with_attr("viewBox", glyph::VIEW_BOX)
                .with_attr("fill", "none")
                .with_attr("stroke", "currentColor")
                .with_attr("stroke-width", "2")
                .with_attr("aria-hidden", "true")
                .with_child(VNode::element("path").with_attr("d", glyph.path)),
        )
}

fn header(title: &str, subtitle: Option<&str>) -> VNode {
    let mut header = el("header", "pk-section-header")
        .with_child(field(el("h2", "pk-title").with_text(title), "title"));
    if let Some(subtitle) = subtitle {
        header = header.with_child(field(el("p", "pk-subtitle").with_text(subtitle), "subtitle"));
    }
    header
}

fn navbar(props: &NavbarProps) -> Vec<VNode> {
    let mut nav = el("nav", "pk-container pk-nav")
        .with_child(field(
            el("a", "pk-brand").with_attr("href", "#").with_text(&props.brand),
            "brand",
        ))
        .with_child(
            el("button", "pk-nav-toggle")
                .with_attr("type", "button")
                .with_attr("aria-label", "Toggle navigation")
                .with_text("☰"),
        )
        .with_child(
            el("ul", "pk-nav-links").with_children(
                props
                    .links
                    .iter()
                    .map(|l| VNode::element("li").with_child(link("pk-nav-link", l))),
            ),
        );
    if let Some(cta) = &props.cta {
        nav = nav.with_child(field(button(cta, true), "ctaText"));
    }
    vec![nav]
}

fn hero(props: &HeroProps) -> Vec<VNode> {
    let decoration = match &props.background_image {
        Some(src) => vec![
            el("img", "pk-hero-bg")
                .with_attr("src", src.as_str())
                .with_attr("alt", ""),
            el("div", "pk-hero-overlay"),
        ],
        None => vec![el("div", "pk-orbs").with_children([
            el("span", "pk-orb pk-orb-1"),
            el("span", "pk-orb pk-orb-2"),
        ])],
    };

    let mut content = el("div", "pk-container pk-hero-content");
    if let Some(badge) = &props.badge {
        content = content.with_child(field(el("span", "pk-badge").with_text(badge), "badge"));
    }

    let mut actions = el("div", "pk-actions").with_child(field(button(&props.primary, true), "ctaText"));
    if let Some(secondary) = &props.secondary {
        actions = actions.with_child(field(button(secondary, false), "secondaryCtaText"));
    }

    content = content
        .with_child(field(el("h1", "pk-title").with_text(&props.title), "title"))
        .with_child(field(el("p", "pk-subtitle").with_text(&props.subtitle), "subtitle"))
        .with_child(actions);

    let mut nodes = decoration;
    nodes.push(content);
    nodes
}

fn features(props: &FeaturesProps) -> Vec<VNode> {
    vec![el("div", "pk-container")
        .with_child(header(&props.title, props.subtitle.as_deref()))
        .with_child(el("div", "pk-grid pk-features-grid").with_children(
            props.items.iter().map(|item| {
                el("div", "pk-card pk-feature")
                    .with_child(icon(&item.icon))
                    .with_child(VNode::element("h3").with_text(&item.title))
                    .with_child(VNode::element("p").with_text(&item.description))
            }),
        ))]
}

fn pricing(props: &PricingProps) -> Vec<VNode> {
    vec![el("div", "pk-container")
        .with_child(header(&props.title, props.subtitle.as_deref()))
        .with_child(el("div", "pk-grid pk-pricing-grid").with_children(
            props.plans.iter().map(|plan| {
                let mut card = el("div", "pk-card pk-plan");
                if plan.highlighted {
                    card = card.with_class("pk-plan--highlighted");
                }
                card.with_child(el("h3", "pk-plan-name").with_text(&plan.name))
                    .with_child(
                        el("div", "pk-plan-price")
                            .with_child(el("span", "pk-price").with_text(&plan.price))
                            .with_child(el("span", "pk-period").with_text(&plan.period)),
                    )
                    .with_child(
                        el("ul", "pk-plan-features").with_children(
                            plan.features
                                .iter()
                                .map(|f| VNode::element("li").with_text(f)),
                        ),
                    )
                    .with_child(button(&plan.cta, plan.highlighted))
            }),
        ))]
}

fn testimonials(props: &TestimonialsProps) -> Vec<VNode> {
    vec![el("div", "pk-container")
        .with_child(header(&props.title, None))
        .with_child(el("div", "pk-grid pk-testimonials-grid").with_children(
            props.items.iter().map(|item| {
                let avatar = match &item.avatar {
                    Some(src) => el("img", "pk-avatar")
                        .with_attr("src", src.as_str())
                        .with_attr("alt", item.author.as_str()),
                    None => el("span", "pk-avatar pk-initials").with_text(&item.initials()),
                };

                let mut who = VNode::element("div")
                    .with_child(VNode::element("strong").with_text(&item.author));
                if let Some(role) = &item.role {
                    who = who.with_child(el("span", "pk-role").with_text(role));
                }

                el("figure", "pk-card pk-testimonial")
                    .with_child(VNode::element("blockquote").with_text(&item.quote))
                    .with_child(el("figcaption", "pk-author").with_child(avatar).with_child(who))
            }),
        ))]
}

fn stats(props: &StatsProps) -> Vec<VNode> {
    let mut container = el("div", "pk-container");
    if let Some(title) = &props.title {
        container = container.with_child(field(el("h2", "pk-title").with_text(title), "title"));
    }
    vec![container.with_child(el("div", "pk-grid pk-stats-grid").with_children(
        props.items.iter().map(|stat| {
            el("div", "pk-stat")
                .with_child(el("span", "pk-stat-value").with_text(&stat.value))
                .with_child(el("span", "pk-stat-label").with_text(&stat.label))
        }),
    ))]
}

fn faq(props: &FaqProps) -> Vec<VNode> {
    vec![el("div", "pk-container")
        .with_child(header(&props.title, None))
        .with_child(el("div", "pk-faq-list").with_children(props.items.iter().map(|item| {
            el("div", "pk-faq-item")
                .with_child(
                    el("button", "pk-faq-question")
                        .with_attr("type", "button")
                        .with_text(&item.question),
                )
                .with_child(el("div", "pk-faq-answer").with_child(VNode::element("p").with_text(&item.answer)))
        })))]
}

fn cta(props: &CtaProps) -> Vec<VNode> {
    let mut boxed = el("div", "pk-container pk-cta-box")
        .with_child(field(el("h2", "pk-title").with_text(&props.title), "title"));
    if let Some(subtitle) = &props.subtitle {
        boxed = boxed.with_child(field(el("p", "pk-subtitle").with_text(subtitle), "subtitle"));
    }

    let mut actions = el("div", "pk-actions").with_child(field(button(&props.primary, true), "ctaText"));
    if let Some(secondary) = &props.secondary {
        actions = actions.with_child(field(button(secondary, false), "secondaryCtaText"));
    }

    vec![boxed.with_child(actions)]
}

fn content(props: &ContentProps) -> Vec<VNode> {
    let mut container = el("div", "pk-container pk-content").with_class(&format!("pk-align-{}", props.align.as_str()));
    if let Some(title) = &props.title {
        container = container.with_child(field(el("h2", "pk-title").with_text(title), "title"));
    }
    container = container.with_children(
        props
            .paragraphs()
            .into_iter()
            .map(|p| field(VNode::element("p").with_text(p), "body")),
    );
    if let Some(src) = &props.image {
        container = container.with_child(
            el("img", "pk-content-image")
                .with_attr("src", src.as_str())
                .with_attr("alt", props.title.as_deref().unwrap_or("")),
        );
    }
    vec![container]
}

fn footer(props: &FooterProps) -> Vec<VNode> {
    let mut brand = VNode::element("div").with_child(field(el("span", "pk-brand").with_text(&props.brand), "brand"));
    if let Some(tagline) = &props.tagline {
        brand = brand.with_child(field(el("p", "pk-tagline").with_text(tagline), "tagline"));
    }

    vec![el("div", "pk-container pk-footer-inner")
        .with_child(brand)
        .with_child(
            el("ul", "pk-footer-links").with_children(
                props
                    .links
                    .iter()
                    .map(|l| VNode::element("li").with_child(link("pk-footer-link", l))),
            ),
        )
        .with_child(field(el("p", "pk-copyright").with_text(&props.copyright), "copyright"))]
}
