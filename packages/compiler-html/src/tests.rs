use crate::{compile, compile_with_options, unknown_comment, CompileOptions};
use pagekit_document::{Document, Metadata, Section, SectionKind, Template, Theme};
use pagekit_renderer::{render_section, VNode};
use serde_json::json;

fn page(sections: Vec<Section>) -> Document {
    let mut doc = Document::new("doc", Metadata::default());
    for section in sections {
        doc = doc.with_section(section);
    }
    doc
}

fn body(html: &str) -> &str {
    let start = html.find("<main").expect("main start");
    let end = html.find("</main>").expect("main end");
    &html[start..end]
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Visible text runs of the markup between tags
fn static_texts(html: &str) -> Vec<String> {
    let mut texts = Vec::new();
    let mut current = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                if !current.trim().is_empty() {
                    texts.push(unescape(current.trim()));
                }
                current.clear();
            }
            '>' => in_tag = false,
            c if !in_tag => current.push(c),
            _ => {}
        }
    }
    texts
}

fn interactive_texts(node: &VNode, out: &mut Vec<String>) {
    match node {
        VNode::Text { content } if !content.trim().is_empty() => out.push(content.trim().to_string()),
        VNode::Element { children, .. } => {
            for child in children {
                interactive_texts(child, out);
            }
        }
        _ => {}
    }
}

#[test]
fn test_compile_is_deterministic() {
    let doc = Template::Startup.build("Acme");
    assert_eq!(compile(&doc), compile(&doc));
}

#[test]
fn test_document_shell() {
    let mut doc = page(vec![]);
    doc.metadata.title = "Acme & Co".into();
    doc.metadata.description = Some("Tools".into());
    doc.metadata.theme = Theme::Light;
    let html = compile(&doc);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<html lang=\"en\" data-theme=\"light\">"));
    assert!(html.contains("<title>Acme &amp; Co</title>"));
    assert!(html.contains("<meta name=\"description\" content=\"Tools\">"));
    assert!(html.contains("pk-nav-toggle"));
    assert!(html.contains("<script>"));
    assert!(!html.contains("<link"));
    assert!(!html.contains("src=\"http"));
}

#[test]
fn test_hero_then_footer_in_order() {
    let html = compile(&page(vec![
        Section::new("hero-1", SectionKind::Hero).with_prop("title", json!("Welcome aboard")),
        Section::new("footer-1", SectionKind::Footer).with_prop("copyright", json!("2026 Acme")),
    ]));

    let hero = html.find("Welcome aboard").expect("hero title");
    let footer = html.find("2026 Acme").expect("footer copyright");
    assert!(hero < footer);
    assert!(html.contains("<section id=\"hero-1\" class=\"pk-section pk-hero\" data-section-type=\"hero\">"));
}

#[test]
fn test_text_is_escaped() {
    let html = compile(&page(vec![Section::new("c", SectionKind::Content)
        .with_prop("title", json!("<script>alert('x')</script>"))
        .with_prop("body", json!("Tom & \"Jerry\""))]));

    assert!(!html.contains("<script>alert"));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    assert!(html.contains("Tom &amp; &quot;Jerry&quot;"));
}

#[test]
fn test_unsafe_urls_and_styles_are_dropped() {
    let html = compile(&page(vec![Section::new("h", SectionKind::Hero)
        .with_prop("ctaText", json!("Go"))
        .with_prop("ctaLink", json!("javascript:alert(1)"))
        .with_style("background", "red; } body { display: none")
        .with_style("padding", "2rem")]));
    let main = body(&html);

    assert!(!main.contains("javascript:"));
    assert!(main.contains("style=\"padding: 2rem\""));
    assert!(!main.contains("display: none"));
    assert!(!main.contains("background:"));
}

#[test]
fn test_unknown_type_leaves_comment() {
    let html = compile(&page(vec![
        Section::new("x", SectionKind::Unknown("carousel--x".into())),
        Section::new("f", SectionKind::Footer),
    ]));
    assert!(html.contains("<!-- pagekit: unknown section type \"carouselx\" -->"));
    assert!(html.contains("pk-footer"));
    assert_eq!(unknown_comment("a-->b"), "<!-- pagekit: unknown section type \"a>b\" -->");
}

#[test]
fn test_accent_color() {
    let mut doc = page(vec![]);
    doc.metadata.accent_color = Some("#FF0066".into());
    assert!(compile(&doc).contains(":root { --pk-accent: #ff0066; }"));

    doc.metadata.accent_color = Some("red;}</style>".into());
    assert_eq!(compile(&doc).matches("--pk-accent: ").count(), 1);
}

#[test]
fn test_compact_output() {
    let options = CompileOptions {
        pretty: false,
        include_script: false,
        ..CompileOptions::default()
    };
    let html = compile_with_options(&Template::Product.build("Widget"), options);
    assert!(!html.contains('\n'));
    assert!(!html.contains("<script>"));
    assert!(html.ends_with("</html>"));
}

#[test]
fn test_static_and_interactive_show_same_text() {
    let rich = json!({
        "title": "Title <&>",
        "subtitle": "Sub",
        "badge": "New",
        "ctaText": "Go",
        "secondaryCtaText": "More",
        "backgroundImage": "https://img.example/bg.png",
        "brand": "Brandy",
        "tagline": "Tag",
        "copyright": "(c) Us",
        "body": "First\n\nSecond",
        "image": "https://img.example/i.png",
        "align": "center",
        "links": [{ "label": "Docs", "href": "/docs" }],
        "plans": [{ "name": "Solo", "price": "$5", "features": ["One"], "highlighted": true }],
        "items": [{
            "icon": "rocket", "title": "Item", "description": "Desc",
            "quote": "Quote", "author": "Ann Bee", "role": "CEO",
            "value": "42", "label": "Things", "question": "Why?", "answer": "Because"
        }]
    });
    let rich = rich.as_object().cloned().unwrap_or_default();

    for kind in SectionKind::known() {
        for props in [Default::default(), rich.clone()] {
            let section = Section::new("s", kind.clone()).with_props(props);

            let html = compile_with_options(
                &page(vec![section.clone()]),
                CompileOptions {
                    include_script: false,
                    ..CompileOptions::default()
                },
            );
            let mut interactive = Vec::new();
            interactive_texts(&render_section(&section), &mut interactive);

            assert_eq!(static_texts(body(&html)), interactive, "{}", kind);
        }
    }
}
