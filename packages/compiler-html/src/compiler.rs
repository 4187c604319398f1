use crate::assets::{BASE_CSS, SCRIPT};
use pagekit_document::glyph;
use pagekit_document::props::*;
use pagekit_document::style::{safe_color, style_attribute};
use pagekit_document::{Document, Section, SectionView};

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Inline the nav/FAQ toggle script
    pub include_script: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            include_script: true,
            indent: "  ".to_string(),
        }
    }
}

type Attrs<'a> = &'a [(&'a str, &'a str)];

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    /// `<tag attrs>` followed by an indent
    fn open(&mut self, tag: &str, attrs: Attrs) {
        self.add_line(&format!("<{}{}>", tag, render_attrs(attrs)));
        self.indent();
    }

    fn close(&mut self, tag: &str) {
        self.dedent();
        self.add_line(&format!("</{}>", tag));
    }

    /// Element holding only (escaped) text
    fn leaf(&mut self, tag: &str, attrs: Attrs, text: &str) {
        self.add_line(&format!("<{}{}>{}</{}>", tag, render_attrs(attrs), escape_html(text), tag));
    }

    fn void(&mut self, tag: &str, attrs: Attrs) {
        self.add_line(&format!("<{}{}>", tag, render_attrs(attrs)));
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

fn render_attrs(attrs: Attrs) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(" {}=\"{}\"", name, escape_html(value)))
        .collect()
}

/// Compile a page document to a self-contained HTML file
pub fn compile(document: &Document) -> String {
    compile_with_options(document, CompileOptions::default())
}

pub fn compile_with_options(document: &Document, options: CompileOptions) -> String {
    let include_script = options.include_script;
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.open(
        "html",
        &[("lang", "en"), ("data-theme", document.metadata.theme.as_str())],
    );

    compile_head(document, &mut ctx);

    ctx.open("body", &[]);
    ctx.open("main", &[("class", "pk-page")]);
    for section in &document.sections {
        write_section(section, &mut ctx);
    }
    ctx.close("main");

    if include_script {
        ctx.open("script", &[]);
        for line in SCRIPT.lines() {
            ctx.add_line(line);
        }
        ctx.close("script");
    }

    ctx.close("body");
    ctx.close("html");

    ctx.get_output()
}

fn compile_head(document: &Document, ctx: &mut Context) {
    ctx.open("head", &[]);

    ctx.void("meta", &[("charset", "UTF-8")]);
    ctx.void(
        "meta",
        &[("name", "viewport"), ("content", "width=device-width, initial-scale=1.0")],
    );
    ctx.leaf("title", &[], &document.metadata.title);
    if let Some(description) = &document.metadata.description {
        ctx.void("meta", &[("name", "description"), ("content", description.as_str())]);
    }

    ctx.open("style", &[]);
    for line in BASE_CSS.lines() {
        ctx.add_line(line);
    }
    if let Some(accent) = document.metadata.accent_color.as_deref().and_then(safe_color) {
        ctx.add_line(&format!(":root {{ --pk-accent: {}; }}", accent));
    }
    ctx.close("style");

    ctx.close("head");
}

/// Markup of a single section, without the page shell
pub fn compile_section(section: &Section, options: CompileOptions) -> String {
    let mut ctx = Context::new(options);
    write_section(section, &mut ctx);
    ctx.get_output()
}

/// Unknown types leave an inert comment
fn write_section(section: &Section, ctx: &mut Context) {
    let view = SectionView::of(&section.kind, &section.props);

    if let SectionView::Unknown(tag) = &view {
        tracing::warn!(section_id = %section.id, section_type = %tag, "unknown section type");
        ctx.add_line(&unknown_comment(tag));
        return;
    }

    let slug = section.kind.slug();
    let mut class = format!("pk-section pk-{}", slug);
    if let SectionView::Hero(hero) = &view {
        if hero.background_image.is_some() {
            class.push_str(" pk-hero--image");
        }
    }
    let style = style_attribute(&section.styles);

    let mut attrs: Vec<(&str, &str)> = vec![
        ("id", section.id.as_str()),
        ("class", class.as_str()),
        ("data-section-type", slug.as_str()),
    ];
    if let Some(style) = &style {
        attrs.push(("style", style.as_str()));
    }

    ctx.open("section", &attrs);
    match &view {
        SectionView::Navbar(props) => navbar(props, ctx),
        SectionView::Hero(props) => hero(props, ctx),
        SectionView::Features(props) => features(props, ctx),
        SectionView::Pricing(props) => pricing(props, ctx),
        SectionView::Testimonials(props) => testimonials(props, ctx),
        SectionView::Stats(props) => stats(props, ctx),
        SectionView::Faq(props) => faq(props, ctx),
        SectionView::Cta(props) => cta(props, ctx),
        SectionView::Content(props) => content(props, ctx),
        SectionView::Footer(props) => footer(props, ctx),
        SectionView::Unknown(_) => {}
    }
    ctx.close("section");
}

/// `<!-- pagekit: unknown section type "x" -->`, with `--` stripped from the tag
pub fn unknown_comment(tag: &str) -> String {
    format!("<!-- pagekit: unknown section type \"{}\" -->", tag.replace("--", ""))
}

fn link(class: &str, link: &Link, ctx: &mut Context) {
    ctx.leaf("a", &[("class", class), ("href", link.href.as_str())], &link.label);
}

fn button(link_: &Link, primary: bool, ctx: &mut Context) {
    let class = if primary {
        "pk-button pk-button-primary"
    } else {
        "pk-button pk-button-secondary"
    };
    link(class, link_, ctx);
}

fn icon(name: &str, ctx: &mut Context) {
    let glyph = glyph::resolve(name);
    ctx.open("span", &[("class", "pk-icon"), ("data-glyph", glyph.name)]);
    ctx.open(
        "svg",
        &[
            ("viewBox", glyph::VIEW_BOX),
            ("fill", "none"),
            ("stroke", "currentColor"),
            ("stroke-width", "2"),
            ("aria-hidden", "true"),
        ],
    );
    ctx.leaf("path", &[("d", glyph.path)], "");
    ctx.close("svg");
    ctx.close("span");
}

fn header(title: &str, subtitle: Option<&str>, ctx: &mut Context) {
    ctx.open("header", &[("class", "pk-section-header")]);
    ctx.leaf("h2", &[("class", "pk-title")], title);
    if let Some(subtitle) = subtitle {
        ctx.leaf("p", &[("class", "pk-subtitle")], subtitle);
    }
    ctx.close("header");
}

fn actions(primary: &Link, secondary: Option<&Link>, ctx: &mut Context) {
    ctx.open("div", &[("class", "pk-actions")]);
    button(primary, true, ctx);
    if let Some(secondary) = secondary {
        button(secondary, false, ctx);
    }
    ctx.close("div");
}

fn navbar(props: &NavbarProps, ctx: &mut Context) {
    ctx.open("nav", &[("class", "pk-container pk-nav")]);
    ctx.leaf("a", &[("class", "pk-brand"), ("href", "#")], &props.brand);
    ctx.leaf(
        "button",
        &[
            ("class", "pk-nav-toggle"),
            ("type", "button"),
            ("aria-label", "Toggle navigation"),
        ],
        "☰",
    );
    ctx.open("ul", &[("class", "pk-nav-links")]);
    for l in &props.links {
        ctx.open("li", &[]);
        link("pk-nav-link", l, ctx);
        ctx.close("li");
    }
    ctx.close("ul");
    if let Some(cta) = &props.cta {
        button(cta, true, ctx);
    }
    ctx.close("nav");
}

fn hero(props: &HeroProps, ctx: &mut Context) {
    match &props.background_image {
        Some(src) => {
            ctx.void("img", &[("class", "pk-hero-bg"), ("src", src.as_str()), ("alt", "")]);
            ctx.leaf("div", &[("class", "pk-hero-overlay")], "");
        }
        None => {
            ctx.open("div", &[("class", "pk-orbs")]);
            ctx.leaf("span", &[("class", "pk-orb pk-orb-1")], "");
            ctx.leaf("span", &[("class", "pk-orb pk-orb-2")], "");
            ctx.close("div");
        }
    }

    ctx.open("div", &[("class", "pk-container pk-hero-content")]);
    if let Some(badge) = &props.badge {
        ctx.leaf("span", &[("class", "pk-badge")], badge);
    }
    ctx.leaf("h1", &[("class", "pk-title")], &props.title);
    ctx.leaf("p", &[("class", "pk-subtitle")], &props.subtitle);
    actions(&props.primary, props.secondary.as_ref(), ctx);
    ctx.close("div");
}

fn features(props: &FeaturesProps, ctx: &mut Context) {
    ctx.open("div", &[("class", "pk-container")]);
    header(&props.title, props.subtitle.as_deref(), ctx);
    ctx.open("div", &[("class", "pk-grid pk-features-grid")]);
    for item in &props.items {
        ctx.open("div", &[("class", "pk-card pk-feature")]);
        icon(&item.icon, ctx);
        ctx.leaf("h3", &[], &item.title);
        ctx.leaf("p", &[], &item.description);
        ctx.close("div");
    }
    ctx.close("div");
    ctx.close("div");
}

fn pricing(props: &PricingProps, ctx: &mut Context) {
    ctx.open("div", &[("class", "pk-container")]);
    header(&props.title, props.subtitle.as_deref(), ctx);
    ctx.open("div", &[("class", "pk-grid pk-pricing-grid")]);
    for plan in &props.plans {
        let class = if plan.highlighted {
            "pk-card pk-plan pk-plan--highlighted"
        } else {
            "pk-card pk-plan"
        };
        ctx.open("div", &[("class", class)]);
        ctx.leaf("h3", &[("class", "pk-plan-name")], &plan.name);
        ctx.open("div", &[("class", "pk-plan-price")]);
        ctx.leaf("span", &[("class", "pk-price")], &plan.price);
        ctx.leaf("span", &[("class", "pk-period")], &plan.period);
        ctx.close("div");
        ctx.open("ul", &[("class", "pk-plan-features")]);
        for feature in &plan.features {
            ctx.leaf("li", &[], feature);
        }
        ctx.close("ul");
        button(&plan.cta, plan.highlighted, ctx);
        ctx.close("div");
    }
    ctx.close("div");
    ctx.close("div");
}

fn testimonials(props: &TestimonialsProps, ctx: &mut Context) {
    ctx.open("div", &[("class", "pk-container")]);
    header(&props.title, None, ctx);
    ctx.open("div", &[("class", "pk-grid pk-testimonials-grid")]);
    for item in &props.items {
        ctx.open("figure", &[("class", "pk-card pk-testimonial")]);
        ctx.leaf("blockquote", &[], &item.quote);
        ctx.open("figcaption", &[("class", "pk-author")]);
        match &item.avatar {
            Some(src) => ctx.void("img", &[("class", "pk-avatar"), ("src", src.as_str()), ("alt", item.author.as_str())]),
            None => ctx.leaf("span", &[("class", "pk-avatar pk-initials")], &item.initials()),
        }
        ctx.open("div", &[]);
        ctx.leaf("strong", &[], &item.author);
        if let Some(role) = &item.role {
            ctx.leaf("span", &[("class", "pk-role")], role);
        }
        ctx.close("div");
        ctx.close("figcaption");
        ctx.close("figure");
    }
    ctx.close("div");
    ctx.close("div");
}

fn stats(props: &StatsProps, ctx: &mut Context) {
    ctx.open("div", &[("class", "pk-container")]);
    if let Some(title) = &props.title {
        ctx.leaf("h2", &[("class", "pk-title")], title);
    }
    ctx.open("div", &[("class", "pk-grid pk-stats-grid")]);
    for stat in &props.items {
        ctx.open("div", &[("class", "pk-stat")]);
        ctx.leaf("span", &[("class", "pk-stat-value")], &stat.value);
        ctx.leaf("span", &[("class", "pk-stat-label")], &stat.label);
        ctx.close("div");
    }
    ctx.close("div");
    ctx.close("div");
}

fn faq(props: &FaqProps, ctx: &mut Context) {
    ctx.open("div", &[("class", "pk-container")]);
    header(&props.title, None, ctx);
    ctx.open("div", &[("class", "pk-faq-list")]);
    for item in &props.items {
        ctx.open("div", &[("class", "pk-faq-item")]);
        ctx.leaf(
            "button",
            &[("class", "pk-faq-question"), ("type", "button")],
            &item.question,
        );
        ctx.open("div", &[("class", "pk-faq-answer")]);
        ctx.leaf("p", &[], &item.answer);
        ctx.close("div");
        ctx.close("div");
    }
    ctx.close("div");
    ctx.close("div");
}

fn cta(props: &CtaProps, ctx: &mut Context) {
    ctx.open("div", &[("class", "pk-container pk-cta-box")]);
    ctx.leaf("h2", &[("class", "pk-title")], &props.title);
    if let Some(subtitle) = &props.subtitle {
        ctx.leaf("p", &[("class", "pk-subtitle")], subtitle);
    }
    actions(&props.primary, props.secondary.as_ref(), ctx);
    ctx.close("div");
}

fn content(props: &ContentProps, ctx: &mut Context) {
    let class = format!("pk-container pk-content pk-align-{}", props.align.as_str());
    ctx.open("div", &[("class", class.as_str())]);
    if let Some(title) = &props.title {
        ctx.leaf("h2", &[("class", "pk-title")], title);
    }
    for paragraph in props.paragraphs() {
        ctx.leaf("p", &[], paragraph);
    }
    if let Some(src) = &props.image {
        ctx.void(
            "img",
            &[
                ("class", "pk-content-image"),
                ("src", src.as_str()),
                ("alt", props.title.as_deref().unwrap_or("")),
            ],
        );
    }
    ctx.close("div");
}

fn footer(props: &FooterProps, ctx: &mut Context) {
    ctx.open("div", &[("class", "pk-container pk-footer-inner")]);
    ctx.open("div", &[]);
    ctx.leaf("span", &[("class", "pk-brand")], &props.brand);
    if let Some(tagline) = &props.tagline {
        ctx.leaf("p", &[("class", "pk-tagline")], tagline);
    }
    ctx.close("div");
    ctx.open("ul", &[("class", "pk-footer-links")]);
    for l in &props.links {
        ctx.open("li", &[]);
        link("pk-footer-link", l, ctx);
        ctx.close("li");
    }
    ctx.close("ul");
    ctx.leaf("p", &[("class", "pk-copyright")], &props.copyright);
    ctx.close("div");
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
