//! # Interactive Rendering
//!
//! Document → VNode tree for the live editing canvas.
//!
//! ```text
//! div.pk-canvas
//! ├── div.pk-region[data-section-id]     (one per section, in order)
//! │   ├── div.pk-toolbar                 (move-up, move-down, duplicate, delete)
//! │   └── section.pk-section             (same structure as the static export)
//! └── div.pk-empty-state                 (only when there are no sections)
//! ```

use crate::sections::render_section;
use crate::vdom::{VNode, VirtualDomDocument};
use pagekit_document::style::safe_color;
use pagekit_document::Document;

/// Structural control offered by every region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    MoveUp,
    MoveDown,
    Duplicate,
    Delete,
}

impl Control {
    pub fn all() -> [Control; 4] {
        [Control::MoveUp, Control::MoveDown, Control::Duplicate, Control::Delete]
    }

    /// Value of the button's `data-action` attribute
    pub fn action(&self) -> &'static str {
        match self {
            Control::MoveUp => "move-up",
            Control::MoveDown => "move-down",
            Control::Duplicate => "duplicate",
            Control::Delete => "delete",
        }
    }

    pub fn from_action(action: &str) -> Option<Self> {
        Control::all().into_iter().find(|c| c.action() == action)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Control::MoveUp => "Move up",
            Control::MoveDown => "Move down",
            Control::Duplicate => "Duplicate",
            Control::Delete => "Delete",
        }
    }

    /// Whether the control does nothing for a section at `index` of `len`
    pub fn is_disabled(&self, index: usize, len: usize) -> bool {
        match self {
            Control::MoveUp => index == 0,
            Control::MoveDown => index + 1 >= len,
            Control::Duplicate | Control::Delete => false,
        }
    }

    /// Destructive controls ask for confirmation first
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, Control::Delete)
    }
}

/// View state that is not part of the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    pub selected: Option<String>,
}

impl RenderState {
    pub fn selecting(id: impl Into<String>) -> Self {
        Self {
            selected: Some(id.into()),
        }
    }
}

pub const EMPTY_STATE_TITLE: &str = "This page is empty";
pub const EMPTY_STATE_HINT: &str = "Ask the assistant to add a section, or start from a template.";

/// Render the whole document for the editing canvas
pub fn render(document: &Document, state: &RenderState) -> VirtualDomDocument {
    let mut canvas = VNode::element("div")
        .with_class("pk-canvas")
        .with_attr("data-document-id", document.id.as_str())
        .with_attr("data-theme", document.metadata.theme.as_str());

    if let Some(accent) = document.metadata.accent_color.as_deref().and_then(safe_color) {
        canvas = canvas.with_style("--pk-accent", accent);
    }

    if document.sections.is_empty() {
        canvas = canvas.with_child(empty_state());
    } else {
        let len = document.sections.len();
        canvas = canvas.with_children(document.sections.iter().enumerate().map(|(index, section)| {
            let selected = state.selected.as_deref() == Some(section.id.as_str());
            region(section, index, len, selected)
        }));
    }

    let mut vdom = VirtualDomDocument::new();
    vdom.add_node(canvas);
    vdom
}

fn region(section: &pagekit_document::Section, index: usize, len: usize, selected: bool) -> VNode {
    let mut region = VNode::element("div")
        .with_class("pk-region")
        .with_attr("data-section-id", section.id.as_str())
        .with_attr("data-section-type", section.kind.slug())
        .with_attr("data-index", index.to_string());

    if selected {
        region = region
            .with_class("pk-region--selected")
            .with_attr("aria-selected", "true");
    }

    region
        .with_child(toolbar(index, len))
        .with_child(render_section(section))
}

fn toolbar(index: usize, len: usize) -> VNode {
    VNode::element("div")
        .with_class("pk-toolbar")
        .with_children(Control::all().into_iter().map(|control| {
            let mut button = VNode::element("button")
                .with_class("pk-control")
                .with_attr("type", "button")
                .with_attr("data-action", control.action())
                .with_attr("title", control.label())
                .with_text(control.label());
            if control.is_disabled(index, len) {
                button = button.with_attr("disabled", "disabled");
            }
            if control.needs_confirmation() {
                button = button.with_attr("data-confirm", "Delete this section?");
            }
            button
        }))
}

fn empty_state() -> VNode {
    VNode::element("div")
        .with_class("pk-empty-state")
        .with_child(VNode::element("h2").with_text(EMPTY_STATE_TITLE))
        .with_child(VNode::element("p").with_text(EMPTY_STATE_HINT))
}

/// Result of resolving a click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    /// Click landed inside the region of this section
    Region(String),
    /// Click landed on empty canvas
    Background,
}

/// Resolve a click at `path` (child indices from the root nodes) to the
/// nearest enclosing region. The walk stops at the first region found, so a
/// click never propagates past it.
pub fn hit_test(vdom: &VirtualDomDocument, path: &[usize]) -> Hit {
    let Some((first, rest)) = path.split_first() else {
        return Hit::Background;
    };
    let Some(mut node) = vdom.nodes.get(*first) else {
        return Hit::Background;
    };

    let mut indices = rest.iter();
    loop {
        if let Some(id) = node.attr("data-section-id") {
            return Hit::Region(id.to_string());
        }
        match indices.next().and_then(|i| node.children().get(*i)) {
            Some(child) => node = child,
            None => return Hit::Background,
        }
    }
}
