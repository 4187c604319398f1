use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual DOM node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
    },

    /// Text node
    Text { content: String },

    /// Comment node
    Comment { content: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        VNode::Comment {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    /// Append to the `class` attribute
    pub fn with_class(mut self, class: &str) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            let entry = attributes.entry("class".to_string()).or_default();
            if !entry.is_empty() {
                entry.push(' ');
            }
            entry.push_str(class);
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    /// Append a text child unless `content` is empty
    pub fn with_text(self, content: &str) -> Self {
        if content.is_empty() {
            self
        } else {
            self.with_child(VNode::text(content))
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            VNode::Text { content } => out.push_str(content),
            VNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            VNode::Comment { .. } => {}
        }
    }

    /// Depth-first search for the first node matching `predicate`
    pub fn find(&self, predicate: &dyn Fn(&VNode) -> bool) -> Option<&VNode> {
        if predicate(self) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(predicate))
    }

    /// Every node (depth-first, pre-order) matching `predicate`
    pub fn find_all<'a>(&'a self, predicate: &dyn Fn(&VNode) -> bool, out: &mut Vec<&'a VNode>) {
        if predicate(self) {
            out.push(self);
        }
        for child in self.children() {
            child.find_all(predicate, out);
        }
    }
}

/// Rendered interactive tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VirtualDomDocument {
    pub nodes: Vec<VNode>,
}

impl VirtualDomDocument {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn add_node(&mut self, node: VNode) {
        self.nodes.push(node);
    }

    /// Region elements in document order
    pub fn regions(&self) -> Vec<&VNode> {
        let mut out = Vec::new();
        for node in &self.nodes {
            node.find_all(&|n| n.attr("data-section-id").is_some(), &mut out);
        }
        out
    }

    /// Region of the section with `id`
    pub fn region(&self, id: &str) -> Option<&VNode> {
        self.regions()
            .into_iter()
            .find(|region| region.attr("data-section-id") == Some(id))
    }

    /// Node at a child-index path starting from the root nodes
    pub fn node_at(&self, path: &[usize]) -> Option<&VNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.nodes.get(*first)?;
        for index in rest {
            node = node.children().get(*index)?;
        }
        Some(node)
    }
}
