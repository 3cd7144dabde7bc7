//! The styled render tree the builder consumes: an already-cascaded,
//! DOM-shaped input. The core never parses markup or style sheets; it
//! only walks children, distinguishes elements from text, and looks up
//! computed property strings (`display` being the one it needs).

use std::collections::HashMap;

/// Identity of a source render node. Zero means "no source node" and is
/// reserved for anonymous boxes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodeId(pub u64);

impl NodeId {
    pub const NONE: NodeId = NodeId(0);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNodeData {
    Element { name: String },
    Text(String),
}

#[derive(Debug, Clone)]
pub struct RenderNode {
    pub id: NodeId,
    pub data: RenderNodeData,
    pub styles: HashMap<String, String>,
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    pub fn element(id: NodeId, name: &str) -> Self {
        Self {
            id,
            data: RenderNodeData::Element { name: name.to_owned() },
            styles: HashMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(id: NodeId, data: &str) -> Self {
        Self {
            id,
            data: RenderNodeData::Text(data.to_owned()),
            styles: HashMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.styles.insert(property.to_owned(), value.to_owned());
        self
    }

    pub fn with_children(mut self, children: Vec<RenderNode>) -> Self {
        debug_assert!(
            !matches!(self.data, RenderNodeData::Text(_)),
            "text nodes have no children"
        );
        self.children = children;
        self
    }

    pub fn children(&self) -> &[RenderNode] {
        &self.children
    }

    /// The computed value for `property`, or the empty string when the
    /// property was never set.
    pub fn computed_style(&self, property: &str) -> &str {
        self.styles.get(property).map_or("", String::as_str)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self.data {
            RenderNodeData::Text(ref data) => Some(data),
            RenderNodeData::Element { .. } => None,
        }
    }
}
