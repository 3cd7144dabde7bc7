pub mod builder;

use crate::error::Error;
use crate::geometry::Rect;
use crate::misc::print_tree::PrintTree;
use crate::render_tree::NodeId;
use crate::style::ComputedStyle;
use crate::text::TextRef;
use std::collections::HashSet;
use std::io;

/// Stable per-box identity, derived from the parent's id and the child's
/// minting order. Unique within a tree; the used-value, geometry and line
/// tables are keyed on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(pub u64);

/// What kind of box this is. `Text` carries the reference into the base
/// text store; text boxes are always leaves.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BoxKind {
    Block,
    Inline,
    Text(TextRef),
    AnonymousBlock,
    AnonymousInline,
    InlineBlock,
}

impl BoxKind {
    /// Whether this box participates in its parent's block flow.
    pub fn is_block_level(&self) -> bool {
        match *self {
            BoxKind::Block | BoxKind::AnonymousBlock | BoxKind::InlineBlock => true,
            BoxKind::Inline | BoxKind::Text(_) | BoxKind::AnonymousInline => false,
        }
    }

    pub fn is_inline_level(&self) -> bool {
        !self.is_block_level()
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(*self, BoxKind::AnonymousBlock | BoxKind::AnonymousInline)
    }

    fn label(&self) -> String {
        match *self {
            BoxKind::Text(ref text) => format!(
                "Text [{}..{})",
                text.range.start, text.range.end
            ),
            ref kind => format!("{:?}", kind),
        }
    }
}

/// The formatting context a box establishes for its children.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormattingContextKind {
    None,
    Block,
    Inline,
}

/// A vertex of the box tree. A node exclusively owns its subtree, and
/// child order is the visual source order.
///
/// `frame` (border box) and `content` (content box) are filled in by the
/// flow pass, mirrored from the geometry table; the table is the source
/// of truth.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub id: BoxId,
    pub node: NodeId,
    pub kind: BoxKind,
    pub fc: FormattingContextKind,
    pub style: Option<ComputedStyle>,
    pub children: Vec<LayoutNode>,
    pub frame: Rect,
    pub content: Rect,
}

impl LayoutNode {
    pub fn new_container(id: BoxId, node: NodeId, kind: BoxKind, children: Vec<LayoutNode>) -> Self {
        debug_assert!(!matches!(kind, BoxKind::Text(_)), "Text boxes are leaves");
        let fc = match kind {
            BoxKind::Block | BoxKind::AnonymousBlock | BoxKind::InlineBlock => {
                match children.as_slice() {
                    [only] if matches!(only.kind, BoxKind::AnonymousInline) => {
                        FormattingContextKind::Inline
                    }
                    _ => FormattingContextKind::Block,
                }
            }
            BoxKind::Inline | BoxKind::AnonymousInline => FormattingContextKind::Inline,
            BoxKind::Text(_) => FormattingContextKind::None,
        };
        Self {
            id,
            node,
            kind,
            fc,
            style: None,
            children,
            frame: Rect::zero(),
            content: Rect::zero(),
        }
    }

    pub fn new_text(id: BoxId, node: NodeId, text: TextRef) -> Self {
        Self {
            id,
            node,
            kind: BoxKind::Text(text),
            fc: FormattingContextKind::None,
            style: None,
            children: Vec::new(),
            frame: Rect::zero(),
            content: Rect::zero(),
        }
    }

    pub fn with_style(mut self, style: ComputedStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn is_block_level(&self) -> bool {
        self.kind.is_block_level()
    }

    pub fn text(&self) -> Option<&TextRef> {
        match self.kind {
            BoxKind::Text(ref text) => Some(text),
            _ => None,
        }
    }

    /// Pre-order traversal of this node and everything below it.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Validates the structural invariants of the subtree: text boxes are
    /// non-empty leaves, block containers hold only blocks or a single
    /// anonymous inline, inline boxes hold no block-level children, and
    /// box ids are pairwise distinct.
    pub fn check_consistency(&self) -> Result<(), Error> {
        let mut seen = HashSet::new();
        self.check_subtree(&mut seen)
    }

    fn check_subtree(&self, seen: &mut HashSet<BoxId>) -> Result<(), Error> {
        if !seen.insert(self.id) {
            return Err(Error::invariant(format!("duplicate box id {:?}", self.id)));
        }

        match self.kind {
            BoxKind::Text(ref text) => {
                if !self.children.is_empty() {
                    return Err(Error::invariant(format!(
                        "text box {:?} has children",
                        self.id
                    )));
                }
                if text.range.is_empty() {
                    return Err(Error::invariant(format!(
                        "text box {:?} has an empty range",
                        self.id
                    )));
                }
            }
            BoxKind::Inline | BoxKind::AnonymousInline => {
                if let Some(child) = self.children.iter().find(|c| c.is_block_level()) {
                    return Err(Error::invariant(format!(
                        "inline box {:?} holds block-level child {:?}",
                        self.id, child.id
                    )));
                }
            }
            BoxKind::Block | BoxKind::AnonymousBlock | BoxKind::InlineBlock => {
                let all_blocks = self.children.iter().all(LayoutNode::is_block_level);
                let single_anonymous_inline = matches!(
                    self.children.as_slice(),
                    [only] if matches!(only.kind, BoxKind::AnonymousInline)
                );
                if !all_blocks && !single_anonymous_inline {
                    return Err(Error::invariant(format!(
                        "block container {:?} mixes inline- and block-level children",
                        self.id
                    )));
                }
            }
        }

        for child in &self.children {
            child.check_subtree(seen)?;
        }
        Ok(())
    }

    fn print_label(&self) -> String {
        let mut label = self.kind.label();
        label.push_str(&format!(" - {:?}", self.id));
        if !self.node.is_none() {
            label.push_str(&format!(" ({:?})", self.node));
        }
        if self.is_block_level() && self.fc == FormattingContextKind::Inline {
            label.push_str(" (ifc)");
        }
        label
    }

    fn print_subtree(&self, printer: &mut PrintTree) -> io::Result<()> {
        printer.new_level(self.print_label())?;
        for child in &self.children {
            child.print_subtree(printer)?;
        }
        printer.end_level();
        Ok(())
    }

    /// Prints the box tree to stdout.
    pub fn print(&self) {
        let _ = self.print_to(&mut std::io::stdout());
    }

    /// Prints the box tree to a particular output.
    pub fn print_to(&self, dest: &mut dyn io::Write) -> io::Result<()> {
        let mut printer = PrintTree::new("Box tree", dest);
        self.print_subtree(&mut printer)
    }
}

/// A pre-order iterator over a subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a LayoutNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a LayoutNode;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
