//! Box-tree construction.
//!
//! The builder translates the render tree into a box tree that obeys the
//! CSS2 anonymous-box rules: a block container holds either only
//! block-level children or only inline-level content, mixed flows are
//! normalized by wrapping maximal inline runs in anonymous blocks, and a
//! block inside an inline splits the inline into fragments around the
//! hoisted block. All four block container kinds funnel through the same
//! normalization so the invariant is enforced in one place.

mod inline;

use self::inline::build_inline_flow;
use super::{BoxId, BoxKind, LayoutNode};
use crate::error::Error;
use crate::render_tree::{NodeId, RenderNode};
use log::trace;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Reserved configuration for `build_layout_tree`. No options are
/// recognized yet; the default value must be accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildOptions {}

/// Builds the box tree for `render_root`, which is always wrapped as a
/// top-level `Block` box regardless of its own display value.
pub fn build_layout_tree(
    render_root: &RenderNode,
    _options: BuildOptions,
) -> Result<LayoutNode, Error> {
    let mut gen = BoxIdGenerator::default();
    let root_id = gen.new_root(render_root.id);
    let root = build_block_container(&mut gen, render_root, BoxKind::Block, root_id)?;
    debug_assert!(
        root.check_consistency().is_ok(),
        "builder produced an inconsistent tree: {:?}",
        root.check_consistency()
    );
    Ok(root)
}

/// An intermediate item of a block container's flow, produced by inline
/// recursion before normalization.
#[derive(Debug)]
pub(crate) enum FlowItem {
    Inline(LayoutNode),
    Block(LayoutNode),
}

impl FlowItem {
    fn is_block(&self) -> bool {
        matches!(*self, FlowItem::Block(_))
    }

    fn into_node(self) -> LayoutNode {
        match self {
            FlowItem::Inline(node) | FlowItem::Block(node) => node,
        }
    }
}

/// Mints box ids: `child = parent × K + (sibling_index + 1)` with a fixed
/// odd multiplier, wrapping on overflow. Roots are seeded from the render
/// node id.
#[derive(Debug, Default)]
pub(crate) struct BoxIdGenerator {
    next: HashMap<BoxId, u64>,
}

const CHILD_ID_MULTIPLIER: u64 = 1103515245;

impl BoxIdGenerator {
    pub fn new_root(&mut self, node: NodeId) -> BoxId {
        Self::combine(BoxId(0), node.0)
    }

    pub fn new_child(&mut self, parent: BoxId) -> BoxId {
        let index = self.next.entry(parent).or_insert(0);
        let id = Self::combine(parent, *index);
        *index += 1;
        id
    }

    fn combine(parent: BoxId, salt: u64) -> BoxId {
        BoxId(
            parent
                .0
                .wrapping_mul(CHILD_ID_MULTIPLIER)
                .wrapping_add(salt + 1),
        )
    }
}

/// Entry point for any block container (`Block`, `AnonymousBlock`,
/// `InlineBlock`): collect the inline flow of every render child, then
/// normalize it into this container's children.
pub(crate) fn build_block_container(
    gen: &mut BoxIdGenerator,
    node: &RenderNode,
    kind: BoxKind,
    box_id: BoxId,
) -> Result<LayoutNode, Error> {
    let mut flow = Vec::with_capacity(node.children().len());
    for child in node.children() {
        flow.extend(build_inline_flow(gen, child, box_id)?);
    }
    let children = normalize_block_children(gen, flow, box_id);
    Ok(LayoutNode::new_container(box_id, node.id, kind, children))
}

/// Enforces the block container invariant on a flow:
///
/// - all blocks: adopt them directly;
/// - all inlines: wrap them in a single `AnonymousInline`;
/// - mixed: wrap each maximal inline run in an `AnonymousBlock` whose
///   sole child is an `AnonymousInline`, adopt block items in order.
fn normalize_block_children(
    gen: &mut BoxIdGenerator,
    flow: Vec<FlowItem>,
    parent: BoxId,
) -> Vec<LayoutNode> {
    if flow.is_empty() {
        return Vec::new();
    }

    let has_block = flow.iter().any(FlowItem::is_block);
    let has_inline = flow.iter().any(|item| !item.is_block());

    if has_block && !has_inline {
        return flow.into_iter().map(FlowItem::into_node).collect();
    }

    if has_inline && !has_block {
        let inlines = flow.into_iter().map(FlowItem::into_node).collect();
        return vec![wrap_in_anonymous_inline(gen, parent, inlines)];
    }

    trace!("wrapping mixed flow under {:?}", parent);
    let mut children = Vec::with_capacity(flow.len());
    let mut run: SmallVec<[LayoutNode; 8]> = SmallVec::new();
    for item in flow {
        match item {
            FlowItem::Inline(node) => run.push(node),
            FlowItem::Block(node) => {
                if !run.is_empty() {
                    children.push(wrap_inline_run_as_anonymous_block(
                        gen,
                        parent,
                        run.drain(..).collect(),
                    ));
                }
                children.push(node);
            }
        }
    }
    if !run.is_empty() {
        children.push(wrap_inline_run_as_anonymous_block(
            gen,
            parent,
            run.into_vec(),
        ));
    }
    children
}

fn wrap_in_anonymous_inline(
    gen: &mut BoxIdGenerator,
    parent: BoxId,
    inlines: Vec<LayoutNode>,
) -> LayoutNode {
    LayoutNode::new_container(
        gen.new_child(parent),
        NodeId::NONE,
        BoxKind::AnonymousInline,
        inlines,
    )
}

fn wrap_inline_run_as_anonymous_block(
    gen: &mut BoxIdGenerator,
    parent: BoxId,
    inlines: Vec<LayoutNode>,
) -> LayoutNode {
    let anonymous_block_id = gen.new_child(parent);
    let anonymous_inline = wrap_in_anonymous_inline(gen, anonymous_block_id, inlines);
    LayoutNode::new_container(
        anonymous_block_id,
        NodeId::NONE,
        BoxKind::AnonymousBlock,
        vec![anonymous_inline],
    )
}
