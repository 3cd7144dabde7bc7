//! Inline flow construction.
//!
//! Visiting a render node produces a sequence of flow items. Inline
//! content stays inline; a block-level descendant of an inline element
//! triggers split-and-hoist: the inline element is re-minted as one
//! fragment per maximal inline run (all sharing its `NodeId`) and the
//! block items surface to the nearest block container at their original
//! positions.

use super::{build_block_container, BoxIdGenerator, FlowItem};
use crate::error::Error;
use crate::layout_tree::{BoxId, BoxKind, LayoutNode};
use crate::render_tree::{NodeId, RenderNode};
use crate::style::Display;
use crate::text::{TextRange, TextRef, TextSourceId};
use log::trace;
use smallvec::SmallVec;

pub(crate) fn build_inline_flow(
    gen: &mut BoxIdGenerator,
    node: &RenderNode,
    parent_box: BoxId,
) -> Result<Vec<FlowItem>, Error> {
    let display = node.computed_style("display");
    if display == "none" {
        return Ok(Vec::new());
    }

    if node.as_text().is_some() {
        return Ok(match build_text(gen, node, parent_box) {
            Some(text) => vec![FlowItem::Inline(text)],
            None => Vec::new(),
        });
    }

    match Display::parse(display)? {
        Display::None => Ok(Vec::new()),
        Display::Inline => {
            let mut flow = Vec::with_capacity(node.children().len());
            for child in node.children() {
                flow.extend(build_inline_flow(gen, child, parent_box)?);
            }
            if flow.iter().any(FlowItem::is_block) {
                trace!("splitting inline {:?} around hoisted blocks", node.id);
                return Ok(wrap_inline_runs_for_element(gen, node.id, flow, parent_box));
            }
            let box_id = gen.new_child(parent_box);
            let children = flow.into_iter().map(FlowItem::into_node).collect();
            Ok(vec![FlowItem::Inline(LayoutNode::new_container(
                box_id,
                node.id,
                BoxKind::Inline,
                children,
            ))])
        }
        Display::InlineBlock => {
            let box_id = gen.new_child(parent_box);
            let container = build_block_container(gen, node, BoxKind::InlineBlock, box_id)?;
            Ok(vec![FlowItem::Inline(container)])
        }
        Display::Block => {
            let box_id = gen.new_child(parent_box);
            let container = build_block_container(gen, node, BoxKind::Block, box_id)?;
            Ok(vec![FlowItem::Block(container)])
        }
    }
}

/// Builds the text leaf for a render text node. Empty text yields no box
/// at all.
fn build_text(gen: &mut BoxIdGenerator, node: &RenderNode, parent_box: BoxId) -> Option<LayoutNode> {
    let data = node.as_text()?;
    if data.is_empty() {
        return None;
    }
    Some(LayoutNode::new_text(
        gen.new_child(parent_box),
        node.id,
        TextRef {
            source: TextSourceId(0),
            range: TextRange::new(0, data.len() as u64),
        },
    ))
}

/// Split-and-hoist: wrap each maximal inline run of a mixed flow in a
/// fresh `Inline` fragment carrying the split element's `NodeId`, and
/// emit hoisted blocks as-is in between.
fn wrap_inline_runs_for_element(
    gen: &mut BoxIdGenerator,
    element: NodeId,
    flow: Vec<FlowItem>,
    parent_box: BoxId,
) -> Vec<FlowItem> {
    let mut out = Vec::with_capacity(flow.len());
    let mut run: SmallVec<[LayoutNode; 8]> = SmallVec::new();

    let flush = |run: &mut SmallVec<[LayoutNode; 8]>, out: &mut Vec<FlowItem>, gen: &mut BoxIdGenerator| {
        if run.is_empty() {
            return;
        }
        out.push(FlowItem::Inline(LayoutNode::new_container(
            gen.new_child(parent_box),
            element,
            BoxKind::Inline,
            run.drain(..).collect(),
        )));
    };

    for item in flow {
        match item {
            FlowItem::Inline(node) => run.push(node),
            block @ FlowItem::Block(_) => {
                flush(&mut run, &mut out, gen);
                out.push(block);
            }
        }
    }
    flush(&mut run, &mut out, gen);
    out
}
