//! Block-flow layout: vertical stacking of block-level children, with
//! inline-only containers delegated to the external inline layouter.

use super::{
    AtomicSizer, InlineLayouter, IntrinsicMeasurer, LayoutContext, LayoutGeometry, LayoutOptions,
    LayoutResult, LineBox,
};
use crate::error::Error;
use crate::geometry::{Point, Rect, Size, Vector};
use crate::layout_tree::{BoxId, BoxKind, LayoutNode};
use crate::used_values::{UsedValues, UsedValuesTable};
use log::trace;
use std::cell::RefCell;

/// Computes border-box and content-box rectangles for every block-level
/// box under `root`, storing them in the result tables and mirroring
/// them onto the nodes afterwards. The first collaborator error aborts
/// the pass; no partial result is exposed.
pub fn flow_layout(
    root: &mut LayoutNode,
    used: &UsedValuesTable,
    inline: &dyn InlineLayouter,
    intrinsic: &dyn IntrinsicMeasurer,
    context: LayoutContext,
    _options: LayoutOptions,
) -> Result<LayoutResult, Error> {
    let env = FlowEnv {
        used,
        inline,
        intrinsic,
    };
    let mut result = LayoutResult::default();
    layout_block_container(
        root,
        BlockContext {
            available_width: context.containing_block.size.width,
        },
        &env,
        &mut result,
    )?;
    mirror_geometry(root, &result);
    Ok(result)
}

/// The read-only collaborators of one flow pass.
struct FlowEnv<'a> {
    used: &'a UsedValuesTable,
    inline: &'a dyn InlineLayouter,
    intrinsic: &'a dyn IntrinsicMeasurer,
}

/// Constraints handed down from the parent block.
#[derive(Debug, Clone, Copy)]
struct BlockContext {
    /// Width of the parent content box; only consulted by inline-blocks
    /// whose used content width is not fixed yet.
    available_width: f32,
}

fn used_or_default(table: &UsedValuesTable, id: BoxId) -> UsedValues {
    table.get(&id).copied().unwrap_or_default()
}

/// The content width this box lays out with. A positive used value wins;
/// an inline-block with an unresolved width takes the width chosen by
/// the atomic sizer.
fn effective_content_width(node: &LayoutNode, used: &UsedValues, ctx: &BlockContext) -> f32 {
    if used.content_width > 0. {
        return used.content_width;
    }
    match node.kind {
        BoxKind::InlineBlock => ctx.available_width,
        _ => used.content_width,
    }
}

/// Whether `node` is a block container whose content is a single inline
/// formatting context.
fn inline_only_child(node: &LayoutNode) -> Option<&LayoutNode> {
    match node.children.as_slice() {
        [only] if matches!(only.kind, BoxKind::AnonymousInline) => Some(only),
        _ => None,
    }
}

/// Line lists are only recorded for boxes callers can name; anonymous
/// wrappers are structurally invisible.
fn should_store_lines(node: &LayoutNode) -> bool {
    matches!(node.kind, BoxKind::Block | BoxKind::InlineBlock)
}

fn line_extent(lines: &[LineBox]) -> f32 {
    lines
        .iter()
        .fold(0., |max, line| line.frame.max_y().max(max))
}

fn layout_block_container(
    node: &LayoutNode,
    ctx: BlockContext,
    env: &FlowEnv,
    result: &mut LayoutResult,
) -> Result<(), Error> {
    if !node.is_block_level() {
        return Err(Error::invariant(format!(
            "flow layout entered non-block-level box {:?}",
            node.id
        )));
    }
    trace!("layout_block_container({:?})", node.id);

    let used = used_or_default(env.used, node.id);
    let content_width = effective_content_width(node, &used, &ctx);
    let content_origin = Point::new(
        used.border.left + used.padding.left,
        used.border.top + used.padding.top,
    );
    let frame_width = content_width + used.padding.horizontal() + used.border.horizontal();

    let content_height = if let Some(inline_root) = inline_only_child(node) {
        let lines = {
            let sizer = FlowAtomicSizer {
                env,
                result: RefCell::new(&mut *result),
            };
            env.inline
                .layout_inline(inline_root, content_width, &sizer)
                .map_err(Error::collaborator)?
        };
        let extent = line_extent(&lines);
        if should_store_lines(node) {
            result.lines.insert(node.id, lines);
        }
        extent
    } else {
        let mut y = 0.;
        for child in &node.children {
            let child_used = used_or_default(env.used, child.id);
            y += child_used.margin.top;

            layout_block_container(
                child,
                BlockContext {
                    available_width: child_used.content_width,
                },
                env,
                result,
            )?;

            let offset = Vector::new(
                content_origin.x + child_used.margin.left,
                content_origin.y + y,
            );
            let geometry = result
                .geometry
                .get_mut(&child.id)
                .expect("child laid out above");
            geometry.frame = geometry.frame.translate(offset);
            geometry.content = geometry.content.translate(offset);

            y += geometry.frame.size.height;
            y += child_used.margin.bottom;
        }
        y
    };

    let frame_height = content_height + used.padding.vertical() + used.border.vertical();
    result.geometry.insert(
        node.id,
        LayoutGeometry {
            frame: Rect::new(Point::origin(), Size::new(frame_width, frame_height)),
            content: Rect::new(content_origin, Size::new(content_width, content_height)),
        },
    );
    Ok(())
}

/// The bridge handed to the inline layouter so it can size atomic
/// inlines without knowing anything about block layout. It carries the
/// shared result tables behind a `RefCell` so it is callable through a
/// shared reference; re-entrant layout acts on a disjoint subtree, so
/// the borrow is never taken twice.
struct FlowAtomicSizer<'e, 'r> {
    env: &'e FlowEnv<'e>,
    result: RefCell<&'r mut LayoutResult>,
}

impl AtomicSizer for FlowAtomicSizer<'_, '_> {
    fn size_inline_block(&self, node: &LayoutNode, max_width: f32) -> Result<(f32, f32), Error> {
        if !matches!(node.kind, BoxKind::InlineBlock) {
            return Err(Error::not_implemented("atomic sizing of non-inline-block boxes"));
        }

        let used_width = match self.env.used.get(&node.id) {
            Some(used) if used.content_width > 0. => used.content_width,
            _ => {
                let max_content = self
                    .env
                    .intrinsic
                    .max_content_width(node)
                    .map_err(Error::collaborator)?;
                max_width.min(max_content)
            }
        };

        let mut guard = self.result.borrow_mut();
        let result: &mut LayoutResult = &mut guard;
        layout_block_container(
            node,
            BlockContext {
                available_width: used_width,
            },
            self.env,
            result,
        )?;

        let height = result
            .geometry
            .get(&node.id)
            .map_or(0., |geometry| geometry.frame.size.height);
        Ok((used_width, height))
    }
}

/// Copies the resolved rectangles from the geometry table onto the
/// nodes. The table stays the source of truth.
fn mirror_geometry(node: &mut LayoutNode, result: &LayoutResult) {
    if let Some(geometry) = result.geometry.get(&node.id) {
        node.frame = geometry.frame;
        node.content = geometry.content;
    }
    for child in &mut node.children {
        mirror_geometry(child, result);
    }
}
